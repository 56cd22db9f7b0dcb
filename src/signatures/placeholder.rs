//! Fixed-width placeholder values written into a signature dictionary
//! before the real byte range and CMS bytes are known.

use crate::error::SignatureError;
use super::SignatureResult;
use std::io::{Seek, SeekFrom, Write};

/// Width, in bytes, of the serialised `/ByteRange` literal
/// `[ %08d %08d %08d %08d ]`. Each of the four integers is zero-padded to
/// eight digits, which caps the addressable file size at just under 100 MB
/// per region; real-world PDFs this tool signs stay well under that.
pub const BYTE_RANGE_WIDTH: usize = 39;

/// The `/ByteRange [0 ... ]` placeholder.
///
/// Writes as a string of fixed width so that the real offsets can be
/// patched in later without shifting anything that follows it in the file.
#[derive(Debug, Default, Clone, Copy)]
pub struct ByteRangePlaceholder {
    offset: Option<u64>,
    filled: bool,
}

impl ByteRangePlaceholder {
    /// Creates an unwritten placeholder.
    pub fn new() -> Self {
        Self {
            offset: None,
            filled: false,
        }
    }

    /// Renders the zeroed placeholder literal.
    pub fn placeholder_string() -> String {
        format!("[ {:08} {:08} {:08} {:08} ]", 0, 0, 0, 0)
    }

    /// Writes the placeholder and records the byte offset it started at.
    pub fn write<W: Write>(&mut self, writer: &mut W, position: u64) -> SignatureResult<()> {
        self.offset = Some(position);
        writer
            .write_all(Self::placeholder_string().as_bytes())
            .map_err(|e| SignatureError::ByteRangeError(e.to_string()))
    }

    /// Seeks back to the recorded offset and rewrites the four real
    /// integers, then restores the stream position. `first_region_end`/
    /// `second_region_start` are the digested-region boundaries around the
    /// `/Contents` hole (one past the `<`, and the `>` itself -- i.e.
    /// `sig_start+1`/`sig_end-1`, matching the region [`PendingSignature::digest`]
    /// hashes), not the raw `<`/`>` offsets themselves; `eof` is the total
    /// output length.
    pub fn fill_offsets<S: Write + Seek>(
        &mut self,
        stream: &mut S,
        first_region_end: u64,
        second_region_start: u64,
        eof: u64,
    ) -> SignatureResult<()> {
        if self.filled {
            return Err(SignatureError::ByteRangeError(
                "byte range offsets already filled".to_string(),
            ));
        }
        let offset = self
            .offset
            .ok_or_else(|| SignatureError::ByteRangeError("no recorded offset".to_string()))?;

        let second_region_len = eof.saturating_sub(second_region_start);
        let rendered = format!(
            "[ {:08} {:08} {:08} {:08} ]",
            0, first_region_end, second_region_start, second_region_len
        );
        debug_assert_eq!(rendered.len(), BYTE_RANGE_WIDTH);

        let old_pos = stream
            .stream_position()
            .map_err(|e| SignatureError::ByteRangeError(e.to_string()))?;
        stream
            .seek(SeekFrom::Start(offset))
            .map_err(|e| SignatureError::ByteRangeError(e.to_string()))?;
        stream
            .write_all(rendered.as_bytes())
            .map_err(|e| SignatureError::ByteRangeError(e.to_string()))?;
        stream
            .seek(SeekFrom::Start(old_pos))
            .map_err(|e| SignatureError::ByteRangeError(e.to_string()))?;

        self.filled = true;
        Ok(())
    }

    /// Byte offset where this placeholder was written, if any.
    pub fn offset(&self) -> Option<u64> {
        self.offset
    }

    /// Records the offset directly, for callers that write the placeholder
    /// bytes themselves (e.g. through a higher-level object serializer that
    /// isn't a plain `std::io::Write`).
    pub fn set_offset(&mut self, offset: u64) {
        self.offset = Some(offset);
    }
}

/// The `/Contents <0000...>` hex-string placeholder.
///
/// Reserves `bytes_reserved` ASCII `'0'` characters between angle brackets;
/// the real CMS DER bytes are later hex-encoded and patched in.
#[derive(Debug, Clone)]
pub struct ContentsPlaceholder {
    bytes_reserved: usize,
    /// Offset of the leading `<`.
    start: Option<u64>,
    /// Offset one past the trailing `>`.
    end: Option<u64>,
}

impl ContentsPlaceholder {
    /// Creates a placeholder reserving `bytes_reserved` bytes of hex digits.
    /// `bytes_reserved` must be even, since each CMS byte encodes to two
    /// hex characters.
    pub fn new(bytes_reserved: usize) -> SignatureResult<Self> {
        if bytes_reserved % 2 != 0 {
            return Err(SignatureError::OddBytesReserved(bytes_reserved));
        }
        Ok(Self {
            bytes_reserved,
            start: None,
            end: None,
        })
    }

    /// The reserved width in hex characters (not counting the brackets).
    pub fn bytes_reserved(&self) -> usize {
        self.bytes_reserved
    }

    /// Writes the zeroed placeholder and records the `<`/`>` offsets.
    pub fn write<W: Write>(&mut self, writer: &mut W, position: u64) -> SignatureResult<()> {
        self.start = Some(position);
        writer
            .write_all(b"<")
            .map_err(|e| SignatureError::ByteRangeError(e.to_string()))?;
        writer
            .write_all(&vec![b'0'; self.bytes_reserved])
            .map_err(|e| SignatureError::ByteRangeError(e.to_string()))?;
        writer
            .write_all(b">")
            .map_err(|e| SignatureError::ByteRangeError(e.to_string()))?;
        self.end = Some(position + 1 + self.bytes_reserved as u64 + 1);
        Ok(())
    }

    /// Offset of the leading `<`.
    pub fn start(&self) -> Option<u64> {
        self.start
    }

    /// Offset one past the trailing `>`.
    pub fn end(&self) -> Option<u64> {
        self.end
    }

    /// Records the `<`/`>` offsets directly, for callers that write the
    /// placeholder bytes themselves.
    pub fn set_offsets(&mut self, start: u64, end: u64) {
        self.start = Some(start);
        self.end = Some(end);
    }

    /// Seeks to the reserved region and writes the uppercase hex encoding of
    /// `cms_bytes`, right-padded with `'0'` to fill exactly
    /// `bytes_reserved` characters.
    pub fn patch<S: Write + Seek>(&self, stream: &mut S, cms_bytes: &[u8]) -> SignatureResult<()> {
        let start = self
            .start
            .ok_or_else(|| SignatureError::ByteRangeError("no recorded offset".to_string()))?;

        if cms_bytes.len() * 2 > self.bytes_reserved {
            return Err(SignatureError::TooLarge {
                actual: cms_bytes.len(),
                reserved: self.bytes_reserved,
            });
        }

        let mut hex: String = cms_bytes.iter().map(|b| format!("{:02X}", b)).collect();
        hex.push_str(&"0".repeat(self.bytes_reserved - hex.len()));
        debug_assert_eq!(hex.len(), self.bytes_reserved);

        let old_pos = stream
            .stream_position()
            .map_err(|e| SignatureError::ByteRangeError(e.to_string()))?;
        stream
            .seek(SeekFrom::Start(start + 1))
            .map_err(|e| SignatureError::ByteRangeError(e.to_string()))?;
        stream
            .write_all(hex.as_bytes())
            .map_err(|e| SignatureError::ByteRangeError(e.to_string()))?;
        stream
            .seek(SeekFrom::Start(old_pos))
            .map_err(|e| SignatureError::ByteRangeError(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn byte_range_placeholder_has_fixed_width() {
        assert_eq!(ByteRangePlaceholder::placeholder_string().len(), BYTE_RANGE_WIDTH);
    }

    #[test]
    fn byte_range_fill_offsets_preserves_width_and_position() {
        let mut buf = Cursor::new(vec![0u8; 0]);
        let mut placeholder = ByteRangePlaceholder::new();
        placeholder.write(&mut buf, 0).unwrap();
        buf.write_all(b"tail").unwrap();

        let before = buf.stream_position().unwrap();
        placeholder.fill_offsets(&mut buf, 10, 20, 100).unwrap();
        assert_eq!(buf.stream_position().unwrap(), before);

        let data = buf.into_inner();
        let rendered = String::from_utf8(data[..BYTE_RANGE_WIDTH].to_vec()).unwrap();
        assert_eq!(rendered, "[ 00000000 00000010 00000020 00000080 ]");
    }

    #[test]
    fn byte_range_refuses_double_fill() {
        let mut buf = Cursor::new(Vec::new());
        let mut placeholder = ByteRangePlaceholder::new();
        placeholder.write(&mut buf, 0).unwrap();
        placeholder.fill_offsets(&mut buf, 1, 2, 3).unwrap();
        let err = placeholder.fill_offsets(&mut buf, 1, 2, 3).unwrap_err();
        assert!(matches!(err, SignatureError::ByteRangeError(_)));
    }

    #[test]
    fn contents_placeholder_rejects_odd_reservation() {
        assert!(matches!(
            ContentsPlaceholder::new(17),
            Err(SignatureError::OddBytesReserved(17))
        ));
    }

    #[test]
    fn contents_placeholder_patch_pads_and_uppercases() {
        let mut buf = Cursor::new(Vec::new());
        let mut placeholder = ContentsPlaceholder::new(8).unwrap();
        placeholder.write(&mut buf, 0).unwrap();

        placeholder.patch(&mut buf, &[0xde, 0xad]).unwrap();
        let data = buf.into_inner();
        assert_eq!(&data, b"<DEAD0000>");
    }

    #[test]
    fn contents_placeholder_too_large_fails() {
        let mut buf = Cursor::new(Vec::new());
        let mut placeholder = ContentsPlaceholder::new(2).unwrap();
        placeholder.write(&mut buf, 0).unwrap();

        let err = placeholder.patch(&mut buf, &[0x01, 0x02]).unwrap_err();
        assert!(matches!(err, SignatureError::TooLarge { .. }));
    }
}
