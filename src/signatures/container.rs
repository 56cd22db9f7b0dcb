//! The two-phase signed-data container: write placeholders, hash
//! everything outside the `/Contents` hole, then patch in the real CMS
//! bytes once an external signer (or the local one) has produced them.

use std::io::{Read, Seek, SeekFrom, Write};

use crate::error::SignatureError;
use super::placeholder::{ByteRangePlaceholder, ContentsPlaceholder};
use super::{DigestAlgorithm, SignatureResult};

/// Size of the read buffer `ChunkedDigest` uses when hashing a seekable
/// stream, so digesting a large PDF never pulls the whole file into memory
/// a second time.
const CHUNK_SIZE: usize = 64 * 1024;

/// A signature dictionary that has been serialised with placeholders and is
/// waiting on its document digest to be signed.
///
/// Mirrors the write/begin/finish split of a generator-based signer: phase
/// one (`new`, built from the placeholders captured while serialising)
/// produces the digest; phase two (`finish`) patches in the real bytes once
/// the signature is ready.
#[derive(Debug)]
pub struct PendingSignature {
    byte_range: ByteRangePlaceholder,
    contents: ContentsPlaceholder,
    sig_start: u64,
    sig_end: u64,
    eof: u64,
}

impl PendingSignature {
    /// Captures the placeholder offsets recorded while writing the
    /// signature dictionary, together with the total output length.
    pub fn new(
        byte_range: ByteRangePlaceholder,
        contents: ContentsPlaceholder,
        eof: u64,
    ) -> SignatureResult<Self> {
        let sig_start = contents.start().ok_or_else(|| {
            SignatureError::ByteRangeError("contents placeholder has no recorded offset".into())
        })?;
        let sig_end = contents.end().ok_or_else(|| {
            SignatureError::ByteRangeError("contents placeholder has no recorded offset".into())
        })?;
        Ok(Self {
            byte_range,
            contents,
            sig_start,
            sig_end,
            eof,
        })
    }

    /// The four `/ByteRange` integers that will be written once `finish` is
    /// called, handy for constructing the CMS `message-digest` attribute
    /// ahead of time.
    pub fn byte_range_tuple(&self) -> (u64, u64, u64, u64) {
        (
            0,
            self.sig_start + 1,
            self.sig_end - 1,
            self.eof - (self.sig_end - 1),
        )
    }

    /// Digests an in-memory rendering of the output, skipping the
    /// `/Contents` hole `[sig_start+1, sig_end-1)`.
    pub fn digest(&self, output: &[u8], algorithm: DigestAlgorithm) -> Vec<u8> {
        let first = &output[..(self.sig_start as usize + 1)];
        let second = &output[(self.sig_end as usize - 1)..self.eof as usize];
        algorithm.hash_concat(&[first, second])
    }

    /// Digests a seekable stream (e.g. a temp file) without materialising
    /// the whole document in memory, reading in bounded chunks.
    pub fn digest_seekable<S: Read + Seek>(
        &self,
        stream: &mut S,
        algorithm: DigestAlgorithm,
    ) -> SignatureResult<Vec<u8>> {
        let mut chunked = ChunkedDigest::new(algorithm);
        chunked.feed_range(stream, 0, self.sig_start + 1)?;
        chunked.feed_range(stream, self.sig_end - 1, self.eof)?;
        Ok(chunked.finalize())
    }

    /// Patches the real `/ByteRange` offsets and CMS bytes into `stream`,
    /// completing the two-phase write.
    pub fn finish<S: Write + Seek>(&mut self, stream: &mut S, cms_bytes: &[u8]) -> SignatureResult<()> {
        self.byte_range
            .fill_offsets(stream, self.sig_start + 1, self.sig_end - 1, self.eof)?;
        self.contents.patch(stream, cms_bytes)
    }
}

/// A bounded-buffer digest accumulator for hashing byte ranges of a
/// seekable stream without reading it in one shot.
struct ChunkedDigest {
    algorithm: DigestAlgorithm,
    hasher: ChunkedHasher,
}

enum ChunkedHasher {
    Sha256(sha2::Sha256),
    Sha384(sha2::Sha384),
    Sha512(sha2::Sha512),
}

impl ChunkedDigest {
    fn new(algorithm: DigestAlgorithm) -> Self {
        use sha2::Digest;
        let hasher = match algorithm {
            DigestAlgorithm::Sha256 => ChunkedHasher::Sha256(sha2::Sha256::new()),
            DigestAlgorithm::Sha384 => ChunkedHasher::Sha384(sha2::Sha384::new()),
            DigestAlgorithm::Sha512 => ChunkedHasher::Sha512(sha2::Sha512::new()),
        };
        Self { algorithm, hasher }
    }

    fn update(&mut self, chunk: &[u8]) {
        use sha2::Digest;
        match &mut self.hasher {
            ChunkedHasher::Sha256(h) => h.update(chunk),
            ChunkedHasher::Sha384(h) => h.update(chunk),
            ChunkedHasher::Sha512(h) => h.update(chunk),
        }
    }

    /// Reads `[start, end)` from `stream` in `CHUNK_SIZE` pieces, feeding
    /// each into the running hash.
    fn feed_range<S: Read + Seek>(&mut self, stream: &mut S, start: u64, end: u64) -> SignatureResult<()> {
        stream
            .seek(SeekFrom::Start(start))
            .map_err(|e| SignatureError::ByteRangeError(e.to_string()))?;

        let mut remaining = end.saturating_sub(start) as usize;
        let mut buf = vec![0u8; CHUNK_SIZE.min(remaining.max(1))];
        while remaining > 0 {
            let to_read = remaining.min(buf.len());
            stream
                .read_exact(&mut buf[..to_read])
                .map_err(|e| SignatureError::ByteRangeError(e.to_string()))?;
            self.update(&buf[..to_read]);
            remaining -= to_read;
        }
        Ok(())
    }

    fn finalize(self) -> Vec<u8> {
        use sha2::Digest;
        match self.hasher {
            ChunkedHasher::Sha256(h) => h.finalize().to_vec(),
            ChunkedHasher::Sha384(h) => h.finalize().to_vec(),
            ChunkedHasher::Sha512(h) => h.finalize().to_vec(),
        }
    }

    #[cfg(test)]
    fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn build_pending(before: &[u8], reserved: usize, after: &[u8]) -> (Vec<u8>, PendingSignature) {
        let mut buf = Cursor::new(Vec::new());
        let mut byte_range = ByteRangePlaceholder::new();
        let mut contents = ContentsPlaceholder::new(reserved).unwrap();

        buf.write_all(before).unwrap();
        byte_range.write(&mut buf, buf.position()).unwrap();
        buf.write_all(b" ").unwrap();
        contents.write(&mut buf, buf.position()).unwrap();
        buf.write_all(after).unwrap();

        let output = buf.into_inner();
        let eof = output.len() as u64;
        let pending = PendingSignature::new(byte_range, contents, eof).unwrap();
        (output, pending)
    }

    #[test]
    fn digest_excludes_the_contents_hole() {
        let (output, pending) = build_pending(b"prefix ", 8, b" suffix");
        let in_memory = pending.digest(&output, DigestAlgorithm::Sha256);

        let mut stream = Cursor::new(output.clone());
        let seekable = pending.digest_seekable(&mut stream, DigestAlgorithm::Sha256).unwrap();

        assert_eq!(in_memory, seekable);
    }

    #[test]
    fn byte_range_tuple_matches_invariant() {
        let (output, pending) = build_pending(b"ABC", 4, b"XYZ");
        let (a, _b, c, d) = pending.byte_range_tuple();
        assert_eq!(a, 0);
        // second_region_len must cover exactly the trailing bytes.
        assert_eq!(c + d, output.len() as u64);
    }

    #[test]
    fn finish_patches_both_placeholders() {
        let (output, mut pending) = build_pending(b"head", 8, b"tail");
        let mut stream = Cursor::new(output);
        pending.finish(&mut stream, &[0xAB, 0xCD]).unwrap();

        let data = stream.into_inner();
        let text = String::from_utf8_lossy(&data);
        assert!(text.contains("<ABCD0000>"));
        assert!(text.contains("[ 00000000"));
    }

    #[test]
    fn finish_writes_byte_range_matching_the_digested_region() {
        let (output, mut pending) = build_pending(b"head", 8, b"tail");
        let (a, b, c, d) = pending.byte_range_tuple();

        let mut stream = Cursor::new(output);
        pending.finish(&mut stream, &[0xAB, 0xCD]).unwrap();
        let data = stream.into_inner();
        let text = String::from_utf8_lossy(&data);

        let rendered = format!("[ {:08} {:08} {:08} {:08} ]", a, b, c, d);
        assert!(
            text.contains(&rendered),
            "written /ByteRange {:?} should match the digested region {:?}",
            text,
            (a, b, c, d)
        );
    }

    #[test]
    fn chunked_digest_tracks_its_algorithm() {
        let chunked = ChunkedDigest::new(DigestAlgorithm::Sha384);
        assert_eq!(chunked.algorithm(), DigestAlgorithm::Sha384);
    }
}
