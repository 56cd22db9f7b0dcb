//! Incremental PDF updates: append a new revision after a prior document's
//! bytes without touching anything already written (ISO 32000 7.5.6).

use indexmap::IndexMap;
use std::io::{Cursor, Write};

use crate::error::SignatureError;
use crate::object::{Object, PdfDictionary};
use crate::parser::{find_startxref, PdfReader};
use crate::types::ObjectId;
use crate::writer::Serializer;
use super::container::PendingSignature;
use super::placeholder::{ByteRangePlaceholder, ContentsPlaceholder};
use super::SignatureResult;

/// Appends one incremental revision on top of a previously-parsed PDF.
///
/// Holds a dirty object map keyed by object id; objects not present here
/// fall back to the prior revision via [`IncrementalWriter::resolve`].
pub struct IncrementalWriter<'a> {
    prior: &'a PdfReader,
    dirty: IndexMap<ObjectId, Object>,
    next_number: u32,
    drop_encryption: bool,
}

impl<'a> IncrementalWriter<'a> {
    /// Wraps a previously-parsed document as the base of a new revision.
    pub fn new(prior: &'a PdfReader) -> Self {
        let highest = prior
            .xref()
            .iter()
            .map(|(num, _)| *num)
            .max()
            .unwrap_or(0);
        let next_number = prior.trailer().size.max(highest + 1);
        Self {
            prior,
            dirty: IndexMap::new(),
            next_number,
            drop_encryption: false,
        }
    }

    /// The prior revision this writer is appending to.
    pub fn prior(&self) -> &'a PdfReader {
        self.prior
    }

    /// Requests that the new revision's trailer omit `/Encrypt`, even if the
    /// prior revision had one. `finish`/`finish_plain` reject this with
    /// [`SignatureError::CannotRemoveEncryption`] rather than honouring it --
    /// an incremental update can never legally drop encryption (ISO 32000
    /// 7.5.6, PAdES Part 1 §5.4) -- so this exists only to make that refusal
    /// reachable for a caller that (mistakenly) asks for it.
    pub fn drop_encryption(&mut self) {
        self.drop_encryption = true;
    }

    /// Allocates a fresh object number for this revision.
    pub fn allocate_id(&mut self) -> ObjectId {
        let id = ObjectId::new(self.next_number);
        self.next_number += 1;
        id
    }

    /// Resolves an object, preferring this revision's dirty copy over the
    /// prior reader.
    pub fn resolve(&self, id: ObjectId) -> Option<Object> {
        self.dirty
            .get(&id)
            .cloned()
            .or_else(|| self.prior.resolve_reference(id))
    }

    /// Registers a brand-new object in this revision and returns its id.
    pub fn add_object(&mut self, object: Object) -> ObjectId {
        let id = self.allocate_id();
        self.dirty.insert(id, object);
        id
    }

    /// Rewrites an existing object at the same id with new content.
    pub fn update_object(&mut self, id: ObjectId, object: Object) {
        self.dirty.insert(id, object);
    }

    /// Declares that a pre-existing object is being carried forward into
    /// this revision, ahead of the `update_object` call that supplies its
    /// new content. Call sites use this to make "this object already
    /// existed" explicit rather than relying on `update_object` alone;
    /// freshly created objects (via `add_object`) never call this.
    pub fn mark_update(&mut self, id: ObjectId) {
        log::debug!("marking {} {} R for update in this revision", id.number, id.generation);
    }

    /// Writes this revision after the prior document's raw bytes.
    ///
    /// `extra_dict_entries` are written verbatim into the signature
    /// dictionary at `sig_id` (already present in the dirty map via
    /// `add_object`/`update_object` with `/ByteRange` and `/Contents` set to
    /// `Object::Null` as placeholders); this method overwrites those two
    /// keys with live placeholders while writing every other key normally.
    /// Returns the in-memory output buffer and a `PendingSignature` ready
    /// to be digested.
    pub fn finish(
        mut self,
        sig_id: ObjectId,
        bytes_reserved: usize,
    ) -> SignatureResult<(Cursor<Vec<u8>>, PendingSignature)> {
        if self.drop_encryption && self.prior.trailer().encrypt.is_some() {
            return Err(SignatureError::CannotRemoveEncryption);
        }

        let sig_dict = match self.dirty.get(&sig_id) {
            Some(Object::Dictionary(d)) => d.clone(),
            _ => {
                return Err(SignatureError::ByteRangeError(
                    "signature object is not a dictionary".to_string(),
                ))
            }
        };
        let contents = ContentsPlaceholder::new(bytes_reserved)?;

        let mut buf = Cursor::new(self.prior.raw_data().to_vec());
        buf.set_position(buf.get_ref().len() as u64);
        let mut serializer = Serializer::new(&mut buf);

        let mut offsets: Vec<(ObjectId, u64)> = Vec::new();
        let mut byte_range = ByteRangePlaceholder::new();
        let mut recorded_contents = contents;

        let sig_number = sig_id.number;
        let mut ordered: Vec<_> = self.dirty.iter().collect();
        ordered.sort_by_key(|(id, _)| id.number);

        for (id, object) in ordered {
            if id.number == sig_number {
                let offset = write_signature_object(
                    &mut serializer,
                    *id,
                    &sig_dict,
                    &mut byte_range,
                    &mut recorded_contents,
                )?;
                offsets.push((*id, offset));
            } else {
                let offset = serializer
                    .write_object(*id, object)
                    .map_err(|e| SignatureError::ByteRangeError(e.to_string()))?;
                offsets.push((*id, offset));
            }
        }

        let xref_offset = serializer.position();
        write_sparse_xref(&mut serializer, &offsets)
            .map_err(|e| SignatureError::ByteRangeError(e.to_string()))?;

        let prior_startxref = find_startxref(self.prior.raw_data())
            .map_err(|e| SignatureError::ByteRangeError(e.to_string()))?;

        write_trailer(&mut serializer, self.prior, self.next_number, prior_startxref)
            .map_err(|e| SignatureError::ByteRangeError(e.to_string()))?;

        serializer
            .write_startxref(xref_offset)
            .map_err(|e| SignatureError::ByteRangeError(e.to_string()))?;
        serializer
            .flush()
            .map_err(|e| SignatureError::ByteRangeError(e.to_string()))?;

        let eof = buf.get_ref().len() as u64;
        let pending = PendingSignature::new(byte_range, recorded_contents, eof)?;
        Ok((buf, pending))
    }

    /// Writes this revision as a plain incremental update with no signature
    /// object of its own -- just the dirty objects, a sparse xref, and a
    /// trailer pointing `/Prev` at the prior revision. Used for updates (a
    /// `/DSS` revision, say) that need their own `%%EOF` but carry no
    /// `/ByteRange`/`/Contents` placeholders to fill in later.
    pub fn finish_plain(self) -> SignatureResult<Vec<u8>> {
        if self.drop_encryption && self.prior.trailer().encrypt.is_some() {
            return Err(SignatureError::CannotRemoveEncryption);
        }

        let mut buf = Cursor::new(self.prior.raw_data().to_vec());
        buf.set_position(buf.get_ref().len() as u64);
        let mut serializer = Serializer::new(&mut buf);

        let mut offsets: Vec<(ObjectId, u64)> = Vec::new();
        let mut ordered: Vec<_> = self.dirty.iter().collect();
        ordered.sort_by_key(|(id, _)| id.number);

        for (id, object) in ordered {
            let offset = serializer
                .write_object(*id, object)
                .map_err(|e| SignatureError::ByteRangeError(e.to_string()))?;
            offsets.push((*id, offset));
        }

        let xref_offset = serializer.position();
        write_sparse_xref(&mut serializer, &offsets)
            .map_err(|e| SignatureError::ByteRangeError(e.to_string()))?;

        let prior_startxref = find_startxref(self.prior.raw_data())
            .map_err(|e| SignatureError::ByteRangeError(e.to_string()))?;

        write_trailer(&mut serializer, self.prior, self.next_number, prior_startxref)
            .map_err(|e| SignatureError::ByteRangeError(e.to_string()))?;

        serializer
            .write_startxref(xref_offset)
            .map_err(|e| SignatureError::ByteRangeError(e.to_string()))?;
        serializer
            .flush()
            .map_err(|e| SignatureError::ByteRangeError(e.to_string()))?;

        Ok(buf.into_inner())
    }
}

/// Writes `N G obj << ... >> endobj`, substituting live placeholders for
/// `/ByteRange` and `/Contents`; every other key is serialised normally.
fn write_signature_object<W: Write>(
    serializer: &mut Serializer<W>,
    id: ObjectId,
    dict: &PdfDictionary,
    byte_range: &mut ByteRangePlaceholder,
    contents: &mut ContentsPlaceholder,
) -> SignatureResult<u64> {
    let offset = serializer.position();
    serializer
        .write_str(&format!("{} {} obj\n<<", id.number, id.generation))
        .map_err(io_err)?;

    for (key, value) in dict.iter() {
        serializer.write_str(&format!(" /{} ", key)).map_err(io_err)?;
        match key.as_str() {
            "ByteRange" => {
                let pos = serializer.position();
                serializer
                    .write_str(&ByteRangePlaceholder::placeholder_string())
                    .map_err(io_err)?;
                byte_range.set_offset(pos);
            }
            "Contents" => {
                let start = serializer.position();
                serializer.write_str("<").map_err(io_err)?;
                serializer
                    .write_str(&"0".repeat(contents.bytes_reserved()))
                    .map_err(io_err)?;
                serializer.write_str(">").map_err(io_err)?;
                contents.set_offsets(start, start + 2 + contents.bytes_reserved() as u64);
            }
            _ => {
                serializer.write_str(&value.to_pdf_string()).map_err(io_err)?;
            }
        }
    }

    serializer.write_str(" >>\nendobj\n").map_err(io_err)?;
    Ok(offset)
}

fn io_err(e: std::io::Error) -> SignatureError {
    SignatureError::ByteRangeError(e.to_string())
}

/// Writes one xref subsection per touched object, leaving every
/// unmentioned object number alone (a full `0 N` section with synthetic
/// free entries would incorrectly mark untouched prior objects as freed).
fn write_sparse_xref<W: Write>(
    serializer: &mut Serializer<W>,
    offsets: &[(ObjectId, u64)],
) -> std::io::Result<()> {
    serializer.write_str("xref\n")?;
    for (id, offset) in offsets {
        serializer.write_str(&format!("{} 1\n", id.number))?;
        serializer.write_str(&format!("{:010} {:05} n \n", offset, id.generation))?;
    }
    Ok(())
}

fn write_trailer<W: Write>(
    serializer: &mut Serializer<W>,
    prior: &PdfReader,
    size: u32,
    prev: u64,
) -> std::io::Result<()> {
    serializer.write_str("trailer\n<< ")?;
    serializer.write_str(&format!("/Size {} ", size))?;
    serializer.write_str(&format!("/Root {} ", prior.trailer().root.reference_string()))?;
    if let Some(info) = prior.trailer().info {
        serializer.write_str(&format!("/Info {} ", info.reference_string()))?;
    }
    if let Some(encrypt) = prior.trailer().encrypt {
        serializer.write_str(&format!("/Encrypt {} ", encrypt.reference_string()))?;
    }
    {
        let hex = |bytes: &[u8]| bytes.iter().map(|b| format!("{:02X}", b)).collect::<String>();
        let mut fresh = [0u8; 16];
        rand::Rng::fill(&mut rand::thread_rng(), &mut fresh[..]);

        // The first ID element is preserved byte-for-byte across revisions
        // when the prior document had one; the second is always refreshed
        // (ISO 32000 14.4). A document with no prior `/ID` gets a fresh
        // first half too.
        let first = match &prior.trailer().id {
            Some((id0, _)) => hex(id0),
            None => {
                let mut fresh_first = [0u8; 16];
                rand::Rng::fill(&mut rand::thread_rng(), &mut fresh_first[..]);
                hex(&fresh_first)
            }
        };
        serializer.write_str(&format!("/ID [<{}> <{}>] ", first, hex(&fresh)))?;
    }
    serializer.write_str(&format!("/Prev {} ", prev))?;
    serializer.write_str(">>\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{PdfDictionary, PdfName};
    use crate::parser::PdfReader;
    use crate::writer::PdfWriter;

    fn minimal_pdf() -> Vec<u8> {
        let mut writer = PdfWriter::create_memory("1.7");
        writer.write_header().unwrap();
        let mut catalog = PdfDictionary::new();
        catalog.set("Type", Object::Name(PdfName::catalog()));
        let catalog_id = writer.write_object(&Object::Dictionary(catalog)).unwrap();
        writer.write_trailer(catalog_id, None).unwrap();
        writer.into_bytes()
    }

    #[test]
    fn prefix_is_preserved_byte_for_byte() {
        let original = minimal_pdf();
        let reader = PdfReader::from_bytes(original.clone()).unwrap();
        let mut incremental = IncrementalWriter::new(&reader);

        let mut sig_dict = PdfDictionary::new();
        sig_dict.set("Type", Object::Name(PdfName::new_unchecked("Sig")));
        sig_dict.set("ByteRange", Object::Null);
        sig_dict.set("Contents", Object::Null);
        let sig_id = incremental.add_object(Object::Dictionary(sig_dict));

        let (buf, _pending) = incremental.finish(sig_id, 16).unwrap();
        let output = buf.into_inner();

        assert!(output.len() > original.len());
        assert_eq!(&output[..original.len()], &original[..]);
    }

    fn encrypted_pdf() -> Vec<u8> {
        let mut writer = PdfWriter::create_memory("1.7");
        writer.write_header().unwrap();
        let mut catalog = PdfDictionary::new();
        catalog.set("Type", Object::Name(PdfName::catalog()));
        let catalog_id = writer.write_object(&Object::Dictionary(catalog)).unwrap();
        let mut encrypt = PdfDictionary::new();
        encrypt.set("Filter", Object::Name(PdfName::new_unchecked("Standard")));
        let encrypt_id = writer.write_object(&Object::Dictionary(encrypt)).unwrap();
        writer
            .write_trailer_with_encryption(catalog_id, None, Some(encrypt_id), None)
            .unwrap();
        writer.into_bytes()
    }

    #[test]
    fn finish_rejects_dropped_encryption() {
        let original = encrypted_pdf();
        let reader = PdfReader::from_bytes(original).unwrap();
        let mut incremental = IncrementalWriter::new(&reader);
        incremental.drop_encryption();

        let mut sig_dict = PdfDictionary::new();
        sig_dict.set("Type", Object::Name(PdfName::new_unchecked("Sig")));
        sig_dict.set("ByteRange", Object::Null);
        sig_dict.set("Contents", Object::Null);
        let sig_id = incremental.add_object(Object::Dictionary(sig_dict));

        let err = incremental.finish(sig_id, 16).unwrap_err();
        assert!(matches!(err, SignatureError::CannotRemoveEncryption));
    }

    #[test]
    fn finish_plain_rejects_dropped_encryption() {
        let original = encrypted_pdf();
        let reader = PdfReader::from_bytes(original).unwrap();
        let mut incremental = IncrementalWriter::new(&reader);
        incremental.drop_encryption();

        let err = incremental.finish_plain().unwrap_err();
        assert!(matches!(err, SignatureError::CannotRemoveEncryption));
    }

    #[test]
    fn finish_preserves_encryption_without_a_drop_request() {
        let original = encrypted_pdf();
        let reader = PdfReader::from_bytes(original).unwrap();
        let mut incremental = IncrementalWriter::new(&reader);

        let mut sig_dict = PdfDictionary::new();
        sig_dict.set("Type", Object::Name(PdfName::new_unchecked("Sig")));
        sig_dict.set("ByteRange", Object::Null);
        sig_dict.set("Contents", Object::Null);
        let sig_id = incremental.add_object(Object::Dictionary(sig_dict));

        let (buf, _pending) = incremental.finish(sig_id, 16).unwrap();
        let text = String::from_utf8_lossy(&buf.into_inner());
        assert!(text.contains("/Encrypt"));
    }

    #[test]
    fn next_number_continues_after_prior_objects() {
        let original = minimal_pdf();
        let reader = PdfReader::from_bytes(original).unwrap();
        let mut incremental = IncrementalWriter::new(&reader);
        let id = incremental.allocate_id();
        assert!(id.number >= 2);
    }

    #[test]
    fn resolve_prefers_dirty_copy_over_prior() {
        let original = minimal_pdf();
        let reader = PdfReader::from_bytes(original).unwrap();
        let root = reader.trailer().root;
        let mut incremental = IncrementalWriter::new(&reader);

        let mut updated = PdfDictionary::new();
        updated.set("Type", Object::Name(PdfName::catalog()));
        updated.set("Marker", Object::Integer(1));
        incremental.mark_update(root);
        incremental.update_object(root, Object::Dictionary(updated));

        match incremental.resolve(root) {
            Some(Object::Dictionary(d)) => assert_eq!(d.get("Marker"), Some(&Object::Integer(1))),
            other => panic!("unexpected resolve result: {:?}", other),
        }
    }
}
