//! The signing orchestrator: resolves the target field, enforces seed-value
//! policy, picks a digest algorithm, sizes the `/Contents` reservation,
//! builds the CMS signature, and drives the incremental writer end to end.

use crate::object::{Object, PdfArray, PdfDictionary, PdfName};
use crate::parser::PdfReader;
use crate::types::ObjectId;

use super::certificate::{Certificate, PrivateKey};
use super::cms::{build_signed_data, CmsSigningRequest, UnsignedTimestamp};
use super::config::SignatureMetadata;
use super::dss::update_dss;
use super::field::{resolve_field, DocMdpPermission, FieldResolution, SeedValueConstraints};
use super::incremental::IncrementalWriter;
use super::stamp::build_appearance_stream;
use super::validation::ValidationContext;
use super::{fields, DigestAlgorithm, SignatureResult};
use crate::error::SignatureError;
use crate::types::Rectangle;

/// A configured signer: one certificate/key pair, an optional chain, and an
/// optional timestamper, reusable across any number of `sign_pdf` calls.
pub struct PdfSigner {
    certificate: Certificate,
    chain: Vec<Certificate>,
    private_key: PrivateKey,
    timestamper: Option<Box<dyn super::Timestamper>>,
}

impl PdfSigner {
    /// Creates a signer from a certificate and matching private key.
    pub fn new(certificate: Certificate, private_key: PrivateKey) -> Self {
        Self {
            certificate,
            chain: Vec::new(),
            private_key,
            timestamper: None,
        }
    }

    /// Adds an intermediate/root certificate to the chain embedded in the
    /// CMS `certificates` set.
    pub fn with_chain_certificate(mut self, cert: Certificate) -> Self {
        self.chain.push(cert);
        self
    }

    /// Attaches a timestamper; enables RFC 3161 `signature-time-stamp-token`
    /// embedding and PAdES-LTA document-timestamp chaining.
    pub fn with_timestamper(mut self, timestamper: Box<dyn super::Timestamper>) -> Self {
        self.timestamper = Some(timestamper);
        self
    }

    /// Signs `prior` per `metadata`, returning the complete signed document
    /// bytes. `bytes_reserved`, if `None`, is estimated with a dry-run CMS
    /// build per §4.4.6.
    pub fn sign_pdf(
        &self,
        prior: &PdfReader,
        metadata: &SignatureMetadata,
        bytes_reserved: Option<usize>,
    ) -> SignatureResult<Vec<u8>> {
        let resolution = resolve_field(
            prior,
            metadata.field_name.as_deref(),
            metadata.existing_fields_only,
        )?;

        let seed_values = match &resolution {
            FieldResolution::Existing { dict, .. } => SeedValueConstraints::from_field_dict(dict),
            FieldResolution::New { .. } => None,
        };

        let digest_algorithm = select_digest_algorithm(metadata, seed_values.as_ref());
        log::debug!("selected digest algorithm {}", digest_algorithm.name());

        if let Some(sv) = &seed_values {
            sv.enforce(
                &metadata.subfilter,
                digest_algorithm,
                metadata.reason.as_deref(),
                metadata.embed_validation_info,
            )?;
        }

        if metadata.certify && catalog_has_docmdp(prior) {
            log::warn!("refusing to certify: document already has a DocMDP signature");
            return Err(SignatureError::AlreadyCertified);
        }

        let mut writer = IncrementalWriter::new(prior);
        if metadata.remove_encryption {
            writer.drop_encryption();
        }

        let field_id = match &resolution {
            FieldResolution::Existing { id, .. } => {
                writer.mark_update(*id);
                *id
            }
            FieldResolution::New { name } => {
                create_signature_field(&mut writer, name, prior)?
            }
        };

        let sig_id = writer.allocate_id();
        let sig_dict = build_signature_dict(metadata, sig_id);
        writer.update_object(sig_id, Object::Dictionary(sig_dict));

        let mut field_dict = match writer.resolve(field_id) {
            Some(Object::Dictionary(d)) => d,
            _ => unreachable!("field id just resolved or created above"),
        };
        field_dict.set("V", Object::Reference(sig_id));

        if let Some(style) = &metadata.stamp_style {
            apply_visible_appearance(&mut writer, &mut field_dict, style)?;
        }

        writer.update_object(field_id, Object::Dictionary(field_dict));

        if metadata.certify {
            record_docmdp_permission(&mut writer, prior, sig_id)?;
        }

        let reserved = bytes_reserved
            .map(Ok)
            .unwrap_or_else(|| self.estimate_bytes_reserved(digest_algorithm))?;
        if reserved % 2 != 0 {
            return Err(SignatureError::OddBytesReserved(reserved));
        }

        let (mut buf, mut pending) = writer.finish(sig_id, reserved)?;
        let document_digest = pending.digest(buf.get_ref(), digest_algorithm);

        let signing_time = if metadata.include_signedtime_attr
            && metadata.subfilter != fields::SUB_FILTER_ETSI_CADES
        {
            Some(chrono::Utc::now())
        } else {
            None
        };

        let request = CmsSigningRequest {
            certificate: &self.certificate,
            chain: &self.chain,
            private_key: &self.private_key,
            digest_algorithm,
            document_digest: &document_digest,
            signing_time,
        };

        let closure = self.timestamper.as_ref().map(|ts| {
            move |signature_bytes: &[u8]| -> SignatureResult<UnsignedTimestamp> {
                let imprint = digest_algorithm.hash(signature_bytes);
                let der_bytes = ts.timestamp(&imprint, digest_algorithm)?;
                Ok(UnsignedTimestamp { der_bytes })
            }
        });
        let fetch_timestamp: Option<&dyn Fn(&[u8]) -> SignatureResult<UnsignedTimestamp>> =
            closure.as_ref().map(|c| c as &dyn Fn(&[u8]) -> SignatureResult<UnsignedTimestamp>);

        let cms_der = build_signed_data(&request, fetch_timestamp)?;
        pending.finish(&mut buf, &cms_der)?;

        let signed = buf.into_inner();

        if metadata.use_pades_lta {
            if let Some(timestamper) = &self.timestamper {
                return self.append_document_timestamp(
                    signed,
                    digest_algorithm,
                    timestamper.as_ref(),
                    metadata.validation_context.as_ref(),
                    metadata.timestamp_field_name.as_deref(),
                );
            }
            log::warn!("use_pades_lta requested but no timestamper configured; skipping");
        }

        Ok(signed)
    }

    /// §4.4.8: the signed revision is followed by its own `/DSS` revision
    /// with any recorded validation material, and only then a fresh
    /// incremental revision carrying the `/DocTimeStamp` signed-data
    /// container (the RFC 3161 token bytes as `/Contents`, no further CMS
    /// wrapping) -- three revisions, three `%%EOF` markers, in that order.
    fn append_document_timestamp(
        &self,
        signed: Vec<u8>,
        digest_algorithm: DigestAlgorithm,
        timestamper: &dyn super::Timestamper,
        validation_context: Option<&ValidationContext>,
        timestamp_field_name: Option<&str>,
    ) -> SignatureResult<Vec<u8>> {
        let with_dss = match validation_context {
            Some(context) if !context.is_empty() => {
                let reader = crate::parser::PdfReader::from_bytes(signed)
                    .map_err(|e| SignatureError::ByteRangeError(e.to_string()))?;
                let mut writer = IncrementalWriter::new(&reader);

                let dss_id = update_dss(&mut writer, context);
                let mut catalog = match writer.resolve(reader.trailer().root) {
                    Some(Object::Dictionary(d)) => d,
                    _ => PdfDictionary::new(),
                };
                catalog.set("DSS", Object::Reference(dss_id));
                writer.update_object(reader.trailer().root, Object::Dictionary(catalog));

                writer.finish_plain()?
            }
            _ => signed,
        };

        let reader = crate::parser::PdfReader::from_bytes(with_dss)
            .map_err(|e| SignatureError::ByteRangeError(e.to_string()))?;
        let mut writer = IncrementalWriter::new(&reader);

        let field_name = timestamp_field_name.unwrap_or("DocTimeStamp");
        let field_id = create_signature_field(&mut writer, field_name, &reader)?;

        let mut ts_dict = PdfDictionary::new();
        ts_dict.set("Type", Object::Name(PdfName::new_unchecked(fields::TYPE)));
        ts_dict.set("Filter", Object::Name(PdfName::new_unchecked(fields::FILTER)));
        ts_dict.set(
            "SubFilter",
            Object::Name(PdfName::new_unchecked(fields::SUB_FILTER_ETSI_RFC3161)),
        );
        ts_dict.set("ByteRange", Object::Null);
        ts_dict.set("Contents", Object::Null);
        let ts_id = writer.allocate_id();
        writer.update_object(ts_id, Object::Dictionary(ts_dict));

        let mut field_dict = match writer.resolve(field_id) {
            Some(Object::Dictionary(d)) => d,
            _ => unreachable!("field id just created above"),
        };
        field_dict.set("V", Object::Reference(ts_id));
        writer.update_object(field_id, Object::Dictionary(field_dict));

        // A dry-run-sized reservation; the RFC 3161 token itself has no
        // further margin requirement the way a CMS build does, but reusing
        // the same 50% headroom keeps one sizing rule across the crate.
        let dummy = timestamper.timestamp(&digest_algorithm.hash(&[]), digest_algorithm)?;
        let reserved = 2 * dummy.len() + 2 * (dummy.len() / 2);
        let reserved = reserved + (reserved % 2);

        let (mut buf, mut pending) = writer.finish(ts_id, reserved)?;
        let imprint = pending.digest(buf.get_ref(), digest_algorithm);
        let token = timestamper.timestamp(&imprint, digest_algorithm)?;
        pending.finish(&mut buf, &token)?;

        Ok(buf.into_inner())
    }

    /// Measures a dummy CMS build's DER length and applies the 50%-margin
    /// formula from §4.4.6: `bytes_reserved = 2L + 2*floor(L/2)`.
    fn estimate_bytes_reserved(&self, digest_algorithm: DigestAlgorithm) -> SignatureResult<usize> {
        let dummy_digest = vec![0u8; digest_algorithm.hash(&[]).len()];
        let request = CmsSigningRequest {
            certificate: &self.certificate,
            chain: &self.chain,
            private_key: &self.private_key,
            digest_algorithm,
            document_digest: &dummy_digest,
            signing_time: Some(chrono::Utc::now()),
        };
        let dummy = build_signed_data(&request, None)?;
        let l = dummy.len();
        Ok(2 * l + 2 * (l / 2))
    }
}

/// Priority order: explicit metadata choice, then the field's `/SV
/// DigestMethod` first entry, else SHA-256. Walking a prior certification
/// signature's own digest algorithm (the third tier the policy names) is
/// not implemented; defaulting to SHA-256 in that case is a conservative,
/// widely-interoperable choice recorded as an open decision.
fn select_digest_algorithm(
    metadata: &SignatureMetadata,
    seed_values: Option<&SeedValueConstraints>,
) -> DigestAlgorithm {
    if let Some(explicit) = metadata.md_algorithm {
        return explicit;
    }
    if let Some(sv) = seed_values {
        if let Some(first) = sv.digest_methods.first() {
            return *first;
        }
    }
    DigestAlgorithm::Sha256
}

/// §4.4.9: draws `style` into the field's `/AP /N`, replacing any prior
/// appearance, and removes `/AS`. Skipped when the field has no non-zero
/// `/Rect`. Mutating `field_dict` here, ahead of `writer.finish`, never
/// disturbs offsets already recorded: nothing has been serialised yet.
fn apply_visible_appearance(
    writer: &mut IncrementalWriter,
    field_dict: &mut PdfDictionary,
    style: &super::stamp::StampStyle,
) -> SignatureResult<()> {
    let rect = match field_dict.get("Rect") {
        Some(Object::Array(arr)) if arr.len() == 4 => {
            let nums: Vec<f64> = arr
                .iter()
                .filter_map(|o| match o {
                    Object::Real(n) => Some(*n),
                    Object::Integer(n) => Some(*n as f64),
                    _ => None,
                })
                .collect();
            if nums.len() != 4 {
                return Ok(());
            }
            Rectangle::new(nums[0], nums[1], nums[2], nums[3])
        }
        _ => return Ok(()),
    };

    if rect.width() <= 0.0 || rect.height() <= 0.0 {
        return Ok(());
    }

    let appearance = build_appearance_stream(rect, style)
        .map_err(|e| SignatureError::ByteRangeError(e.to_string()))?;
    let ap_id = writer.add_object(Object::Stream(appearance));

    let mut ap = PdfDictionary::new();
    ap.set("N", Object::Reference(ap_id));
    field_dict.set("AP", Object::Dictionary(ap));
    field_dict.remove("AS");
    Ok(())
}

/// Records `/Catalog/Perms/DocMDP` pointing at the certifying signature,
/// creating `/Perms` if the catalog had none.
fn record_docmdp_permission(
    writer: &mut IncrementalWriter,
    prior: &PdfReader,
    sig_id: ObjectId,
) -> SignatureResult<()> {
    let root_id = prior.trailer().root;
    let mut catalog = match writer.resolve(root_id) {
        Some(Object::Dictionary(d)) => d,
        _ => return Err(SignatureError::FieldNameRequired),
    };
    let mut perms = match catalog.get("Perms") {
        Some(Object::Reference(id)) => match writer.resolve(*id) {
            Some(Object::Dictionary(d)) => d,
            _ => PdfDictionary::new(),
        },
        Some(Object::Dictionary(d)) => d.clone(),
        _ => PdfDictionary::new(),
    };
    perms.set("DocMDP", Object::Reference(sig_id));

    match catalog.get("Perms") {
        Some(Object::Reference(id)) => writer.update_object(*id, Object::Dictionary(perms)),
        _ => catalog.set("Perms", Object::Dictionary(perms)),
    }
    writer.update_object(root_id, Object::Dictionary(catalog));
    Ok(())
}

fn catalog_has_docmdp(prior: &PdfReader) -> bool {
    let Some(catalog) = prior.catalog() else {
        return false;
    };
    matches!(catalog.get("Perms"), Some(Object::Dictionary(perms)) if perms.contains_key("DocMDP"))
}

fn build_signature_dict(metadata: &SignatureMetadata, sig_id: ObjectId) -> PdfDictionary {
    let mut dict = PdfDictionary::new();
    dict.set("Type", Object::Name(PdfName::new_unchecked(fields::TYPE)));
    dict.set("Filter", Object::Name(PdfName::new_unchecked(fields::FILTER)));
    dict.set(
        "SubFilter",
        Object::Name(PdfName::new_unchecked(metadata.subfilter.clone())),
    );
    dict.set("ByteRange", Object::Null);
    dict.set("Contents", Object::Null);
    if let Some(name) = &metadata.name {
        dict.set("Name", Object::from(name.as_str()));
    }
    if let Some(reason) = &metadata.reason {
        dict.set("Reason", Object::from(reason.as_str()));
    }
    if let Some(location) = &metadata.location {
        dict.set("Location", Object::from(location.as_str()));
    }
    if let Some(contact) = &metadata.contact_info {
        dict.set("ContactInfo", Object::from(contact.as_str()));
    }
    if metadata.certify {
        let permission = metadata.docmdp_permissions.unwrap_or(DocMdpPermission::NoChanges);
        dict.set("Reference", docmdp_reference_array(sig_id, permission));
    }
    dict
}

/// The `/Reference` array asserting a `/TransformMethod /DocMDP`
/// certification, ISO 32000-2 §12.8.2.2.
fn docmdp_reference_array(sig_id: ObjectId, permission: DocMdpPermission) -> Object {
    let mut transform_params = PdfDictionary::new();
    transform_params.set("Type", Object::Name(PdfName::new_unchecked("TransformParams")));
    transform_params.set("P", Object::Integer(permission.as_p_value()));
    transform_params.set("V", Object::Name(PdfName::new_unchecked("1.2")));

    let mut reference = PdfDictionary::new();
    reference.set("Type", Object::Name(PdfName::new_unchecked("SigRef")));
    reference.set("TransformMethod", Object::Name(PdfName::new_unchecked("DocMDP")));
    reference.set("DigestMethod", Object::Name(PdfName::new_unchecked("SHA256")));
    reference.set("TransformParams", Object::Dictionary(transform_params));
    reference.set("Data", Object::Reference(sig_id));

    Object::Array(PdfArray::from_objects(vec![Object::Dictionary(reference)]))
}

/// Creates a new, empty signature field at `/AcroForm/Fields`, creating
/// `/AcroForm` itself if the document had none. Sets `/SigFlags 3`
/// (SignaturesExist | AppendOnly).
fn create_signature_field(
    writer: &mut IncrementalWriter,
    name: &str,
    prior: &PdfReader,
) -> SignatureResult<ObjectId> {
    let mut field = PdfDictionary::new();
    field.set("FT", Object::Name(PdfName::new_unchecked("Sig")));
    field.set("T", Object::from(name));
    let field_id = writer.add_object(Object::Dictionary(field));

    let catalog = prior
        .catalog()
        .ok_or_else(|| SignatureError::FieldNameRequired)?;
    let root_id = prior.trailer().root;

    let acroform_id = match catalog.get("AcroForm") {
        Some(Object::Reference(id)) => {
            let mut acroform = match prior.resolve_reference(*id) {
                Some(Object::Dictionary(d)) => d,
                _ => PdfDictionary::new(),
            };
            let mut field_refs = match acroform.get("Fields") {
                Some(Object::Array(arr)) => arr.clone(),
                _ => crate::object::PdfArray::new(),
            };
            field_refs.push(Object::Reference(field_id));
            acroform.set("Fields", Object::Array(field_refs));
            acroform.set("SigFlags", Object::Integer(3));
            writer.update_object(*id, Object::Dictionary(acroform));
            *id
        }
        _ => {
            let mut acroform = PdfDictionary::new();
            acroform.set(
                "Fields",
                Object::Array(PdfArray::from_objects(vec![Object::Reference(field_id)])),
            );
            acroform.set("SigFlags", Object::Integer(3));
            let new_id = writer.add_object(Object::Dictionary(acroform));
            let mut updated_catalog = catalog.clone();
            updated_catalog.set("AcroForm", Object::Reference(new_id));
            writer.update_object(root_id, Object::Dictionary(updated_catalog));
            new_id
        }
    };
    log::debug!("created signature field {:?} under AcroForm {:?}", name, acroform_id);

    Ok(field_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::PdfName as Name;
    use crate::writer::PdfWriter;

    fn minimal_pdf() -> Vec<u8> {
        let mut writer = PdfWriter::create_memory("1.7");
        writer.write_header().unwrap();
        let mut catalog = PdfDictionary::new();
        catalog.set("Type", Object::Name(Name::catalog()));
        let catalog_id = writer.write_object(&Object::Dictionary(catalog)).unwrap();
        writer.write_trailer(catalog_id, None).unwrap();
        writer.into_bytes()
    }

    fn encrypted_pdf() -> Vec<u8> {
        let mut writer = PdfWriter::create_memory("1.7");
        writer.write_header().unwrap();
        let mut catalog = PdfDictionary::new();
        catalog.set("Type", Object::Name(Name::catalog()));
        let catalog_id = writer.write_object(&Object::Dictionary(catalog)).unwrap();
        let mut encrypt = PdfDictionary::new();
        encrypt.set("Filter", Object::Name(Name::new_unchecked("Standard")));
        let encrypt_id = writer.write_object(&Object::Dictionary(encrypt)).unwrap();
        writer
            .write_trailer_with_encryption(catalog_id, None, Some(encrypt_id), None)
            .unwrap();
        writer.into_bytes()
    }

    #[test]
    fn sign_pdf_rejects_a_requested_encryption_removal() {
        use super::super::testing::{TEST_RSA_CERT_PEM, TEST_RSA_KEY_PEM};
        use crate::signatures::{Certificate, PrivateKey};

        let original = encrypted_pdf();
        let prior = PdfReader::from_bytes(original).unwrap();

        let cert = Certificate::from_pem(TEST_RSA_CERT_PEM).unwrap();
        let key = PrivateKey::from_pem(TEST_RSA_KEY_PEM).unwrap();
        let signer = PdfSigner::new(cert, key);

        let metadata = SignatureMetadata::new()
            .field_name("Signature1")
            .remove_encryption(true);

        let err = signer.sign_pdf(&prior, &metadata, None).unwrap_err();
        assert!(matches!(err, SignatureError::CannotRemoveEncryption));
    }

    #[test]
    fn select_digest_algorithm_prefers_explicit_metadata() {
        let metadata = SignatureMetadata::new().md_algorithm(DigestAlgorithm::Sha512);
        assert_eq!(
            select_digest_algorithm(&metadata, None),
            DigestAlgorithm::Sha512
        );
    }

    #[test]
    fn select_digest_algorithm_falls_back_to_sha256() {
        let metadata = SignatureMetadata::new();
        assert_eq!(select_digest_algorithm(&metadata, None), DigestAlgorithm::Sha256);
    }

    #[test]
    fn catalog_has_docmdp_is_false_for_a_fresh_document() {
        let original = minimal_pdf();
        let reader = PdfReader::from_bytes(original).unwrap();
        assert!(!catalog_has_docmdp(&reader));
    }

    #[test]
    fn build_signature_dict_includes_docmdp_reference_when_certifying() {
        let metadata = SignatureMetadata::new().certify(DocMdpPermission::FormFillingAndSigning);
        let dict = build_signature_dict(&metadata, ObjectId::new(42));
        assert!(dict.contains_key("Reference"));
    }

    #[test]
    fn apply_visible_appearance_sets_ap_and_removes_as() {
        let original = minimal_pdf();
        let reader = PdfReader::from_bytes(original).unwrap();
        let mut writer = IncrementalWriter::new(&reader);

        let mut field_dict = PdfDictionary::new();
        field_dict.set(
            "Rect",
            Object::from(vec![
                Object::Real(0.0),
                Object::Real(0.0),
                Object::Real(100.0),
                Object::Real(40.0),
            ]),
        );
        field_dict.set("AS", Object::Name(Name::new_unchecked("Off")));

        let style = crate::signatures::StampStyle::with_name("Jane Doe");
        apply_visible_appearance(&mut writer, &mut field_dict, &style).unwrap();

        assert!(field_dict.contains_key("AP"));
        assert!(!field_dict.contains_key("AS"));
    }

    #[test]
    fn apply_visible_appearance_skips_a_degenerate_rect() {
        let original = minimal_pdf();
        let reader = PdfReader::from_bytes(original).unwrap();
        let mut writer = IncrementalWriter::new(&reader);

        let mut field_dict = PdfDictionary::new();
        field_dict.set(
            "Rect",
            Object::from(vec![
                Object::Real(0.0),
                Object::Real(0.0),
                Object::Real(0.0),
                Object::Real(0.0),
            ]),
        );

        let style = crate::signatures::StampStyle::with_name("Jane Doe");
        apply_visible_appearance(&mut writer, &mut field_dict, &style).unwrap();

        assert!(!field_dict.contains_key("AP"));
    }

    /// Walks `/Root/AcroForm/Fields` to find the named field's `/V` signature
    /// dictionary, the way a validator would -- `sign_pdf` never hands the
    /// caller the field/sig object ids directly.
    fn find_signature_dict(reader: &PdfReader, field_name: &str) -> PdfDictionary {
        let catalog = reader.catalog().expect("catalog");
        let acroform_id = match catalog.get("AcroForm") {
            Some(Object::Reference(id)) => *id,
            other => panic!("expected AcroForm reference, got {other:?}"),
        };
        let acroform = match reader.resolve_reference(acroform_id) {
            Some(Object::Dictionary(d)) => d,
            other => panic!("expected AcroForm dictionary, got {other:?}"),
        };
        let fields = match acroform.get("Fields") {
            Some(Object::Array(arr)) => arr.clone(),
            other => panic!("expected Fields array, got {other:?}"),
        };

        for field_ref in fields.iter() {
            let Object::Reference(field_id) = field_ref else {
                continue;
            };
            let Some(Object::Dictionary(field)) = reader.resolve_reference(*field_id) else {
                continue;
            };
            let matches_name = matches!(
                field.get("T"),
                Some(Object::String(s)) if s.as_bytes() == field_name.as_bytes()
            );
            if !matches_name {
                continue;
            }
            let Some(Object::Reference(sig_id)) = field.get("V") else {
                continue;
            };
            return match reader.resolve_reference(*sig_id) {
                Some(Object::Dictionary(d)) => d,
                other => panic!("expected signature dictionary, got {other:?}"),
            };
        }
        panic!("no field named {field_name} found");
    }

    /// Parses the four `/ByteRange` integers out of a resolved signature
    /// dictionary's `Object::Array`.
    fn byte_range_ints(sig_dict: &PdfDictionary) -> [i64; 4] {
        let Some(Object::Array(arr)) = sig_dict.get("ByteRange") else {
            panic!("expected a populated /ByteRange array");
        };
        let nums: Vec<i64> = arr
            .iter()
            .map(|o| match o {
                Object::Integer(n) => *n,
                other => panic!("expected integer in /ByteRange, got {other:?}"),
            })
            .collect();
        [nums[0], nums[1], nums[2], nums[3]]
    }

    /// The outer DER TLV's total encoded length (tag + length-of-length +
    /// content), per X.690's definite-length encoding. `/Contents` is
    /// hex-decoded padded out to `bytes_reserved` with trailing zero bytes,
    /// so the CMS decoder needs to know exactly where the real message ends.
    fn der_total_len(bytes: &[u8]) -> usize {
        let first_length_byte = bytes[1];
        if first_length_byte & 0x80 == 0 {
            2 + first_length_byte as usize
        } else {
            let num_len_bytes = (first_length_byte & 0x7f) as usize;
            let mut content_len = 0usize;
            for &b in &bytes[2..2 + num_len_bytes] {
                content_len = (content_len << 8) | b as usize;
            }
            2 + num_len_bytes + content_len
        }
    }

    #[test]
    fn sign_pdf_end_to_end_produces_a_verifiable_signature() {
        use super::super::testing::{TEST_RSA_CERT_PEM, TEST_RSA_KEY_PEM};
        use crate::signatures::{Certificate, PrivateKey};
        use der::Decode;
        use cms::content_info::ContentInfo;
        use cms::signed_data::SignedData;
        use const_oid::ObjectIdentifier;

        let original = minimal_pdf();
        let prior = PdfReader::from_bytes(original).unwrap();

        let cert = Certificate::from_pem(TEST_RSA_CERT_PEM).unwrap();
        let key = PrivateKey::from_pem(TEST_RSA_KEY_PEM).unwrap();
        let signer = PdfSigner::new(cert, key);

        let metadata = SignatureMetadata::new()
            .field_name("Signature1")
            .reason("Approved")
            .location("Testville");

        let signed = signer.sign_pdf(&prior, &metadata, None).unwrap();

        let reparsed = PdfReader::from_bytes(signed.clone()).unwrap();
        let sig_dict = find_signature_dict(&reparsed, "Signature1");

        let [a, b, c, d] = byte_range_ints(&sig_dict);
        assert_eq!(a, 0, "/ByteRange must start at 0");
        assert_eq!(
            (c + d) as usize,
            signed.len(),
            "/ByteRange's second region must reach exactly the end of the file"
        );
        assert!(b < c, "the /Contents hole must sit between the two covered regions");

        let contents = match sig_dict.get("Contents") {
            Some(Object::String(s)) => s.as_bytes().to_vec(),
            other => panic!("expected /Contents string, got {other:?}"),
        };

        let cms_len = der_total_len(&contents);
        let cms_der = &contents[..cms_len];

        let mut document_bytes = Vec::new();
        document_bytes.extend_from_slice(&signed[..b as usize]);
        document_bytes.extend_from_slice(&signed[c as usize..]);
        let expected_digest = DigestAlgorithm::Sha256.hash(&document_bytes);

        let content_info = ContentInfo::from_der(cms_der).unwrap();
        let signed_data: SignedData = content_info.content.decode_as().unwrap();
        let signer_info = signed_data.signer_infos.0.iter().next().unwrap();
        let signed_attrs = signer_info.signed_attrs.as_ref().unwrap();

        let message_digest_oid = ObjectIdentifier::new_unwrap("1.2.840.113549.1.9.4");
        let digest_attr = signed_attrs
            .iter()
            .find(|a| a.oid == message_digest_oid)
            .unwrap();
        let digest_bytes: der::asn1::OctetStringRef = digest_attr
            .values
            .iter()
            .next()
            .unwrap()
            .decode_as()
            .unwrap();
        assert_eq!(digest_bytes.as_bytes(), expected_digest.as_slice());
    }
}
