//! Document Security Store (`/DSS`) updates, ISO 32000-2 §12.8.4.3 / ETSI
//! PAdES part 4: embeds OCSP responses and CRLs as plain streams in the
//! document catalog so a PAdES-LTA chain stays self-verifying without a
//! network fetch.

use crate::object::{Object, PdfArray, PdfDictionary, PdfStream};
use crate::types::ObjectId;

use super::validation::ValidationContext;
use super::IncrementalWriter;

/// Adds or extends the catalog's `/DSS` with the revocation material in
/// `context`, as new objects in the current incremental revision.
///
/// Returns the `/DSS` dictionary's object id so the caller can point
/// `/Root /DSS` at it. Each OCSP response / CRL becomes its own indirect
/// stream object; re-running this across revisions keeps appending rather
/// than replacing, matching how PAdES-LTA accumulates evidence over time.
pub fn update_dss(writer: &mut IncrementalWriter, context: &ValidationContext) -> ObjectId {
    let (ocsp_bytes, crl_bytes) = context.all_material();

    let ocsp_ids: Vec<ObjectId> = ocsp_bytes
        .iter()
        .map(|bytes| writer.add_object(Object::Stream(PdfStream::new(bytes.to_vec()))))
        .collect();
    let crl_ids: Vec<ObjectId> = crl_bytes
        .iter()
        .map(|bytes| writer.add_object(Object::Stream(PdfStream::new(bytes.to_vec()))))
        .collect();

    let mut dss = PdfDictionary::new();
    dss.set(
        "OCSPs",
        Object::Array(PdfArray::from_objects(
            ocsp_ids.iter().map(|id| Object::Reference(*id)).collect(),
        )),
    );
    dss.set(
        "CRLs",
        Object::Array(PdfArray::from_objects(
            crl_ids.iter().map(|id| Object::Reference(*id)).collect(),
        )),
    );
    dss.set("Certs", Object::Array(PdfArray::new()));

    log::debug!(
        "updating /DSS with {} OCSP response(s), {} CRL(s)",
        ocsp_ids.len(),
        crl_ids.len()
    );

    writer.add_object(Object::Dictionary(dss))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::PdfName;
    use crate::parser::PdfReader;
    use crate::signatures::validation::RevocationInfo;
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
    fn update_dss_adds_one_stream_per_revocation_item() {
        let original = minimal_pdf();
        let reader = PdfReader::from_bytes(original).unwrap();
        let mut incremental = IncrementalWriter::new(&reader);

        let mut ctx = ValidationContext::new();
        ctx.insert(
            "CN=Test",
            RevocationInfo {
                ocsp_responses: vec![vec![1, 2, 3]],
                crls: vec![vec![4, 5]],
            },
        );

        let dss_id = update_dss(&mut incremental, &ctx);
        match incremental.resolve(dss_id) {
            Some(Object::Dictionary(d)) => {
                let ocsps = d.get("OCSPs").unwrap().as_array().unwrap();
                let crls = d.get("CRLs").unwrap().as_array().unwrap();
                assert_eq!(ocsps.len(), 1);
                assert_eq!(crls.len(), 1);
            }
            other => panic!("unexpected /DSS object: {:?}", other),
        }
    }
}
