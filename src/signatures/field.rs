//! Signature-field resolution, `/SV` seed-value enforcement, and `/Lock`
//! (FieldMDP) parsing, operating directly on the parsed object graph of the
//! prior revision rather than the document-builder's `forms` module (which
//! targets brand-new documents, not ones being incrementally signed).

use bitflags::bitflags;

use crate::error::SignatureError;
use crate::object::{Object, PdfDictionary};
use crate::parser::PdfReader;
use crate::types::ObjectId;

use super::{DigestAlgorithm, SignatureResult};

/// The outcome of resolving which signature field a signing operation
/// targets.
#[derive(Debug)]
pub enum FieldResolution {
    /// An existing, empty signature field was found or named.
    Existing { id: ObjectId, dict: PdfDictionary },
    /// No field with this name exists yet; the caller must create one.
    New { name: String },
}

/// Implements the field-selection rules: given an optional field name and
/// whether new fields may be created, finds the one field a signing
/// operation should use.
///
/// Only looks one level into `/AcroForm/Fields`; nested field hierarchies
/// (widget annotations under a non-terminal parent field) are out of scope
/// here, matching how signature fields are conventionally placed directly
/// under the form root.
pub fn resolve_field(
    prior: &PdfReader,
    field_name: Option<&str>,
    existing_fields_only: bool,
) -> SignatureResult<FieldResolution> {
    let empty_fields = collect_empty_signature_fields(prior);

    match field_name {
        None if existing_fields_only => {
            let mut names: Vec<&str> = empty_fields.iter().map(|(_, _, n)| n.as_str()).collect();
            match names.len() {
                0 => Err(SignatureError::NoEmptyFields),
                1 => {
                    let (id, dict, _) = &empty_fields[0];
                    Ok(FieldResolution::Existing {
                        id: *id,
                        dict: dict.clone(),
                    })
                }
                _ => {
                    names.sort_unstable();
                    Err(SignatureError::AmbiguousField(names.join(", ")))
                }
            }
        }
        None => Err(SignatureError::FieldNameRequired),
        Some(name) => {
            if let Some((id, dict, _)) = empty_fields.iter().find(|(_, _, n)| n == name) {
                Ok(FieldResolution::Existing {
                    id: *id,
                    dict: dict.clone(),
                })
            } else if existing_fields_only {
                Err(SignatureError::FieldNotFound(name.to_string()))
            } else {
                log::debug!("creating new signature field {:?}", name);
                Ok(FieldResolution::New {
                    name: name.to_string(),
                })
            }
        }
    }
}

/// Walks `/Root/AcroForm/Fields`, returning every signature field
/// (`/FT /Sig`) that has no `/V` entry yet, with its fully-qualified name.
fn collect_empty_signature_fields(prior: &PdfReader) -> Vec<(ObjectId, PdfDictionary, String)> {
    let mut out = Vec::new();
    let Some(catalog) = prior.catalog() else {
        return out;
    };
    let Some(Object::Reference(acroform_id)) = catalog.get("AcroForm").cloned() else {
        return out;
    };
    let Some(Object::Dictionary(acroform)) = prior.resolve_reference(acroform_id) else {
        return out;
    };
    let Some(Object::Array(fields)) = acroform.get("Fields").cloned() else {
        return out;
    };

    for entry in fields.iter() {
        let Object::Reference(id) = entry else { continue };
        let Some(Object::Dictionary(dict)) = prior.resolve_reference(*id) else {
            continue;
        };
        let is_sig = matches!(dict.get("FT"), Some(Object::Name(n)) if n.as_str() == "Sig");
        if !is_sig || dict.contains_key("V") {
            continue;
        }
        let name = match dict.get("T") {
            Some(Object::String(s)) => String::from_utf8_lossy(s.as_bytes()).to_string(),
            _ => continue,
        };
        out.push((*id, dict, name));
    }
    out
}

bitflags! {
    /// `/SV /Ff` seed-value constraint flags, ISO 32000-2 Table 235.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SeedValueFlags: u32 {
        const FILTER = 1 << 0;
        const SUBFILTER = 1 << 1;
        const V = 1 << 2;
        const REASON = 1 << 3;
        const LEGAL_ATTESTATION = 1 << 4;
        const ADD_REV_INFO = 1 << 5;
        const DIGEST_METHOD = 1 << 6;
        const URL = 1 << 7;
    }
}

/// Parsed `/SV` seed-value dictionary.
#[derive(Debug, Clone, Default)]
pub struct SeedValueConstraints {
    pub flags: SeedValueFlags,
    pub subfilters: Vec<String>,
    pub digest_methods: Vec<DigestAlgorithm>,
    pub reasons: Vec<String>,
    pub cert_required: bool,
}

impl SeedValueConstraints {
    /// Parses an `/SV` dictionary; returns `None` if the field has no `/SV`.
    pub fn from_field_dict(dict: &PdfDictionary) -> Option<Self> {
        let sv = match dict.get("SV") {
            Some(Object::Dictionary(sv)) => sv,
            _ => return None,
        };
        let flags = match sv.get("Ff") {
            Some(Object::Integer(n)) => SeedValueFlags::from_bits_truncate(*n as u32),
            _ => SeedValueFlags::empty(),
        };
        let subfilters = match sv.get("SubFilter") {
            Some(Object::Array(arr)) => arr
                .iter()
                .filter_map(|o| match o {
                    Object::Name(n) => Some(n.as_str().to_string()),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        };
        let digest_methods = match sv.get("DigestMethod") {
            Some(Object::Array(arr)) => arr
                .iter()
                .filter_map(|o| match o {
                    Object::Name(n) => DigestAlgorithm::from_name(n.as_str()),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        };
        let reasons = match sv.get("Reasons") {
            Some(Object::Array(arr)) => arr
                .iter()
                .filter_map(|o| match o {
                    Object::String(s) => Some(String::from_utf8_lossy(s.as_bytes()).to_string()),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        };
        let cert_required = sv.contains_key("Cert");
        Some(Self {
            flags,
            subfilters,
            digest_methods,
            reasons,
            cert_required,
        })
    }

    /// Returns every bit set in `/Ff` that this implementation doesn't
    /// model, per the `UnsupportedSVConstraint` rule. We model FILTER,
    /// SUBFILTER, REASON, ADD_REV_INFO, and DIGEST_METHOD.
    fn unsupported_bits(&self) -> SeedValueFlags {
        self.flags
            & !(SeedValueFlags::FILTER
                | SeedValueFlags::SUBFILTER
                | SeedValueFlags::REASON
                | SeedValueFlags::ADD_REV_INFO
                | SeedValueFlags::DIGEST_METHOD)
    }

    /// Enforces every modelled mandatory constraint against the signing
    /// request's chosen subfilter/digest/reason/revocation-info settings.
    pub fn enforce(
        &self,
        subfilter: &str,
        digest: DigestAlgorithm,
        reason: Option<&str>,
        embed_validation_info: bool,
    ) -> SignatureResult<()> {
        let unsupported = self.unsupported_bits();
        if !unsupported.is_empty() {
            log::warn!("seed value dictionary sets unsupported bits: {:?}", unsupported);
            return Err(SignatureError::UnsupportedSVConstraint(format!(
                "{:?}",
                unsupported
            )));
        }

        if self.flags.contains(SeedValueFlags::SUBFILTER) {
            if let Some(first) = self.subfilters.first() {
                if first != subfilter {
                    return Err(SignatureError::SeedValueViolation(format!(
                        "subfilter must be {}, got {}",
                        first, subfilter
                    )));
                }
            }
        }

        if self.flags.contains(SeedValueFlags::DIGEST_METHOD)
            && !self.digest_methods.is_empty()
            && !self.digest_methods.contains(&digest)
        {
            return Err(SignatureError::SeedValueViolation(format!(
                "digest method {} not in allowed set",
                digest.name()
            )));
        }

        if self.flags.contains(SeedValueFlags::REASON) {
            let reasons_forbid_any = self.reasons.is_empty() || self.reasons == ["."];
            if reasons_forbid_any && reason.is_some() {
                return Err(SignatureError::SeedValueViolation(
                    "reason must be absent".to_string(),
                ));
            }
            if !reasons_forbid_any {
                match reason {
                    Some(r) if self.reasons.iter().any(|allowed| allowed == r) => {}
                    _ => {
                        return Err(SignatureError::SeedValueViolation(
                            "reason not in allowed set".to_string(),
                        ))
                    }
                }
            }
        }

        if self.flags.contains(SeedValueFlags::ADD_REV_INFO) {
            if !embed_validation_info {
                return Err(SignatureError::SeedValueViolation(
                    "field requires embedded revocation info".to_string(),
                ));
            }
            if subfilter != super::fields::SUB_FILTER_PKCS7_DETACHED {
                return Err(SignatureError::SeedValueViolation(
                    "revocation info requires adbe.pkcs7.detached".to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// DocMDP permission level, ISO 32000-2 Table 254.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DocMdpPermission {
    /// No further changes permitted (`P = 1`).
    NoChanges,
    /// Form fill-in and digital signatures only (`P = 2`).
    FormFillingAndSigning,
    /// Form fill-in, digital signatures, and annotations (`P = 3`).
    FormFillingSigningAndAnnotations,
}

impl DocMdpPermission {
    /// The integer `P` value written into the transform parameters.
    pub fn as_p_value(&self) -> i64 {
        match self {
            DocMdpPermission::NoChanges => 1,
            DocMdpPermission::FormFillingAndSigning => 2,
            DocMdpPermission::FormFillingSigningAndAnnotations => 3,
        }
    }

    /// The stricter of two levels (lower `P` wins), used when a field lock
    /// and the metadata both assert a DocMDP permission.
    pub fn tightest(self, other: Self) -> Self {
        self.min(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sv_dict(ff: i64, subfilters: Vec<&str>) -> PdfDictionary {
        let mut sv = PdfDictionary::new();
        sv.set("Ff", Object::Integer(ff));
        sv.set(
            "SubFilter",
            Object::from(
                subfilters
                    .into_iter()
                    .map(|s| Object::Name(crate::object::PdfName::new_unchecked(s)))
                    .collect::<Vec<_>>(),
            ),
        );
        sv
    }

    #[test]
    fn enforce_rejects_mismatched_subfilter() {
        let sv = sv_dict(SeedValueFlags::SUBFILTER.bits() as i64, vec!["adbe.pkcs7.detached"]);
        let constraints = SeedValueConstraints::from_field_dict(&{
            let mut d = PdfDictionary::new();
            d.set("SV", Object::Dictionary(sv));
            d
        })
        .unwrap();

        let err = constraints
            .enforce("ETSI.CAdES.detached", DigestAlgorithm::Sha256, None, false)
            .unwrap_err();
        assert!(matches!(err, SignatureError::SeedValueViolation(_)));
    }

    #[test]
    fn enforce_rejects_unsupported_bits() {
        let sv = sv_dict(SeedValueFlags::URL.bits() as i64, vec![]);
        let constraints = SeedValueConstraints::from_field_dict(&{
            let mut d = PdfDictionary::new();
            d.set("SV", Object::Dictionary(sv));
            d
        })
        .unwrap();

        let err = constraints
            .enforce("adbe.pkcs7.detached", DigestAlgorithm::Sha256, None, false)
            .unwrap_err();
        assert!(matches!(err, SignatureError::UnsupportedSVConstraint(_)));
    }

    #[test]
    fn enforce_rejects_add_rev_info_without_embedded_validation() {
        let sv = sv_dict(SeedValueFlags::ADD_REV_INFO.bits() as i64, vec![]);
        let constraints = SeedValueConstraints::from_field_dict(&{
            let mut d = PdfDictionary::new();
            d.set("SV", Object::Dictionary(sv));
            d
        })
        .unwrap();

        let err = constraints
            .enforce("adbe.pkcs7.detached", DigestAlgorithm::Sha256, None, false)
            .unwrap_err();
        assert!(matches!(err, SignatureError::SeedValueViolation(_)));

        constraints
            .enforce("adbe.pkcs7.detached", DigestAlgorithm::Sha256, None, true)
            .unwrap();
    }

    #[test]
    fn docmdp_tightest_prefers_lower_permission() {
        assert_eq!(
            DocMdpPermission::FormFillingSigningAndAnnotations
                .tightest(DocMdpPermission::NoChanges),
            DocMdpPermission::NoChanges
        );
    }
}
