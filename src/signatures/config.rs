//! Signature configuration.

use super::field::DocMdpPermission;
use super::stamp::StampStyle;
use super::validation::ValidationContext;
use super::{fields, DigestAlgorithm, SignatureAlgorithm};

/// Configuration for PDF digital signatures.
#[derive(Debug, Clone)]
pub struct SignatureConfig {
    /// The signer's name.
    pub name: Option<String>,
    /// Reason for signing.
    pub reason: Option<String>,
    /// Location of signing.
    pub location: Option<String>,
    /// Contact information.
    pub contact_info: Option<String>,
    /// The signature algorithm to use.
    pub algorithm: SignatureAlgorithm,
    /// Whether to embed the full certificate chain.
    pub embed_certificate_chain: bool,
    /// Reserved space for the signature (in bytes).
    /// Should be large enough to hold the PKCS#7 signature.
    pub signature_size: usize,
}

impl SignatureConfig {
    /// Creates a new signature configuration with default settings.
    pub fn new() -> Self {
        Self {
            name: None,
            reason: None,
            location: None,
            contact_info: None,
            algorithm: SignatureAlgorithm::default(),
            embed_certificate_chain: true,
            signature_size: 8192, // Default 8KB for signature
        }
    }

    /// Sets the signer's name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the reason for signing.
    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Sets the location of signing.
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Sets contact information.
    pub fn contact_info(mut self, info: impl Into<String>) -> Self {
        self.contact_info = Some(info.into());
        self
    }

    /// Sets the signature algorithm.
    pub fn algorithm(mut self, algo: SignatureAlgorithm) -> Self {
        self.algorithm = algo;
        self
    }

    /// Sets whether to embed the full certificate chain.
    pub fn embed_certificate_chain(mut self, embed: bool) -> Self {
        self.embed_certificate_chain = embed;
        self
    }

    /// Sets the reserved signature size in bytes.
    pub fn signature_size(mut self, size: usize) -> Self {
        self.signature_size = size;
        self
    }
}

impl Default for SignatureConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable per-invocation signing metadata: which field to sign, how,
/// and under what policy. Built once per `sign_pdf` call through a fluent
/// builder, matching this crate's `EncryptionConfig`/`SignatureConfig`
/// pattern.
#[derive(Debug, Clone, Default)]
pub struct SignatureMetadata {
    /// The signature field to use; `None` only valid with
    /// `existing_fields_only = true` and exactly one empty field present.
    pub field_name: Option<String>,
    /// Explicit digest algorithm; otherwise resolved per the priority order
    /// in the field/seed-value/prior-certification chain.
    pub md_algorithm: Option<DigestAlgorithm>,
    pub location: Option<String>,
    pub reason: Option<String>,
    pub name: Option<String>,
    pub contact_info: Option<String>,
    /// Only an existing empty field may be used; no new field is created.
    pub existing_fields_only: bool,
    /// Whether this signature asserts a `/DocMDP` certification.
    pub certify: bool,
    pub docmdp_permissions: Option<DocMdpPermission>,
    /// One of the `signatures::fields::SUB_FILTER_*` constants.
    pub subfilter: String,
    pub embed_validation_info: bool,
    pub use_pades_lta: bool,
    pub timestamp_field_name: Option<String>,
    pub validation_context: Option<ValidationContext>,
    pub include_signedtime_attr: bool,
    /// Visible-appearance content; only drawn when the target field has a
    /// non-degenerate `/Rect`.
    pub stamp_style: Option<StampStyle>,
    /// Requests that the incremental update drop `/Encrypt` from the
    /// trailer. Always rejected with `CannotRemoveEncryption` when the prior
    /// document was encrypted; an incremental update can never legally
    /// remove encryption.
    pub remove_encryption: bool,
}

impl SignatureMetadata {
    /// A new metadata value defaulting to `adbe.pkcs7.detached`, SHA-256,
    /// no certification, no PAdES-LTA, signing-time included.
    pub fn new() -> Self {
        Self {
            subfilter: fields::SUB_FILTER_PKCS7_DETACHED.to_string(),
            include_signedtime_attr: true,
            ..Default::default()
        }
    }

    pub fn field_name(mut self, name: impl Into<String>) -> Self {
        self.field_name = Some(name.into());
        self
    }

    pub fn md_algorithm(mut self, algorithm: DigestAlgorithm) -> Self {
        self.md_algorithm = Some(algorithm);
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn contact_info(mut self, info: impl Into<String>) -> Self {
        self.contact_info = Some(info.into());
        self
    }

    pub fn existing_fields_only(mut self, only: bool) -> Self {
        self.existing_fields_only = only;
        self
    }

    pub fn certify(mut self, permission: DocMdpPermission) -> Self {
        self.certify = true;
        self.docmdp_permissions = Some(permission);
        self
    }

    pub fn subfilter(mut self, subfilter: impl Into<String>) -> Self {
        self.subfilter = subfilter.into();
        self
    }

    pub fn embed_validation_info(mut self, embed: bool) -> Self {
        self.embed_validation_info = embed;
        self
    }

    pub fn use_pades_lta(mut self, enabled: bool) -> Self {
        self.use_pades_lta = enabled;
        self
    }

    pub fn timestamp_field_name(mut self, name: impl Into<String>) -> Self {
        self.timestamp_field_name = Some(name.into());
        self
    }

    pub fn validation_context(mut self, context: ValidationContext) -> Self {
        self.validation_context = Some(context);
        self
    }

    pub fn include_signedtime_attr(mut self, include: bool) -> Self {
        self.include_signedtime_attr = include;
        self
    }

    pub fn stamp_style(mut self, style: StampStyle) -> Self {
        self.stamp_style = Some(style);
        self
    }

    /// Requests that the new revision drop `/Encrypt`. This will always be
    /// rejected when the prior document was encrypted; the setter exists so
    /// a caller's mistaken attempt surfaces as `CannotRemoveEncryption`
    /// rather than silently stripping encryption.
    pub fn remove_encryption(mut self, remove: bool) -> Self {
        self.remove_encryption = remove;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_metadata_defaults_to_pkcs7_detached_sha256_time_on() {
        let metadata = SignatureMetadata::new();
        assert_eq!(metadata.subfilter, fields::SUB_FILTER_PKCS7_DETACHED);
        assert!(metadata.include_signedtime_attr);
        assert!(metadata.md_algorithm.is_none());
    }

    #[test]
    fn remove_encryption_defaults_to_false() {
        let metadata = SignatureMetadata::new().remove_encryption(true);
        assert!(metadata.remove_encryption);
        assert!(!SignatureMetadata::new().remove_encryption);
    }

    #[test]
    fn certify_sets_both_flag_and_permission() {
        let metadata = SignatureMetadata::new().certify(DocMdpPermission::NoChanges);
        assert!(metadata.certify);
        assert_eq!(metadata.docmdp_permissions, Some(DocMdpPermission::NoChanges));
    }

    #[test]
    fn test_signature_config_builder() {
        let config = SignatureConfig::new()
            .name("John Doe")
            .reason("Document approval")
            .location("San Francisco, CA")
            .contact_info("john@example.com")
            .algorithm(SignatureAlgorithm::RsaSha256)
            .signature_size(16384);

        assert_eq!(config.name, Some("John Doe".to_string()));
        assert_eq!(config.reason, Some("Document approval".to_string()));
        assert_eq!(config.location, Some("San Francisco, CA".to_string()));
        assert_eq!(config.contact_info, Some("john@example.com".to_string()));
        assert_eq!(config.algorithm, SignatureAlgorithm::RsaSha256);
        assert_eq!(config.signature_size, 16384);
    }

    #[test]
    fn test_signature_config_default() {
        let config = SignatureConfig::default();
        assert!(config.name.is_none());
        assert!(config.reason.is_none());
        assert_eq!(config.signature_size, 8192);
        assert!(config.embed_certificate_chain);
    }
}
