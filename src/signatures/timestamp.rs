//! RFC 3161 timestamping: a `Timestamper` trait external code implements to
//! reach a real TSA, plus a deterministic offline stub for tests and for
//! document-timestamp dry runs.

use super::SignatureResult;
use crate::error::SignatureError;

/// Something that can turn a message digest into an RFC 3161
/// `TimeStampToken` (DER-encoded `ContentInfo`).
///
/// Implementations typically make a blocking HTTP call to a TSA; the core
/// never calls this during the digest phase of a signature, only between
/// `PendingSignature::digest` and `finish` (or, for PAdES-LTA, while
/// building the follow-up `/DocTimeStamp` revision).
pub trait Timestamper {
    /// Requests a timestamp token over `message_imprint`, the digest of the
    /// data being timestamped (already hashed with `digest_algorithm`).
    fn timestamp(
        &self,
        message_imprint: &[u8],
        digest_algorithm: super::DigestAlgorithm,
    ) -> SignatureResult<Vec<u8>>;
}

/// A timestamper that never calls out to a TSA: it wraps the message
/// imprint in a minimal, self-signed-looking token good enough for dry-run
/// sizing and for tests that don't need RFC 3161 conformance.
///
/// Never use this where real timestamp assurance is required; it carries no
/// cryptographic signature over the imprint.
#[derive(Debug, Default, Clone)]
pub struct OfflineTestTimestamper {
    /// A fixed token length in bytes, so size estimation behaves like a
    /// real TSA response instead of varying with the imprint length.
    pub token_len: usize,
}

impl OfflineTestTimestamper {
    /// Creates a stub timestamper whose dummy tokens are `token_len` bytes.
    pub fn new(token_len: usize) -> Self {
        Self { token_len }
    }
}

impl Timestamper for OfflineTestTimestamper {
    fn timestamp(
        &self,
        message_imprint: &[u8],
        digest_algorithm: super::DigestAlgorithm,
    ) -> SignatureResult<Vec<u8>> {
        if message_imprint.is_empty() {
            return Err(SignatureError::SigningFailed(
                "empty message imprint".to_string(),
            ));
        }
        log::debug!(
            "offline test timestamper: {} imprint bytes under {}",
            message_imprint.len(),
            digest_algorithm.name()
        );
        let mut token = message_imprint.to_vec();
        token.resize(self.token_len.max(message_imprint.len()), 0);
        Ok(token)
    }
}
