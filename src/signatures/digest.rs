//! Message-digest algorithm selection shared by the signed-data container,
//! the CMS builder, and the PAdES-LTA timestamp chain.

use sha2::{Digest as _, Sha256, Sha384, Sha512};

/// A digest algorithm usable for the document hash and the CMS
/// `message-digest` signed attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestAlgorithm {
    /// SHA-256, the default.
    Sha256,
    /// SHA-384.
    Sha384,
    /// SHA-512.
    Sha512,
}

impl DigestAlgorithm {
    /// The RFC 5754 OID dotted string for this digest.
    pub fn oid(&self) -> &'static str {
        match self {
            DigestAlgorithm::Sha256 => "2.16.840.1.101.3.4.2.1",
            DigestAlgorithm::Sha384 => "2.16.840.1.101.3.4.2.2",
            DigestAlgorithm::Sha512 => "2.16.840.1.101.3.4.2.3",
        }
    }

    /// The lowercase name used in `/SV /DigestMethod` arrays and metadata.
    pub fn name(&self) -> &'static str {
        match self {
            DigestAlgorithm::Sha256 => "sha256",
            DigestAlgorithm::Sha384 => "sha384",
            DigestAlgorithm::Sha512 => "sha512",
        }
    }

    /// Parses a `/SV /DigestMethod` entry or metadata value.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "sha256" | "sha-256" => Some(DigestAlgorithm::Sha256),
            "sha384" | "sha-384" => Some(DigestAlgorithm::Sha384),
            "sha512" | "sha-512" => Some(DigestAlgorithm::Sha512),
            _ => None,
        }
    }

    /// Hashes a single buffer.
    pub fn hash(&self, data: &[u8]) -> Vec<u8> {
        self.hash_concat(&[data])
    }

    /// Hashes the concatenation of several buffers without copying them
    /// into one contiguous allocation first.
    pub fn hash_concat(&self, parts: &[&[u8]]) -> Vec<u8> {
        match self {
            DigestAlgorithm::Sha256 => {
                let mut hasher = Sha256::new();
                for part in parts {
                    hasher.update(part);
                }
                hasher.finalize().to_vec()
            }
            DigestAlgorithm::Sha384 => {
                let mut hasher = Sha384::new();
                for part in parts {
                    hasher.update(part);
                }
                hasher.finalize().to_vec()
            }
            DigestAlgorithm::Sha512 => {
                let mut hasher = Sha512::new();
                for part in parts {
                    hasher.update(part);
                }
                hasher.finalize().to_vec()
            }
        }
    }
}

impl Default for DigestAlgorithm {
    fn default() -> Self {
        DigestAlgorithm::Sha256
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name_is_case_insensitive() {
        assert_eq!(DigestAlgorithm::from_name("SHA256"), Some(DigestAlgorithm::Sha256));
        assert_eq!(DigestAlgorithm::from_name("sha-384"), Some(DigestAlgorithm::Sha384));
        assert_eq!(DigestAlgorithm::from_name("bogus"), None);
    }

    #[test]
    fn hash_concat_matches_hash_of_joined_buffers() {
        let a = b"hello ";
        let b = b"world";
        let mut joined = Vec::new();
        joined.extend_from_slice(a);
        joined.extend_from_slice(b);

        assert_eq!(
            DigestAlgorithm::Sha256.hash_concat(&[a, b]),
            DigestAlgorithm::Sha256.hash(&joined)
        );
    }
}
