//! Minimal in-memory validation context: the revocation material (OCSP
//! responses, CRLs) an Adobe revocation-info attribute or a DSS update
//! draws from. Fetching this material from a network PKI service is out of
//! scope; callers populate it ahead of time.

/// Revocation evidence for one certificate in the signer's chain.
#[derive(Debug, Clone, Default)]
pub struct RevocationInfo {
    /// DER-encoded OCSP responses covering this certificate.
    pub ocsp_responses: Vec<Vec<u8>>,
    /// DER-encoded CRLs covering this certificate.
    pub crls: Vec<Vec<u8>>,
}

/// A caller-supplied bundle of revocation evidence for the whole chain,
/// keyed by certificate subject name (matching `Certificate::subject_name`).
///
/// This is intentionally a dumb container: no path building, no freshness
/// checking, no signature verification of the OCSP/CRL responses
/// themselves. Those concerns belong to whatever PKI client populates it.
#[derive(Debug, Clone, Default)]
pub struct ValidationContext {
    entries: Vec<(String, RevocationInfo)>,
}

impl ValidationContext {
    /// Creates an empty validation context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records revocation evidence for a certificate subject.
    pub fn insert(&mut self, subject_name: impl Into<String>, info: RevocationInfo) {
        self.entries.push((subject_name.into(), info));
    }

    /// Looks up revocation evidence for a certificate subject.
    pub fn get(&self, subject_name: &str) -> Option<&RevocationInfo> {
        self.entries
            .iter()
            .find(|(name, _)| name == subject_name)
            .map(|(_, info)| info)
    }

    /// Whether any revocation evidence has been recorded at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All OCSP responses and CRLs across every recorded subject, for
    /// embedding into a DSS update or an Adobe revocation-info attribute.
    pub fn all_material(&self) -> (Vec<&[u8]>, Vec<&[u8]>) {
        let mut ocsp = Vec::new();
        let mut crls = Vec::new();
        for (_, info) in &self.entries {
            ocsp.extend(info.ocsp_responses.iter().map(|v| v.as_slice()));
            crls.extend(info.crls.iter().map(|v| v.as_slice()));
        }
        (ocsp, crls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_subject_name_round_trips() {
        let mut ctx = ValidationContext::new();
        ctx.insert(
            "CN=Test Signer",
            RevocationInfo {
                ocsp_responses: vec![vec![1, 2, 3]],
                crls: vec![],
            },
        );
        let info = ctx.get("CN=Test Signer").unwrap();
        assert_eq!(info.ocsp_responses.len(), 1);
        assert!(ctx.get("CN=Nobody").is_none());
    }

    #[test]
    fn all_material_aggregates_across_subjects() {
        let mut ctx = ValidationContext::new();
        ctx.insert(
            "a",
            RevocationInfo {
                ocsp_responses: vec![vec![1]],
                crls: vec![vec![2]],
            },
        );
        ctx.insert(
            "b",
            RevocationInfo {
                ocsp_responses: vec![vec![3]],
                crls: vec![],
            },
        );
        let (ocsp, crls) = ctx.all_material();
        assert_eq!(ocsp.len(), 2);
        assert_eq!(crls.len(), 1);
    }
}
