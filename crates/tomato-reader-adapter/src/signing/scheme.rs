/*
[INPUT]:  Configured scheme name and entropy source
[OUTPUT]: Shared Signer trait object
[POS]:    Signing layer - configuration-driven signer selection
[UPDATE]: When adding a signature scheme variant
*/

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{DigestAlgorithm, EntropySource, GorgonSigner, Signer};

/// Signature scheme selected by configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignerScheme {
    #[default]
    #[serde(rename = "gorgon-md5")]
    GorgonMd5,
    #[serde(rename = "gorgon-sha256")]
    GorgonSha256,
}

impl SignerScheme {
    pub fn build(self, entropy: Arc<dyn EntropySource>) -> Arc<dyn Signer> {
        match self {
            SignerScheme::GorgonMd5 => Arc::new(GorgonSigner::new(DigestAlgorithm::Md5, entropy)),
            SignerScheme::GorgonSha256 => {
                Arc::new(GorgonSigner::new(DigestAlgorithm::Sha256, entropy))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signing::OsEntropy;

    #[test]
    fn test_scheme_names_roundtrip_through_config() {
        let scheme: SignerScheme = serde_json::from_str(r#""gorgon-sha256""#).unwrap();
        assert_eq!(scheme, SignerScheme::GorgonSha256);
        assert_eq!(scheme.build(Arc::new(OsEntropy)).name(), "gorgon-sha256");
        assert_eq!(
            SignerScheme::default().build(Arc::new(OsEntropy)).name(),
            "gorgon-md5"
        );
    }
}
