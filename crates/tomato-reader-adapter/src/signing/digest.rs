/*
[INPUT]:  Canonical base string bytes
[OUTPUT]: Lowercase hex digest
[POS]:    Signing layer - replaceable digest strategy
[UPDATE]: When adding digest algorithms
*/

use md5::Md5;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    /// Reference scheme
    #[default]
    Md5,
    Sha256,
}

impl DigestAlgorithm {
    pub fn hex_digest(&self, input: &[u8]) -> String {
        match self {
            DigestAlgorithm::Md5 => hex::encode(Md5::digest(input)),
            DigestAlgorithm::Sha256 => hex::encode(Sha256::digest(input)),
        }
    }
}
