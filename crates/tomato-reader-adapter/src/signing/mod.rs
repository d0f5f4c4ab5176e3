/*
[INPUT]:  Request method, URL, timestamp and nonce
[OUTPUT]: X-Gorgon / X-Khronos signature artifacts
[POS]:    Signing layer - pluggable request signature schemes
[UPDATE]: When adding signature schemes or changing the signer contract
*/

pub mod digest;
pub mod entropy;
pub mod gorgon;
pub mod scheme;

pub use digest::DigestAlgorithm;
pub use entropy::{EntropySource, OsEntropy, SeededEntropy};
pub use gorgon::GorgonSigner;
pub use scheme::SignerScheme;

use crate::http::Result;

/// Per-request signing input; never reused across requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningContext {
    pub method: String,
    /// Full request URL after query augmentation
    pub url: String,
    pub timestamp_millis: i64,
    /// `_rticket` value of the request
    pub nonce: String,
}

/// Output of a [`Signer`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureArtifact {
    /// `X-Gorgon`
    pub signature_header: String,
    /// `X-Khronos`
    pub timestamp_header: String,
}

/// Computes request signatures.
///
/// Output is not idempotent: schemes may mix per-call randomness into the
/// signature.
pub trait Signer: Send + Sync {
    fn sign(&self, ctx: &SigningContext) -> Result<SignatureArtifact>;

    /// Short scheme name for logs
    fn name(&self) -> &'static str;
}
