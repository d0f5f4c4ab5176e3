/*
[INPUT]:  SigningContext and an entropy source
[OUTPUT]: Base64 X-Gorgon value and decimal X-Khronos value
[POS]:    Signing layer - placeholder digest+entropy signature scheme
[UPDATE]: When the canonical base string or signature framing changes
*/

use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use url::Url;

use crate::http::Result;

use super::{DigestAlgorithm, EntropySource, OsEntropy, SignatureArtifact, Signer, SigningContext};

/// Device-class tag mixed into every signature
pub const DEVICE_CLASS_TAG: &str = "android";

/// Placeholder X-Gorgon scheme.
///
/// `base64(hex(digest("{method}\n{path}\n{timestamp}\n")) + six_digit + "android")`
///
/// This is not the remote service's real algorithm; it only keeps the
/// pipeline shape (canonical string, digest, entropy, encoding).
#[derive(Clone)]
pub struct GorgonSigner {
    digest: DigestAlgorithm,
    entropy: Arc<dyn EntropySource>,
}

impl std::fmt::Debug for GorgonSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GorgonSigner")
            .field("digest", &self.digest)
            .finish_non_exhaustive()
    }
}

impl Default for GorgonSigner {
    fn default() -> Self {
        Self::new(DigestAlgorithm::Md5, Arc::new(OsEntropy))
    }
}

impl GorgonSigner {
    pub fn new(digest: DigestAlgorithm, entropy: Arc<dyn EntropySource>) -> Self {
        Self { digest, entropy }
    }
}

impl Signer for GorgonSigner {
    fn sign(&self, ctx: &SigningContext) -> Result<SignatureArtifact> {
        let path = extract_path(&ctx.url);
        let base = canonical_base_string(&ctx.method, &path, ctx.timestamp_millis);
        let digest = self.digest.hex_digest(base.as_bytes());
        let random = self.entropy.six_digit();
        let raw = format!("{digest}{random}{DEVICE_CLASS_TAG}");

        Ok(SignatureArtifact {
            signature_header: BASE64.encode(raw.as_bytes()),
            timestamp_header: ctx.timestamp_millis.to_string(),
        })
    }

    fn name(&self) -> &'static str {
        match self.digest {
            DigestAlgorithm::Md5 => "gorgon-md5",
            DigestAlgorithm::Sha256 => "gorgon-sha256",
        }
    }
}

/// Path plus `?query` when present; the raw input when it does not parse
pub fn extract_path(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => match parsed.query() {
            Some(query) => format!("{}?{}", parsed.path(), query),
            None => parsed.path().to_string(),
        },
        Err(_) => url.to_string(),
    }
}

/// Method, path and timestamp, each newline-terminated, in that order
pub fn canonical_base_string(method: &str, path: &str, timestamp_millis: i64) -> String {
    format!("{method}\n{path}\n{timestamp_millis}\n")
}
