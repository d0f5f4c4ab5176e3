/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public reading-API adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod http;
pub mod identity;
pub mod signing;
pub mod types;

// Re-export commonly used types from http
pub use http::{
    AppIdentity,
    ClientConfig,
    ReaderClient,
    ReaderError,
    RequestDecorator,
    Result,
};

// Re-export commonly used types from identity
pub use identity::{
    DeviceIdStore,
    DeviceIdentity,
    DeviceProfile,
    HostPlatform,
    PlatformProbe,
    StaticPlatform,
};

// Re-export commonly used types from signing
pub use signing::{
    DigestAlgorithm,
    EntropySource,
    GorgonSigner,
    OsEntropy,
    SeededEntropy,
    SignatureArtifact,
    Signer,
    SignerScheme,
    SigningContext,
};

// Re-export all types
pub use types::*;
