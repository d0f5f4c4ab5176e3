/*
[INPUT]:  HTTP client configuration, device identity and signer
[OUTPUT]: Decorated requests, HTTP responses and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod books;
pub mod client;
pub mod decorator;
pub mod error;

pub use error::{ReaderError, Result};

pub use client::{ClientConfig, DEFAULT_BASE_URL, ReaderClient};
pub use decorator::{AppIdentity, RequestDecorator};
