/*
[INPUT]:  JSON envelopes returned by the reading API
[OUTPUT]: Envelope wrapper with code checking
[POS]:    Data layer - response wrappers
[UPDATE]: When the envelope format changes
*/

use serde::{Deserialize, Serialize};

use crate::http::{ReaderError, Result};

/// `{ "code": 0, "message": "...", "data": ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub code: i32,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Payload of a successful envelope; non-zero codes become API errors
    pub fn into_data(self) -> Result<T> {
        if self.code != 0 {
            return Err(ReaderError::Api {
                code: self.code,
                message: self.message,
            });
        }
        self.data
            .ok_or_else(|| ReaderError::InvalidResponse("envelope without data".to_string()))
    }
}
