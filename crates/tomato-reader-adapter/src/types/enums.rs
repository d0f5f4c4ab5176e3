/*
[INPUT]:  Integer status codes from the reading API
[OUTPUT]: Typed book status
[POS]:    Data layer - enum definitions
[UPDATE]: When the service adds status codes
*/

use serde::{Deserialize, Serialize};

/// Serialization status of a book; unknown codes are preserved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum BookStatus {
    Ongoing,
    Completed,
    Other(i32),
}

impl From<i32> for BookStatus {
    fn from(code: i32) -> Self {
        match code {
            1 => BookStatus::Ongoing,
            2 => BookStatus::Completed,
            other => BookStatus::Other(other),
        }
    }
}

impl From<BookStatus> for i32 {
    fn from(status: BookStatus) -> Self {
        match status {
            BookStatus::Ongoing => 1,
            BookStatus::Completed => 2,
            BookStatus::Other(code) => code,
        }
    }
}

impl Default for BookStatus {
    fn default() -> Self {
        BookStatus::Other(0)
    }
}
