/*
[INPUT]:  OS randomness or a fixed seed
[OUTPUT]: Request nonces and bounded random integers
[POS]:    Signing layer - single randomness source for the pipeline
[UPDATE]: When nonce format or random ranges change
*/

use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use uuid::{Builder, Uuid};

const SIX_DIGIT_MIN: u32 = 100_000;
const SIX_DIGIT_MAX: u32 = 999_999;

/// Randomness consumed by identity and signing
pub trait EntropySource: Send + Sync {
    /// UUID-grade nonce as 32 lowercase hex characters, no separators
    fn nonce(&self) -> String;

    /// Integer in `100000..=999999`
    fn six_digit(&self) -> u32;
}

/// Thread-local OS-seeded randomness
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn nonce(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }

    fn six_digit(&self) -> u32 {
        rand::thread_rng().gen_range(SIX_DIGIT_MIN..=SIX_DIGIT_MAX)
    }
}

/// Deterministic randomness for reproducible signatures in tests
#[derive(Debug)]
pub struct SeededEntropy {
    rng: Mutex<StdRng>,
}

impl SeededEntropy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl EntropySource for SeededEntropy {
    fn nonce(&self) -> String {
        let mut bytes = [0u8; 16];
        self.rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .fill_bytes(&mut bytes);
        Builder::from_random_bytes(bytes)
            .into_uuid()
            .simple()
            .to_string()
    }

    fn six_digit(&self) -> u32 {
        self.rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .gen_range(SIX_DIGIT_MIN..=SIX_DIGIT_MAX)
    }
}
