/*
[INPUT]:  Device id, android id, and per-field descriptor values
[OUTPUT]: Immutable DeviceProfile records
[POS]:    Identity layer - device descriptor data model and defaults
[UPDATE]: When descriptor fields or fallback defaults change
*/

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BRAND: &str = "samsung";
pub const DEFAULT_MODEL: &str = "SM-G991B";
pub const DEFAULT_OS_VERSION: &str = "13";
pub const DEFAULT_RESOLUTION: &str = "2400*1080";
pub const DEFAULT_DPI: &str = "440";

const FALLBACK_MODELS: &[&str] = &[DEFAULT_MODEL];

/// Handset catalogue used when emulating a different device
const HANDSETS: &[(&str, &[&str])] = &[
    ("samsung", &["SM-G991B", "SM-G998B", "SM-A525F", "SM-S901B"]),
    ("xiaomi", &["Mi 11", "Mi 10", "Redmi Note 10", "POCO F3"]),
    ("huawei", &["P40 Pro", "Mate 40 Pro", "P30 Pro", "Mate 30 Pro"]),
    ("oppo", &["Find X3 Pro", "Reno6 Pro", "Find X2 Pro", "Reno5 Pro"]),
    ("vivo", &["X60 Pro", "X50 Pro", "iQOO 7", "X70 Pro"]),
    ("oneplus", &["9 Pro", "8 Pro", "9RT", "8T"]),
];

/// Per-install device record sent with every request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceProfile {
    pub device_id: String,
    pub android_id: String,
    pub brand: String,
    pub model: String,
    pub os_version: String,
    /// `"<width>*<height>"`
    pub resolution: String,
    pub dpi: String,
}

impl DeviceProfile {
    /// Profile with every descriptor set to its static default
    pub fn with_defaults(device_id: impl Into<String>, android_id: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            android_id: android_id.into(),
            brand: DEFAULT_BRAND.to_string(),
            model: DEFAULT_MODEL.to_string(),
            os_version: DEFAULT_OS_VERSION.to_string(),
            resolution: DEFAULT_RESOLUTION.to_string(),
            dpi: DEFAULT_DPI.to_string(),
        }
    }

    /// Plausible handset picked from the catalogue, keeping the given ids.
    pub fn randomized<R: Rng + ?Sized>(
        rng: &mut R,
        device_id: impl Into<String>,
        android_id: impl Into<String>,
    ) -> Self {
        let (brand, models) = HANDSETS
            .choose(rng)
            .copied()
            .unwrap_or((DEFAULT_BRAND, FALLBACK_MODELS));
        let model = models.choose(rng).copied().unwrap_or(DEFAULT_MODEL);

        Self {
            brand: brand.to_string(),
            model: model.to_string(),
            ..Self::with_defaults(device_id, android_id)
        }
    }
}
