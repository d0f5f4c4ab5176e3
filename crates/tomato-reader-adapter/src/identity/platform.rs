/*
[INPUT]:  Host environment (machine-id files, sysinfo) or configured values
[OUTPUT]: Optional raw descriptor values per field
[POS]:    Identity layer - platform query seam behind DeviceIdentity
[UPDATE]: When adding probe sources or descriptor fields
*/

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use sysinfo::System;

const MACHINE_ID_PATHS: &[&str] = &["/etc/machine-id", "/var/lib/dbus/machine-id"];

/// Key mixed into the machine id before it leaves the host
const MACHINE_ID_SALT: &[u8] = b"tomato_reader_device_salt_v1";

/// Salted SHA-256 of the first non-empty machine-id file, as 32 hex chars.
///
/// The raw machine id is confidential and never returned.
fn hashed_machine_id<P: AsRef<Path>>(paths: &[P]) -> Option<String> {
    let raw = paths.iter().find_map(|path| {
        fs::read_to_string(path)
            .ok()
            .map(|content| content.trim().to_string())
            .filter(|id| !id.is_empty())
    })?;

    let mut hasher = Sha256::new();
    hasher.update(MACHINE_ID_SALT);
    hasher.update(raw.as_bytes());
    let mut id = hex::encode(hasher.finalize());
    id.truncate(32);
    Some(id)
}

/// Source of raw device descriptors.
///
/// Every query returns `None` when the value is unavailable or access is
/// denied; callers substitute their own defaults.
pub trait PlatformProbe: Send + Sync {
    /// Hardware-backed identifier, if the platform exposes one
    fn hardware_id(&self) -> Option<String>;
    fn android_id(&self) -> Option<String>;
    fn brand(&self) -> Option<String>;
    fn model(&self) -> Option<String>;
    fn os_version(&self) -> Option<String>;
    fn resolution(&self) -> Option<String>;
    fn dpi(&self) -> Option<String>;
}

/// Probe over the machine the process runs on
#[derive(Debug, Default, Clone, Copy)]
pub struct HostPlatform;

impl HostPlatform {
    pub fn new() -> Self {
        Self
    }
}

impl PlatformProbe for HostPlatform {
    fn hardware_id(&self) -> Option<String> {
        hashed_machine_id(MACHINE_ID_PATHS)
    }

    fn android_id(&self) -> Option<String> {
        None
    }

    fn brand(&self) -> Option<String> {
        None
    }

    fn model(&self) -> Option<String> {
        None
    }

    fn os_version(&self) -> Option<String> {
        System::os_version().filter(|version| !version.is_empty())
    }

    fn resolution(&self) -> Option<String> {
        None
    }

    fn dpi(&self) -> Option<String> {
        None
    }
}

/// Fixed descriptor values, typically loaded from configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticPlatform {
    pub hardware_id: Option<String>,
    pub android_id: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub os_version: Option<String>,
    pub resolution: Option<String>,
    pub dpi: Option<String>,
}

impl StaticPlatform {
    /// Layer these values over another probe; unset fields fall through.
    pub fn over<P: PlatformProbe + 'static>(self, base: P) -> OverlayPlatform {
        OverlayPlatform {
            overrides: self,
            base: Box::new(base),
        }
    }
}

impl PlatformProbe for StaticPlatform {
    fn hardware_id(&self) -> Option<String> {
        self.hardware_id.clone()
    }

    fn android_id(&self) -> Option<String> {
        self.android_id.clone()
    }

    fn brand(&self) -> Option<String> {
        self.brand.clone()
    }

    fn model(&self) -> Option<String> {
        self.model.clone()
    }

    fn os_version(&self) -> Option<String> {
        self.os_version.clone()
    }

    fn resolution(&self) -> Option<String> {
        self.resolution.clone()
    }

    fn dpi(&self) -> Option<String> {
        self.dpi.clone()
    }
}

/// Configured overrides first, then the wrapped probe
pub struct OverlayPlatform {
    overrides: StaticPlatform,
    base: Box<dyn PlatformProbe>,
}

impl std::fmt::Debug for OverlayPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlayPlatform")
            .field("overrides", &self.overrides)
            .finish_non_exhaustive()
    }
}

impl PlatformProbe for OverlayPlatform {
    fn hardware_id(&self) -> Option<String> {
        self.overrides.hardware_id().or_else(|| self.base.hardware_id())
    }

    fn android_id(&self) -> Option<String> {
        self.overrides.android_id().or_else(|| self.base.android_id())
    }

    fn brand(&self) -> Option<String> {
        self.overrides.brand().or_else(|| self.base.brand())
    }

    fn model(&self) -> Option<String> {
        self.overrides.model().or_else(|| self.base.model())
    }

    fn os_version(&self) -> Option<String> {
        self.overrides.os_version().or_else(|| self.base.os_version())
    }

    fn resolution(&self) -> Option<String> {
        self.overrides.resolution().or_else(|| self.base.resolution())
    }

    fn dpi(&self) -> Option<String> {
        self.overrides.dpi().or_else(|| self.base.dpi())
    }
}
