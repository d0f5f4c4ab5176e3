/*
[INPUT]:  Platform probe, optional DeviceIdStore, entropy source
[OUTPUT]: Memoised device id, android id and DeviceProfile
[POS]:    Identity layer - process-wide device identity provider
[UPDATE]: When changing device id resolution order or memoisation
*/

use std::fmt;
use std::sync::{Arc, OnceLock};

use tracing::{info, warn};

use crate::signing::{EntropySource, OsEntropy};

use super::platform::{HostPlatform, PlatformProbe};
use super::profile::{
    DEFAULT_BRAND, DEFAULT_DPI, DEFAULT_MODEL, DEFAULT_OS_VERSION, DEFAULT_RESOLUTION,
    DeviceProfile,
};
use super::store::DeviceIdStore;

/// Thread-safe, lazily initialised device identity.
///
/// The device id resolves once per process: stored id, then hardware id,
/// then a freshly generated random id. Concurrent first calls block on the
/// same initialisation and observe the same value.
pub struct DeviceIdentity {
    probe: Box<dyn PlatformProbe>,
    store: Option<DeviceIdStore>,
    entropy: Arc<dyn EntropySource>,
    device_id: OnceLock<String>,
    android_id: OnceLock<String>,
    profile: OnceLock<DeviceProfile>,
}

impl fmt::Debug for DeviceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceIdentity")
            .field("store", &self.store)
            .field("device_id", &self.device_id.get())
            .finish_non_exhaustive()
    }
}

impl Default for DeviceIdentity {
    fn default() -> Self {
        Self::new(HostPlatform::new())
    }
}

impl DeviceIdentity {
    /// Identity backed by `probe` with no persistence
    pub fn new<P: PlatformProbe + 'static>(probe: P) -> Self {
        Self {
            probe: Box::new(probe),
            store: None,
            entropy: Arc::new(OsEntropy),
            device_id: OnceLock::new(),
            android_id: OnceLock::new(),
            profile: OnceLock::new(),
        }
    }

    /// Persist the resolved device id so restarts keep the same identity
    pub fn with_store(mut self, store: DeviceIdStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Randomness used for the fallback device id
    pub fn with_entropy(mut self, entropy: Arc<dyn EntropySource>) -> Self {
        self.entropy = entropy;
        self
    }

    pub fn device_id(&self) -> String {
        self.device_id.get_or_init(|| self.resolve_device_id()).clone()
    }

    /// Secondary platform identifier, empty when unavailable
    pub fn android_id(&self) -> String {
        self.android_id
            .get_or_init(|| self.probe.android_id().unwrap_or_default())
            .clone()
    }

    /// Full descriptor bundle; each field falls back independently
    pub fn descriptors(&self) -> DeviceProfile {
        self.profile
            .get_or_init(|| DeviceProfile {
                device_id: self.device_id(),
                android_id: self.android_id(),
                brand: self
                    .probe
                    .brand()
                    .map(|brand| brand.to_lowercase())
                    .unwrap_or_else(|| DEFAULT_BRAND.to_string()),
                model: self
                    .probe
                    .model()
                    .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                os_version: self
                    .probe
                    .os_version()
                    .unwrap_or_else(|| DEFAULT_OS_VERSION.to_string()),
                resolution: self
                    .probe
                    .resolution()
                    .unwrap_or_else(|| DEFAULT_RESOLUTION.to_string()),
                dpi: self.probe.dpi().unwrap_or_else(|| DEFAULT_DPI.to_string()),
            })
            .clone()
    }

    fn resolve_device_id(&self) -> String {
        let Some(store) = &self.store else {
            return self.fresh_device_id();
        };

        let mut created = None;
        match store.load_or_create(|| created.insert(self.fresh_device_id()).clone()) {
            Ok(device_id) => {
                if created.is_some() {
                    info!(path = %store.path().display(), "device id persisted");
                }
                device_id
            }
            Err(err) => {
                warn!(
                    path = %store.path().display(),
                    error = %err,
                    "failed to persist device id"
                );
                created.unwrap_or_else(|| self.fresh_device_id())
            }
        }
    }

    /// Hardware id when the probe has one, otherwise a random id
    fn fresh_device_id(&self) -> String {
        match self.probe.hardware_id().filter(|id| !id.is_empty()) {
            Some(hardware_id) => hardware_id,
            None => {
                info!("hardware id unavailable; generated random device id");
                self.entropy.nonce()
            }
        }
    }
}
