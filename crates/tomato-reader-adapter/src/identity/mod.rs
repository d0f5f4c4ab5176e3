/*
[INPUT]:  Host platform queries and an optional device id file
[OUTPUT]: Stable device id and the device descriptor bundle
[POS]:    Identity layer - per-install device identity for every API call
[UPDATE]: When adding descriptors or changing device id persistence
*/

pub mod platform;
pub mod profile;
pub mod provider;
pub mod store;

pub use platform::{HostPlatform, PlatformProbe, StaticPlatform};
pub use profile::DeviceProfile;
pub use provider::DeviceIdentity;
pub use store::DeviceIdStore;
