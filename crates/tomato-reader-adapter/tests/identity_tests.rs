/*
[INPUT]:  Platform probes and device id files
[OUTPUT]: Test results for device identity
[POS]:    Integration tests - identity stability and fallbacks
[UPDATE]: When device identity resolution changes
*/

use std::env;
use std::fs;
use std::sync::{Arc, Barrier};
use std::thread;

use tomato_reader_adapter::{DeviceIdStore, DeviceIdentity, HostPlatform, StaticPlatform};
use uuid::Uuid;

#[test]
fn test_concurrent_first_use_agrees() {
    for _ in 0..20 {
        let identity = Arc::new(DeviceIdentity::new(StaticPlatform::default()));
        let barrier = Arc::new(Barrier::new(2));

        let handles: Vec<_> = (0..2)
            .map(|_| {
                let identity = Arc::clone(&identity);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    identity.device_id()
                })
            })
            .collect();

        let ids: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(ids[0], ids[1]);
    }
}

#[test]
fn test_host_platform_yields_complete_profile() {
    let profile = DeviceIdentity::new(HostPlatform::new()).descriptors();
    assert!(!profile.device_id.is_empty());
    assert!(!profile.brand.is_empty());
    assert!(!profile.model.is_empty());
    assert!(!profile.os_version.is_empty());
    assert!(profile.resolution.contains('*'));
    assert!(!profile.dpi.is_empty());
}

#[test]
fn test_host_device_id_is_not_raw_machine_id() {
    let device_id = DeviceIdentity::new(HostPlatform::new()).device_id();
    assert_eq!(device_id.len(), 32);

    for path in ["/etc/machine-id", "/var/lib/dbus/machine-id"] {
        if let Ok(raw) = fs::read_to_string(path) {
            assert_ne!(device_id, raw.trim());
        }
    }
}

#[test]
fn test_overrides_layer_over_host() {
    let identity = DeviceIdentity::new(
        StaticPlatform {
            model: Some("Mi 11".to_string()),
            brand: Some("Xiaomi".to_string()),
            ..Default::default()
        }
        .over(HostPlatform::new()),
    );
    let profile = identity.descriptors();
    assert_eq!(profile.brand, "xiaomi");
    assert_eq!(profile.model, "Mi 11");
}

#[test]
fn test_store_wins_over_hardware_id() {
    let mut dir = env::temp_dir();
    dir.push(format!("tomato-reader-it-{}", Uuid::new_v4()));
    let store = DeviceIdStore::new(dir.join("device_id"));
    store.save("persisted-id").unwrap();

    let identity = DeviceIdentity::new(StaticPlatform {
        hardware_id: Some("hardware-id".to_string()),
        ..Default::default()
    })
    .with_store(store);

    assert_eq!(identity.device_id(), "persisted-id");
    fs::remove_dir_all(dir).unwrap();
}
