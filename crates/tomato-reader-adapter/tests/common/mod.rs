/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for tomato-reader-adapter tests

use std::sync::Arc;
use std::time::Duration;

use tomato_reader_adapter::{
    AppIdentity, ClientConfig, DeviceIdentity, GorgonSigner, ReaderClient, RequestDecorator,
    StaticPlatform,
};
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
#[allow(dead_code)]
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Identity with fixed ids and default descriptors
pub fn test_identity() -> Arc<DeviceIdentity> {
    Arc::new(DeviceIdentity::new(StaticPlatform {
        hardware_id: Some("7cbd0f2a9e114c6f8d3b5a1e2f406789".to_string()),
        android_id: Some("a1b2c3d4e5f60718".to_string()),
        ..Default::default()
    }))
}

pub fn test_decorator() -> RequestDecorator {
    RequestDecorator::new(
        AppIdentity::default(),
        test_identity(),
        Arc::new(GorgonSigner::default()),
    )
}

/// Client pointed at the mock server with fast retries
#[allow(dead_code)]
pub fn test_client(server: &MockServer) -> ReaderClient {
    let config = ClientConfig {
        retry_base_delay: Duration::from_millis(5),
        ..ClientConfig::default()
    };
    ReaderClient::with_config_and_base_url(config, &server.uri())
        .expect("client init")
        .with_decorator(test_decorator())
}
