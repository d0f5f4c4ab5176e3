/*
[INPUT]:  tomato-reader binary, example config and a mock API server
[OUTPUT]: End-to-end checks of CLI subcommands
[POS]:    Integration test layer - binary invocation
[UPDATE]: When adding subcommands or changing CLI output
*/

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

use uuid::Uuid;
use wiremock::matchers::{header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn temp_dir() -> PathBuf {
    let mut path = env::temp_dir();
    path.push(format!("tomato-reader-cli-it-{}", Uuid::new_v4()));
    fs::create_dir_all(&path).unwrap();
    path
}

fn write_config(dir: &PathBuf, base_url: &str) -> PathBuf {
    let config_path = dir.join("config.yaml");
    let yaml = format!(
        "api:\n  base_url: \"{base_url}\"\n  max_retries: 0\nstorage:\n  device_id_path: \"{}\"\n",
        dir.join("device_id").display()
    );
    fs::write(&config_path, yaml).unwrap();
    config_path
}

#[test]
fn cli_sign_persists_device_id() {
    let binary_path = env!("CARGO_BIN_EXE_tomato-reader");
    let dir = temp_dir();
    let config_path = write_config(&dir, "https://api.example.com/");

    let output = Command::new(binary_path)
        .arg("--config")
        .arg(&config_path)
        .arg("--log-level")
        .arg("error")
        .arg("sign")
        .arg("GET")
        .arg("https://api.example.com/reading/bookapi/detail/v/?item_id=42")
        .output()
        .expect("Failed to start tomato-reader binary");

    assert!(
        output.status.success(),
        "Process exited with non-zero status: {}\nStdout: {}\nStderr: {}",
        output.status,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(value["headers"]["x-gorgon"].is_string());
    assert!(value["headers"]["x-khronos"].is_string());

    let device_id = fs::read_to_string(dir.join("device_id")).unwrap();
    assert_eq!(value["headers"]["x-device-id"], device_id.trim());

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn cli_example_config_parses() {
    let config_path = format!(
        "{}/config/reader.example.yaml",
        env!("CARGO_MANIFEST_DIR")
    );
    let config = tomato_reader_cli::ReaderConfig::from_file(config_path).unwrap();
    assert_eq!(config.device.model.as_deref(), Some("SM-G991B"));
}

#[tokio::test]
async fn cli_detail_hits_signed_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reading/bookapi/detail/v/"))
        .and(query_param("item_id", "42"))
        .and(header_exists("x-gorgon"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": 0,
            "message": "success",
            "data": { "item_data": { "item_id": "42", "book_name": "Night Train" } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = temp_dir();
    let config_path = write_config(&dir, &server.uri());

    let output = tokio::process::Command::new(env!("CARGO_BIN_EXE_tomato-reader"))
        .arg("--config")
        .arg(&config_path)
        .arg("detail")
        .arg("42")
        .output()
        .await
        .expect("Failed to start tomato-reader binary");

    assert!(
        output.status.success(),
        "Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["item_data"]["book_name"], "Night Train");

    fs::remove_dir_all(dir).unwrap();
}
