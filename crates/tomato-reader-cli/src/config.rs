/*
[INPUT]:  YAML configuration file
[OUTPUT]: Parsed reader configuration and a wired ReaderClient
[POS]:    Configuration layer - client, identity and signer setup
[UPDATE]: When adding new configuration options
*/

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tomato_reader_adapter::http::DEFAULT_BASE_URL;
use tomato_reader_adapter::{
    AppIdentity, ClientConfig, DeviceIdStore, DeviceIdentity, EntropySource, HostPlatform,
    OsEntropy, ReaderClient, RequestDecorator, SignerScheme, StaticPlatform,
};
use tracing::warn;

const DATA_DIR_NAME: &str = "tomato-reader";
const DEVICE_ID_FILE: &str = "device_id";

/// Top-level configuration; every section is optional
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ReaderConfig {
    pub api: ApiConfig,
    /// App identity overrides
    pub app: AppIdentity,
    /// Device descriptor overrides, layered over the host platform
    pub device: StaticPlatform,
    pub signer: SignerScheme,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub max_retries: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 30,
            max_retries: 2,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Defaults to `<data_dir>/tomato-reader/device_id`
    pub device_id_path: Option<PathBuf>,
}

impl ReaderConfig {
    /// Load configuration from YAML file
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        let config: Self = serde_yaml::from_str(content).context("parse config yaml")?;
        Ok(config)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: Duration::from_secs(self.api.timeout_secs),
            connect_timeout: Duration::from_secs(self.api.connect_timeout_secs),
            max_retries: self.api.max_retries,
            ..ClientConfig::default()
        }
    }

    /// Where the device id is persisted, if anywhere
    pub fn device_id_path(&self) -> Option<PathBuf> {
        self.storage.device_id_path.clone().or_else(|| {
            dirs::data_dir().map(|dir| dir.join(DATA_DIR_NAME).join(DEVICE_ID_FILE))
        })
    }

    pub fn build_identity(&self, entropy: Arc<dyn EntropySource>) -> DeviceIdentity {
        let identity =
            DeviceIdentity::new(self.device.clone().over(HostPlatform::new())).with_entropy(entropy);
        match self.device_id_path() {
            Some(path) => identity.with_store(DeviceIdStore::new(path)),
            None => {
                warn!("no data directory available; device id will not persist");
                identity
            }
        }
    }

    pub fn build_decorator(&self) -> RequestDecorator {
        let entropy: Arc<dyn EntropySource> = Arc::new(OsEntropy);
        let identity = Arc::new(self.build_identity(Arc::clone(&entropy)));
        let signer = self.signer.build(Arc::clone(&entropy));
        RequestDecorator::new(self.app.clone(), identity, signer).with_entropy(entropy)
    }

    pub fn build_client(&self) -> anyhow::Result<ReaderClient> {
        let client = ReaderClient::with_config_and_base_url(self.client_config(), &self.api.base_url)
            .context("build http client")?;
        Ok(client.with_decorator(self.build_decorator()))
    }
}
