/*
[INPUT]:  HTTP configuration (base URL, timeouts, retries) and RequestDecorator
[OUTPUT]: Decorated requests sent over reqwest, typed JSON results
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing retry behavior
*/

use std::time::Duration;

use reqwest::{Client, Method, Request, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::http::{ReaderError, RequestDecorator, Result};

/// Base URL of the reading service
pub const DEFAULT_BASE_URL: &str = "https://api5-normal-lq.fqnovel.com/";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Attempts after the first one for retryable failures
    pub max_retries: u32,
    pub retry_base_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(30),
            max_retries: 2,
            retry_base_delay: Duration::from_millis(500),
        }
    }
}

/// Main HTTP client for the reading API
#[derive(Debug)]
pub struct ReaderClient {
    http_client: Client,
    base_url: Url,
    decorator: RequestDecorator,
    config: ClientConfig,
}

impl ReaderClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Self::with_config_and_base_url(config, DEFAULT_BASE_URL)
    }

    /// Create a client against an explicit base URL
    pub fn with_config_and_base_url(config: ClientConfig, base_url: &str) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url: Url::parse(base_url)?,
            decorator: RequestDecorator::default(),
            config,
        })
    }

    /// Replace the decorator (identity, signer, app values)
    pub fn with_decorator(mut self, decorator: RequestDecorator) -> Self {
        self.decorator = decorator;
        self
    }

    pub fn decorator(&self) -> &RequestDecorator {
        &self.decorator
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build full URL for an endpoint
    fn url(&self, endpoint: &str) -> Result<Url> {
        Ok(self.base_url.join(endpoint.trim_start_matches('/'))?)
    }

    /// Build an undecorated request builder for an endpoint
    pub(crate) fn request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder> {
        let url = self.url(endpoint)?;
        Ok(self.http_client.request(method, url))
    }

    /// Decorate without sending, for inspection
    pub fn prepare(&self, builder: RequestBuilder) -> Result<Request> {
        let request = builder.build()?;
        self.decorator.decorate(&request)
    }

    /// Send with retries and parse the JSON body.
    ///
    /// Each attempt decorates the pristine request again so nonce and
    /// timestamp are never reused.
    pub async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let request = builder.build()?;
        let mut attempt: u32 = 0;
        let mut delay = self.config.retry_base_delay;

        loop {
            match self.send_once(&request).await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() && attempt < self.config.max_retries => {
                    attempt += 1;
                    let wait = err.retry_delay().map(Duration::from_secs).unwrap_or(delay);
                    warn!(
                        path = request.url().path(),
                        attempt,
                        error = %err,
                        "retrying request"
                    );
                    tokio::time::sleep(wait).await;
                    delay = delay.saturating_mul(2);
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn send_once<T: DeserializeOwned>(&self, request: &Request) -> Result<T> {
        let signed = self.decorator.decorate(request)?;
        let response = self.http_client.execute(signed).await.map_err(|err| {
            if err.is_timeout() {
                ReaderError::Timeout {
                    duration: self.config.timeout.as_secs(),
                }
            } else {
                ReaderError::Http(err)
            }
        })?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ReaderError::api_error(status, body));
        }

        Ok(serde_json::from_str(&body)?)
    }
}
