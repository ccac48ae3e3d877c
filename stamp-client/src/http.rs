//! HTTP/JSON transport for the stamping service

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Response, Url};
use serde::de::DeserializeOwned;
use stamp_types::{StampResponse, SubmitAck, SubmitRequest};
use tracing::debug;

use crate::config::ServerConfig;
use crate::transport::{Transport, TransportError};

/// The API key header name
pub const API_KEY_HEADER: &str = "x-api-key";

/// Path segments of the stamp collection under the base URL
const STAMPS_PATH: [&str; 3] = ["api", "v1", "stamps"];

/// HTTP client for the stamping service
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl HttpTransport {
    /// Create a transport without authentication
    ///
    /// `timeout` bounds each individual request.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        Self::build(base_url, None, timeout)
    }

    /// Create a transport that sends an API key with every request
    pub fn with_api_key(
        base_url: &str,
        api_key: &str,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        Self::build(base_url, Some(api_key), timeout)
    }

    pub fn from_config(config: &ServerConfig) -> Result<Self, TransportError> {
        Self::build(
            &config.url,
            config.api_key.as_deref(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    fn build(
        base_url: &str,
        api_key: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| TransportError::InvalidEndpoint(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(TransportError::InvalidEndpoint(base_url.to_string()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(api_key) = api_key {
            let value = HeaderValue::from_str(api_key)
                .map_err(|e| TransportError::InvalidHeader(e.to_string()))?;
            headers.insert(API_KEY_HEADER, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of the stamp collection, or of one stamp when `stamp_id` is given
    fn stamps_url(&self, stamp_id: Option<&str>) -> Result<Url, TransportError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| TransportError::InvalidEndpoint(self.base_url.to_string()))?;
            segments.pop_if_empty().extend(STAMPS_PATH);
            if let Some(stamp_id) = stamp_id {
                segments.push(stamp_id);
            }
        }
        Ok(url)
    }

    fn map_send_error(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(self.timeout.as_secs())
        } else {
            TransportError::Request(err)
        }
    }

    /// Check the status and decode a JSON body
    async fn decode<T: DeserializeOwned>(&self, response: Response) -> Result<T, TransportError> {
        let status = response.status();
        let body = response.text().await.map_err(|e| self.map_send_error(e))?;

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                message: body,
            });
        }

        serde_json::from_str(&body).map_err(|e| TransportError::Decode(e.to_string()))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn submit(&self, hash: &str) -> Result<SubmitAck, TransportError> {
        let url = self.stamps_url(None)?;
        debug!(url = %url, hash = %hash, "Submitting hash");

        let request = SubmitRequest {
            hash: hash.to_string(),
        };

        let response = self
            .client
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        self.decode(response).await
    }

    async fn fetch(&self, stamp_id: &str) -> Result<StampResponse, TransportError> {
        let url = self.stamps_url(Some(stamp_id))?;
        debug!(url = %url, "Fetching stamp");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        self.decode(response).await
    }
}
