//! Transport seam between the retrieval logic and the network

use async_trait::async_trait;
use stamp_types::{StampResponse, SubmitAck};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    #[error("API error ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("Malformed response body: {0}")]
    Decode(String),

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Invalid header value: {0}")]
    InvalidHeader(String),
}

/// Request/response access to the stamping service
#[async_trait]
pub trait Transport: Send + Sync {
    /// Submit a lowercase hex content hash
    async fn submit(&self, hash: &str) -> Result<SubmitAck, TransportError>;

    /// Fetch the current snapshot of a stamp
    async fn fetch(&self, stamp_id: &str) -> Result<StampResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn submit(&self, hash: &str) -> Result<SubmitAck, TransportError> {
        (**self).submit(hash).await
    }

    async fn fetch(&self, stamp_id: &str) -> Result<StampResponse, TransportError> {
        (**self).fetch(stamp_id).await
    }
}
