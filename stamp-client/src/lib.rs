//! Client library for a remote content-timestamping service
//!
//! Submits content hashes, polls for their Merkle inclusion proofs and
//! verifies those proofs locally without trusting the server.

pub mod client;
pub mod config;
pub mod http;
pub mod poll;
pub mod storage;
pub mod transport;

pub use client::StampClient;
pub use config::ClientConfig;
pub use http::HttpTransport;
pub use poll::{attempt_budget, poll, Sleeper, TokioSleeper, POLL_INTERVAL};
pub use storage::RecordStorage;
pub use transport::{Transport, TransportError};

use stamp_core::VerificationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Proof not available for stamp {0}")]
    ProofNotAvailable(String),

    #[error("Timed out waiting for proof of stamp {stamp_id} after {attempts} attempts")]
    Timeout { stamp_id: String, attempts: u32 },

    #[error("Verification failed: {0}")]
    Verification(#[from] VerificationError),

    #[error("Transport failure: {0}")]
    Transport(#[from] TransportError),

    #[error("Invalid hash: {0}")]
    InvalidHash(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;
