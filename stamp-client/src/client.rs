//! High-level client for submitting, retrieving and verifying stamps

use stamp_core::{digest_hex, StampRecord};
use stamp_types::{Digest, ProofRecord, SubmitAck};
use tracing::{info, warn};

use crate::config::ClientConfig;
use crate::http::HttpTransport;
use crate::poll::{poll, Sleeper, TokioSleeper};
use crate::transport::Transport;
use crate::{ClientError, Result};

/// Client for a stamping service
///
/// Every retrieval goes through [`poll`] and every verification through
/// [`StampRecord::verify`]; the remaining methods only reshape their results.
pub struct StampClient<T = HttpTransport, S = TokioSleeper> {
    transport: T,
    sleeper: S,
}

impl StampClient<HttpTransport, TokioSleeper> {
    /// Create an HTTP client from configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let transport = HttpTransport::from_config(&config.server)?;
        Ok(Self::new(transport))
    }
}

impl<T: Transport> StampClient<T, TokioSleeper> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            sleeper: TokioSleeper,
        }
    }
}

impl<T: Transport, S: Sleeper> StampClient<T, S> {
    /// Replace the sleep capability used between poll attempts
    pub fn with_sleeper<S2: Sleeper>(self, sleeper: S2) -> StampClient<T, S2> {
        StampClient {
            transport: self.transport,
            sleeper,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn sleeper(&self) -> &S {
        &self.sleeper
    }

    /// Hash data with SHA-256 and return the lowercase hex digest
    pub fn hash_data(&self, data: &[u8]) -> String {
        digest_hex(data)
    }

    /// Submit a hex content hash for timestamping
    pub async fn submit_hash(&self, hash: &str) -> Result<SubmitAck> {
        let hash = Digest::normalize_hex(hash)
            .map_err(|e| ClientError::InvalidHash(format!("{}: {}", hash, e)))?;
        let ack = self.transport.submit(&hash).await?;
        info!(hash = %ack.hash, stamp_id = ?ack.stamp_id, "Hash submitted");
        Ok(ack)
    }

    /// Hash arbitrary data and submit it
    pub async fn submit_data(&self, data: &[u8]) -> Result<SubmitAck> {
        let hash = self.hash_data(data);
        self.submit_hash(&hash).await
    }

    /// Retrieve a stamp once its proof is present
    pub async fn get_stamp(
        &self,
        stamp_id: &str,
        wait: bool,
        timeout_secs: f64,
    ) -> Result<StampRecord> {
        poll(&self.transport, &self.sleeper, stamp_id, wait, timeout_secs).await
    }

    /// Retrieve only the Merkle proof of a stamp
    pub async fn get_proof(
        &self,
        stamp_id: &str,
        wait: bool,
        timeout_secs: f64,
    ) -> Result<ProofRecord> {
        let record = self.get_stamp(stamp_id, wait, timeout_secs).await?;
        record
            .into_proof()
            .ok_or_else(|| ClientError::ProofNotAvailable(stamp_id.to_string()))
    }

    /// Fetch the current snapshot of a stamp, with or without a proof
    pub async fn status(&self, stamp_id: &str) -> Result<StampRecord> {
        Ok(StampRecord::from(self.transport.fetch(stamp_id).await?))
    }

    /// Retrieve a stamp and verify `candidate_hash` against it
    ///
    /// Returns the verified record.
    pub async fn verify(
        &self,
        stamp_id: &str,
        candidate_hash: &str,
        wait: bool,
        timeout_secs: f64,
    ) -> Result<StampRecord> {
        let record = self.get_stamp(stamp_id, wait, timeout_secs).await?;
        self.verify_record(&record, candidate_hash)?;
        Ok(record)
    }

    /// Hash data and verify it against a stamp
    pub async fn verify_data(
        &self,
        stamp_id: &str,
        data: &[u8],
        wait: bool,
        timeout_secs: f64,
    ) -> Result<StampRecord> {
        let hash = self.hash_data(data);
        self.verify(stamp_id, &hash, wait, timeout_secs).await
    }

    /// Boolean form of [`StampClient::verify`]: any failure is `false`
    pub async fn is_verified(
        &self,
        stamp_id: &str,
        candidate_hash: &str,
        wait: bool,
        timeout_secs: f64,
    ) -> bool {
        self.verify(stamp_id, candidate_hash, wait, timeout_secs)
            .await
            .is_ok()
    }

    /// Verify an already retrieved record without touching the network
    pub fn verify_record(&self, record: &StampRecord, candidate_hash: &str) -> Result<()> {
        match record.verify(candidate_hash) {
            Ok(()) => {
                info!(stamp_id = %record.stamp_id(), "Stamp verified");
                Ok(())
            }
            Err(e) => {
                warn!(stamp_id = %record.stamp_id(), error = %e, "Stamp verification failed");
                Err(e.into())
            }
        }
    }
}
