//! Immutable client-side view of a stamp

use serde::{Deserialize, Serialize};
use stamp_types::{ProofRecord, StampResponse, StampStatus};

use crate::leaf::LeafMode;
use crate::verify::{verify_stamp, VerificationError};

/// A snapshot of a stamp as fetched from the service
///
/// The leaf derivation mode is fixed when the record is built and the
/// record owns its proof; nothing mutates either afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StampResponse", into = "StampResponse")]
pub struct StampRecord {
    stamp_id: String,
    hash: String,
    original_hash: String,
    leaf_mode: LeafMode,
    status: StampStatus,
    proof: Option<ProofRecord>,
}

impl StampRecord {
    pub fn new(
        stamp_id: &str,
        original_hash: &str,
        nonce: &str,
        status: StampStatus,
        proof: Option<ProofRecord>,
    ) -> Self {
        Self {
            stamp_id: stamp_id.to_string(),
            hash: original_hash.to_string(),
            original_hash: original_hash.to_string(),
            leaf_mode: LeafMode::from_nonce(nonce),
            status,
            proof,
        }
    }

    pub fn stamp_id(&self) -> &str {
        &self.stamp_id
    }

    /// Hash the service filed the stamp under
    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn original_hash(&self) -> &str {
        &self.original_hash
    }

    pub fn nonce(&self) -> &str {
        self.leaf_mode.nonce()
    }

    pub fn leaf_mode(&self) -> &LeafMode {
        &self.leaf_mode
    }

    pub fn status(&self) -> StampStatus {
        self.status
    }

    pub fn proof(&self) -> Option<&ProofRecord> {
        self.proof.as_ref()
    }

    pub fn has_proof(&self) -> bool {
        self.proof.is_some()
    }

    pub fn into_proof(self) -> Option<ProofRecord> {
        self.proof
    }

    /// Leaf hash this stamp's proof must start from
    pub fn expected_leaf(&self) -> String {
        self.leaf_mode.expected_leaf(&self.original_hash)
    }

    /// Verify `candidate_hash` against this stamp, reporting the failure kind
    pub fn verify(&self, candidate_hash: &str) -> Result<(), VerificationError> {
        verify_stamp(self, candidate_hash)
    }

    /// Boolean form of [`StampRecord::verify`]
    pub fn is_valid(&self, candidate_hash: &str) -> bool {
        self.verify(candidate_hash).is_ok()
    }
}

impl From<StampResponse> for StampRecord {
    fn from(response: StampResponse) -> Self {
        let nonce = response.nonce.unwrap_or_default();
        Self {
            stamp_id: response.stamp_id,
            hash: response.hash,
            original_hash: response.original_hash,
            leaf_mode: LeafMode::from_nonce(&nonce),
            status: response.status,
            proof: response.merkle_proof,
        }
    }
}

impl From<StampRecord> for StampResponse {
    fn from(record: StampRecord) -> Self {
        Self {
            nonce: Some(record.leaf_mode.nonce().to_string()),
            stamp_id: record.stamp_id,
            hash: record.hash,
            original_hash: record.original_hash,
            status: record.status,
            merkle_proof: record.proof,
        }
    }
}
