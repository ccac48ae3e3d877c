//! Wire message definitions for the stamping service

use serde::{Deserialize, Serialize};
use std::fmt;

/// Body of a submission request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitRequest {
    /// Hex SHA-256 of the caller's content
    pub hash: String,
}

/// Acknowledgment returned by the service for a submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitAck {
    /// The hash the service recorded
    pub hash: String,
    /// Identifier to fetch the stamp with later (older servers omit it)
    #[serde(default, alias = "id", skip_serializing_if = "Option::is_none")]
    pub stamp_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<StampStatus>,
}

/// Server-side lifecycle state of a stamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StampStatus {
    #[default]
    Pending,
    Confirmed,
    Anchored,
    Failed,
    /// A status this client does not know about yet
    #[serde(other)]
    Unknown,
}

impl fmt::Display for StampStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StampStatus::Pending => "pending",
            StampStatus::Confirmed => "confirmed",
            StampStatus::Anchored => "anchored",
            StampStatus::Failed => "failed",
            StampStatus::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Merkle authentication path from a leaf to an anchored root
///
/// Hash fields are kept as the hex strings received so that a malformed
/// proof can still be represented and rejected by verification rather
/// than by decoding.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProofRecord {
    #[serde(default)]
    pub leaf_hash: String,
    /// Position of the leaf among the submissions of its batch
    #[serde(default)]
    pub leaf_index: u64,
    /// Sibling hashes, ordered from the leaf towards the root
    #[serde(default)]
    pub siblings: Vec<String>,
    /// Side each sibling sits on (`true` = right). Same length as `siblings`.
    #[serde(default)]
    pub directions: Vec<bool>,
    #[serde(default)]
    pub root_hash: String,
}

impl ProofRecord {
    /// Number of levels between the leaf and the root
    pub fn depth(&self) -> usize {
        self.siblings.len()
    }

    /// Whether the sibling and direction sequences line up
    pub fn is_well_formed(&self) -> bool {
        self.siblings.len() == self.directions.len()
    }
}

/// A stamp as returned by the fetch-by-id endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StampResponse {
    #[serde(alias = "id")]
    pub stamp_id: String,
    /// Hash the service filed the stamp under
    #[serde(default)]
    pub hash: String,
    /// Hash of the caller's content as submitted
    #[serde(default)]
    pub original_hash: String,
    /// Per-submission nonce. Absent, null or empty marks a legacy record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
    #[serde(default)]
    pub status: StampStatus,
    /// Present once the submission has been included in an anchored batch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merkle_proof: Option<ProofRecord>,
}

impl StampResponse {
    pub fn has_proof(&self) -> bool {
        self.merkle_proof.is_some()
    }
}
