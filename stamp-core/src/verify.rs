//! Stamp verification contract

use thiserror::Error;
use tracing::debug;

use crate::merkle::verify_merkle_proof;
use crate::record::StampRecord;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("Merkle proof not available yet")]
    ProofNotAvailable,

    #[error("Hash mismatch: stamp was issued for {expected}, got {actual}")]
    HashMismatch { expected: String, actual: String },

    #[error("Leaf hash mismatch: expected {expected}, proof has {actual}")]
    LeafHashMismatch { expected: String, actual: String },

    #[error("Merkle proof does not reproduce its root hash")]
    ProofInvalid,
}

/// Verify that `candidate_hash` is anchored by the stamp's Merkle proof
///
/// The checks run in a fixed order and stop at the first failure:
/// 1. The stamp carries a proof
/// 2. `candidate_hash` equals the stamp's original hash
/// 3. The leaf derived for the stamp's mode equals the proof's leaf hash
/// 4. The proof recomputes its root hash
pub fn verify_stamp(stamp: &StampRecord, candidate_hash: &str) -> Result<(), VerificationError> {
    let proof = stamp.proof().ok_or(VerificationError::ProofNotAvailable)?;

    if candidate_hash != stamp.original_hash() {
        return Err(VerificationError::HashMismatch {
            expected: stamp.original_hash().to_string(),
            actual: candidate_hash.to_string(),
        });
    }

    let expected_leaf = stamp.expected_leaf();
    if expected_leaf != proof.leaf_hash {
        return Err(VerificationError::LeafHashMismatch {
            expected: expected_leaf,
            actual: proof.leaf_hash.clone(),
        });
    }

    if !verify_merkle_proof(Some(proof)) {
        return Err(VerificationError::ProofInvalid);
    }

    debug!(
        stamp_id = %stamp.stamp_id(),
        root_hash = %proof.root_hash,
        "Stamp verified against Merkle root"
    );

    Ok(())
}
