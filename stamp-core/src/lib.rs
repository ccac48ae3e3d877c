//! Client-side trust layer for remote timestamp stamps
//!
//! This crate provides:
//! - SHA-256 hashing of content and of hash pairs
//! - Merkle inclusion proof verification with the canonical pair ordering
//! - Merkle tree construction producing proofs in the same wire shape
//! - Nonce/legacy leaf derivation and the stamp verification contract

pub mod hash;
pub mod leaf;
pub mod merkle;
pub mod record;
pub mod verify;

pub use hash::{digest, digest_hex};
pub use leaf::LeafMode;
pub use merkle::{combine_pair, compute_root, hash_pair, verify_merkle_proof, MerkleTree};
pub use record::StampRecord;
pub use verify::{verify_stamp, VerificationError};
