//! Core types and wire formats for remote timestamp stamps
//!
//! This crate defines the records a timestamping service hands back to a
//! client: the stamp itself and the Merkle inclusion proof that ties it to an
//! anchored root.

pub mod error;
pub mod messages;
pub mod primitives;

pub use error::{Error, Result};
pub use messages::{ProofRecord, StampResponse, StampStatus, SubmitAck, SubmitRequest};
pub use primitives::Digest;
