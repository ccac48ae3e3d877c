//! SHA-256 hash engine

use sha2::{Digest as _, Sha256};
use stamp_types::Digest;

/// Hash a byte sequence
pub fn digest(data: &[u8]) -> Digest {
    Digest::new(Sha256::digest(data).into())
}

/// Hash a byte sequence and return the lowercase hex encoding
pub fn digest_hex(data: &[u8]) -> String {
    digest(data).to_hex()
}
