//! Leaf hash derivation

use crate::hash::digest_hex;

/// How a stamp's leaf hash is derived from its original content hash
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LeafMode {
    /// Legacy records without a nonce: the leaf is the original hash itself
    Direct,
    /// The leaf is `SHA-256(nonce || original_hash)` over the text of both
    Nonced(String),
}

impl LeafMode {
    /// Select the mode for a record. An empty nonce is the legacy sentinel.
    pub fn from_nonce(nonce: &str) -> Self {
        if nonce.is_empty() {
            LeafMode::Direct
        } else {
            LeafMode::Nonced(nonce.to_string())
        }
    }

    /// The nonce as carried on the wire (`""` for legacy records)
    pub fn nonce(&self) -> &str {
        match self {
            LeafMode::Direct => "",
            LeafMode::Nonced(nonce) => nonce,
        }
    }

    /// Expected leaf hash for the given original hash.
    ///
    /// Nonce mode hashes the concatenated hex text, not the decoded bytes.
    pub fn expected_leaf(&self, original_hash: &str) -> String {
        match self {
            LeafMode::Direct => original_hash.to_string(),
            LeafMode::Nonced(nonce) => {
                let mut preimage = String::with_capacity(nonce.len() + original_hash.len());
                preimage.push_str(nonce);
                preimage.push_str(original_hash);
                digest_hex(preimage.as_bytes())
            }
        }
    }
}
