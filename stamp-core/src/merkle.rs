//! Merkle inclusion proofs with canonical (value-ordered) pair hashing
//!
//! Two nodes are combined by hashing their decoded bytes, smaller hex value
//! first. Because the order is decided by value and not by position, the
//! `directions` carried in a [`ProofRecord`] do not influence the computed
//! root. They are kept on the wire for compatibility only.

use sha2::{Digest as _, Sha256};
use stamp_types::{Digest, ProofRecord};

/// Combine two hex-encoded nodes into their parent.
///
/// When both decode to the same length the lexicographically smaller hex
/// string goes first; otherwise they are concatenated in the order given.
/// Returns `None` if either side is not valid hex.
pub fn combine_pair(a: &str, b: &str) -> Option<String> {
    let a_bytes = hex::decode(a).ok()?;
    let b_bytes = hex::decode(b).ok()?;

    let (first, second) = if a_bytes.len() == b_bytes.len() && b < a {
        (&b_bytes, &a_bytes)
    } else {
        (&a_bytes, &b_bytes)
    };

    let mut hasher = Sha256::new();
    hasher.update(first);
    hasher.update(second);
    Some(hex::encode(hasher.finalize()))
}

/// Combine two digests into their parent, smaller value first.
///
/// Equivalent to [`combine_pair`] on the lowercase hex encodings.
pub fn hash_pair(a: &Digest, b: &Digest) -> Digest {
    let (first, second) = if b.as_bytes() < a.as_bytes() { (b, a) } else { (a, b) };

    let mut hasher = Sha256::new();
    hasher.update(first.as_bytes());
    hasher.update(second.as_bytes());
    Digest::new(hasher.finalize().into())
}

/// Fold a leaf hash up through its siblings.
///
/// Returns `None` if any node is not valid hex.
pub fn compute_root(leaf_hash: &str, siblings: &[String]) -> Option<String> {
    siblings
        .iter()
        .try_fold(leaf_hash.to_string(), |current, sibling| {
            combine_pair(&current, sibling)
        })
}

/// Check that a proof reproduces its own root.
///
/// This is a total predicate: an absent proof, an empty leaf or root hash,
/// mismatched `siblings`/`directions` lengths or undecodable hex all yield
/// `false`.
pub fn verify_merkle_proof(proof: Option<&ProofRecord>) -> bool {
    let Some(proof) = proof else {
        return false;
    };

    if proof.leaf_hash.is_empty() || proof.root_hash.is_empty() {
        return false;
    }

    if !proof.is_well_formed() {
        return false;
    }

    match compute_root(&proof.leaf_hash, &proof.siblings) {
        Some(root) => root == proof.root_hash,
        None => false,
    }
}

/// A Merkle tree built bottom-up with [`hash_pair`]
///
/// Produces [`ProofRecord`]s in the same shape the service returns.
#[derive(Debug, Clone)]
pub struct MerkleTree {
    /// levels[0] is the leaves, the last level is the root
    levels: Vec<Vec<Digest>>,
}

impl MerkleTree {
    /// Build a tree over the given leaf hashes (in submission order).
    ///
    /// An odd node at the end of a level is paired with itself.
    pub fn from_leaves(leaves: Vec<Digest>) -> Self {
        if leaves.is_empty() {
            return Self { levels: Vec::new() };
        }

        let mut levels = vec![leaves];

        while let Some(prev_level) = levels.last() {
            if prev_level.len() <= 1 {
                break;
            }

            let next_level: Vec<Digest> = prev_level
                .chunks(2)
                .map(|pair| hash_pair(&pair[0], pair.get(1).unwrap_or(&pair[0])))
                .collect();

            levels.push(next_level);
        }

        Self { levels }
    }

    pub fn leaf_count(&self) -> usize {
        self.levels.first().map_or(0, Vec::len)
    }

    /// Root of the tree, `None` when there are no leaves
    pub fn root(&self) -> Option<&Digest> {
        self.levels.last().and_then(|level| level.first())
    }

    /// Generate the inclusion proof for a leaf
    pub fn proof(&self, leaf_index: usize) -> Option<ProofRecord> {
        let root = self.root()?;
        let leaf = self.levels[0].get(leaf_index)?;

        let mut siblings = Vec::with_capacity(self.levels.len() - 1);
        let mut directions = Vec::with_capacity(self.levels.len() - 1);
        let mut index = leaf_index;

        for level in &self.levels[..self.levels.len() - 1] {
            let sibling_index = index ^ 1;
            // A missing right-hand sibling means the node was paired with itself
            let sibling = level.get(sibling_index).unwrap_or(&level[index]);

            siblings.push(sibling.to_hex());
            directions.push(sibling_index > index);
            index /= 2;
        }

        Some(ProofRecord {
            leaf_hash: leaf.to_hex(),
            leaf_index: leaf_index as u64,
            siblings,
            directions,
            root_hash: root.to_hex(),
        })
    }
}
