//! Basic usage example for offline stamp verification
//!
//! This example demonstrates:
//! - Hashing content and deriving nonce-mode and legacy leaves
//! - Building a batch tree and extracting inclusion proofs
//! - Verifying stamps and seeing each failure kind
//!
//! Run with: cargo run -p stamp-core --example basic_usage

use stamp_core::{digest, digest_hex, LeafMode, MerkleTree, StampRecord};
use stamp_types::{Digest, StampStatus};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Stamp Verification Example");
    println!("==========================\n");

    // Step 1: Hash the content being timestamped
    let documents: [&[u8]; 3] = [
        b"Hello, world!",
        b"Timestamp this document",
        b"Another piece of data",
    ];
    let hashes: Vec<String> = documents.iter().map(|d| digest_hex(d)).collect();

    println!("Content hashes:");
    for (i, hash) in hashes.iter().enumerate() {
        println!("  {}. {}", i + 1, hash);
    }
    println!();

    // Step 2: Derive leaves. The last submission is a legacy one without a nonce.
    let nonces = ["9a1f", "c3d2", ""];
    let leaves = hashes
        .iter()
        .zip(nonces)
        .map(|(hash, nonce)| Digest::from_hex(&LeafMode::from_nonce(nonce).expected_leaf(hash)))
        .collect::<Result<Vec<_>, _>>()?;

    // Step 3: Build the batch tree the service would anchor
    let tree = MerkleTree::from_leaves(leaves);
    let root = tree.root().ok_or("empty batch")?;
    println!("Batch tree built:");
    println!("  Leaves:    {}", tree.leaf_count());
    println!("  Root Hash: {}", root);
    println!();

    // Step 4: Verify each stamp against its own content
    for (i, (hash, nonce)) in hashes.iter().zip(nonces).enumerate() {
        let proof = tree.proof(i).ok_or("missing proof")?;
        let stamp = StampRecord::new(
            &format!("stamp-{}", i),
            hash,
            nonce,
            StampStatus::Confirmed,
            Some(proof),
        );

        stamp.verify(hash)?;
        let mode = if nonce.is_empty() { "legacy" } else { "nonce" };
        println!("  ✓ stamp-{} verified ({} mode)", i, mode);
    }
    println!();

    // Step 5: Show what tampering looks like
    let proof = tree.proof(0).ok_or("missing proof")?;
    let stamp = StampRecord::new(
        "stamp-0",
        &hashes[0],
        nonces[0],
        StampStatus::Confirmed,
        Some(proof),
    );
    let forged = digest(b"Hello, world?").to_hex();
    println!("Verifying altered content: {}", stamp.verify(&forged).unwrap_err());

    println!("\n✓ Example completed successfully!");

    Ok(())
}
