//! Shared test doubles: a scripted transport and a sleeper that records
//! instead of waiting.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use stamp_client::{Sleeper, Transport, TransportError};
use stamp_core::{digest, digest_hex, LeafMode, MerkleTree};
use stamp_types::{Digest, StampResponse, StampStatus, SubmitAck};

pub const CONTENT: &[u8] = b"quarterly report v3";

/// Transport that replays a script of fetch results.
///
/// Once the script is exhausted the last entry is repeated.
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Result<StampResponse, TransportError>>>,
    last: Mutex<Option<StampResponse>>,
    fetches: AtomicUsize,
}

impl ScriptedTransport {
    pub fn new(script: Vec<Result<StampResponse, TransportError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            last: Mutex::new(None),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Always answers with the same record
    pub fn always(response: StampResponse) -> Self {
        Self::new(vec![Ok(response)])
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn submit(&self, hash: &str) -> Result<SubmitAck, TransportError> {
        Ok(SubmitAck {
            hash: hash.to_string(),
            stamp_id: Some("stamp-1".to_string()),
            status: Some(StampStatus::Pending),
        })
    }

    async fn fetch(&self, _stamp_id: &str) -> Result<StampResponse, TransportError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Ok(response)) => {
                *self.last.lock().unwrap() = Some(response.clone());
                Ok(response)
            }
            Some(Err(e)) => Err(e),
            None => self
                .last
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| TransportError::Decode("script exhausted".to_string())),
        }
    }
}

/// Sleeper that records requested durations and returns immediately
#[derive(Default)]
pub struct RecordingSleeper {
    sleeps: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}

/// A stamp for `CONTENT` that has not been anchored yet
pub fn pending_response(stamp_id: &str, nonce: Option<&str>) -> StampResponse {
    let original_hash = digest_hex(CONTENT);
    StampResponse {
        stamp_id: stamp_id.to_string(),
        hash: original_hash.clone(),
        original_hash,
        nonce: nonce.map(str::to_string),
        status: StampStatus::Pending,
        merkle_proof: None,
    }
}

/// A stamp for `CONTENT` anchored at `index` in a batch of `batch_size`
pub fn anchored_response(
    stamp_id: &str,
    nonce: Option<&str>,
    batch_size: usize,
    index: usize,
) -> StampResponse {
    let mut response = pending_response(stamp_id, nonce);
    let leaf =
        LeafMode::from_nonce(nonce.unwrap_or_default()).expected_leaf(&response.original_hash);

    let mut leaves: Vec<Digest> = (0..batch_size)
        .map(|i| digest(format!("submission-{}", i).as_bytes()))
        .collect();
    leaves[index] = Digest::from_hex(&leaf).unwrap();

    response.status = StampStatus::Confirmed;
    response.merkle_proof = MerkleTree::from_leaves(leaves).proof(index);
    response
}
