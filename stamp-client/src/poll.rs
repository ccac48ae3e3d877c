//! Bounded polling for a stamp's Merkle proof

use std::time::Duration;

use async_trait::async_trait;
use stamp_core::StampRecord;
use tracing::{debug, info, warn};

use crate::transport::Transport;
use crate::{ClientError, Result};

/// Pause between consecutive fetch attempts
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Cooperative suspension between poll attempts
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Sleeps on the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Number of fetch attempts a wait budget allows: `ceil(timeout_secs)`.
///
/// Non-positive and NaN budgets allow no attempts.
pub fn attempt_budget(timeout_secs: f64) -> u32 {
    if timeout_secs.is_nan() || timeout_secs <= 0.0 {
        return 0;
    }
    // Float-to-int `as` saturates at u32::MAX
    timeout_secs.ceil() as u32
}

/// Fetch a stamp until its proof is present.
///
/// With `wait == false` a single fetch is made and a missing proof fails with
/// [`ClientError::ProofNotAvailable`]. With `wait == true` up to
/// [`attempt_budget`] fetches are made, [`POLL_INTERVAL`] apart, before
/// failing with [`ClientError::Timeout`]. A transport failure on any attempt
/// is returned immediately.
pub async fn poll<T, S>(
    transport: &T,
    sleeper: &S,
    stamp_id: &str,
    wait: bool,
    timeout_secs: f64,
) -> Result<StampRecord>
where
    T: Transport + ?Sized,
    S: Sleeper + ?Sized,
{
    if !wait {
        let record = StampRecord::from(transport.fetch(stamp_id).await?);
        if record.has_proof() {
            return Ok(record);
        }
        debug!(stamp_id = %stamp_id, status = %record.status(), "Proof not available");
        return Err(ClientError::ProofNotAvailable(stamp_id.to_string()));
    }

    let attempts = attempt_budget(timeout_secs);

    for attempt in 1..=attempts {
        debug!(stamp_id = %stamp_id, attempt, attempts, "Fetching stamp");

        let record = StampRecord::from(transport.fetch(stamp_id).await?);
        if record.has_proof() {
            info!(stamp_id = %stamp_id, attempt, "Merkle proof available");
            return Ok(record);
        }

        if attempt < attempts {
            sleeper.sleep(POLL_INTERVAL).await;
        }
    }

    warn!(stamp_id = %stamp_id, attempts, "Gave up waiting for Merkle proof");
    Err(ClientError::Timeout {
        stamp_id: stamp_id.to_string(),
        attempts,
    })
}
