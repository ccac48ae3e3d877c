//! Retrieval loop tests: attempt budget, spacing and failure kinds

mod common;

use std::time::Duration;

use common::{anchored_response, pending_response, RecordingSleeper, ScriptedTransport};
use stamp_client::{poll, ClientError, TokioSleeper, TransportError, POLL_INTERVAL};

#[tokio::test]
async fn test_no_wait_without_proof_fetches_once() {
    let transport = ScriptedTransport::always(pending_response("stamp-1", Some("n")));
    let sleeper = RecordingSleeper::default();

    let result = poll(&transport, &sleeper, "stamp-1", false, 30.0).await;

    assert!(matches!(result, Err(ClientError::ProofNotAvailable(ref id)) if id == "stamp-1"));
    assert_eq!(transport.fetch_count(), 1);
    assert!(sleeper.sleeps().is_empty());
}

#[tokio::test]
async fn test_no_wait_with_proof() {
    let transport = ScriptedTransport::always(anchored_response("stamp-1", Some("n"), 4, 1));
    let sleeper = RecordingSleeper::default();

    let record = poll(&transport, &sleeper, "stamp-1", false, 0.0).await.unwrap();

    assert!(record.has_proof());
    assert_eq!(transport.fetch_count(), 1);
}

#[tokio::test]
async fn test_wait_times_out_after_budget() {
    let transport = ScriptedTransport::always(pending_response("stamp-1", Some("n")));
    let sleeper = RecordingSleeper::default();

    let result = poll(&transport, &sleeper, "stamp-1", true, 3.0).await;

    match result {
        Err(ClientError::Timeout { stamp_id, attempts }) => {
            assert_eq!(stamp_id, "stamp-1");
            assert_eq!(attempts, 3);
        }
        other => panic!("Expected Timeout, got {:?}", other),
    }
    assert_eq!(transport.fetch_count(), 3);
    assert_eq!(sleeper.sleeps(), vec![POLL_INTERVAL; 2]);
}

#[tokio::test]
async fn test_fractional_timeout_rounds_up() {
    let transport = ScriptedTransport::always(pending_response("stamp-1", None));
    let sleeper = RecordingSleeper::default();

    let result = poll(&transport, &sleeper, "stamp-1", true, 1.5).await;

    assert!(matches!(result, Err(ClientError::Timeout { attempts: 2, .. })));
    assert_eq!(transport.fetch_count(), 2);
}

#[tokio::test]
async fn test_wait_returns_first_record_with_proof() {
    let transport = ScriptedTransport::new(vec![
        Ok(pending_response("stamp-1", Some("n"))),
        Ok(pending_response("stamp-1", Some("n"))),
        Ok(anchored_response("stamp-1", Some("n"), 8, 5)),
    ]);
    let sleeper = RecordingSleeper::default();

    let record = poll(&transport, &sleeper, "stamp-1", true, 10.0).await.unwrap();

    assert_eq!(record.proof().unwrap().leaf_index, 5);
    assert_eq!(transport.fetch_count(), 3);
    assert_eq!(sleeper.sleeps().len(), 2);
}

#[tokio::test]
async fn test_transport_failure_is_not_retried() {
    let transport = ScriptedTransport::new(vec![
        Ok(pending_response("stamp-1", Some("n"))),
        Err(TransportError::Status {
            status: 503,
            message: "unavailable".to_string(),
        }),
        Ok(anchored_response("stamp-1", Some("n"), 2, 0)),
    ]);
    let sleeper = RecordingSleeper::default();

    let result = poll(&transport, &sleeper, "stamp-1", true, 10.0).await;

    assert!(matches!(
        result,
        Err(ClientError::Transport(TransportError::Status { status: 503, .. }))
    ));
    assert_eq!(transport.fetch_count(), 2);
}

#[tokio::test]
async fn test_transport_failure_without_wait() {
    let transport = ScriptedTransport::new(vec![Err(TransportError::Timeout(10))]);
    let sleeper = RecordingSleeper::default();

    let result = poll(&transport, &sleeper, "stamp-1", false, 30.0).await;

    assert!(matches!(
        result,
        Err(ClientError::Transport(TransportError::Timeout(10)))
    ));
}

#[tokio::test]
async fn test_zero_timeout_makes_no_attempts() {
    let transport = ScriptedTransport::always(anchored_response("stamp-1", None, 1, 0));
    let sleeper = RecordingSleeper::default();

    let result = poll(&transport, &sleeper, "stamp-1", true, 0.0).await;

    assert!(matches!(result, Err(ClientError::Timeout { attempts: 0, .. })));
    assert_eq!(transport.fetch_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_attempts_spaced_one_second_apart() {
    let transport = ScriptedTransport::always(pending_response("stamp-1", Some("n")));
    let start = tokio::time::Instant::now();

    let result = poll(&transport, &TokioSleeper, "stamp-1", true, 3.0).await;

    assert!(matches!(result, Err(ClientError::Timeout { attempts: 3, .. })));
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_secs(2), "elapsed {:?}", elapsed);
    assert!(elapsed < Duration::from_secs(3), "elapsed {:?}", elapsed);
}

#[tokio::test]
async fn test_concurrent_polls_are_independent() {
    let transport = std::sync::Arc::new(ScriptedTransport::always(anchored_response(
        "stamp-1",
        Some("n"),
        16,
        9,
    )));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let transport = transport.clone();
        handles.push(tokio::spawn(async move {
            poll(&transport, &TokioSleeper, "stamp-1", true, 5.0).await
        }));
    }

    for handle in handles {
        let record = handle.await.expect("task panicked").unwrap();
        assert_eq!(record.stamp_id(), "stamp-1");
    }

    // No coalescing: every caller fetched for itself
    assert_eq!(transport.fetch_count(), 8);
}
