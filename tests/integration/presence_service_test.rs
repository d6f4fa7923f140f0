// tests/integration/presence_service_test.rs

//! End-to-end scenarios for the presence façade.

use super::test_helpers::{ACTIVE_WINDOW, PRUNE_INTERVAL, STALE_WINDOW, TestContext};
use cupboard::config::PresenceConfig;
use cupboard::core::PresenceError;
use cupboard::presence::{PruneOutcome, Status};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[test]
fn test_selection_roundtrip_for_every_status() {
    let ctx = TestContext::new();
    for status in Status::ALL {
        let recorded = ctx.service.record_selection("a", status.as_ref()).unwrap();
        assert_eq!(recorded, status);
        assert_eq!(ctx.service.get_selection("a"), Some(status));
    }
}

#[test]
fn test_selection_returns_normalized_status() {
    let ctx = TestContext::new();
    assert_eq!(ctx.service.record_selection("a", " Yellow ").unwrap(), Status::Yellow);
    assert_eq!(ctx.service.get_selection("a"), Some(Status::Yellow));
}

#[test]
fn test_invalid_selection_without_prior_selection() {
    let ctx = TestContext::new();
    let err = ctx.service.record_selection("a", "blue").unwrap_err();
    assert_eq!(err, PresenceError::InvalidStatus("blue".to_string()));
    assert_eq!(ctx.service.get_selection("a"), None);
    assert_eq!(ctx.service.get_summary().known, 0);
}

#[test]
fn test_invalid_selection_keeps_prior_selection() {
    let ctx = TestContext::new();
    ctx.service.record_selection("a", "red").unwrap();
    ctx.service.record_selection("a", "orange").unwrap_err();
    assert_eq!(ctx.service.get_selection("a"), Some(Status::Red));
}

#[test]
fn test_unknown_client_has_no_selection() {
    let ctx = TestContext::new();
    assert_eq!(ctx.service.get_selection("nobody"), None);
}

#[test]
fn test_empty_summary() {
    let ctx = TestContext::new();
    let summary = ctx.service.get_summary();
    assert_eq!(summary.known, 0);
    assert_eq!(summary.active, 0);
    assert_eq!(summary.inactive, 0);
    assert_eq!(summary.buckets.len(), 3);
    assert!(summary.buckets.iter().all(|b| b.count == 0 && b.percentage == 0.0));
}

#[test]
fn test_scenario_only_refreshed_client_stays_active() {
    let ctx = TestContext::new();
    for (id, color) in [("A", "green"), ("B", "green"), ("C", "red")] {
        ctx.service.record_heartbeat(id);
        ctx.service.record_selection(id, color).unwrap();
    }

    ctx.advance(ACTIVE_WINDOW + Duration::from_secs(1));
    ctx.service.record_heartbeat("A");

    let summary = ctx.service.get_summary();
    assert_eq!(summary.known, 3);
    assert_eq!(summary.active, 1);
    assert_eq!(summary.inactive, 2);

    let buckets: Vec<(Status, usize, f64)> = summary
        .buckets
        .iter()
        .map(|b| (b.status, b.count, b.percentage))
        .collect();
    assert_eq!(
        buckets,
        vec![
            (Status::Green, 1, 100.0),
            (Status::Yellow, 0, 0.0),
            (Status::Red, 0, 0.0),
        ]
    );
}

#[test]
fn test_active_window_boundary() {
    let ctx = TestContext::new();
    ctx.service.record_heartbeat("a");
    ctx.service.record_selection("a", "yellow").unwrap();

    ctx.advance(ACTIVE_WINDOW);
    let summary = ctx.service.get_summary();
    assert_eq!(summary.active, 1);
    assert_eq!(summary.buckets[1].count, 1);

    ctx.advance_secs(1);
    let summary = ctx.service.get_summary();
    assert_eq!(summary.active, 0);
    assert_eq!(summary.inactive, 1);
    assert_eq!(summary.known, 1);
    assert_eq!(summary.buckets[1].count, 0);
    assert_eq!(summary.buckets[1].percentage, 0.0);
}

#[test]
fn test_selection_does_not_refresh_liveness() {
    let ctx = TestContext::new();
    ctx.service.record_heartbeat("a");
    ctx.advance(ACTIVE_WINDOW + Duration::from_secs(1));
    ctx.service.record_selection("a", "green").unwrap();

    let summary = ctx.service.get_summary();
    assert_eq!(summary.active, 0);
    assert_eq!(summary.known, 1);
}

#[test]
fn test_selection_only_client_is_known_but_inactive() {
    let ctx = TestContext::new();
    ctx.service.record_selection("a", "red").unwrap();

    let summary = ctx.service.get_summary();
    assert_eq!(summary.known, 1);
    assert_eq!(summary.active, 0);
    assert_eq!(summary.inactive, 1);
    assert_eq!(summary.buckets[2].count, 0);
}

#[test]
fn test_active_clients_without_selection_leave_denominator() {
    let ctx = TestContext::new();
    ctx.service.record_heartbeat("watcher");
    ctx.service.record_heartbeat("voter");
    ctx.service.record_selection("voter", "yellow").unwrap();

    let summary = ctx.service.get_summary();
    assert_eq!(summary.active, 2);
    assert_eq!(summary.buckets[1].count, 1);
    assert_eq!(summary.buckets[1].percentage, 100.0);
}

#[test]
fn test_stale_client_removed_after_prune_pass() {
    let ctx = TestContext::new();
    ctx.service.record_heartbeat("gone");
    ctx.service.record_selection("gone", "red").unwrap();

    ctx.advance(STALE_WINDOW);
    ctx.service.record_heartbeat("here");
    let summary = ctx.service.get_summary();
    assert_eq!(summary.known, 2, "exactly at the stale window the client is kept");

    ctx.advance(PRUNE_INTERVAL);
    let summary = ctx.service.get_summary();
    assert_eq!(summary.known, 1);
    assert_eq!(summary.active, 0);
    assert!(summary.buckets.iter().all(|b| b.count == 0));
    assert_eq!(ctx.service.get_selection("gone"), None);
}

#[test]
fn test_heartbeat_path_also_prunes() {
    let ctx = TestContext::new();
    // First summary runs a pass immediately and arms the throttle.
    ctx.service.get_summary();
    ctx.service.record_heartbeat("a");

    ctx.advance(STALE_WINDOW + Duration::from_secs(1));
    // The last pass was a full day ago, so this one runs.
    assert_eq!(ctx.service.get_summary().known, 0);

    ctx.service.record_heartbeat("b");
    ctx.advance(STALE_WINDOW + Duration::from_secs(1));
    ctx.service.record_heartbeat("c");
    // The heartbeat above ran the pass; "b" is gone.
    assert_eq!(ctx.service.get_summary().known, 1);
}

#[test]
fn test_throttle_skips_second_pass_within_interval() {
    let ctx = TestContext::new();
    assert!(matches!(ctx.service.maybe_prune(), PruneOutcome::Ran { .. }));

    ctx.service.record_selection("old", "green").unwrap();
    ctx.advance(PRUNE_INTERVAL - Duration::from_secs(1));
    assert_eq!(ctx.service.maybe_prune(), PruneOutcome::Throttled);
    assert_eq!(ctx.service.get_summary().known, 1);
}

#[test]
fn test_evicted_client_restarts_as_new() {
    let ctx = TestContext::new();
    ctx.service.record_heartbeat("a");
    ctx.service.record_selection("a", "green").unwrap();

    ctx.advance(STALE_WINDOW + PRUNE_INTERVAL);
    ctx.service.get_summary();
    assert_eq!(ctx.service.get_selection("a"), None);

    ctx.service.record_heartbeat("a");
    let record = ctx.service.registry().get("a").unwrap();
    assert_eq!(record.status, None);
    assert_eq!(ctx.service.get_summary().active, 1);
}

#[test]
fn test_custom_windows_are_independent() {
    let ctx = TestContext::with_config(PresenceConfig {
        active_window: Duration::from_secs(10),
        stale_window: Duration::from_secs(60),
        prune_interval: Duration::from_secs(30),
        background_prune: false,
    });
    ctx.service.record_heartbeat("a");
    ctx.service.record_selection("a", "red").unwrap();

    ctx.advance_secs(11);
    let summary = ctx.service.get_summary();
    assert_eq!((summary.known, summary.active), (1, 0));

    ctx.advance_secs(50);
    let summary = ctx.service.get_summary();
    assert_eq!(summary.known, 0);
}

#[test]
fn test_concurrent_heartbeats_and_summaries() {
    let ctx = Arc::new(TestContext::new());
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let ctx = ctx.clone();
            thread::spawn(move || {
                for i in 0..200 {
                    let id = format!("client-{t}-{i}");
                    ctx.service.record_heartbeat(&id);
                    ctx.service
                        .record_selection(&id, Status::ALL[i % 3].as_ref())
                        .unwrap();
                    if i % 20 == 0 {
                        let summary = ctx.service.get_summary();
                        assert!(summary.active <= summary.known);
                    }
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let summary = ctx.service.get_summary();
    assert_eq!(summary.known, 800);
    assert_eq!(summary.active, 800);
    let counted: usize = summary.buckets.iter().map(|b| b.count).sum();
    assert_eq!(counted, 800);
}
