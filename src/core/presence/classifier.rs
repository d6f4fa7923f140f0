// src/core/presence/classifier.rs

//! Partitions a registry snapshot into active, inactive and stale clients.

use super::registry::ClientRecord;
use std::time::{Duration, Instant};

/// The two liveness thresholds used for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresenceWindows {
    /// Maximum heartbeat age for a client to count as active.
    pub active: Duration,
    /// Heartbeat age beyond which a client may be evicted.
    pub stale: Duration,
}

impl Default for PresenceWindows {
    fn default() -> Self {
        Self {
            active: Duration::from_secs(180),
            stale: Duration::from_secs(86_400),
        }
    }
}

/// A client is active iff it has sent a heartbeat no older than `window`.
/// Clients known only through a selection are never active.
pub fn is_active(record: &ClientRecord, now: Instant, window: Duration) -> bool {
    record
        .last_heartbeat_at
        .is_some_and(|last| now.saturating_duration_since(last) <= window)
}

/// A client is stale iff its liveness anchor is strictly older than `window`.
pub fn is_stale(record: &ClientRecord, now: Instant, window: Duration) -> bool {
    now.saturating_duration_since(record.liveness_anchor()) > window
}

/// The derived view of one snapshot. Never stored.
#[derive(Debug, Clone, Default)]
pub struct Classification {
    /// Currently tracked identifiers, not an all-time visitor count:
    /// pruned clients drop out of it.
    pub known: usize,
    pub active: Vec<ClientRecord>,
    /// Known but not active, stale or not. Reported only as a count.
    pub inactive: usize,
}

pub fn classify(records: Vec<ClientRecord>, now: Instant, windows: PresenceWindows) -> Classification {
    let known = records.len();
    let active: Vec<ClientRecord> = records
        .into_iter()
        .filter(|record| is_active(record, now, windows.active))
        .collect();
    let inactive = known - active.len();

    Classification {
        known,
        active,
        inactive,
    }
}

/// Identifiers in `records` that are eligible for eviction.
pub fn stale_ids(records: &[ClientRecord], now: Instant, window: Duration) -> Vec<String> {
    records
        .iter()
        .filter(|record| is_stale(record, now, window))
        .map(|record| record.id.clone())
        .collect()
}
