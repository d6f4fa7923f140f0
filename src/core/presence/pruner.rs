// src/core/presence/pruner.rs

//! Throttled eviction of abandoned clients.

use super::classifier::{is_stale, stale_ids};
use super::registry::ClientRegistry;
use crate::core::metrics;
use parking_lot::Mutex;
use std::time::{Duration, Instant};
use tracing::debug;

/// What a call to [`Pruner::maybe_run`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PruneOutcome {
    /// The previous pass started less than `interval` ago.
    Throttled,
    /// Another caller holds the throttle and is running a pass right now.
    Busy,
    /// A full pass ran and removed `evicted` records.
    Ran { evicted: usize },
}

/// Evicts records whose liveness anchor is older than the stale window,
/// at most once per interval no matter how often it is invoked.
///
/// This is a throttle, not a schedule: callers on the hot paths drive it.
#[derive(Debug)]
pub struct Pruner {
    interval: Duration,
    stale_window: Duration,
    /// Start of the last pass. Held for the whole pass so two passes never overlap.
    last_run: Mutex<Option<Instant>>,
}

impl Pruner {
    pub fn new(interval: Duration, stale_window: Duration) -> Self {
        Self {
            interval,
            stale_window,
            last_run: Mutex::new(None),
        }
    }

    /// Runs a pass if `interval` has elapsed since the last one.
    pub fn maybe_run(&self, registry: &ClientRegistry, now: Instant) -> PruneOutcome {
        let Some(mut last_run) = self.last_run.try_lock() else {
            return PruneOutcome::Busy;
        };

        if let Some(last) = *last_run
            && now.saturating_duration_since(last) < self.interval
        {
            return PruneOutcome::Throttled;
        }
        *last_run = Some(now);

        let candidates = stale_ids(&registry.snapshot(), now, self.stale_window);
        // Re-check under the shard lock: a heartbeat may have landed since the snapshot.
        let evicted = candidates
            .iter()
            .filter(|id| registry.remove_if(id, |record| is_stale(record, now, self.stale_window)))
            .count();

        metrics::PRUNE_PASSES_TOTAL.inc();
        if evicted > 0 {
            metrics::EVICTED_CLIENTS_TOTAL.inc_by(evicted as f64);
        }
        debug!(
            "Prune pass evicted {} of {} stale candidates; {} clients remain.",
            evicted,
            candidates.len(),
            registry.len()
        );

        PruneOutcome::Ran { evicted }
    }
}
