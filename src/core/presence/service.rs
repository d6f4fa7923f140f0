// src/core/presence/service.rs

//! The façade the HTTP layer talks to.

use super::aggregator::{Bucket, aggregate};
use super::classifier::{PresenceWindows, classify};
use super::clock::{Clock, SystemClock};
use super::pruner::{PruneOutcome, Pruner};
use super::registry::ClientRegistry;
use super::status::Status;
use crate::config::PresenceConfig;
use crate::core::errors::PresenceError;
use crate::core::metrics;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// The distribution a teacher view renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Currently tracked identifiers (pruned clients are not counted).
    pub known: usize,
    pub active: usize,
    pub inactive: usize,
    /// Always green, yellow, red in that order.
    pub buckets: Vec<Bucket>,
}

/// Records heartbeats and selections and answers summary queries.
///
/// One instance per process (or per test); share it behind an `Arc`.
pub struct PresenceService {
    registry: ClientRegistry,
    pruner: Pruner,
    windows: PresenceWindows,
    clock: Arc<dyn Clock>,
}

impl PresenceService {
    /// Creates a service driven by the system clock.
    pub fn new(config: &PresenceConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &PresenceConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            registry: ClientRegistry::new(),
            pruner: Pruner::new(config.prune_interval, config.stale_window),
            windows: PresenceWindows {
                active: config.active_window,
                stale: config.stale_window,
            },
            clock,
        }
    }

    pub fn registry(&self) -> &ClientRegistry {
        &self.registry
    }

    /// Marks the client alive now, then gives the pruner a chance to run.
    pub fn record_heartbeat(&self, client_id: &str) {
        let now = self.clock.now();
        self.registry.upsert_heartbeat(client_id, now);
        metrics::HEARTBEATS_TOTAL.inc();
        self.pruner.maybe_run(&self.registry, now);
    }

    /// Stores the client's selection and returns the normalized status.
    ///
    /// An invalid value is rejected without touching any state.
    pub fn record_selection(&self, client_id: &str, input: &str) -> Result<Status, PresenceError> {
        let now = self.clock.now();
        let status = match self.registry.upsert_status(client_id, input, now) {
            Ok(status) => status,
            Err(e) => {
                metrics::REJECTED_SELECTIONS_TOTAL.inc();
                warn!("Rejected selection from client {}: {}", client_id, e);
                return Err(e);
            }
        };
        metrics::SELECTIONS_TOTAL.inc();
        debug!("Client {} selected {}.", client_id, status);

        self.pruner.maybe_run(&self.registry, now);
        Ok(status)
    }

    /// The client's current status, or `None` if nothing is selected.
    pub fn get_selection(&self, client_id: &str) -> Option<Status> {
        self.registry.get(client_id).and_then(|record| record.status)
    }

    /// Prunes if due, then classifies and aggregates a fresh snapshot.
    pub fn get_summary(&self) -> Summary {
        let now = self.clock.now();
        self.pruner.maybe_run(&self.registry, now);

        let classification = classify(self.registry.snapshot(), now, self.windows);
        let buckets = aggregate(&classification.active);

        metrics::KNOWN_CLIENTS.set(classification.known as f64);
        metrics::ACTIVE_CLIENTS.set(classification.active.len() as f64);

        Summary {
            known: classification.known,
            active: classification.active.len(),
            inactive: classification.inactive,
            buckets,
        }
    }

    /// Gives the pruner a chance to run without any other side effect.
    /// Used by the background prune task.
    pub fn maybe_prune(&self) -> PruneOutcome {
        self.pruner.maybe_run(&self.registry, self.clock.now())
    }
}
