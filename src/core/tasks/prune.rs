// src/core/tasks/prune.rs

//! A background task that drives the presence pruner on a timer.

use crate::core::presence::{PresenceService, PruneOutcome};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, info};

/// Calls the throttled prune once per tick. The pruner's own throttle
/// still applies, so hot-path callers and this task never double up.
pub struct PruneTask {
    presence: Arc<PresenceService>,
    period: Duration,
}

impl PruneTask {
    pub fn new(presence: Arc<PresenceService>, period: Duration) -> Self {
        Self { presence, period }
    }

    /// The main run loop for the prune task.
    pub async fn run(self, mut shutdown_rx: broadcast::Receiver<()>) {
        info!("Background prune task started (every {:?}).", self.period);
        let mut interval = tokio::time::interval(self.period);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if let PruneOutcome::Ran { evicted } = self.presence.maybe_prune() {
                        debug!("Background prune evicted {} clients.", evicted);
                    }
                }
                _ = shutdown_rx.recv() => {
                    info!("Background prune task shutting down.");
                    return;
                }
            }
        }
    }
}
