// src/core/state.rs

//! Defines the shared `AppState` handed to every request handler and task.

use crate::config::Config;
use crate::core::presence::{Clock, PresenceService};
use std::sync::Arc;

/// Process-wide state. Constructed once at startup (or once per test).
pub struct AppState {
    pub config: Config,
    pub presence: Arc<PresenceService>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let presence = Arc::new(PresenceService::new(&config.presence));
        Self { config, presence }
    }

    /// Builds the state around an injected clock.
    pub fn with_clock(config: Config, clock: Arc<dyn Clock>) -> Self {
        let presence = Arc::new(PresenceService::with_clock(&config.presence, clock));
        Self { config, presence }
    }
}
