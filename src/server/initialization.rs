// src/server/initialization.rs

//! Builds the shared state and binds the listener before the main loop starts.

use super::context::ServerContext;
use crate::config::Config;
use crate::core::state::AppState;
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tokio::task::JoinSet;
use tracing::info;

/// Initializes all server components before starting the main loop.
pub async fn setup(config: Config) -> Result<ServerContext> {
    log_startup_info(&config);
    let (shutdown_tx, _) = broadcast::channel(1);

    let listener = TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", config.host, config.port))?;
    info!("Cupboard listening on http://{}", listener.local_addr()?);

    let state = Arc::new(AppState::new(config));
    info!("Presence registry initialized.");

    Ok(ServerContext {
        state,
        listener,
        shutdown_tx,
        background_tasks: JoinSet::new(),
    })
}

/// Logs key configuration parameters at startup.
fn log_startup_info(config: &Config) {
    let presence = &config.presence;
    info!(
        "Presence windows: active {:?}, stale {:?}, prune every {:?}.",
        presence.active_window, presence.stale_window, presence.prune_interval
    );
    if presence.background_prune {
        info!("Background pruning is enabled in addition to request-driven pruning.");
    }
}
