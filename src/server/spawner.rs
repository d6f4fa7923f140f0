// src/server/spawner.rs

//! Spawns the board's long-running background tasks.

use super::context::ServerContext;
use super::metrics_server;
use crate::core::tasks::prune::PruneTask;
use anyhow::Result;
use tracing::info;

/// Spawns all background tasks into the context's JoinSet.
pub fn spawn_all(ctx: &mut ServerContext) -> Result<()> {
    let state = &ctx.state;
    let shutdown_tx = &ctx.shutdown_tx;
    let background_tasks = &mut ctx.background_tasks;

    // --- Metrics Server ---
    if state.config.metrics.enabled {
        let metrics_state = state.clone();
        let shutdown_rx_metrics = shutdown_tx.subscribe();
        background_tasks.spawn(async move {
            metrics_server::run_metrics_server(metrics_state, shutdown_rx_metrics).await;
            Ok(())
        });
    } else {
        info!("Prometheus metrics server is disabled in the configuration.");
    }

    // --- Maintenance ---
    if state.config.presence.background_prune {
        let prune_task = PruneTask::new(
            state.presence.clone(),
            state.config.presence.prune_interval,
        );
        let shutdown_rx_prune = shutdown_tx.subscribe();
        background_tasks.spawn(async move {
            prune_task.run(shutdown_rx_prune).await;
            Ok(())
        });
    }

    info!("All background tasks have been spawned.");
    Ok(())
}
