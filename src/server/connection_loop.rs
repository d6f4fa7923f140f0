// src/server/connection_loop.rs

//! Serves HTTP requests until a shutdown signal arrives, then drains everything.

use super::context::ServerContext;
use super::routes;
use anyhow::{Result, anyhow};
use std::time::Duration;
use tokio::signal::unix::{SignalKind, signal};
use tracing::{error, info, warn};

/// The main server loop: serves the router and handles graceful shutdown.
pub async fn run(mut ctx: ServerContext) -> Result<()> {
    let mut sigint = signal(SignalKind::interrupt())
        .map_err(|e| anyhow!("Failed to register SIGINT handler: {}", e))?;
    let mut sigterm = signal(SignalKind::terminate())
        .map_err(|e| anyhow!("Failed to register SIGTERM handler: {}", e))?;

    let app = routes::router(ctx.state.clone());
    let mut http_shutdown_rx = ctx.shutdown_tx.subscribe();
    let serve = axum::serve(ctx.listener, app).with_graceful_shutdown(async move {
        http_shutdown_rx.recv().await.ok();
        info!("HTTP server shutting down.");
    });
    let mut http_task = tokio::spawn(async move { serve.await });

    loop {
        tokio::select! {
            biased;

            _ = sigint.recv() => {
                info!("SIGINT received, initiating graceful shutdown.");
                break;
            }
            _ = sigterm.recv() => {
                info!("SIGTERM received, initiating graceful shutdown.");
                break;
            }

            res = &mut http_task => {
                match res {
                    Ok(Ok(())) => warn!("HTTP server stopped unexpectedly without an error."),
                    Ok(Err(e)) => error!("CRITICAL: HTTP server failed: {}. Shutting down.", e),
                    Err(e) => error!("CRITICAL: HTTP server panicked: {e:?}. Shutting down."),
                }
                break;
            }

            Some(res) = ctx.background_tasks.join_next() => {
                match res {
                    Ok(Ok(())) => warn!("A background task finished unexpectedly without an error."),
                    Ok(Err(e)) => { error!("CRITICAL: Background task failed: {}. Shutting down.", e); break; }
                    Err(e) => { error!("CRITICAL: Background task panicked: {e:?}. Shutting down."); break; }
                }
            },
        }
    }

    info!("Shutting down. Sending signal to all tasks.");
    if ctx.shutdown_tx.send(()).is_err() {
        warn!("No task was listening for the shutdown signal.");
    }

    info!("Waiting for HTTP server and background tasks to finish...");
    if tokio::time::timeout(Duration::from_secs(10), async {
        if !http_task.is_finished() {
            let _ = (&mut http_task).await;
        }
        while ctx.background_tasks.join_next().await.is_some() {}
    })
    .await
    .is_err()
    {
        warn!("Timed out waiting for tasks to finish cleanly.");
    };
    info!("Server shutdown complete.");
    Ok(())
}
