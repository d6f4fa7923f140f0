// src/core/metrics.rs

//! Defines and registers Prometheus metrics for board monitoring.
//!
//! This module uses `lazy_static` to ensure that metrics are registered only once
//! globally for the entire application lifecycle.

use lazy_static::lazy_static;
use prometheus::{Counter, Gauge, TextEncoder, register_counter, register_gauge};

lazy_static! {
    // --- Gauges ---
    /// Identifiers currently held in the registry, refreshed on every summary.
    pub static ref KNOWN_CLIENTS: Gauge =
        register_gauge!("cupboard_known_clients", "Number of client identifiers currently tracked.").unwrap();
    /// Clients with a heartbeat inside the active window, refreshed on every summary.
    pub static ref ACTIVE_CLIENTS: Gauge =
        register_gauge!("cupboard_active_clients", "Number of clients with a recent heartbeat.").unwrap();


    // --- Counters ---
    /// The total number of heartbeats recorded since startup.
    pub static ref HEARTBEATS_TOTAL: Counter =
        register_counter!("cupboard_heartbeats_total", "Total number of heartbeats recorded.").unwrap();
    /// The total number of accepted status selections.
    pub static ref SELECTIONS_TOTAL: Counter =
        register_counter!("cupboard_selections_total", "Total number of accepted status selections.").unwrap();
    /// The total number of selections rejected as invalid.
    pub static ref REJECTED_SELECTIONS_TOTAL: Counter =
        register_counter!("cupboard_rejected_selections_total", "Total number of selections rejected with an invalid status.").unwrap();
    /// The total number of prune passes that actually ran.
    pub static ref PRUNE_PASSES_TOTAL: Counter =
        register_counter!("cupboard_prune_passes_total", "Total number of prune passes executed.").unwrap();
    /// The total number of clients evicted as stale.
    pub static ref EVICTED_CLIENTS_TOTAL: Counter =
        register_counter!("cupboard_evicted_clients_total", "Total number of stale clients evicted.").unwrap();
}

/// Gathers all registered metrics and encodes them in the Prometheus text format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    encoder
        .encode_to_string(&metric_families)
        .unwrap_or_else(|e| format!("# failed to encode metrics: {e}\n"))
}
