// src/core/presence/aggregator.rs

//! Reduces the active clients' statuses into per-color counts and percentages.

use super::registry::ClientRecord;
use super::status::Status;
use serde::Serialize;

/// One status category in a summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bucket {
    pub status: Status,
    pub count: usize,
    /// Share of active clients that selected this status, in `[0, 100]`.
    pub percentage: f64,
}

/// Counts the statuses of `active` and returns one bucket per status in
/// presentation order (green, yellow, red).
///
/// Clients that have not selected anything are left out of the
/// denominator. With no selections at all every percentage is zero.
pub fn aggregate<'a>(active: impl IntoIterator<Item = &'a ClientRecord>) -> Vec<Bucket> {
    let mut counts = [0usize; Status::ALL.len()];
    for status in active.into_iter().filter_map(|record| record.status) {
        counts[status.index()] += 1;
    }

    let total: usize = counts.iter().sum();
    let denominator = total.max(1) as f64;

    Status::ALL
        .iter()
        .map(|&status| {
            let count = counts[status.index()];
            Bucket {
                status,
                count,
                percentage: 100.0 * count as f64 / denominator,
            }
        })
        .collect()
}
