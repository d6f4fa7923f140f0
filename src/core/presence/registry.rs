// src/core/presence/registry.rs

//! The authoritative map from client identifier to its last reported
//! status and liveness timestamps.

use super::status::Status;
use crate::core::errors::PresenceError;
use dashmap::DashMap;
use std::time::Instant;

/// Everything the board knows about one client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientRecord {
    pub id: String,
    /// Unset until the client makes its first selection.
    pub status: Option<Status>,
    pub first_seen_at: Instant,
    /// Unset until the client's presence surface is polled.
    pub last_heartbeat_at: Option<Instant>,
}

impl ClientRecord {
    fn new(id: &str, now: Instant) -> Self {
        Self {
            id: id.to_string(),
            status: None,
            first_seen_at: now,
            last_heartbeat_at: None,
        }
    }

    /// The timestamp staleness is measured from: the last heartbeat,
    /// or the creation time when the client never sent one.
    pub fn liveness_anchor(&self) -> Instant {
        self.last_heartbeat_at.unwrap_or(self.first_seen_at)
    }
}

/// A concurrent registry of clients keyed by their opaque identifier.
///
/// Each record is mutated under its shard lock, so a reader never
/// observes a half-written record.
#[derive(Debug, Default)]
pub struct ClientRegistry {
    clients: DashMap<String, ClientRecord>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the record if absent and marks it alive at `now`.
    /// A `now` older than the stored heartbeat is ignored.
    pub fn upsert_heartbeat(&self, id: &str, now: Instant) {
        self.clients
            .entry(id.to_string())
            .and_modify(|record| {
                if record.last_heartbeat_at.is_none_or(|last| now > last) {
                    record.last_heartbeat_at = Some(now);
                }
            })
            .or_insert_with(|| {
                let mut record = ClientRecord::new(id, now);
                record.last_heartbeat_at = Some(now);
                record
            });
    }

    /// Validates `raw` and stores it as the client's status.
    ///
    /// Invalid input is rejected before any write, so the registry is
    /// untouched on error. Does not move the heartbeat.
    pub fn upsert_status(&self, id: &str, raw: &str, now: Instant) -> Result<Status, PresenceError> {
        let status = Status::parse(raw)?;
        self.set_status(id, status, now);
        Ok(status)
    }

    /// Stores an already validated status.
    pub fn set_status(&self, id: &str, status: Status, now: Instant) {
        self.clients
            .entry(id.to_string())
            .or_insert_with(|| ClientRecord::new(id, now))
            .status = Some(status);
    }

    /// Returns a copy of the record, or `None` for unknown ids.
    pub fn get(&self, id: &str) -> Option<ClientRecord> {
        self.clients.get(id).map(|entry| entry.value().clone())
    }

    /// Deletes the record. No-op when absent.
    pub fn remove(&self, id: &str) -> Option<ClientRecord> {
        self.clients.remove(id).map(|(_, record)| record)
    }

    /// Deletes the record only if `predicate` holds for its current value.
    /// The check and the removal happen under the same shard lock.
    pub fn remove_if(&self, id: &str, predicate: impl FnOnce(&ClientRecord) -> bool) -> bool {
        self.clients
            .remove_if(id, |_, record| predicate(record))
            .is_some()
    }

    /// A point-in-time copy of every known identifier.
    pub fn all_ids(&self) -> Vec<String> {
        self.clients.iter().map(|entry| entry.key().clone()).collect()
    }

    /// A point-in-time copy of every record.
    pub fn snapshot(&self) -> Vec<ClientRecord> {
        self.clients.iter().map(|entry| entry.value().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}
