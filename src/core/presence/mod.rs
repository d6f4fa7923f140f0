// src/core/presence/mod.rs

//! The session presence and aggregation engine.
//!
//! Clients report heartbeats and a cup color. The engine tracks who is
//! alive, summarizes the colors of active clients and evicts clients that
//! have been silent for longer than the stale window.

pub mod aggregator;
pub mod classifier;
pub mod clock;
pub mod pruner;
pub mod registry;
pub mod service;
pub mod status;

pub use aggregator::Bucket;
pub use classifier::PresenceWindows;
pub use clock::{Clock, ManualClock, SystemClock};
pub use pruner::{PruneOutcome, Pruner};
pub use registry::{ClientRecord, ClientRegistry};
pub use service::{PresenceService, Summary};
pub use status::Status;
