// src/core/mod.rs

//! The central module containing the core logic and data structures of Cupboard.

pub mod errors;
pub mod metrics;
pub mod presence;
pub mod state;
pub mod tasks;

pub use errors::PresenceError;
pub use presence::{PresenceService, Status, Summary};
