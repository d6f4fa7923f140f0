// src/core/errors.rs

//! Defines the error type for the presence core.

use thiserror::Error;

/// Failures the presence core can report to its caller.
///
/// Absent clients are not errors: lookups for unknown ids return `None`.
/// A selection racing a prune pass is accepted data loss, not a failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PresenceError {
    /// The reported value is not one of green, yellow or red.
    /// Carries the raw input so the caller can echo it back.
    #[error("Invalid status '{0}'")]
    InvalidStatus(String),
}
