// src/core/presence/status.rs

//! The three cup colors a student can report.

use crate::core::errors::PresenceError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum_macros::{AsRefStr, Display, EnumString};

/// A student's self-reported status.
///
/// The declaration order is the fixed presentation order of summary buckets.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Status {
    /// Fully understands.
    Green,
    /// Unsure.
    Yellow,
    /// Stuck and needs help.
    Red,
}

impl Status {
    /// All statuses in presentation order.
    pub const ALL: [Status; 3] = [Status::Green, Status::Yellow, Status::Red];

    /// Parses raw client input, ignoring surrounding whitespace and ASCII case.
    pub fn parse(input: &str) -> Result<Self, PresenceError> {
        Status::from_str(input.trim()).map_err(|_| PresenceError::InvalidStatus(input.to_string()))
    }

    /// The capitalized form used in confirmation messages, e.g. "Green".
    pub fn label(&self) -> &'static str {
        match self {
            Status::Green => "Green",
            Status::Yellow => "Yellow",
            Status::Red => "Red",
        }
    }

    /// Position of this status in the bucket array.
    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}
