// src/core/tasks/mod.rs

//! This module contains the long-running background tasks that support the
//! board's core functionality.

pub mod prune;
