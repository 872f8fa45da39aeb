//! Mood classification, suggestion pools and food intake estimation.
//!
//! Everything here is synchronous and free of I/O; handlers call into it
//! before anything is persisted.

pub mod chart;
pub mod mood;
pub mod nutrition;
pub mod suggestions;
