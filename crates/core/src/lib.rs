//! Momentum core data models.
//!
//! This crate defines the challenge, check-in and milestone structures
//! that the rest of the workspace derives progress from.

#![warn(missing_docs)]

// Core identities
mod id;

// Challenge model
mod challenge;

// Boundary validation
pub mod validate;

// Re-exports
pub use id::*;

pub use challenge::{
    Challenge, ChallengeFilter, CheckIn, GoalKind, Milestone, ProgressSource,
};
pub use validate::ValidationError;

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
