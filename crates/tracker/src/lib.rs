//! Challenge mutation service for Momentum.
//!
//! Composes the store and the progress engine behind a single write
//! path, and owns the undo buffer for deleted challenges.

#![warn(missing_docs)]

mod manager;
mod trash;

pub use manager::{ChallengeDraft, ChallengeTracker, MilestoneDraft, Result, TrackerError};
