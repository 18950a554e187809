//! Progress derivation for Momentum challenges.
//!
//! Pure functions only. Every call recomputes from the full check-in
//! history rather than incrementally updating a counter, which keeps
//! the derivation idempotent and eliminates drift between `progress`
//! and the underlying check-ins.

#![warn(missing_docs)]

mod progress;

pub use progress::{
    compute_progress, derive_milestones, override_progress, recompute, summary, total_days,
    CheckInSummary,
};
