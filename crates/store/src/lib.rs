//! Store abstraction and in-memory implementation for Momentum.
//!
//! Session-scoped by design: state is seeded from a fixed fixture and
//! lives only for the lifetime of the process.

#![warn(missing_docs)]

pub mod memory;
pub mod seed;
pub mod trait_;

pub use memory::MemoryStore;
pub use trait_::{ChallengeStore, Result, StoreError};
