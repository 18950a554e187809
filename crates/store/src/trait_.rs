//! Store trait abstraction.

use async_trait::async_trait;
use momentum_core::{Challenge, ChallengeId};

/// Error type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No challenge with the given id
    #[error("challenge not found: {0}")]
    NotFound(ChallengeId),

    /// Insert with an id that already exists
    #[error("duplicate challenge id: {0}")]
    Duplicate(ChallengeId),

    /// Seed fixture could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Store abstraction for challenge records.
///
/// This trait allows different backends to be plugged in; the tracker
/// is the only writer, so every mutation is a whole-record replace.
#[async_trait]
pub trait ChallengeStore: Send + Sync {
    /// List all challenges in insertion order.
    async fn list(&self) -> Result<Vec<Challenge>>;

    /// Load a challenge by id.
    async fn get(&self, id: ChallengeId) -> Result<Option<Challenge>>;

    /// Insert a new challenge. Fails on a duplicate id.
    async fn insert(&mut self, challenge: &Challenge) -> Result<()>;

    /// Replace an existing challenge wholesale. Fails if absent.
    async fn update(&mut self, challenge: &Challenge) -> Result<()>;

    /// Remove a challenge, returning the removed record. Fails if absent.
    async fn remove(&mut self, id: ChallengeId) -> Result<Challenge>;
}
