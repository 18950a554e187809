//! In-memory store implementation.
//!
//! The single authoritative copy of session state: no duplicate
//! module-level mirror, one write path through [`ChallengeStore`].
//! Nothing survives process exit.

use momentum_core::{Challenge, ChallengeId};
use tracing::debug;

use super::{seed, ChallengeStore, Result, StoreError};

/// Session-scoped challenge store backed by a plain vector.
#[derive(Debug, Default)]
pub struct MemoryStore {
    challenges: Vec<Challenge>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the seed fixture.
    pub fn seeded() -> Result<Self> {
        let challenges = seed::seed_challenges()?;
        debug!(count = challenges.len(), "seeded store from fixture");
        Ok(Self { challenges })
    }

    fn position(&self, id: ChallengeId) -> Option<usize> {
        self.challenges.iter().position(|c| c.id == id)
    }
}

#[async_trait::async_trait]
impl ChallengeStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Challenge>> {
        Ok(self.challenges.clone())
    }

    async fn get(&self, id: ChallengeId) -> Result<Option<Challenge>> {
        Ok(self.challenges.iter().find(|c| c.id == id).cloned())
    }

    async fn insert(&mut self, challenge: &Challenge) -> Result<()> {
        if self.position(challenge.id).is_some() {
            return Err(StoreError::Duplicate(challenge.id));
        }
        self.challenges.push(challenge.clone());
        debug!(id = %challenge.id, "inserted challenge");
        Ok(())
    }

    async fn update(&mut self, challenge: &Challenge) -> Result<()> {
        let index = self
            .position(challenge.id)
            .ok_or(StoreError::NotFound(challenge.id))?;
        self.challenges[index] = challenge.clone();
        debug!(id = %challenge.id, "updated challenge");
        Ok(())
    }

    async fn remove(&mut self, id: ChallengeId) -> Result<Challenge> {
        let index = self.position(id).ok_or(StoreError::NotFound(id))?;
        let removed = self.challenges.remove(index);
        debug!(id = %id, "removed challenge");
        Ok(removed)
    }
}
