//! Recently-deleted buffer backing challenge undo.
//!
//! Replaces closure-held undo state with an explicit bounded buffer:
//! a deleted challenge can be restored until its TTL lapses or newer
//! deletions push it out.

use chrono::Duration;
use momentum_core::{Challenge, ChallengeId, Time};
use tracing::debug;

/// Bounded buffer of recently deleted challenges.
#[derive(Debug)]
pub struct Trash {
    entries: Vec<Entry>,
    ttl: Duration,
    capacity: usize,
}

#[derive(Debug)]
struct Entry {
    challenge: Challenge,
    deleted_at: Time,
}

impl Trash {
    /// Create a buffer that keeps at most `capacity` deletions, each
    /// restorable for `ttl` after deletion.
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            ttl,
            capacity: capacity.max(1),
        }
    }

    /// Park a deleted challenge. The oldest entry is evicted once the
    /// buffer is full.
    pub fn push(&mut self, challenge: Challenge, now: Time) {
        if self.entries.len() == self.capacity {
            let evicted = self.entries.remove(0);
            debug!(id = %evicted.challenge.id, "evicted from undo buffer");
        }
        self.entries.push(Entry {
            challenge,
            deleted_at: now,
        });
    }

    /// Take a challenge back out of the buffer, if it is still present
    /// and its undo window has not lapsed.
    pub fn take(&mut self, id: ChallengeId, now: Time) -> Option<Challenge> {
        let index = self
            .entries
            .iter()
            .position(|e| e.challenge.id == id && now - e.deleted_at <= self.ttl)?;
        Some(self.entries.remove(index).challenge)
    }

    /// Drop every entry whose undo window has lapsed. Returns how many
    /// were dropped.
    pub fn purge_expired(&mut self, now: Time) -> usize {
        let before = self.entries.len();
        let ttl = self.ttl;
        self.entries.retain(|e| now - e.deleted_at <= ttl);
        before - self.entries.len()
    }

    /// Number of restorable entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use momentum_core::GoalKind;

    fn sample(title: &str) -> Challenge {
        Challenge::new(
            title,
            "A challenge used by the trash tests.",
            Utc.with_ymd_and_hms(2023, 9, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2023, 9, 30, 0, 0, 0).unwrap(),
            GoalKind::TimeSpan,
            vec![],
        )
    }

    #[test]
    fn test_take_within_window() {
        let now = Utc.with_ymd_and_hms(2023, 9, 5, 12, 0, 0).unwrap();
        let mut trash = Trash::new(Duration::minutes(5), 8);
        let challenge = sample("Deleted");
        let id = challenge.id;

        trash.push(challenge, now);
        let restored = trash.take(id, now + Duration::minutes(4)).unwrap();
        assert_eq!(restored.id, id);
        assert!(trash.is_empty());
    }

    #[test]
    fn test_take_after_expiry_fails() {
        let now = Utc.with_ymd_and_hms(2023, 9, 5, 12, 0, 0).unwrap();
        let mut trash = Trash::new(Duration::minutes(5), 8);
        let challenge = sample("Deleted");
        let id = challenge.id;

        trash.push(challenge, now);
        assert!(trash.take(id, now + Duration::minutes(6)).is_none());
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let now = Utc.with_ymd_and_hms(2023, 9, 5, 12, 0, 0).unwrap();
        let mut trash = Trash::new(Duration::minutes(5), 2);
        let first = sample("First");
        let first_id = first.id;

        trash.push(first, now);
        trash.push(sample("Second"), now);
        trash.push(sample("Third"), now);

        assert_eq!(trash.len(), 2);
        assert!(trash.take(first_id, now).is_none());
    }

    #[test]
    fn test_purge_expired() {
        let now = Utc.with_ymd_and_hms(2023, 9, 5, 12, 0, 0).unwrap();
        let mut trash = Trash::new(Duration::minutes(5), 8);
        trash.push(sample("Old"), now);
        trash.push(sample("Fresh"), now + Duration::minutes(4));

        assert_eq!(trash.purge_expired(now + Duration::minutes(6)), 1);
        assert_eq!(trash.len(), 1);
    }
}
