//! Challenge mutation service.
//!
//! The single write path: every mutation validates at the boundary,
//! applies the progress engine, and persists the whole record before
//! returning, so a stored challenge never carries stale progress or
//! milestone flags.

use chrono::{Duration, Utc};
use momentum_core::{
    validate, Challenge, ChallengeFilter, ChallengeId, CheckIn, GoalKind, Milestone, Time,
    ValidationError,
};
use momentum_engine as engine;
use momentum_store::{ChallengeStore, StoreError};
use tracing::{debug, info};

use crate::trash::Trash;

/// Error type for tracker operations.
pub type Result<T> = std::result::Result<T, TrackerError>;

/// Errors surfaced by the mutation service.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    /// Rejected user input
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Underlying store failure
    #[error(transparent)]
    Store(#[from] StoreError),

    /// No challenge with the given id
    #[error("challenge not found: {0}")]
    NotFound(ChallengeId),

    /// Nothing restorable for the given id
    #[error("no recently deleted challenge to restore: {0}")]
    NothingToRestore(ChallengeId),
}

/// User-submitted fields for creating or editing a challenge.
#[derive(Debug, Clone)]
pub struct ChallengeDraft {
    /// Challenge title
    pub title: String,
    /// Detailed description
    pub description: String,
    /// When the challenge begins
    pub start_date: Time,
    /// When the challenge ends
    pub end_date: Time,
    /// How completion is measured
    pub kind: GoalKind,
    /// Milestone thresholds
    pub milestones: Vec<MilestoneDraft>,
}

/// User-submitted fields for a milestone.
#[derive(Debug, Clone)]
pub struct MilestoneDraft {
    /// Milestone title
    pub title: String,
    /// Progress percentage at which the milestone is reached
    pub threshold: u8,
}

/// Challenge mutation service over a [`ChallengeStore`].
pub struct ChallengeTracker<S: ChallengeStore> {
    store: S,
    trash: Trash,
}

impl<S: ChallengeStore> ChallengeTracker<S> {
    /// Create a tracker with the default undo window (five minutes,
    /// sixteen entries).
    pub fn new(store: S) -> Self {
        Self {
            store,
            trash: Trash::new(Duration::minutes(5), 16),
        }
    }

    /// Replace the undo window.
    pub fn with_undo_window(mut self, ttl: Duration, capacity: usize) -> Self {
        self.trash = Trash::new(ttl, capacity);
        self
    }

    /// List challenges passing `filter`, in insertion order.
    pub async fn list(&self, filter: ChallengeFilter) -> Result<Vec<Challenge>> {
        let now = Utc::now();
        let challenges = self.store.list().await?;
        Ok(challenges
            .into_iter()
            .filter(|c| filter.matches(c, now))
            .collect())
    }

    /// Load a challenge by id.
    pub async fn get(&self, id: ChallengeId) -> Result<Challenge> {
        self.store
            .get(id)
            .await?
            .ok_or(TrackerError::NotFound(id))
    }

    /// Create a challenge from a validated draft.
    pub async fn create(&mut self, draft: ChallengeDraft) -> Result<Challenge> {
        validate_draft(&draft)?;

        let milestones = draft
            .milestones
            .iter()
            .map(|m| Milestone::new(m.title.clone(), m.threshold))
            .collect();
        let challenge = Challenge::new(
            draft.title,
            draft.description,
            draft.start_date,
            draft.end_date,
            draft.kind,
            milestones,
        );

        let challenge = engine::recompute(challenge);
        self.store.insert(&challenge).await?;
        info!(id = %challenge.id, title = %challenge.title, "created challenge");
        Ok(challenge)
    }

    /// Re-submit a challenge's editable fields.
    ///
    /// The check-in history is preserved untouched; milestone ids are
    /// retained positionally so an edited milestone keeps its identity.
    pub async fn edit(&mut self, id: ChallengeId, draft: ChallengeDraft) -> Result<Challenge> {
        validate_draft(&draft)?;
        let existing = self.get(id).await?;

        let milestones = draft
            .milestones
            .iter()
            .enumerate()
            .map(|(i, m)| match existing.milestones.get(i) {
                Some(old) => Milestone {
                    id: old.id,
                    title: m.title.clone(),
                    threshold: m.threshold,
                    achieved: old.achieved,
                },
                None => Milestone::new(m.title.clone(), m.threshold),
            })
            .collect();

        let updated = Challenge {
            title: draft.title,
            description: draft.description,
            start_date: draft.start_date,
            end_date: draft.end_date,
            kind: draft.kind,
            milestones,
            updated_at: Utc::now(),
            ..existing
        };

        let updated = engine::recompute(updated);
        self.store.update(&updated).await?;
        info!(id = %updated.id, "edited challenge");
        Ok(updated)
    }

    /// Append a check-in and recompute progress in the same step.
    pub async fn add_check_in(
        &mut self,
        id: ChallengeId,
        notes: impl Into<String>,
        completed: bool,
    ) -> Result<Challenge> {
        let notes = notes.into();
        validate::validate_notes(&notes)?;

        let mut challenge = self.get(id).await?;
        challenge.check_ins.push(CheckIn::new(notes, completed));
        challenge.updated_at = Utc::now();

        let challenge = engine::recompute(challenge);
        self.store.update(&challenge).await?;
        info!(id = %challenge.id, progress = challenge.progress, completed, "recorded check-in");
        Ok(challenge)
    }

    /// Manually override progress, deriving milestones against the
    /// override instead of the check-in history.
    pub async fn set_progress(&mut self, id: ChallengeId, progress: u8) -> Result<Challenge> {
        validate::validate_progress(progress)?;

        let mut challenge = self.get(id).await?;
        challenge.updated_at = Utc::now();
        challenge = engine::override_progress(challenge, progress);

        self.store.update(&challenge).await?;
        info!(id = %challenge.id, progress, "manual progress override");
        Ok(challenge)
    }

    /// Delete a challenge, parking it in the undo buffer.
    pub async fn delete(&mut self, id: ChallengeId) -> Result<()> {
        let removed = match self.store.remove(id).await {
            Ok(challenge) => challenge,
            Err(StoreError::NotFound(id)) => return Err(TrackerError::NotFound(id)),
            Err(e) => return Err(e.into()),
        };
        info!(id = %removed.id, title = %removed.title, "deleted challenge");
        self.trash.push(removed, Utc::now());
        Ok(())
    }

    /// Restore a recently deleted challenge, if its undo window is
    /// still open.
    pub async fn restore(&mut self, id: ChallengeId) -> Result<Challenge> {
        let challenge = self
            .trash
            .take(id, Utc::now())
            .ok_or(TrackerError::NothingToRestore(id))?;

        let challenge = engine::recompute(challenge);
        self.store.insert(&challenge).await?;
        info!(id = %challenge.id, "restored challenge");
        Ok(challenge)
    }

    /// Close lapsed undo windows.
    pub fn purge_expired(&mut self) -> usize {
        let purged = self.trash.purge_expired(Utc::now());
        if purged > 0 {
            debug!(purged, "purged expired deletions");
        }
        purged
    }
}

fn validate_draft(draft: &ChallengeDraft) -> std::result::Result<(), ValidationError> {
    validate::validate_title(&draft.title)?;
    validate::validate_description(&draft.description)?;
    validate::validate_date_range(draft.start_date, draft.end_date)?;
    validate::validate_goal_kind(&draft.kind)?;
    if draft.milestones.is_empty() {
        return Err(ValidationError::NoMilestones);
    }
    for milestone in &draft.milestones {
        validate::validate_milestone_title(&milestone.title)?;
        validate::validate_threshold(milestone.threshold)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use momentum_core::ProgressSource;
    use momentum_store::MemoryStore;

    fn seeded_tracker() -> ChallengeTracker<MemoryStore> {
        ChallengeTracker::new(MemoryStore::seeded().unwrap())
    }

    async fn find_by_title(tracker: &ChallengeTracker<MemoryStore>, title: &str) -> Challenge {
        tracker
            .list(ChallengeFilter::All)
            .await
            .unwrap()
            .into_iter()
            .find(|c| c.title == title)
            .unwrap()
    }

    fn draft() -> ChallengeDraft {
        ChallengeDraft {
            title: "Morning Pages".to_string(),
            description: "Write three pages every morning before breakfast.".to_string(),
            start_date: Utc.with_ymd_and_hms(2023, 9, 1, 0, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2023, 9, 30, 23, 59, 59).unwrap(),
            kind: GoalKind::TimeSpan,
            milestones: vec![
                MilestoneDraft {
                    title: "Halfway".to_string(),
                    threshold: 50,
                },
                MilestoneDraft {
                    title: "Done".to_string(),
                    threshold: 100,
                },
            ],
        }
    }

    #[tokio::test]
    async fn test_create_starts_at_zero_progress() {
        let mut tracker = seeded_tracker();
        let challenge = tracker.create(draft()).await.unwrap();

        assert_eq!(challenge.progress, 0);
        assert_eq!(challenge.progress_source, ProgressSource::Derived);
        assert!(challenge.milestones.iter().all(|m| !m.achieved));
        assert_eq!(tracker.list(ChallengeFilter::All).await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_draft() {
        let mut tracker = seeded_tracker();

        let mut short_title = draft();
        short_title.title = "Go".to_string();
        assert!(matches!(
            tracker.create(short_title).await,
            Err(TrackerError::Validation(ValidationError::TitleTooShort))
        ));

        let mut no_milestones = draft();
        no_milestones.milestones.clear();
        assert!(matches!(
            tracker.create(no_milestones).await,
            Err(TrackerError::Validation(ValidationError::NoMilestones))
        ));
    }

    #[tokio::test]
    async fn test_check_in_recomputes_from_history() {
        let mut tracker = seeded_tracker();
        let yoga = find_by_title(&tracker, "30 Days of Yoga").await;

        // Seeded with a hand-authored 65; 19 of its 20 entries are
        // completed over a 30-day span, so the first mutation lands on
        // round(100 * 20/30) == 67.
        assert_eq!(yoga.progress, 65);
        let updated = tracker
            .add_check_in(yoga.id, "Day 21 done.", true)
            .await
            .unwrap();

        assert_eq!(updated.check_ins.len(), 21);
        assert_eq!(updated.progress, 67);
        assert_eq!(updated.progress_source, ProgressSource::Derived);
        assert_eq!(tracker.get(yoga.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_check_in_against_count_target() {
        let mut tracker = seeded_tracker();
        let books = find_by_title(&tracker, "Read 10 Books").await;

        let updated = tracker
            .add_check_in(books.id, "Finished 'Sapiens' at last.", true)
            .await
            .unwrap();
        // Fourth completed book of ten
        assert_eq!(updated.progress, 40);
    }

    #[tokio::test]
    async fn test_check_in_rejects_bad_notes() {
        let mut tracker = seeded_tracker();
        let yoga = find_by_title(&tracker, "30 Days of Yoga").await;

        assert!(matches!(
            tracker.add_check_in(yoga.id, "", true).await,
            Err(TrackerError::Validation(ValidationError::NotesEmpty))
        ));
        assert!(matches!(
            tracker.add_check_in(yoga.id, "a".repeat(501), true).await,
            Err(TrackerError::Validation(ValidationError::NotesTooLong))
        ));
    }

    #[tokio::test]
    async fn test_override_lasts_until_next_check_in() {
        let mut tracker = seeded_tracker();
        let yoga = find_by_title(&tracker, "30 Days of Yoga").await;

        let overridden = tracker.set_progress(yoga.id, 80).await.unwrap();
        assert_eq!(overridden.progress, 80);
        assert_eq!(overridden.progress_source, ProgressSource::Manual);
        let achieved: Vec<bool> = overridden.milestones.iter().map(|m| m.achieved).collect();
        assert_eq!(achieved, vec![true, true, true, false]);

        // The next history mutation supersedes the override
        let recomputed = tracker
            .add_check_in(yoga.id, "Back to the mat.", true)
            .await
            .unwrap();
        assert_eq!(recomputed.progress, 67);
        assert_eq!(recomputed.progress_source, ProgressSource::Derived);
    }

    #[tokio::test]
    async fn test_override_rejects_out_of_range() {
        let mut tracker = seeded_tracker();
        let yoga = find_by_title(&tracker, "30 Days of Yoga").await;
        assert!(matches!(
            tracker.set_progress(yoga.id, 101).await,
            Err(TrackerError::Validation(
                ValidationError::ProgressOutOfRange(101)
            ))
        ));
    }

    #[tokio::test]
    async fn test_edit_preserves_history_and_milestone_ids() {
        let mut tracker = seeded_tracker();
        let yoga = find_by_title(&tracker, "30 Days of Yoga").await;

        let mut edit = draft();
        edit.title = "30 Days of Yoga, Extended".to_string();
        let updated = tracker.edit(yoga.id, edit).await.unwrap();

        assert_eq!(updated.title, "30 Days of Yoga, Extended");
        assert_eq!(updated.check_ins, yoga.check_ins);
        assert_eq!(updated.created_at, yoga.created_at);
        // Two draft milestones against four existing: ids retained
        // positionally for the surviving slots
        assert_eq!(updated.milestones.len(), 2);
        assert_eq!(updated.milestones[0].id, yoga.milestones[0].id);
        assert_eq!(updated.milestones[1].id, yoga.milestones[1].id);
        assert_eq!(updated.milestones[0].threshold, 50);
        // Recomputed against the draft's 30-day September range
        assert_eq!(updated.progress, 63);
    }

    #[tokio::test]
    async fn test_delete_then_restore() {
        let mut tracker = seeded_tracker();
        let yoga = find_by_title(&tracker, "30 Days of Yoga").await;

        tracker.delete(yoga.id).await.unwrap();
        assert!(matches!(
            tracker.get(yoga.id).await,
            Err(TrackerError::NotFound(_))
        ));

        let restored = tracker.restore(yoga.id).await.unwrap();
        assert_eq!(restored.id, yoga.id);
        assert_eq!(restored.check_ins, yoga.check_ins);
        assert_eq!(tracker.list(ChallengeFilter::All).await.unwrap().len(), 4);

        // The undo buffer entry is consumed
        assert!(matches!(
            tracker.restore(yoga.id).await,
            Err(TrackerError::NothingToRestore(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_unknown_id() {
        let mut tracker = seeded_tracker();
        let unknown = ChallengeId::new();
        assert!(matches!(
            tracker.delete(unknown).await,
            Err(TrackerError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_active_filter() {
        let mut tracker = seeded_tracker();

        // Every seeded challenge ended in 2023, so none is active
        assert!(tracker.list(ChallengeFilter::Active).await.unwrap().is_empty());

        let mut ongoing = draft();
        ongoing.start_date = Utc.with_ymd_and_hms(2099, 1, 1, 0, 0, 0).unwrap();
        ongoing.end_date = Utc.with_ymd_and_hms(2099, 1, 31, 23, 59, 59).unwrap();
        let created = tracker.create(ongoing).await.unwrap();

        let active = tracker.list(ChallengeFilter::Active).await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, created.id);
    }

    #[tokio::test]
    async fn test_list_completed_filter() {
        let tracker = seeded_tracker();
        let completed = tracker.list(ChallengeFilter::Completed).await.unwrap();
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].title, "Complete Marathon Training");
    }
}
