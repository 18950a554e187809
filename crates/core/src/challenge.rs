//! Challenge model - a user-defined goal with derived progress.

use serde::{Deserialize, Serialize};
use crate::id::{ChallengeId, CheckInId, MilestoneId};
use crate::Time;

/// A challenge is a dated goal the user checks in against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    /// Unique identifier
    pub id: ChallengeId,

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

    /// Completion percentage (0-100)
    pub progress: u8,

    /// Where the current progress value came from
    pub progress_source: ProgressSource,

    /// Check-in history, append-only
    pub check_ins: Vec<CheckIn>,

    /// Milestone thresholds with derived achievement flags
    pub milestones: Vec<Milestone>,

    /// When created
    pub created_at: Time,

    /// Last updated
    pub updated_at: Time,
}

impl Challenge {
    /// Create a challenge with no check-in history and zero progress.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        start_date: Time,
        end_date: Time,
        kind: GoalKind,
        milestones: Vec<Milestone>,
    ) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: ChallengeId::new(),
            title: title.into(),
            description: description.into(),
            start_date,
            end_date,
            kind,
            progress: 0,
            progress_source: ProgressSource::Derived,
            check_ins: Vec::new(),
            milestones,
            created_at: now,
            updated_at: now,
        }
    }

    /// Number of check-ins marked completed.
    pub fn completed_check_ins(&self) -> usize {
        self.check_ins.iter().filter(|c| c.completed).count()
    }
}

/// How a challenge measures completion.
///
/// Chosen at creation time; replaces title-text sniffing for
/// fixed-target goals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalKind {
    /// A fixed number of completed check-ins reaches the goal
    Count {
        /// Completed check-ins needed for 100%
        target: u32,
    },

    /// One completed check-in expected per day of the date range
    TimeSpan,
}

/// Origin of a challenge's current progress value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressSource {
    /// Recomputed from the check-in history
    Derived,

    /// Set directly by a bulk override; superseded by the next
    /// history-driven recompute
    Manual,
}

/// A journal entry against a challenge. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckIn {
    /// Unique identifier
    pub id: CheckInId,

    /// When the check-in was recorded
    pub date: Time,

    /// Free-form notes (at most 500 characters)
    pub notes: String,

    /// Whether this entry counts toward the goal
    pub completed: bool,
}

impl CheckIn {
    /// Create a check-in stamped with the current time.
    pub fn new(notes: impl Into<String>, completed: bool) -> Self {
        Self {
            id: CheckInId::new(),
            date: chrono::Utc::now(),
            notes: notes.into(),
            completed,
        }
    }
}

/// A progress threshold with a derived achieved flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    /// Unique identifier
    pub id: MilestoneId,

    /// Milestone title
    pub title: String,

    /// Progress percentage at which the milestone is reached (1-100)
    pub threshold: u8,

    /// Derived cache of `progress >= threshold`
    pub achieved: bool,
}

impl Milestone {
    /// Create an unachieved milestone.
    pub fn new(title: impl Into<String>, threshold: u8) -> Self {
        Self {
            id: MilestoneId::new(),
            title: title.into(),
            threshold,
            achieved: false,
        }
    }
}

/// List-view filter over challenges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChallengeFilter {
    /// Every challenge
    #[default]
    All,
    /// End date not yet passed and progress below 100
    Active,
    /// Progress at 100
    Completed,
}

impl ChallengeFilter {
    /// Whether `challenge` passes this filter at time `now`.
    pub fn matches(&self, challenge: &Challenge, now: Time) -> bool {
        match self {
            ChallengeFilter::All => true,
            ChallengeFilter::Active => challenge.end_date >= now && challenge.progress < 100,
            ChallengeFilter::Completed => challenge.progress >= 100,
        }
    }
}
