//! Progress and milestone derivation.

use momentum_core::{Challenge, GoalKind, Milestone, ProgressSource, Time};
use serde::Serialize;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Number of whole or partial days spanned by the date range, floored
/// at one so the ratio below stays defined for degenerate ranges.
pub fn total_days(start: Time, end: Time) -> u32 {
    let span_ms = (end - start).num_milliseconds() as f64;
    (span_ms / MILLIS_PER_DAY).ceil().max(1.0) as u32
}

/// Derive the completion percentage for a challenge from its check-in
/// history.
///
/// `Count` goals divide completed check-ins by the fixed target;
/// `TimeSpan` goals divide by the day span of the date range. The
/// result is clamped to 0..=100.
pub fn compute_progress(challenge: &Challenge) -> u8 {
    let completed = challenge.completed_check_ins();
    match challenge.kind {
        GoalKind::Count { target } => ratio_percent(completed, target.max(1)),
        GoalKind::TimeSpan => {
            let days = total_days(challenge.start_date, challenge.end_date);
            ratio_percent(completed, days)
        }
    }
}

fn ratio_percent(completed: usize, denominator: u32) -> u8 {
    let pct = (completed as f64 / denominator as f64 * 100.0).round();
    pct.min(100.0) as u8
}

/// Re-derive the achieved flag for every milestone against `progress`.
///
/// Order-preserving; ids, titles and thresholds are untouched.
pub fn derive_milestones(milestones: &[Milestone], progress: u8) -> Vec<Milestone> {
    milestones
        .iter()
        .map(|m| Milestone {
            achieved: progress >= m.threshold,
            ..m.clone()
        })
        .collect()
}

/// Recompute `progress` and milestone flags from the check-in history,
/// returning the challenge with everything else unchanged.
///
/// Idempotent. Must be applied atomically with any mutation of the
/// check-ins, title, kind or date range; it also supersedes any
/// manual override, resetting the progress source to `Derived`.
pub fn recompute(mut challenge: Challenge) -> Challenge {
    let progress = compute_progress(&challenge);
    challenge.milestones = derive_milestones(&challenge.milestones, progress);
    challenge.progress = progress;
    challenge.progress_source = ProgressSource::Derived;
    challenge
}

/// Apply a manual bulk override: set `progress` directly and derive
/// milestones against it, bypassing the check-in history.
///
/// The override is marked `Manual` and lasts only until the next
/// history-driven [`recompute`].
pub fn override_progress(mut challenge: Challenge, progress: u8) -> Challenge {
    challenge.milestones = derive_milestones(&challenge.milestones, progress);
    challenge.progress = progress;
    challenge.progress_source = ProgressSource::Manual;
    challenge
}

/// Check-in totals shown alongside the check-in surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckInSummary {
    /// Completed check-ins needed for 100%
    pub total: u32,

    /// Check-ins marked completed so far
    pub completed: u32,

    /// Completed check-ins still outstanding
    pub remaining: u32,
}

/// Summarize how many completed check-ins a challenge needs and has.
pub fn summary(challenge: &Challenge) -> CheckInSummary {
    let total = match challenge.kind {
        GoalKind::Count { target } => target.max(1),
        GoalKind::TimeSpan => total_days(challenge.start_date, challenge.end_date),
    };
    let completed = challenge.completed_check_ins() as u32;
    CheckInSummary {
        total,
        completed,
        remaining: total.saturating_sub(completed),
    }
}
