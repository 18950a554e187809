//! Boundary validation for user-supplied input.
//!
//! Every rule here is checked before the progress engine is ever
//! invoked; the engine itself is total over validated data.

use thiserror::Error;

use crate::challenge::GoalKind;

/// Minimum challenge title length in characters.
pub const MIN_TITLE_LEN: usize = 3;

/// Minimum challenge description length in characters.
pub const MIN_DESCRIPTION_LEN: usize = 10;

/// Maximum check-in notes length in characters.
pub const MAX_NOTES_LEN: usize = 500;

/// A rejected field value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Title shorter than [`MIN_TITLE_LEN`]
    #[error("title must be at least {} characters", MIN_TITLE_LEN)]
    TitleTooShort,

    /// Description shorter than [`MIN_DESCRIPTION_LEN`]
    #[error("description must be at least {} characters", MIN_DESCRIPTION_LEN)]
    DescriptionTooShort,

    /// End date earlier than start date
    #[error("end date must not be before start date")]
    EndBeforeStart,

    /// Challenge submitted without milestones
    #[error("add at least one milestone")]
    NoMilestones,

    /// Milestone submitted without a title
    #[error("milestone title is required")]
    MilestoneTitleEmpty,

    /// Milestone threshold outside 1..=100
    #[error("milestone threshold must be between 1 and 100, got {0}")]
    ThresholdOutOfRange(u8),

    /// Count goal with a zero target
    #[error("count target must be at least 1")]
    ZeroTarget,

    /// Check-in submitted without notes
    #[error("please enter some notes about your progress")]
    NotesEmpty,

    /// Check-in notes longer than [`MAX_NOTES_LEN`]
    #[error("notes must not be longer than {} characters", MAX_NOTES_LEN)]
    NotesTooLong,

    /// Manual progress value above 100
    #[error("progress must be between 0 and 100, got {0}")]
    ProgressOutOfRange(u8),
}

/// Validate a challenge title.
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.chars().count() < MIN_TITLE_LEN {
        return Err(ValidationError::TitleTooShort);
    }
    Ok(())
}

/// Validate a challenge description.
pub fn validate_description(description: &str) -> Result<(), ValidationError> {
    if description.chars().count() < MIN_DESCRIPTION_LEN {
        return Err(ValidationError::DescriptionTooShort);
    }
    Ok(())
}

/// Validate a challenge date range.
pub fn validate_date_range(start: crate::Time, end: crate::Time) -> Result<(), ValidationError> {
    if end < start {
        return Err(ValidationError::EndBeforeStart);
    }
    Ok(())
}

/// Validate a goal kind.
pub fn validate_goal_kind(kind: &GoalKind) -> Result<(), ValidationError> {
    if let GoalKind::Count { target: 0 } = kind {
        return Err(ValidationError::ZeroTarget);
    }
    Ok(())
}

/// Validate a milestone title.
pub fn validate_milestone_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::MilestoneTitleEmpty);
    }
    Ok(())
}

/// Validate a milestone threshold.
pub fn validate_threshold(threshold: u8) -> Result<(), ValidationError> {
    if !(1..=100).contains(&threshold) {
        return Err(ValidationError::ThresholdOutOfRange(threshold));
    }
    Ok(())
}

/// Validate check-in notes.
pub fn validate_notes(notes: &str) -> Result<(), ValidationError> {
    if notes.is_empty() {
        return Err(ValidationError::NotesEmpty);
    }
    if notes.chars().count() > MAX_NOTES_LEN {
        return Err(ValidationError::NotesTooLong);
    }
    Ok(())
}

/// Validate a manual progress override value.
pub fn validate_progress(progress: u8) -> Result<(), ValidationError> {
    if progress > 100 {
        return Err(ValidationError::ProgressOutOfRange(progress));
    }
    Ok(())
}
