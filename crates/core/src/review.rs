//! Performance review rules: status transitions, rating bounds, and the
//! scheduling window.

use crate::error::CoreError;
use crate::status::ReviewStatus;
use crate::types::Timestamp;
use crate::workflow::Transition;

/// Lowest accepted rating.
pub const MIN_RATING: i16 = 1;

/// Highest accepted rating.
pub const MAX_RATING: i16 = 5;

/// Maximum length of a review comment.
pub const MAX_COMMENT_LEN: usize = 4000;

impl Transition for ReviewStatus {
    const ENTITY: &'static str = "PerformanceReview";

    fn can_transition_to(self, next: Self) -> bool {
        use ReviewStatus::*;
        matches!(
            (self, next),
            (Pending, Pending)
                | (Pending, Upcoming)
                | (Pending, Completed)
                | (Upcoming, Upcoming)
                | (Upcoming, Completed)
                | (Completed, Completed)
        )
    }
}

/// Validate a rating value.
pub fn validate_rating(rating: i16) -> Result<(), CoreError> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(CoreError::Validation(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING}, got {rating}"
        )));
    }
    Ok(())
}

/// Validate a free-text comment.
pub fn validate_comment(comment: &str) -> Result<(), CoreError> {
    if comment.len() > MAX_COMMENT_LEN {
        return Err(CoreError::Validation(format!(
            "Comment must be at most {MAX_COMMENT_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate an optional scheduling window. Both ends must be present
/// together and the end must come after the start.
pub fn validate_window(
    start: Option<Timestamp>,
    end: Option<Timestamp>,
) -> Result<(), CoreError> {
    match (start, end) {
        (None, None) => Ok(()),
        (Some(start), Some(end)) if end > start => Ok(()),
        (Some(_), Some(_)) => Err(CoreError::Validation(
            "end_time must be after start_time".into(),
        )),
        _ => Err(CoreError::Validation(
            "start_time and end_time must be provided together".into(),
        )),
    }
}
