//! Meeting request rules.

use crate::error::CoreError;
use crate::status::MeetingStatus;
use crate::workflow::Transition;

/// Maximum length of the purpose an employee gives for a meeting.
pub const MAX_PURPOSE_LEN: usize = 1000;

impl Transition for MeetingStatus {
    const ENTITY: &'static str = "Meeting";

    fn can_transition_to(self, next: Self) -> bool {
        use MeetingStatus::*;
        matches!(
            (self, next),
            (Requested, Confirmed) | (Requested, Rejected) | (Confirmed, Confirmed)
        )
    }
}

/// Validate the purpose text of a new meeting request.
pub fn validate_purpose(purpose: &str) -> Result<(), CoreError> {
    let trimmed = purpose.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("purpose must not be empty".into()));
    }
    if trimmed.len() > MAX_PURPOSE_LEN {
        return Err(CoreError::Validation(format!(
            "purpose must be at most {MAX_PURPOSE_LEN} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::ensure_transition;

    #[test]
    fn requested_can_be_confirmed_or_rejected() {
        assert!(ensure_transition(MeetingStatus::Requested, MeetingStatus::Confirmed).is_ok());
        assert!(ensure_transition(MeetingStatus::Requested, MeetingStatus::Rejected).is_ok());
    }

    #[test]
    fn confirmed_meeting_details_can_be_updated() {
        assert!(ensure_transition(MeetingStatus::Confirmed, MeetingStatus::Confirmed).is_ok());
    }

    #[test]
    fn rejected_is_terminal() {
        for next in MeetingStatus::ALL {
            assert!(ensure_transition(MeetingStatus::Rejected, *next).is_err());
        }
        assert!(ensure_transition(MeetingStatus::Confirmed, MeetingStatus::Rejected).is_err());
    }

    #[test]
    fn purpose_must_have_content() {
        assert!(validate_purpose("quarterly goals").is_ok());
        assert!(validate_purpose("   ").is_err());
        assert!(validate_purpose(&"p".repeat(MAX_PURPOSE_LEN + 1)).is_err());
    }
}
