//! Leave request rules: transitions, day counting, and balance effects.

use crate::error::CoreError;
use crate::status::LeaveStatus;
use crate::types::Date;
use crate::workflow::Transition;

/// Upper bound on a single leave request, in days.
pub const MAX_REQUEST_DAYS: i32 = 365;

impl Transition for LeaveStatus {
    const ENTITY: &'static str = "LeaveRequest";

    fn can_transition_to(self, next: Self) -> bool {
        use LeaveStatus::*;
        matches!(
            (self, next),
            (Pending, Approved) | (Pending, Rejected) | (Approved, Pending) | (Rejected, Pending)
        )
    }
}

/// Inclusive number of days covered by a leave period.
pub fn requested_days(start: Date, end: Date) -> Result<i32, CoreError> {
    if end < start {
        return Err(CoreError::Validation(
            "end_date must not be before start_date".into(),
        ));
    }
    let days = (end - start).num_days() + 1;
    if days > i64::from(MAX_REQUEST_DAYS) {
        return Err(CoreError::Validation(format!(
            "A leave request may cover at most {MAX_REQUEST_DAYS} days"
        )));
    }
    Ok(days as i32)
}

/// Change to apply to the employee's remaining days when a request moves
/// from `from` to `to`. Approval consumes days; reopening an approved
/// request gives them back.
pub fn balance_delta(from: LeaveStatus, to: LeaveStatus, days: i32) -> i32 {
    match (from, to) {
        (LeaveStatus::Pending, LeaveStatus::Approved) => -days,
        (LeaveStatus::Approved, LeaveStatus::Pending) => days,
        _ => 0,
    }
}

/// Reject an approval that would overdraw a balance.
pub fn ensure_sufficient_balance(remaining: i32, days: i32) -> Result<(), CoreError> {
    if remaining < days {
        return Err(CoreError::Validation(format!(
            "Insufficient leave balance: {remaining} day(s) remaining, {days} requested"
        )));
    }
    Ok(())
}

/// Validate a leave balance value.
pub fn validate_remaining_days(days: i32) -> Result<(), CoreError> {
    if days < 0 {
        return Err(CoreError::Validation(
            "remaining_days must not be negative".into(),
        ));
    }
    Ok(())
}
