//! Shared transition checking for the workflow status enums.

use std::fmt::Display;

use crate::error::CoreError;

/// A status enum with a fixed transition table.
pub trait Transition: Copy + Eq + Display {
    /// Entity name used in error messages (e.g. `"PerformanceReview"`).
    const ENTITY: &'static str;

    /// Whether moving from `self` to `next` is permitted. Self-loops are
    /// only allowed where the table says so.
    fn can_transition_to(self, next: Self) -> bool;
}

/// Reject a transition the table does not allow with a `Conflict`.
pub fn ensure_transition<S: Transition>(from: S, to: S) -> Result<(), CoreError> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!(
            "{} cannot move from '{from}' to '{to}'",
            S::ENTITY
        )))
    }
}
