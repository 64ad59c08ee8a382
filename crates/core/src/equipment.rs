//! Equipment condition constants and validation.

use crate::error::CoreError;

pub const CONDITION_NEW: &str = "new";
pub const CONDITION_GOOD: &str = "good";
pub const CONDITION_FAIR: &str = "fair";
pub const CONDITION_POOR: &str = "poor";
pub const CONDITION_DAMAGED: &str = "damaged";

/// All valid condition values.
pub const VALID_CONDITIONS: &[&str] = &[
    CONDITION_NEW,
    CONDITION_GOOD,
    CONDITION_FAIR,
    CONDITION_POOR,
    CONDITION_DAMAGED,
];

/// Validate that a condition string is one of the accepted values.
pub fn validate_condition(condition: &str) -> Result<(), CoreError> {
    if VALID_CONDITIONS.contains(&condition) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid condition '{condition}'. Must be one of: {}",
            VALID_CONDITIONS.join(", ")
        )))
    }
}
