//! Pay cycle validation.

use crate::error::CoreError;
use crate::types::Date;

/// Validate the period and amounts of a pay cycle. Amounts are in cents.
pub fn validate_pay_cycle(
    period_start: Date,
    period_end: Date,
    gross_cents: i64,
    net_cents: i64,
) -> Result<(), CoreError> {
    if period_end < period_start {
        return Err(CoreError::Validation(
            "period_end must not be before period_start".into(),
        ));
    }
    if gross_cents < 0 || net_cents < 0 {
        return Err(CoreError::Validation(
            "Pay amounts must not be negative".into(),
        ));
    }
    if net_cents > gross_cents {
        return Err(CoreError::Validation(
            "net amount must not exceed gross amount".into(),
        ));
    }
    Ok(())
}

/// Validate a salary figure in cents.
pub fn validate_salary(salary_cents: i64) -> Result<(), CoreError> {
    if salary_cents < 0 {
        return Err(CoreError::Validation("salary must not be negative".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> Date {
        Date::from_ymd_opt(2026, 4, d).unwrap()
    }

    #[test]
    fn valid_cycle() {
        assert!(validate_pay_cycle(date(1), date(30), 500_000, 410_000).is_ok());
    }

    #[test]
    fn net_above_gross_is_rejected() {
        assert!(validate_pay_cycle(date(1), date(30), 100, 101).is_err());
    }

    #[test]
    fn inverted_period_is_rejected() {
        assert!(validate_pay_cycle(date(30), date(1), 100, 50).is_err());
    }

    #[test]
    fn negative_amounts_are_rejected() {
        assert!(validate_pay_cycle(date(1), date(2), -1, -1).is_err());
        assert!(validate_salary(-5).is_err());
        assert!(validate_salary(0).is_ok());
    }
}
