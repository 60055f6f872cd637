//! `[loans]` section

use crate::error::FieldError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_GRACE_PERIOD_DAYS: u32 = 14;
pub const DEFAULT_DAILY_FEE: f64 = 0.5;

const MAX_GRACE_PERIOD_DAYS: u32 = 365;
const MAX_DAILY_FEE: f64 = 1000.0;

/// How long a loan runs before fees start, and what each late day costs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoanConfig {
    pub grace_period_days: u32,
    pub daily_fee: f64,
}

impl Default for LoanConfig {
    fn default() -> Self {
        Self {
            grace_period_days: DEFAULT_GRACE_PERIOD_DAYS,
            daily_fee: DEFAULT_DAILY_FEE,
        }
    }
}

impl LoanConfig {
    /// Values a loan policy cannot be built from
    ///
    /// NaN and infinite fees fail the range check as well.
    pub fn problems(&self) -> Vec<FieldError> {
        let mut problems = Vec::new();

        if self.grace_period_days > MAX_GRACE_PERIOD_DAYS {
            problems.push(FieldError::new(
                "loans.grace_period_days",
                format!(
                    "{} days is longer than the {} day limit",
                    self.grace_period_days, MAX_GRACE_PERIOD_DAYS
                ),
            ));
        }

        if !(0.0..=MAX_DAILY_FEE).contains(&self.daily_fee) {
            problems.push(FieldError::new(
                "loans.daily_fee",
                format!("{} is not between 0 and {}", self.daily_fee, MAX_DAILY_FEE),
            ));
        }

        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loans(grace_period_days: u32, daily_fee: f64) -> LoanConfig {
        LoanConfig {
            grace_period_days,
            daily_fee,
        }
    }

    #[test]
    fn test_defaults() {
        let config = LoanConfig::default();
        assert_eq!(config, loans(14, 0.5));
        assert!(config.problems().is_empty());
    }

    #[test]
    fn test_limits_are_inclusive() {
        assert!(loans(0, 0.0).problems().is_empty());
        assert!(loans(365, 1000.0).problems().is_empty());
    }

    #[test]
    fn test_grace_period_too_long() {
        let problems = loans(366, 0.5).problems();
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].field, "loans.grace_period_days");
    }

    #[test]
    fn test_bad_fees() {
        for fee in [-0.25, 1000.5, f64::NAN, f64::INFINITY] {
            let problems = loans(14, fee).problems();
            assert_eq!(problems.len(), 1, "fee {}", fee);
            assert_eq!(problems[0].field, "loans.daily_fee");
        }
    }

    #[test]
    fn test_both_fields_reported() {
        assert_eq!(loans(1000, -1.0).problems().len(), 2);
    }
}
