//! Late fee rules

use crate::error::{LibraryError, LibraryResult};
use bookshelf_config::{list_problems, LoanConfig};
use serde::{Deserialize, Serialize};

/// How long a book may be kept and what each extra day costs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanPolicy {
    pub grace_period_days: i64,
    pub daily_fee: f64,
}

impl LoanPolicy {
    pub fn new(grace_period_days: i64, daily_fee: f64) -> Self {
        Self {
            grace_period_days,
            daily_fee,
        }
    }

    /// Builds a policy from the `[loans]` config section, rejecting invalid values
    pub fn from_config(config: &LoanConfig) -> LibraryResult<Self> {
        let problems = config.problems();
        if !problems.is_empty() {
            return Err(LibraryError::InvalidPolicy(list_problems(&problems)));
        }
        Ok(Self::new(
            i64::from(config.grace_period_days),
            config.daily_fee,
        ))
    }

    /// Fee owed after `days` on loan
    ///
    /// Nothing is owed until the grace period is exceeded; each day past it
    /// costs `daily_fee`. Negative day counts (loan dated in the future) owe
    /// nothing.
    pub fn fee_for_days(&self, days: i64) -> f64 {
        if days > self.grace_period_days {
            days.saturating_sub(self.grace_period_days) as f64 * self.daily_fee
        } else {
            0.0
        }
    }
}

impl Default for LoanPolicy {
    fn default() -> Self {
        let config = LoanConfig::default();
        Self::new(i64::from(config.grace_period_days), config.daily_fee)
    }
}
