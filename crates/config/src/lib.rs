//! Bookshelf configuration
//!
//! Loan policy and application settings, stored as `config.toml` in the
//! platform config directory.
//!
//! ```rust,no_run
//! use bookshelf_config::ConfigManager;
//!
//! let manager = ConfigManager::new().expect("no config directory");
//! let config = manager.load_with_env_overrides().expect("unreadable config");
//! println!("Grace period: {} days", config.loans.grace_period_days);
//! ```

mod error;
mod file;
mod manager;

pub mod app_config;
mod loan_config;

pub use app_config::{AppConfig, LogLevel};
pub use error::{list_problems, ConfigError, ConfigResult, FieldError};
pub use loan_config::{LoanConfig, DEFAULT_DAILY_FEE, DEFAULT_GRACE_PERIOD_DAYS};
pub use manager::ConfigManager;

use serde::{Deserialize, Serialize};

/// Current config file format version
pub const CONFIG_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub version: u32,
    pub app: AppConfig,
    pub loans: LoanConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            app: AppConfig::default(),
            loans: LoanConfig::default(),
        }
    }
}

impl Config {
    /// Every invalid value in the file, in field order
    pub fn problems(&self) -> Vec<FieldError> {
        let mut problems = Vec::new();
        if self.version > CONFIG_VERSION {
            problems.push(FieldError::new(
                "version",
                format!(
                    "{} is newer than this build understands ({})",
                    self.version, CONFIG_VERSION
                ),
            ));
        }
        problems.extend(self.loans.problems());
        problems
    }
}
