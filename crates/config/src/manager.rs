//! Locating, loading and saving `config.toml`

use crate::error::{ConfigError, ConfigResult, FieldError};
use crate::{file, Config, LogLevel};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.toml";

/// Owns the location of `config.toml`
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Uses the platform config directory
    ///
    /// - Linux: `~/.config/bookshelf/`
    /// - macOS: `~/Library/Application Support/bookshelf/`
    /// - Windows: `%APPDATA%\bookshelf\config\`
    pub fn new() -> ConfigResult<Self> {
        let dirs = ProjectDirs::from("", "", "bookshelf").ok_or(ConfigError::NoConfigDir)?;
        Ok(Self::with_directory(dirs.config_dir().to_path_buf()))
    }

    pub fn with_directory(config_dir: PathBuf) -> Self {
        Self {
            config_path: config_dir.join(CONFIG_FILE_NAME),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Defaults when the file does not exist
    pub fn load(&self) -> ConfigResult<Config> {
        file::read(&self.config_path)
    }

    pub fn save(&self, config: &Config) -> ConfigResult<()> {
        file::write(&self.config_path, config)
    }

    /// Writes a default file unless one exists; true if it wrote one
    pub fn initialize(&self) -> ConfigResult<bool> {
        if self.config_path.exists() {
            log::debug!("Keeping existing {}", self.config_path.display());
            return Ok(false);
        }
        self.save(&Config::default())?;
        Ok(true)
    }

    /// Overwrites the file with defaults, whatever it held
    pub fn reset(&self) -> ConfigResult<()> {
        self.save(&Config::default())
    }

    /// Problems in the file as it is on disk
    pub fn problems(&self) -> ConfigResult<Vec<FieldError>> {
        Ok(self.load()?.problems())
    }

    /// Loads the file, then applies `BOOKSHELF_SECTION_FIELD` variables:
    ///
    /// - `BOOKSHELF_LOANS_GRACE_PERIOD_DAYS`
    /// - `BOOKSHELF_LOANS_DAILY_FEE`
    /// - `BOOKSHELF_APP_LOG_LEVEL`
    ///
    /// Unparsable values are logged and ignored.
    pub fn load_with_env_overrides(&self) -> ConfigResult<Config> {
        let mut config = self.load()?;
        apply_env_overrides(&mut config, |key| std::env::var(key).ok());
        Ok(config)
    }
}

fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(days) = lookup("BOOKSHELF_LOANS_GRACE_PERIOD_DAYS") {
        match days.trim().parse::<u32>() {
            Ok(d) => config.loans.grace_period_days = d,
            Err(e) => log::warn!("Ignoring BOOKSHELF_LOANS_GRACE_PERIOD_DAYS={}: {}", days, e),
        }
    }

    if let Some(fee) = lookup("BOOKSHELF_LOANS_DAILY_FEE") {
        match fee.trim().parse::<f64>() {
            Ok(f) => config.loans.daily_fee = f,
            Err(e) => log::warn!("Ignoring BOOKSHELF_LOANS_DAILY_FEE={}: {}", fee, e),
        }
    }

    if let Some(level) = lookup("BOOKSHELF_APP_LOG_LEVEL") {
        match level.parse::<LogLevel>() {
            Ok(l) => config.app.log_level = l,
            Err(e) => log::warn!("Ignoring BOOKSHELF_APP_LOG_LEVEL: {}", e),
        }
    }
}
