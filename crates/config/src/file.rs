//! Reading and atomically replacing `config.toml`

use crate::error::{ConfigError, ConfigResult};
use crate::Config;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Parses the file at `path`, or returns defaults when there is none
///
/// Out-of-range values are logged and kept so `config validate` can report
/// them; building a loan policy from them fails later.
pub(crate) fn read(path: &Path) -> ConfigResult<Config> {
    if !path.exists() {
        log::info!("No config at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if contents.trim().is_empty() {
        return Err(ConfigError::Empty {
            path: path.to_path_buf(),
        });
    }

    let config: Config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let problems = config.problems();
    if !problems.is_empty() {
        log::warn!(
            "{}: {}",
            path.display(),
            crate::error::list_problems(&problems)
        );
    }

    Ok(config)
}

/// Writes `config` to `path` through a sibling temp file and a rename
///
/// Invalid configs are rejected before anything touches the disk.
pub(crate) fn write(path: &Path, config: &Config) -> ConfigResult<()> {
    let problems = config.problems();
    if !problems.is_empty() {
        return Err(ConfigError::Invalid(problems));
    }

    let write_err = |source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(write_err)?;

    let contents = toml::to_string_pretty(config)?;
    let mut temp = NamedTempFile::new_in(dir).map_err(write_err)?;
    temp.write_all(contents.as_bytes()).map_err(write_err)?;
    temp.persist(path).map_err(|e| write_err(e.error))?;

    log::info!("Saved config to {}", path.display());
    Ok(())
}
