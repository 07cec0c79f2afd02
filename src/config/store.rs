//! JSON config file persistence.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::ConfigError;

use super::Config;

/// Environment variable that points at an alternate config file.
pub const CONFIG_PATH_ENV_VAR: &str = "AI_COMMIT_CONFIG";

/// Location of the persisted config file.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The per-user store: `$AI_COMMIT_CONFIG`, or
    /// `~/.config/ai-commit/config.json`.
    pub fn default_location() -> Result<Self, ConfigError> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV_VAR)
            && !path.is_empty()
        {
            return Ok(Self::new(path));
        }

        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(Self::new(
            home.join(".config").join("ai-commit").join("config.json"),
        ))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the config file.
    ///
    /// Returns `Ok(None)` only when the file does not exist; every other
    /// failure is an error.
    pub fn load(&self) -> Result<Option<Config>, ConfigError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No config file at {}", self.path.display());
                return Ok(None);
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_str(&data)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: self.path.clone(),
                source,
            })
    }

    /// Write the config file atomically.
    ///
    /// Creates the parent directory, writes to a temporary file beside the
    /// target, then renames it into place. On any failure the previous file
    /// (if any) is left untouched.
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        fs::create_dir_all(dir).map_err(|source| ConfigError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let data = serde_json::to_string_pretty(config).map_err(ConfigError::Serialize)?;

        let write_err = |source| ConfigError::Write {
            path: self.path.clone(),
            source,
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(data.as_bytes()).map_err(write_err)?;
        tmp.flush().map_err(write_err)?;
        tmp.persist(&self.path).map_err(|e| write_err(e.error))?;

        debug!("Saved config to {}", self.path.display());
        Ok(())
    }
}
