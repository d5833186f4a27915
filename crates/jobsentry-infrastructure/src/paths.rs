//! Well-known locations of JobSentry files.

use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "jobsentry";
const CONFIG_FILE_NAME: &str = "config.toml";
const LOG_DIR_NAME: &str = "logs";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// The platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find the user config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Resolves JobSentry paths, either under the platform config directory or
/// under an explicit root.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/jobsentry/         # Config directory (platform default)
/// ├── config.toml              # Application configuration
/// └── logs/                    # Daily-rolling CLI logs
///     └── jobsentry.log.YYYY-MM-DD
/// ```
#[derive(Debug, Clone, Default)]
pub struct JobSentryPaths {
    root: Option<PathBuf>,
}

impl JobSentryPaths {
    /// Creates a resolver. `None` uses the platform config directory.
    pub fn new(root: Option<PathBuf>) -> Self {
        Self { root }
    }

    /// Directory holding every JobSentry file.
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.root {
            Some(root) => Ok(root.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR_NAME))
                .ok_or(PathError::ConfigDirNotFound),
        }
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join(CONFIG_FILE_NAME))
    }

    pub fn log_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join(LOG_DIR_NAME))
    }

    /// Explicit root, if one was given.
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }
}
