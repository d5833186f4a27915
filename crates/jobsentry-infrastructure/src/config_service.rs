//! Configuration service implementation.
//!
//! Loads [`AppConfig`] from `config.toml` in the JobSentry config directory,
//! then applies environment overrides.

use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

use jobsentry_core::config::AppConfig;
use jobsentry_core::error::{JobSentryError, Result};
use tracing::{debug, info, warn};

use crate::paths::JobSentryPaths;

pub const ENV_BACKEND_URL: &str = "JOBSENTRY_BACKEND_URL";
pub const ENV_TIMEOUT_SECS: &str = "JOBSENTRY_TIMEOUT_SECS";
pub const ENV_LOG_FILTER: &str = "RUST_LOG";

/// Environment values that take precedence over the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    pub backend_url: Option<String>,
    pub timeout_secs: Option<String>,
    pub log_filter: Option<String>,
}

impl EnvOverrides {
    /// Reads overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads overrides through `lookup`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            backend_url: read(ENV_BACKEND_URL),
            timeout_secs: read(ENV_TIMEOUT_SECS),
            log_filter: read(ENV_LOG_FILTER),
        }
    }

    pub fn apply(&self, mut config: AppConfig) -> Result<AppConfig> {
        if let Some(url) = &self.backend_url {
            debug!(url = %url, "backend URL overridden from environment");
            config.backend.base_url = url.trim().to_string();
        }
        if let Some(raw) = &self.timeout_secs {
            config.backend.timeout_secs = raw.trim().parse().map_err(|_| {
                JobSentryError::config(format!(
                    "{ENV_TIMEOUT_SECS} must be a whole number of seconds, got '{raw}'"
                ))
            })?;
        }
        if let Some(filter) = &self.log_filter {
            config.logging.filter = filter.clone();
        }
        Ok(config)
    }
}

/// Configuration service that loads and caches the application config.
#[derive(Debug, Clone)]
pub struct ConfigService {
    paths: JobSentryPaths,
    /// Cached file configuration, before environment overrides.
    config: Arc<RwLock<Option<AppConfig>>>,
}

impl ConfigService {
    /// Uses the platform config directory.
    pub fn new() -> Self {
        Self::with_paths(JobSentryPaths::default())
    }

    pub fn with_paths(paths: JobSentryPaths) -> Self {
        Self {
            paths,
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn paths(&self) -> &JobSentryPaths {
        &self.paths
    }

    pub fn config_path(&self) -> Result<PathBuf> {
        self.paths
            .config_file()
            .map_err(|e| JobSentryError::config(e.to_string()))
    }

    /// Returns the file configuration, reading it on first access.
    ///
    /// A missing file yields the defaults.
    pub fn load(&self) -> Result<AppConfig> {
        if let Some(cached) = self
            .config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            return Ok(cached.clone());
        }

        let loaded = self.read_file()?;
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = Some(loaded.clone());
        Ok(loaded)
    }

    /// File configuration with `overrides` applied.
    pub fn effective(&self, overrides: &EnvOverrides) -> Result<AppConfig> {
        overrides.apply(self.load()?)
    }

    /// Writes `config` to disk and refreshes the cache.
    pub fn save(&self, config: &AppConfig) -> Result<()> {
        let path = self.config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(config)?;
        fs::write(&path, content)?;
        info!(path = %path.display(), "configuration saved");

        *self.config.write().unwrap_or_else(PoisonError::into_inner) = Some(config.clone());
        Ok(())
    }

    /// Writes the default configuration if no file exists yet.
    ///
    /// Returns whether a file was created.
    pub fn init(&self) -> Result<bool> {
        if self.config_path()?.exists() {
            return Ok(false);
        }
        self.save(&AppConfig::default())?;
        Ok(true)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn read_file(&self) -> Result<AppConfig> {
        let path = self.config_path()?;
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&path)?;
        toml::from_str(&content).map_err(|e| {
            warn!(path = %path.display(), error = %e, "invalid config file");
            JobSentryError::config(format!("Invalid config file {}: {e}", path.display()))
        })
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}
