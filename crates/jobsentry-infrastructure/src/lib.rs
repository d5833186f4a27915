//! Filesystem-backed services: configuration and well-known paths.

pub mod config_service;
pub mod paths;

pub use config_service::{ConfigService, EnvOverrides};
pub use paths::{JobSentryPaths, PathError};
