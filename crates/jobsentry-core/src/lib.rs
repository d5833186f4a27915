//! Domain core for JobSentry.
//!
//! Holds everything that does not depend on a transport or a display:
//! - [`outline`]: turns a generated roadmap document into titled sections
//! - [`transcript`]: the append-only chat log of a screen session
//! - [`request`]: the lifecycle controller shared by every screen
//! - [`insights`]: the contract of the remote analysis service

pub mod config;
pub mod error;
pub mod insights;
pub mod outline;
pub mod request;
pub mod transcript;

// Re-export common error type
pub use error::JobSentryError;
