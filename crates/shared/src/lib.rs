//! Shared library for the MassMessage delivery list generator.
//!
//! This crate provides the ambient pieces used by the binary crate:
//! - Configuration management
//! - Logging infrastructure

pub mod config;
pub mod logging;

// Re-export commonly used types
pub use config::{Config, ConfigSource};
pub use logging::LogConfig;

/// Common result type using anyhow::Error
pub type Result<T> = anyhow::Result<T>;
