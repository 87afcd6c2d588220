//! Environment variable handling for configuration overrides.
//!
//! This module provides support for `VPATH_*` environment variables that
//! override configuration file values.

use std::env;

use crate::config::schema::Config;
use crate::error::{Error, Result};
use crate::logging::{LogLevel, LOG_MODE_ENV};

/// The environment variable holding the application root.
pub const APP_ROOT_ENV: &str = "VPATH_APP_ROOT";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use vpath::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// Reads `VPATH_APP_ROOT` and `VPATH_LOG_MODE` and applies them with
    /// higher precedence than file-based configs. Blank values are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `VPATH_LOG_MODE` is not a known level.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Some(root) = Self::var(APP_ROOT_ENV) {
            config.app_root = Some(root);
        }

        if let Some(mode) = Self::var(LOG_MODE_ENV) {
            let level = LogLevel::parse(&mode).map_err(|message| Error::Validation {
                field: LOG_MODE_ENV.into(),
                message,
            })?;
            config.log_mode = Some(level);
        }

        Ok(())
    }

    fn var(name: &str) -> Option<String> {
        env::var(name)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }
}
