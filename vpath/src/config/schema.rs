//! Configuration schema definitions.
//!
//! This module defines the configuration structure for hosts embedding
//! vpath: the application root to resolve against and the log verbosity.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::app_root::{AppRoot, StaticAppRoot, UnknownAppRoot};
use crate::error::{Error, Result};
use crate::logging::LogLevel;

/// Complete configuration structure.
///
/// Every field is optional so that layers (file, environment, programmatic)
/// can be merged; unset fields fall back to defaults.
///
/// # Examples
///
/// ```
/// use vpath::config::Config;
/// use vpath::LogLevel;
///
/// let config: Config = serde_yaml::from_str("app_root: /myapp\nlog_mode: verbose\n").unwrap();
/// assert_eq!(config.app_root.as_deref(), Some("/myapp"));
/// assert_eq!(config.log_level(), LogLevel::Verbose);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// The application root, such as `/` or `/myapp/`.
    pub app_root: Option<String>,

    /// Log verbosity for the stderr logger.
    pub log_mode: Option<LogLevel>,
}

impl Config {
    /// Overlay `other` on top of this configuration.
    ///
    /// Fields set in `other` win; unset fields keep their current value.
    ///
    /// # Examples
    ///
    /// ```
    /// use vpath::config::Config;
    ///
    /// let mut base = Config { app_root: Some("/a/".into()), ..Default::default() };
    /// base.merge(Config { app_root: Some("/b/".into()), ..Default::default() });
    /// assert_eq!(base.app_root.as_deref(), Some("/b/"));
    /// ```
    pub fn merge(&mut self, other: Config) {
        if other.app_root.is_some() {
            self.app_root = other.app_root;
        }
        if other.log_mode.is_some() {
            self.log_mode = other.log_mode;
        }
    }

    /// Check that every set field holds a usable value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the application root is not a valid
    /// rooted virtual path.
    pub fn validate(&self) -> Result<()> {
        if let Some(raw) = &self.app_root {
            StaticAppRoot::new(raw).map_err(|e| Error::Validation {
                field: "app_root".into(),
                message: e.to_string(),
            })?;
        }
        Ok(())
    }

    /// The configured log level, defaulting to [`LogLevel::Normal`].
    #[must_use]
    pub fn log_level(&self) -> LogLevel {
        self.log_mode.unwrap_or(LogLevel::Normal)
    }

    /// Build the application root provider described by this configuration.
    ///
    /// A configured root yields a [`StaticAppRoot`]; otherwise the root is
    /// unknown.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the configured root is invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use vpath::config::Config;
    ///
    /// let config = Config { app_root: Some("/eee".into()), ..Default::default() };
    /// let provider = config.app_root_provider().unwrap();
    /// assert_eq!(provider.app_root().as_deref(), Some("/eee/"));
    ///
    /// let provider = Config::default().app_root_provider().unwrap();
    /// assert_eq!(provider.app_root(), None);
    /// ```
    pub fn app_root_provider(&self) -> Result<AppRoot> {
        match &self.app_root {
            Some(raw) => {
                let root = StaticAppRoot::new(raw).map_err(|e| Error::Validation {
                    field: "app_root".into(),
                    message: e.to_string(),
                })?;
                log::debug!("configured application root '{}'", root.as_str());
                Ok(root.shared())
            }
            None => Ok(Arc::new(UnknownAppRoot)),
        }
    }
}
