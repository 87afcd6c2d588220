//! Configuration file loading.
//!
//! This module loads vpath configuration from YAML and layers it with
//! environment overrides.

use std::fs;
use std::path::Path;

use crate::config::environment::EnvironmentConfig;
use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Loads configuration from files, strings and the environment.
///
/// # Examples
///
/// ```
/// use vpath::config::ConfigLoader;
///
/// let config = ConfigLoader::load_str("app_root: /myapp/\n").unwrap();
/// assert_eq!(config.app_root.as_deref(), Some("/myapp/"));
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Build the effective configuration.
    ///
    /// Layers, lowest precedence first:
    /// 1. Built-in defaults
    /// 2. The YAML file at `path`, if given
    /// 3. `VPATH_*` environment variables
    ///
    /// The result is validated before it is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, an environment
    /// variable is invalid, or the merged configuration fails validation.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let mut config = Config::default();

        if let Some(path) = path {
            config.merge(Self::load_file(path)?);
        }

        EnvironmentConfig::apply_overrides(&mut config)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and parse a YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigFile`] if the file cannot be read and
    /// [`Error::Validation`] if the YAML is invalid.
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path).map_err(|e| Error::ConfigFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        log::debug!("loaded configuration from {}", path.display());

        serde_yaml::from_str(&contents).map_err(|e| Error::Validation {
            field: format!("{}", path.display()),
            message: format!("Invalid YAML: {e}"),
        })
    }

    /// Parse a YAML configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the YAML is invalid.
    pub fn load_str(contents: &str) -> Result<Config> {
        serde_yaml::from_str(contents).map_err(|e| Error::Validation {
            field: "config".into(),
            message: format!("Invalid YAML: {e}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogLevel;
    use serial_test::serial;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::load_file(Path::new("/nonexistent/path/config.yaml"));
        assert!(matches!(result, Err(Error::ConfigFile { .. })));
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("bad.yaml");
        fs::write(&config_path, "invalid: yaml: syntax:").unwrap();

        let result = ConfigLoader::load_file(&config_path);
        assert!(matches!(result, Err(Error::Validation { .. })));
    }

    #[test]
    fn test_load_valid_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("vpath.yaml");
        fs::write(&config_path, "app_root: /site/\nlog_mode: quiet\n").unwrap();

        let config = ConfigLoader::load_file(&config_path).unwrap();
        assert_eq!(config.app_root.as_deref(), Some("/site/"));
        assert_eq!(config.log_mode, Some(LogLevel::Quiet));
    }

    #[test]
    fn test_load_str_rejects_unknown_field() {
        assert!(ConfigLoader::load_str("port: 80\n").is_err());
    }

    #[test]
    #[serial]
    fn test_load_layers_environment_over_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("vpath.yaml");
        fs::write(&config_path, "app_root: /file/\nlog_mode: quiet\n").unwrap();

        env::set_var("VPATH_APP_ROOT", "/env");
        env::remove_var("VPATH_LOG_MODE");
        let config = ConfigLoader::load(Some(&config_path));
        env::remove_var("VPATH_APP_ROOT");

        let config = config.unwrap();
        assert_eq!(config.app_root.as_deref(), Some("/env"));
        assert_eq!(config.log_mode, Some(LogLevel::Quiet));
    }

    #[test]
    #[serial]
    fn test_load_without_file() {
        env::remove_var("VPATH_APP_ROOT");
        env::remove_var("VPATH_LOG_MODE");
        assert_eq!(ConfigLoader::load(None).unwrap(), Config::default());
    }

    #[test]
    #[serial]
    fn test_load_validates_result() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("vpath.yaml");
        fs::write(&config_path, "app_root: not-rooted\n").unwrap();

        env::remove_var("VPATH_APP_ROOT");
        env::remove_var("VPATH_LOG_MODE");
        let result = ConfigLoader::load(Some(&config_path));
        assert!(matches!(result, Err(Error::Validation { .. })));
    }
}
