//! Configuration system for vpath.
//!
//! This module provides layered configuration with support for:
//! - YAML configuration files
//! - Environment variable overrides
//! - Validation of the configured application root
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Environment variables (`VPATH_APP_ROOT`, `VPATH_LOG_MODE`)
//! 2. The configuration file passed to [`ConfigLoader::load`]
//! 3. Built-in defaults
//!
//! # Examples
//!
//! ```
//! use vpath::config::ConfigLoader;
//! use vpath::path::VirtualPath;
//!
//! let config = ConfigLoader::load_str("app_root: /myapp\n").unwrap();
//! let root = config.app_root_provider().unwrap();
//!
//! let page = VirtualPath::create_non_relative("~/page", &root).unwrap();
//! assert_eq!(page.absolute().unwrap(), "/myapp/page");
//! ```

pub mod environment;
pub mod loader;
pub mod schema;

// Re-export key types at module root
pub use environment::EnvironmentConfig;
pub use loader::ConfigLoader;
pub use schema::Config;
