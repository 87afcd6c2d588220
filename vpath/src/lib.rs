#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # vpath
//!
//! A library for validating, normalizing and combining virtual paths.
//!
//! Virtual paths are URL-style paths that address resources inside a hosted
//! web application. They come in three forms: absolute (`/myapp/page`),
//! application-relative (`~/page`, where `~` stands for the application
//! root) and bare relative fragments (`sub/page`).
//!
//! ## Core Types
//!
//! - [`VirtualPath`]: A validated path value with lazy, cached conversion
//!   between absolute and application-relative forms
//! - [`AppRootProvider`] and [`AppRoot`]: Where the application root comes from
//! - [`path`]: The string-level algebra (normalize, reduce, combine, compare)
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use vpath::{StaticAppRoot, VirtualPath};
//!
//! let root = StaticAppRoot::new("/myapp").unwrap().shared();
//!
//! // Normalize a messy app-relative path
//! let page = VirtualPath::create_non_relative("~\\docs//./guide/../index.html", &root).unwrap();
//! assert_eq!(page.app_relative().unwrap(), "~/docs/index.html");
//! assert_eq!(page.absolute().unwrap(), "/myapp/docs/index.html");
//!
//! // Resolve a relative reference against it
//! let link = VirtualPath::create_any("../images/logo.png", &root).unwrap();
//! let target = page.combine(&link).unwrap();
//! assert_eq!(target.absolute().unwrap(), "/myapp/images/logo.png");
//! ```

pub mod app_root;
pub mod config;
pub mod error;
pub mod logging;
pub mod path;

// Re-export key types at crate root for convenience
pub use app_root::{AppRoot, AppRootProvider, SharedAppRoot, StaticAppRoot, UnknownAppRoot};
pub use config::{Config, ConfigLoader};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use path::{PathForm, PathOptions, PathRelationship, ResolvedVirtualPath, VirtualPath};
