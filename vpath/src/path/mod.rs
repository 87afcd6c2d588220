//! Virtual path handling with application-root awareness.
//!
//! This module provides the virtual path algebra: a validated [`VirtualPath`]
//! value plus the string-level operations it is built from.
//!
//! # Key Concepts
//!
//! ## Path Forms
//!
//! A virtual path is written in one of three forms ([`PathForm`]):
//!
//! - **Absolute**: rooted at `/`, such as `/myapp/sub/page.aspx`
//! - **App-relative**: rooted at the application with the `~` sentinel, such
//!   as `~/sub/page.aspx`
//! - **Relative**: a bare fragment such as `sub/page.aspx`, meaningful only
//!   once combined with a base
//!
//! ## Normalization
//!
//! Normalization converts paths to a canonical form by:
//! - Replacing backslashes with `/` and collapsing repeated slashes
//! - Eliminating `.` and `..` segments
//! - Optionally ensuring a trailing slash
//!
//! ## Application Root
//!
//! Converting between absolute and app-relative forms needs the current
//! application root, read through an [`AppRoot`](crate::app_root::AppRoot)
//! handle at the moment of conversion.
//!
//! # Examples
//!
//! ```
//! use vpath::app_root::StaticAppRoot;
//! use vpath::path::VirtualPath;
//!
//! let root = StaticAppRoot::new("/myapp/").unwrap().shared();
//!
//! let page = VirtualPath::create_absolute("/MyApp/sub/../page.aspx", &root).unwrap();
//! assert_eq!(page.absolute().unwrap(), "/MyApp/page.aspx");
//! assert_eq!(page.app_relative().unwrap(), "~/page.aspx");
//! ```
//!
//! # Path Relationships
//!
//! The module also provides functionality to determine relationships between
//! virtual paths:
//!
//! ```
//! use vpath::path::PathRelationship;
//!
//! let rel = PathRelationship::between("/app", "/app/sub/page");
//! assert_eq!(rel, PathRelationship::Ancestor);
//! assert!(rel.is_hierarchical());
//! ```

pub mod app_relative;
pub mod combine;
pub mod compare;
pub mod normalize;
pub mod options;
mod types;
pub mod validate;
mod virtual_path;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

// Re-export key types
pub use compare::PathRelationship;
pub use options::PathOptions;
pub use types::{PathForm, ResolvedVirtualPath};
pub use virtual_path::VirtualPath;
