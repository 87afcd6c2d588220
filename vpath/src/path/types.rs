//! Core types for virtual path handling.
//!
//! This module defines the classification of path strings and the resolved,
//! comparable form of a virtual path.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::path::compare::{cmp_ignore_case, eq_ignore_case, hash_ignore_case};

/// The syntactic form of a virtual path string.
///
/// # Examples
///
/// ```
/// use vpath::path::PathForm;
///
/// assert_eq!(PathForm::of("/app/page"), PathForm::Absolute);
/// assert_eq!(PathForm::of("~/page"), PathForm::AppRelative);
/// assert_eq!(PathForm::of("sub/page"), PathForm::Relative);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathForm {
    /// Rooted at `/`.
    Absolute,

    /// Rooted at the application, written with the `~` sentinel.
    AppRelative,

    /// A bare fragment with no anchor of its own.
    Relative,
}

impl PathForm {
    /// Classify a normalized path string.
    #[must_use]
    pub fn of(path: &str) -> Self {
        if crate::path::validate::is_app_relative_path(path) {
            Self::AppRelative
        } else if path.starts_with('/') {
            Self::Absolute
        } else {
            Self::Relative
        }
    }
}

impl fmt::Display for PathForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absolute => write!(f, "absolute"),
            Self::AppRelative => write!(f, "app-relative"),
            Self::Relative => write!(f, "relative"),
        }
    }
}

/// A virtual path resolved to its absolute string.
///
/// Equality, ordering and hashing ignore case, so resolved paths can be used
/// directly as map keys.
///
/// # Examples
///
/// ```
/// use vpath::path::ResolvedVirtualPath;
///
/// let a = ResolvedVirtualPath::new("/App/Page".to_string());
/// let b = ResolvedVirtualPath::new("/app/page".to_string());
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "/App/Page");
/// ```
#[derive(Debug, Clone)]
pub struct ResolvedVirtualPath {
    path: String,
}

impl ResolvedVirtualPath {
    /// Wrap an already resolved absolute path.
    #[must_use]
    pub fn new(path: String) -> Self {
        Self { path }
    }

    /// Get the absolute path string, with its original casing.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// Convert into the underlying `String`.
    #[must_use]
    pub fn into_string(self) -> String {
        self.path
    }
}

impl PartialEq for ResolvedVirtualPath {
    fn eq(&self, other: &Self) -> bool {
        eq_ignore_case(&self.path, &other.path)
    }
}

impl Eq for ResolvedVirtualPath {}

impl PartialOrd for ResolvedVirtualPath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ResolvedVirtualPath {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_ignore_case(&self.path, &other.path)
    }
}

impl Hash for ResolvedVirtualPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_ignore_case(&self.path, state);
    }
}

impl fmt::Display for ResolvedVirtualPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

impl AsRef<str> for ResolvedVirtualPath {
    fn as_ref(&self) -> &str {
        &self.path
    }
}
