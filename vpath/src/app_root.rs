//! The application root collaborator.
//!
//! Conversions between rooted and application-relative paths need the
//! current application root, such as `/` or `/myapp/`. The hosting
//! environment owns that value; this crate only reads it, through the
//! [`AppRootProvider`] seam. Virtual paths hold an [`AppRoot`] handle and
//! consult it at the moment of conversion, so a root that changes after a
//! path is constructed is observed by the path's first resolution.
//!
//! # Examples
//!
//! ```
//! use vpath::app_root::{AppRootProvider, SharedAppRoot};
//!
//! let root = SharedAppRoot::new();
//! assert_eq!(root.app_root(), None);
//!
//! root.set("/eee").unwrap();
//! assert_eq!(root.app_root().as_deref(), Some("/eee/"));
//! ```

use std::sync::{Arc, PoisonError, RwLock};

use crate::error::{Error, Result};
use crate::path::normalize::append_slash;
use crate::path::VirtualPath;

/// Supplies the current application root.
///
/// Implementations return `None` when the root is unknown. A returned root is
/// rooted and ends with `/` (the root `/` included).
pub trait AppRootProvider: Send + Sync {
    /// The current application root, if known.
    fn app_root(&self) -> Option<String>;
}

/// A shared handle to an application root provider.
pub type AppRoot = Arc<dyn AppRootProvider>;

/// Fetch the current root from `provider`.
///
/// A root returned without its trailing slash gets one appended.
///
/// # Errors
///
/// Returns [`Error::UnknownApplicationRoot`] naming `path` when the provider
/// has no root.
pub fn current_root(provider: &dyn AppRootProvider, path: &str) -> Result<String> {
    let root = provider.app_root().ok_or_else(|| Error::UnknownApplicationRoot {
        path: path.to_string(),
    })?;
    let root = append_slash(&root).into_owned();
    log::trace!("resolving '{path}' against application root '{root}'");
    Ok(root)
}

/// Normalize a host-supplied path base into an application root.
///
/// The input must be rooted. Slashes are fixed, dot segments are reduced and
/// a trailing slash is ensured, so `/eee` becomes `/eee/`.
///
/// # Errors
///
/// Returns an error if the input is blank, malformed, or not rooted.
///
/// # Examples
///
/// ```
/// use vpath::app_root::normalize_app_root;
///
/// assert_eq!(normalize_app_root("/eee").unwrap(), "/eee/");
/// assert_eq!(normalize_app_root("\\a\\\\b\\..").unwrap(), "/a/");
/// assert_eq!(normalize_app_root("/").unwrap(), "/");
/// assert!(normalize_app_root("~/app").is_err());
/// ```
pub fn normalize_app_root(raw: &str) -> Result<String> {
    let unknown: AppRoot = Arc::new(UnknownAppRoot);
    let root = VirtualPath::create_absolute_trailing_slash(raw, &unknown)?;
    Ok(root.whichever_available().to_string())
}

/// An application root fixed at construction.
///
/// # Examples
///
/// ```
/// use vpath::app_root::{AppRootProvider, StaticAppRoot};
///
/// let root = StaticAppRoot::new("/myapp").unwrap();
/// assert_eq!(root.as_str(), "/myapp/");
/// assert_eq!(root.app_root().as_deref(), Some("/myapp/"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticAppRoot {
    root: String,
}

impl StaticAppRoot {
    /// Create a provider for `raw`, normalized by [`normalize_app_root`].
    ///
    /// # Errors
    ///
    /// Returns an error if `raw` is not a valid rooted path.
    pub fn new(raw: &str) -> Result<Self> {
        Ok(Self {
            root: normalize_app_root(raw)?,
        })
    }

    /// The normalized root.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.root
    }

    /// Convert into a shareable [`AppRoot`] handle.
    #[must_use]
    pub fn shared(self) -> AppRoot {
        Arc::new(self)
    }
}

impl AppRootProvider for StaticAppRoot {
    fn app_root(&self) -> Option<String> {
        Some(self.root.clone())
    }
}

/// An application root that the host can replace at run time.
///
/// Mirrors a hosting environment whose request path base is assigned after
/// start-up. Until [`set`](Self::set) is called the root is unknown.
#[derive(Debug, Default)]
pub struct SharedAppRoot {
    root: RwLock<Option<String>>,
}

impl SharedAppRoot {
    /// Create a provider with no root.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider holding `raw`, normalized by [`normalize_app_root`].
    ///
    /// # Errors
    ///
    /// Returns an error if `raw` is not a valid rooted path.
    pub fn with_root(raw: &str) -> Result<Self> {
        let provider = Self::new();
        provider.set(raw)?;
        Ok(provider)
    }

    /// Replace the root.
    ///
    /// # Errors
    ///
    /// Returns an error if `raw` is not a valid rooted path; the previous
    /// root is kept in that case.
    pub fn set(&self, raw: &str) -> Result<()> {
        let root = normalize_app_root(raw)?;
        log::debug!("application root set to '{root}'");
        *self.root.write().unwrap_or_else(PoisonError::into_inner) = Some(root);
        Ok(())
    }

    /// Forget the root.
    pub fn clear(&self) {
        log::debug!("application root cleared");
        *self.root.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl AppRootProvider for SharedAppRoot {
    fn app_root(&self) -> Option<String> {
        self.root
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// A provider that never knows the root.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnknownAppRoot;

impl AppRootProvider for UnknownAppRoot {
    fn app_root(&self) -> Option<String> {
        None
    }
}
