//! Conversion between rooted and application-relative virtual paths.
//!
//! An application root is a rooted path ending in `/`, such as `/` or
//! `/myapp/`. A path under that root can be written application-relative by
//! replacing the root with the `~` sentinel: `/myapp/sub/page` becomes
//! `~/sub/page`, and the root itself becomes `~`.

use std::borrow::Cow;

use crate::error::{Error, Result};
use crate::path::compare::{match_prefix_ignore_case, virtual_path_starts_with};
use crate::path::validate::{is_rooted, APP_RELATIVE_CHAR};

/// Rewrite `virtual_path` relative to `app_root`, or `None` if it lies
/// outside the root.
///
/// The comparison ignores case. A path equal to the root without its trailing
/// slash (`/myapp` for `/myapp/`) is treated as the root itself.
///
/// # Examples
///
/// ```
/// use vpath::path::app_relative::make_app_relative_or_none;
///
/// assert_eq!(make_app_relative_or_none("/app/sub", "/app/").as_deref(), Some("~/sub"));
/// assert_eq!(make_app_relative_or_none("/App", "/app/").as_deref(), Some("~"));
/// assert_eq!(make_app_relative_or_none("/other", "/app/"), None);
/// assert_eq!(make_app_relative_or_none("/page", "/").as_deref(), Some("~/page"));
/// ```
#[must_use]
pub fn make_app_relative_or_none(virtual_path: &str, app_root: &str) -> Option<String> {
    let root_len = app_root.len();
    let path_len = virtual_path.len();

    // The root without its trailing slash
    if !virtual_path.is_empty()
        && match_prefix_ignore_case(app_root, virtual_path).is_some_and(|len| len + 1 == root_len)
    {
        return Some(APP_RELATIVE_CHAR.to_string());
    }

    if !virtual_path_starts_with(virtual_path, app_root) {
        return None;
    }
    let head_len = match_prefix_ignore_case(virtual_path, app_root)?;

    if head_len == path_len {
        return Some(APP_RELATIVE_CHAR.to_string());
    }

    if root_len == 1 {
        return Some(format!("{APP_RELATIVE_CHAR}{virtual_path}"));
    }

    // Keep the root's trailing slash as the separator after the sentinel
    virtual_path
        .get(head_len - 1..)
        .map(|rest| format!("{APP_RELATIVE_CHAR}{rest}"))
}

/// Rewrite `virtual_path` relative to `app_root`, returning it unchanged if
/// it lies outside the root.
///
/// # Examples
///
/// ```
/// use vpath::path::app_relative::make_app_relative;
///
/// assert_eq!(make_app_relative("/app/sub", "/app/"), "~/sub");
/// assert_eq!(make_app_relative("/elsewhere", "/app/"), "/elsewhere");
/// ```
#[must_use]
pub fn make_app_relative<'a>(virtual_path: &'a str, app_root: &str) -> Cow<'a, str> {
    make_app_relative_or_none(virtual_path, app_root).map_or(Cow::Borrowed(virtual_path), Cow::Owned)
}

/// Rewrite an application-relative path against `app_root`.
///
/// `~` becomes the root itself and `~/rest` becomes the root followed by
/// `rest`. Rooted paths are returned unchanged.
///
/// # Errors
///
/// Returns [`Error::InvalidOperand`] for an empty path and
/// [`Error::InvalidRelativeTarget`] for a bare relative fragment, which has no
/// anchor.
///
/// # Examples
///
/// ```
/// use vpath::path::app_relative::make_app_absolute;
///
/// assert_eq!(make_app_absolute("~/sub/page", "/app/").unwrap(), "/app/sub/page");
/// assert_eq!(make_app_absolute("~", "/app/").unwrap(), "/app/");
/// assert_eq!(make_app_absolute("/other", "/app/").unwrap(), "/other");
/// assert!(make_app_absolute("sub/page", "/app/").is_err());
/// ```
pub fn make_app_absolute<'a>(virtual_path: &'a str, app_root: &str) -> Result<Cow<'a, str>> {
    if virtual_path.is_empty() {
        return Err(Error::InvalidOperand {
            reason: "cannot anchor an empty virtual path".to_string(),
        });
    }

    if let Some(rest) = virtual_path.strip_prefix(APP_RELATIVE_CHAR) {
        if rest.is_empty() {
            return Ok(Cow::Owned(app_root.to_string()));
        }
        if let Some(rest) = rest.strip_prefix(['/', '\\']) {
            let mut absolute = String::with_capacity(app_root.len() + rest.len() + 1);
            absolute.push_str(app_root);
            if !absolute.ends_with('/') {
                absolute.push('/');
            }
            absolute.push_str(rest);
            return Ok(Cow::Owned(absolute));
        }
    }

    if !is_rooted(virtual_path) {
        return Err(Error::InvalidRelativeTarget {
            path: virtual_path.to_string(),
            reason: "relative paths cannot be made application-absolute".to_string(),
        });
    }

    Ok(Cow::Borrowed(virtual_path))
}
