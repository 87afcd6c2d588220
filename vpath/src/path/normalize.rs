//! Virtual path normalization.
//!
//! This module provides the canonicalizing transformations of the path
//! algebra:
//! - Turning backslashes into forward slashes and collapsing duplicates
//! - Eliminating `.` and `..` segments
//! - Adding and removing trailing slashes
//!
//! Every function returns its input borrowed when nothing needs to change.

use std::borrow::Cow;

use crate::app_root::{current_root, AppRootProvider};
use crate::error::{Error, Result};
use crate::path::app_relative::make_app_absolute;
use crate::path::validate::is_app_relative_path;

/// Replace backslashes with forward slashes and collapse repeated slashes.
///
/// Collapsing repeats until no `//` remains, so runs of three or more slashes
/// are fully reduced in a single call.
///
/// # Examples
///
/// ```
/// use vpath::path::normalize::fix_slashes;
///
/// assert_eq!(fix_slashes("a////b"), "a/b");
/// assert_eq!(fix_slashes("\\app\\\\page"), "/app/page");
/// assert_eq!(fix_slashes("/already/clean"), "/already/clean");
/// ```
#[must_use]
pub fn fix_slashes(path: &str) -> Cow<'_, str> {
    if !path.contains('\\') && !path.contains("//") {
        return Cow::Borrowed(path);
    }

    let mut fixed = path.replace('\\', "/");
    while fixed.contains("//") {
        fixed = fixed.replace("//", "/");
    }
    Cow::Owned(fixed)
}

/// Check whether `path` contains a `.` or `..` segment.
fn has_dot_segment(path: &str) -> bool {
    let bytes = path.as_bytes();
    let len = bytes.len();

    bytes.iter().enumerate().any(|(i, &b)| {
        b == b'.'
            && (i == 0 || bytes[i - 1] == b'/')
            && (i + 1 == len
                || bytes[i + 1] == b'/'
                || (bytes[i + 1] == b'.' && (i + 2 == len || bytes[i + 2] == b'/')))
    })
}

/// Eliminate `.` and `..` segments from a well-formed virtual path.
///
/// The path must start with `/` or with the `~` sentinel and must already
/// have its slashes fixed. A `..` that would pop the `~` sentinel re-anchors
/// the path at the current application root and reduction restarts on the
/// absolute form.
///
/// An empty result becomes `/` for rooted input and `.` otherwise.
///
/// # Errors
///
/// Returns an error if:
/// - A `..` ascends above the first segment ([`Error::AscendAboveRoot`])
/// - Re-anchoring is needed and the root is unknown
/// - The path is a bare relative fragment containing dot segments
///
/// # Examples
///
/// ```
/// use vpath::app_root::StaticAppRoot;
/// use vpath::path::normalize::reduce_virtual_path;
///
/// let root = StaticAppRoot::new("/app/").unwrap();
///
/// assert_eq!(reduce_virtual_path("/a/./b/../c", &root).unwrap(), "/a/c");
/// assert_eq!(reduce_virtual_path("~/x/..", &root).unwrap(), "~");
/// assert_eq!(reduce_virtual_path("~/../other", &root).unwrap(), "/other");
/// assert!(reduce_virtual_path("/a/../..", &root).is_err());
/// ```
pub fn reduce_virtual_path<'a>(path: &'a str, root: &dyn AppRootProvider) -> Result<Cow<'a, str>> {
    if !has_dot_segment(path) {
        return Ok(Cow::Borrowed(path));
    }

    if !path.starts_with('/') && !is_app_relative_path(path) {
        return Err(Error::InvalidRelativeTarget {
            path: path.to_string(),
            reason: "dot segments in a relative path cannot be reduced without a base".to_string(),
        });
    }

    let bytes = path.as_bytes();
    let len = bytes.len();
    let mut retained: Vec<usize> = Vec::new();
    let mut reduced = String::with_capacity(len);
    let mut examine = 0;

    loop {
        let start = examine;
        examine = path[start + 1..]
            .find('/')
            .map_or(len, |offset| start + 1 + offset);

        // Segments carry their leading slash: "/." and "/.." are dot segments
        let segment_len = examine - start;
        let is_dot_segment = segment_len <= 3
            && bytes[examine - 1] == b'.'
            && (start + 1 >= len || bytes[start + 1] == b'.');

        if is_dot_segment {
            if segment_len == 3 {
                if retained.is_empty() {
                    return Err(Error::AscendAboveRoot {
                        path: path.to_string(),
                    });
                }

                // Popping the sentinel would yield garbage; anchor at the real root
                if retained.len() == 1 && is_app_relative_path(path) {
                    let app_root = current_root(root, path)?;
                    let absolute = make_app_absolute(path, &app_root)?;
                    log::debug!("re-anchored '{path}' at application root as '{absolute}'");
                    let reduced = reduce_virtual_path(&absolute, root).map_err(|e| match e {
                        Error::AscendAboveRoot { .. } => Error::AscendAboveRoot {
                            path: path.to_string(),
                        },
                        other => other,
                    })?;
                    return Ok(Cow::Owned(reduced.into_owned()));
                }

                if let Some(offset) = retained.pop() {
                    reduced.truncate(offset);
                }
            }
        } else {
            retained.push(reduced.len());
            reduced.push_str(&path[start..examine]);
        }

        if examine == len {
            break;
        }
    }

    if reduced.is_empty() {
        reduced.push(if path.starts_with('/') { '/' } else { '.' });
    }

    Ok(Cow::Owned(reduced))
}

/// Fully normalize a virtual path that may carry a query string.
///
/// The query (from the first `?`) is set aside, slashes are fixed, dot
/// segments are reduced, and the query is re-appended unchanged.
///
/// # Errors
///
/// Returns the same errors as [`reduce_virtual_path`].
///
/// # Examples
///
/// ```
/// use vpath::app_root::StaticAppRoot;
/// use vpath::path::normalize::reduce;
///
/// let root = StaticAppRoot::new("/").unwrap();
/// assert_eq!(reduce("/a//b/../c?x=../y", &root).unwrap(), "/a/c?x=../y");
/// ```
pub fn reduce(path: &str, root: &dyn AppRootProvider) -> Result<String> {
    let (path, query) = match path.find('?') {
        Some(index) => path.split_at(index),
        None => (path, ""),
    };

    let fixed = fix_slashes(path);
    let reduced = reduce_virtual_path(&fixed, root)?;

    let mut result = String::with_capacity(reduced.len() + query.len());
    result.push_str(&reduced);
    result.push_str(query);
    Ok(result)
}

/// Check whether a path ends with `/`.
#[must_use]
pub fn has_trailing_slash(path: &str) -> bool {
    path.ends_with('/')
}

/// Append a trailing slash unless one is present (or the path is empty).
///
/// # Examples
///
/// ```
/// use vpath::path::normalize::append_slash;
///
/// assert_eq!(append_slash("/app"), "/app/");
/// assert_eq!(append_slash("/app/"), "/app/");
/// ```
#[must_use]
pub fn append_slash(path: &str) -> Cow<'_, str> {
    if path.is_empty() || has_trailing_slash(path) {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(format!("{path}/"))
    }
}

/// Remove one trailing slash, except from the root `/`.
///
/// # Examples
///
/// ```
/// use vpath::path::normalize::remove_trailing_slash;
///
/// assert_eq!(remove_trailing_slash("/app/"), "/app");
/// assert_eq!(remove_trailing_slash("/"), "/");
/// ```
#[must_use]
pub fn remove_trailing_slash(path: &str) -> &str {
    if path.len() > 1 {
        path.strip_suffix('/').unwrap_or(path)
    } else {
        path
    }
}

/// Get the last segment of a path (everything after the final `/`).
///
/// # Examples
///
/// ```
/// use vpath::path::normalize::get_file_name;
///
/// assert_eq!(get_file_name("/app/page.aspx"), "page.aspx");
/// assert_eq!(get_file_name("/app/"), "");
/// assert_eq!(get_file_name("page.aspx"), "page.aspx");
/// ```
#[must_use]
pub fn get_file_name(path: &str) -> &str {
    path.rfind('/').map_or(path, |index| &path[index + 1..])
}

/// Get the extension of the last segment, including its dot.
///
/// A trailing dot or a dot-free last segment yields the empty string.
///
/// # Examples
///
/// ```
/// use vpath::path::normalize::get_extension;
///
/// assert_eq!(get_extension("/app/page.aspx"), ".aspx");
/// assert_eq!(get_extension("/app.v2/page"), "");
/// assert_eq!(get_extension("/app/page."), "");
/// ```
#[must_use]
pub fn get_extension(path: &str) -> &str {
    match path.rfind(['.', '/']) {
        Some(index) if path.as_bytes()[index] == b'.' && index + 1 != path.len() => &path[index..],
        _ => "",
    }
}
