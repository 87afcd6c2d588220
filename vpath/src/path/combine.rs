//! String-level combination of virtual paths.
//!
//! These functions resolve one virtual path against another the way a
//! browser resolves an href against the page that contains it, extended with
//! the `~` sentinel for application-relative references.

use std::borrow::Cow;

use crate::app_root::{current_root, AppRootProvider};
use crate::error::{Error, Result};
use crate::path::app_relative::make_app_absolute;
use crate::path::compare::eq_ignore_case;
use crate::path::normalize::{get_file_name, has_trailing_slash, reduce};
use crate::path::validate::{check_valid_virtual_path, is_app_relative_path, is_rooted};

/// Resolve `relative` against `base_path` and normalize the result.
///
/// - A rooted `relative` replaces the base entirely.
/// - `~` alone yields the application root.
/// - `~/x` is spliced after the application root.
/// - Anything else is appended to the directory of `base_path` (its trailing
///   file name is dropped).
///
/// The combined path is then reduced. The application root is only fetched
/// when `relative` is application-relative or reduction has to re-anchor.
///
/// # Errors
///
/// Returns an error if:
/// - Either operand is empty ([`Error::InvalidOperand`])
/// - `relative` is a physical path or carries a URI scheme
/// - The root is needed but unknown
/// - Reduction ascends above the root
///
/// # Examples
///
/// ```
/// use vpath::app_root::StaticAppRoot;
/// use vpath::path::combine::combine;
///
/// let root = StaticAppRoot::new("/app/").unwrap();
///
/// assert_eq!(combine("/app/sub/page.aspx", "../other.aspx", &root).unwrap(), "/app/other.aspx");
/// assert_eq!(combine("/app/sub/", "~/x", &root).unwrap(), "/app/x");
/// assert_eq!(combine("/anything", "/rooted", &root).unwrap(), "/rooted");
/// ```
pub fn combine(base_path: &str, relative: &str, root: &dyn AppRootProvider) -> Result<String> {
    if relative.is_empty() {
        return Err(Error::InvalidOperand {
            reason: "cannot combine with an empty relative path".to_string(),
        });
    }
    if base_path.is_empty() {
        return Err(Error::InvalidOperand {
            reason: "cannot combine onto an empty base path".to_string(),
        });
    }

    check_valid_virtual_path(relative)?;

    let combined = if is_rooted(relative) {
        relative.to_string()
    } else if relative == "~" {
        return current_root(root, relative);
    } else if is_app_relative_path(relative) {
        let app_root = current_root(root, relative)?;
        make_app_absolute(relative, &app_root)?.into_owned()
    } else {
        simple_combine(base_directory(base_path)?, relative)
    };

    reduce(&combined, root)
}

/// The directory part of `base_path`, keeping its trailing slash.
fn base_directory(base_path: &str) -> Result<&str> {
    if base_path == "~" {
        return Ok("~/");
    }

    base_path
        .rfind('/')
        .map(|index| &base_path[..=index])
        .ok_or_else(|| Error::InvalidRelativeTarget {
            path: base_path.to_string(),
            reason: "a base path without a directory cannot anchor a relative path".to_string(),
        })
}

/// Join a base path and a relative path with exactly one separator.
///
/// No validation or normalization is performed; `relative` must not be
/// rooted.
///
/// # Examples
///
/// ```
/// use vpath::path::combine::simple_combine;
///
/// assert_eq!(simple_combine("/app", "page"), "/app/page");
/// assert_eq!(simple_combine("/app/", "page"), "/app/page");
/// ```
#[must_use]
pub fn simple_combine(base_path: &str, relative: &str) -> String {
    let mut combined = String::with_capacity(base_path.len() + relative.len() + 1);
    combined.push_str(base_path);
    if !has_trailing_slash(base_path) {
        combined.push('/');
    }
    combined.push_str(relative);
    combined
}

/// Compute the relative reference that leads from `from` to `to`.
///
/// Both paths may be rooted or application-relative. A query string on `to`
/// is carried over to the result.
///
/// # Errors
///
/// Returns an error if either path is a bare relative fragment, or if an
/// application-relative path needs the root and none is known.
///
/// # Examples
///
/// ```
/// use vpath::app_root::StaticAppRoot;
/// use vpath::path::combine::make_relative;
///
/// let root = StaticAppRoot::new("/app/").unwrap();
///
/// assert_eq!(make_relative("/app/a/page.aspx", "/app/b/other.aspx", &root).unwrap(), "../b/other.aspx");
/// assert_eq!(make_relative("~/a/", "~/a/x?q=1", &root).unwrap(), "x?q=1");
/// assert_eq!(make_relative("/app/a/", "/APP/A/", &root).unwrap(), "./");
/// ```
pub fn make_relative(from: &str, to: &str, root: &dyn AppRootProvider) -> Result<String> {
    let from = anchor(from, root)?;
    let to = anchor(to, root)?;

    let (to, query) = match to.find('?') {
        Some(index) => to.split_at(index),
        None => (&to[..], ""),
    };
    let from = from.split_once('?').map_or(&from[..], |(head, _)| head);

    let mut relative = if eq_ignore_case(from, to) {
        if has_trailing_slash(to) {
            "./".to_string()
        } else {
            get_file_name(to).to_string()
        }
    } else {
        let (from_rest, to_rest) = split_after_common_directory(from, to);
        let mut relative = "../".repeat(from_rest.matches('/').count());
        relative.push_str(to_rest);
        relative
    };

    if relative.is_empty() {
        relative.push_str("./");
    }
    relative.push_str(query);
    Ok(relative)
}

fn anchor<'a>(path: &'a str, root: &dyn AppRootProvider) -> Result<Cow<'a, str>> {
    if is_app_relative_path(path) {
        let app_root = current_root(root, path)?;
        return Ok(make_app_absolute(path, &app_root)?.into_owned().into());
    }
    if path.is_empty() || !is_rooted(path) {
        return Err(Error::InvalidRelativeTarget {
            path: path.to_string(),
            reason: "both ends of a relative reference must be rooted".to_string(),
        });
    }
    Ok(path.into())
}

/// Split both paths just after the last `/` up to which they agree.
fn split_after_common_directory<'a, 'b>(from: &'a str, to: &'b str) -> (&'a str, &'b str) {
    let mut from_split = 0;
    let mut to_split = 0;

    for ((i, a), (j, b)) in from.char_indices().zip(to.char_indices()) {
        if !a.to_lowercase().eq(b.to_lowercase()) {
            break;
        }
        if a == '/' {
            from_split = i + 1;
            to_split = j + 1;
        }
    }

    (&from[from_split..], &to[to_split..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_root::{StaticAppRoot, UnknownAppRoot};

    fn app_root() -> StaticAppRoot {
        StaticAppRoot::new("/app/").unwrap()
    }

    #[test]
    fn test_combine_parent_reference() {
        let combined = combine("/app/sub/page.aspx", "../other.aspx", &app_root()).unwrap();
        assert_eq!(combined, "/app/other.aspx");
    }

    #[test]
    fn test_combine_app_relative() {
        assert_eq!(combine("/app/sub/", "~/x", &app_root()).unwrap(), "/app/x");
        assert_eq!(combine("/zzz/", "~", &app_root()).unwrap(), "/app/");

        let at_root = StaticAppRoot::new("/").unwrap();
        assert_eq!(combine("/zzz/", "~/x", &at_root).unwrap(), "/x");
    }

    #[test]
    fn test_combine_rooted_displaces_base() {
        assert_eq!(combine("/a/b/c", "/x/./y", &app_root()).unwrap(), "/x/y");
        assert_eq!(combine("~/a/", "\\x", &app_root()).unwrap(), "/x");
    }

    #[test]
    fn test_combine_onto_app_relative_base() {
        assert_eq!(combine("~", "page", &app_root()).unwrap(), "~/page");
        assert_eq!(combine("~/sub/page", "other", &app_root()).unwrap(), "~/sub/other");
        assert_eq!(combine("~/sub/", "../..", &app_root()).unwrap(), "/");
    }

    #[test]
    fn test_combine_keeps_query() {
        assert_eq!(
            combine("/app/a/", "b/../c?x=1", &app_root()).unwrap(),
            "/app/a/c?x=1"
        );
    }

    #[test]
    fn test_combine_rejects_invalid_relatives() {
        assert!(matches!(
            combine("/app/", "http://host/", &app_root()),
            Err(Error::InvalidRelativeTarget { .. })
        ));
        assert!(matches!(
            combine("/app/", "c:\\inetpub", &app_root()),
            Err(Error::InvalidRelativeTarget { .. })
        ));
        assert!(matches!(
            combine("/app/", "", &app_root()),
            Err(Error::InvalidOperand { .. })
        ));
        assert!(matches!(
            combine("", "x", &app_root()),
            Err(Error::InvalidOperand { .. })
        ));
        assert!(matches!(
            combine("page.aspx", "x", &app_root()),
            Err(Error::InvalidRelativeTarget { .. })
        ));
    }

    #[test]
    fn test_combine_without_root() {
        assert_eq!(combine("/a/b", "c", &UnknownAppRoot).unwrap(), "/a/c");
        assert!(matches!(
            combine("/a/b", "~/c", &UnknownAppRoot),
            Err(Error::UnknownApplicationRoot { .. })
        ));
    }

    #[test]
    fn test_combine_above_root() {
        assert!(matches!(
            combine("/a/", "../../x", &app_root()),
            Err(Error::AscendAboveRoot { .. })
        ));
    }

    #[test]
    fn test_simple_combine() {
        assert_eq!(simple_combine("~", "x"), "~/x");
        assert_eq!(simple_combine("/", "x"), "/x");
    }

    #[test]
    fn test_make_relative_siblings() {
        let root = app_root();
        assert_eq!(make_relative("/a/b/c.aspx", "/a/d/e.aspx", &root).unwrap(), "../d/e.aspx");
        assert_eq!(make_relative("/a/b/", "/a/b/c/d", &root).unwrap(), "c/d");
        assert_eq!(make_relative("/a/b/c/", "/x", &root).unwrap(), "../../../x");
    }

    #[test]
    fn test_make_relative_identical() {
        let root = app_root();
        assert_eq!(make_relative("/a/b.aspx", "/A/B.aspx", &root).unwrap(), "B.aspx");
        assert_eq!(make_relative("/a/b/", "/a/b/", &root).unwrap(), "./");
    }

    #[test]
    fn test_make_relative_same_directory() {
        let root = app_root();
        assert_eq!(make_relative("/a/b/page", "/a/b/", &root).unwrap(), "./");
    }

    #[test]
    fn test_make_relative_app_relative_ends() {
        let root = app_root();
        assert_eq!(make_relative("~/x/", "/app/y", &root).unwrap(), "../y");
        assert!(matches!(
            make_relative("~/x/", "/y", &UnknownAppRoot),
            Err(Error::UnknownApplicationRoot { .. })
        ));
    }

    #[test]
    fn test_make_relative_rejects_fragments() {
        assert!(matches!(
            make_relative("a/b", "/c", &app_root()),
            Err(Error::InvalidRelativeTarget { .. })
        ));
    }
}
