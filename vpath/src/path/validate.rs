//! Classification and validation of virtual path strings.

use crate::error::{Error, Result};

/// The sentinel marking an application-relative path.
pub const APP_RELATIVE_CHAR: char = '~';

/// Check whether a path is rooted (starts with a slash).
///
/// The empty string counts as rooted, matching the behaviour of href
/// resolution where an empty reference addresses the base itself.
#[must_use]
pub fn is_rooted(path: &str) -> bool {
    path.is_empty() || path.starts_with(['/', '\\'])
}

/// Check whether a path is application-relative: `~`, `~/...` or `~\...`.
///
/// # Examples
///
/// ```
/// use vpath::path::validate::is_app_relative_path;
///
/// assert!(is_app_relative_path("~"));
/// assert!(is_app_relative_path("~/sub/page"));
/// assert!(!is_app_relative_path("~user"));
/// assert!(!is_app_relative_path("/app"));
/// ```
#[must_use]
pub fn is_app_relative_path(path: &str) -> bool {
    match path.strip_prefix(APP_RELATIVE_CHAR) {
        Some(rest) => rest.is_empty() || rest.starts_with(['/', '\\']),
        None => false,
    }
}

/// Check whether a path looks like a UNC share (`\\server\share` or
/// `//server/share`).
#[must_use]
pub fn is_unc_share_path(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() > 2 && is_separator(bytes[0]) && is_separator(bytes[1])
}

/// Check whether a path looks like an absolute physical path: a drive letter
/// path such as `c:\foo` or a UNC share.
///
/// # Examples
///
/// ```
/// use vpath::path::validate::is_absolute_physical_path;
///
/// assert!(is_absolute_physical_path("c:\\inetpub"));
/// assert!(is_absolute_physical_path("//server/share"));
/// assert!(!is_absolute_physical_path("/app/page"));
/// ```
#[must_use]
pub fn is_absolute_physical_path(path: &str) -> bool {
    let bytes = path.as_bytes();
    if bytes.len() < 3 {
        return false;
    }

    (bytes[1] == b':' && is_separator(bytes[2])) || is_unc_share_path(path)
}

/// Check whether a path starts with what may be a URI scheme.
///
/// Schemes cannot contain slashes, so a colon preceded by a slash is part of
/// the path. Any other colon is conservatively treated as a scheme separator.
///
/// # Examples
///
/// ```
/// use vpath::path::validate::has_scheme;
///
/// assert!(has_scheme("mailto:user@example.com"));
/// assert!(has_scheme("http://server/"));
/// assert!(!has_scheme("/app/a:b"));
/// assert!(!has_scheme("page.aspx"));
/// ```
#[must_use]
pub fn has_scheme(path: &str) -> bool {
    let Some(colon) = path.find(':') else {
        return false;
    };
    !matches!(path.find('/'), Some(slash) if slash < colon)
}

/// Reject strings that cannot be used as virtual paths in a combination.
///
/// # Errors
///
/// Returns [`Error::InvalidRelativeTarget`] if the path looks like a physical
/// path or carries a URI scheme (a query string is ignored for the scheme
/// check).
pub fn check_valid_virtual_path(path: &str) -> Result<()> {
    if is_absolute_physical_path(path) {
        return Err(Error::InvalidRelativeTarget {
            path: path.to_string(),
            reason: "physical paths are not virtual paths".to_string(),
        });
    }

    let without_query = path.split_once('?').map_or(path, |(head, _)| head);
    if has_scheme(without_query) {
        return Err(Error::InvalidRelativeTarget {
            path: path.to_string(),
            reason: "virtual paths cannot carry a URI scheme".to_string(),
        });
    }

    Ok(())
}

fn is_separator(b: u8) -> bool {
    b == b'/' || b == b'\\'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_rooted() {
        assert!(is_rooted("/a"));
        assert!(is_rooted("\\a"));
        assert!(is_rooted(""));
        assert!(!is_rooted("a/b"));
        assert!(!is_rooted("~/a"));
    }

    #[test]
    fn test_is_app_relative_path() {
        assert!(is_app_relative_path("~\\a"));
        assert!(!is_app_relative_path(""));
        assert!(!is_app_relative_path("a~"));
    }

    #[test]
    fn test_physical_paths() {
        assert!(is_absolute_physical_path("C:/x"));
        assert!(is_absolute_physical_path("\\\\server\\share"));
        assert!(!is_absolute_physical_path("c:"));
        assert!(!is_absolute_physical_path("//"));
        assert!(is_unc_share_path("//a"));
        assert!(!is_unc_share_path("/a/"));
    }

    #[test]
    fn test_check_valid_virtual_path() {
        assert!(check_valid_virtual_path("../page.aspx").is_ok());
        assert!(check_valid_virtual_path("page.aspx?time=10:30").is_ok());
        assert!(check_valid_virtual_path("/a:b").is_ok());

        assert!(matches!(
            check_valid_virtual_path("c:\\windows"),
            Err(Error::InvalidRelativeTarget { .. })
        ));
        assert!(matches!(
            check_valid_virtual_path("javascript:alert(1)"),
            Err(Error::InvalidRelativeTarget { .. })
        ));
    }
}
