//! Case-insensitive comparison and path relationship checking.
//!
//! Virtual paths compare ordinally and case-insensitively, independent of
//! any locale. Characters are folded with Unicode lowercase mapping before
//! comparison, so `/App/Page` and `/app/page` are the same path.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

fn fold(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(char::to_lowercase)
}

/// Compare two strings for equality, ignoring case.
///
/// # Examples
///
/// ```
/// use vpath::path::compare::eq_ignore_case;
///
/// assert!(eq_ignore_case("/App/Page", "/app/page"));
/// assert!(!eq_ignore_case("/app1", "/app11"));
/// ```
#[must_use]
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    if a.is_ascii() && b.is_ascii() {
        return a.eq_ignore_ascii_case(b);
    }
    fold(a).eq(fold(b))
}

/// Order two strings, ignoring case.
///
/// # Examples
///
/// ```
/// use vpath::path::compare::cmp_ignore_case;
/// use std::cmp::Ordering;
///
/// assert_eq!(cmp_ignore_case("/A", "/a"), Ordering::Equal);
/// assert_eq!(cmp_ignore_case("/a", "/B"), Ordering::Less);
/// ```
#[must_use]
pub fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    fold(a).cmp(fold(b))
}

/// Feed the case-folded form of `s` into a hasher.
///
/// Strings that are equal under [`eq_ignore_case`] hash identically.
pub fn hash_ignore_case<H: Hasher>(s: &str, state: &mut H) {
    for c in fold(s) {
        c.hash(state);
    }
    state.write_u8(0xff);
}

/// Match `prefix` against the start of `s`, ignoring case.
///
/// Returns the byte length of the matching head of `s`. Case pairs may
/// differ in encoded width (`\u{212A}` KELVIN SIGN folds to `k`), so this is
/// not always `prefix.len()`. A character of `s` whose folding only partly
/// overlaps the end of `prefix` does not match.
///
/// # Examples
///
/// ```
/// use vpath::path::compare::match_prefix_ignore_case;
///
/// assert_eq!(match_prefix_ignore_case("/App/page", "/app/"), Some(5));
/// assert_eq!(match_prefix_ignore_case("/\u{212A}/x", "/k/"), Some(5));
/// assert_eq!(match_prefix_ignore_case("/ap", "/app"), None);
/// ```
#[must_use]
pub fn match_prefix_ignore_case(s: &str, prefix: &str) -> Option<usize> {
    if s.is_ascii() && prefix.is_ascii() {
        return s
            .get(..prefix.len())
            .filter(|head| head.eq_ignore_ascii_case(prefix))
            .map(str::len);
    }

    let mut wanted = fold(prefix).peekable();
    for (index, c) in s.char_indices() {
        if wanted.peek().is_none() {
            return Some(index);
        }
        for lower in c.to_lowercase() {
            if wanted.next() != Some(lower) {
                return None;
            }
        }
    }
    wanted.peek().is_none().then_some(s.len())
}

/// Check whether `s` starts with `prefix`, ignoring case.
///
/// Empty operands never match.
///
/// # Examples
///
/// ```
/// use vpath::path::compare::starts_with_ignore_case;
///
/// assert!(starts_with_ignore_case("/MyApp/page", "/myapp/"));
/// assert!(!starts_with_ignore_case("/my", "/myapp/"));
/// assert!(!starts_with_ignore_case("/myapp", ""));
/// ```
#[must_use]
pub fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    !s.is_empty() && !prefix.is_empty() && match_prefix_ignore_case(s, prefix).is_some()
}

/// Check whether `path` lies at or below `prefix` on a segment boundary.
///
/// `/app11` does not start with `/app1`, but `/app1/x` and `/app1` do. A
/// `prefix` ending in `/` (including the root `/`) only needs a textual match.
///
/// # Examples
///
/// ```
/// use vpath::path::compare::virtual_path_starts_with;
///
/// assert!(virtual_path_starts_with("/app1/page", "/app1"));
/// assert!(virtual_path_starts_with("/APP1/page", "/app1/"));
/// assert!(!virtual_path_starts_with("/app11", "/app1"));
/// assert!(virtual_path_starts_with("/anything", "/"));
/// ```
#[must_use]
pub fn virtual_path_starts_with(path: &str, prefix: &str) -> bool {
    if path.is_empty() || prefix.is_empty() {
        return false;
    }
    let Some(head_len) = match_prefix_ignore_case(path, prefix) else {
        return false;
    };

    if path.len() == head_len || prefix.ends_with('/') {
        return true;
    }

    path.as_bytes().get(head_len) == Some(&b'/')
}

/// Determine whether `subpath` is `path` itself or lies beneath it.
///
/// One trailing slash on either side is ignored. An empty `path` contains
/// every path; an empty `subpath` is contained only by an empty `path`.
///
/// # Examples
///
/// ```
/// use vpath::path::compare::is_equal_or_subpath;
///
/// assert!(is_equal_or_subpath("/myapp", "/myapp/foo.aspx"));
/// assert!(is_equal_or_subpath("/myapp/", "/MyApp"));
/// assert!(!is_equal_or_subpath("/app1", "/app11"));
/// ```
#[must_use]
pub fn is_equal_or_subpath(path: &str, subpath: &str) -> bool {
    if path.is_empty() {
        return true;
    }
    if subpath.is_empty() {
        return false;
    }

    let path = path.strip_suffix('/').unwrap_or(path);
    let trimmed = subpath.strip_suffix('/').unwrap_or(subpath);

    let Some(head_len) = match_prefix_ignore_case(trimmed, path) else {
        return false;
    };

    // The character after the shared prefix must start a new segment
    head_len == trimmed.len() || trimmed.as_bytes()[head_len] == b'/'
}

/// Relationship between two virtual paths.
///
/// # Examples
///
/// ```
/// use vpath::path::PathRelationship;
///
/// assert_eq!(
///     PathRelationship::between("/app", "/app/sub/page.aspx"),
///     PathRelationship::Ancestor
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathRelationship {
    /// The first path is an ancestor of the second.
    Ancestor,

    /// The first path is a descendant of the second.
    Descendant,

    /// The paths address the same location, ignoring case and a trailing
    /// slash.
    Same,

    /// Neither path lies beneath the other.
    Unrelated,
}

impl PathRelationship {
    /// Determine the relationship between two virtual paths.
    ///
    /// # Examples
    ///
    /// ```
    /// use vpath::path::PathRelationship;
    ///
    /// assert_eq!(PathRelationship::between("/a/b", "/a"), PathRelationship::Descendant);
    /// assert_eq!(PathRelationship::between("/A/", "/a"), PathRelationship::Same);
    /// assert_eq!(PathRelationship::between("/app1", "/app11"), PathRelationship::Unrelated);
    /// ```
    #[must_use]
    pub fn between(path1: &str, path2: &str) -> Self {
        match (
            is_equal_or_subpath(path1, path2),
            is_equal_or_subpath(path2, path1),
        ) {
            (true, true) => Self::Same,
            (true, false) => Self::Ancestor,
            (false, true) => Self::Descendant,
            (false, false) => Self::Unrelated,
        }
    }

    /// Check if the relationship is hierarchical (not unrelated).
    #[must_use]
    pub fn is_hierarchical(&self) -> bool {
        !matches!(self, Self::Unrelated)
    }

    /// Check if `path` lies within `directory` (descendant or same).
    ///
    /// # Examples
    ///
    /// ```
    /// use vpath::path::PathRelationship;
    ///
    /// assert!(PathRelationship::is_within("/app/page.aspx", "/app/"));
    /// assert!(PathRelationship::is_within("/app", "/app"));
    /// assert!(!PathRelationship::is_within("/app", "/app/page.aspx"));
    /// ```
    #[must_use]
    pub fn is_within(path: &str, directory: &str) -> bool {
        matches!(Self::between(path, directory), Self::Descendant | Self::Same)
    }

    /// Check if `path` contains `other` (ancestor or same).
    #[must_use]
    pub fn contains(path: &str, other: &str) -> bool {
        matches!(Self::between(path, other), Self::Ancestor | Self::Same)
    }

    /// Get a human-readable description of the relationship.
    #[must_use]
    pub fn description(&self, path1: &str, path2: &str) -> String {
        match self {
            Self::Ancestor => format!("{path1} is an ancestor of {path2}"),
            Self::Descendant => format!("{path1} is a descendant of {path2}"),
            Self::Same => format!("{path1} and {path2} are the same path"),
            Self::Unrelated => format!("{path1} and {path2} are unrelated paths"),
        }
    }
}
