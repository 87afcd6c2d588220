//! The `VirtualPath` value type.
//!
//! A `VirtualPath` is built from either a rooted path (`/app/page`), an
//! application-relative path (`~/page`) or a bare relative fragment
//! (`sub/page`). The form it was built from is its source; the other form is
//! derived on demand against the current application root and cached in the
//! value. Derivation never changes what a value denotes, so a cached value and
//! a fresh one compare equal once resolved.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::app_root::{current_root, AppRoot};
use crate::error::{Error, Result};
use crate::path::app_relative::{make_app_absolute, make_app_relative_or_none};
use crate::path::combine;
use crate::path::compare::{cmp_ignore_case, eq_ignore_case};
use crate::path::normalize::{
    append_slash, fix_slashes, get_extension, get_file_name, has_trailing_slash,
    reduce_virtual_path, remove_trailing_slash,
};
use crate::path::options::PathOptions;
use crate::path::types::{PathForm, ResolvedVirtualPath};
use crate::path::validate::is_app_relative_path;

/// The string a value was constructed from.
#[derive(Debug, Clone)]
enum Repr {
    Rooted(String),
    Fragment(String),
    AppRelative(String),
}

impl Repr {
    fn classify(path: String) -> Self {
        if is_app_relative_path(&path) {
            Self::AppRelative(path)
        } else if path.starts_with('/') {
            Self::Rooted(path)
        } else {
            Self::Fragment(path)
        }
    }

    fn as_str(&self) -> &str {
        match self {
            Self::Rooted(path) | Self::Fragment(path) | Self::AppRelative(path) => path,
        }
    }
}

/// A validated, normalized virtual path.
///
/// Values are immutable; the only interior state is a pair of memo cells for
/// the derived absolute and application-relative strings. Values are cheap to
/// clone and safe to share between threads.
///
/// `VirtualPath` deliberately implements neither `PartialEq` nor `Ord`:
/// comparing two values may need the application root, which can be unknown.
/// Use [`try_eq`](Self::try_eq), [`try_cmp`](Self::try_cmp) or
/// [`resolve`](Self::resolve) instead.
///
/// # Examples
///
/// ```
/// use vpath::app_root::StaticAppRoot;
/// use vpath::path::VirtualPath;
///
/// let root = StaticAppRoot::new("/myapp/").unwrap().shared();
///
/// let page = VirtualPath::create_non_relative("~\\sub//./page.aspx", &root).unwrap();
/// assert_eq!(page.app_relative().unwrap(), "~/sub/page.aspx");
/// assert_eq!(page.absolute().unwrap(), "/myapp/sub/page.aspx");
///
/// let other = page.combine(&VirtualPath::create_any("../other.aspx", &root).unwrap()).unwrap();
/// assert_eq!(other.absolute().unwrap(), "/myapp/other.aspx");
/// ```
#[derive(Clone)]
pub struct VirtualPath {
    repr: Repr,
    absolute: OnceLock<String>,
    app_relative: OnceLock<Option<String>>,
    root: AppRoot,
}

impl VirtualPath {
    fn new(repr: Repr, root: &AppRoot) -> Self {
        Self {
            repr,
            absolute: OnceLock::new(),
            app_relative: OnceLock::new(),
            root: Arc::clone(root),
        }
    }

    /// Wrap an already normalized string produced by a path operation.
    fn derived(&self, path: String) -> Self {
        Self::new(Repr::classify(path), &self.root)
    }

    /// Validate and normalize `raw` according to `options`.
    ///
    /// Surrounding whitespace is trimmed. Backslashes and repeated slashes are
    /// repaired unless [`PathOptions::FAIL_IF_MALFORMED`] is set. Rooted and
    /// application-relative paths have their dot segments reduced; bare
    /// fragments are kept as given.
    ///
    /// Returns `Ok(None)` only for blank input with
    /// [`PathOptions::ALLOW_NULL`].
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input is blank and null is not allowed ([`Error::EmptyPath`])
    /// - The input contains a NUL, or needs repair while repair is forbidden
    ///   ([`Error::MalformedPath`])
    /// - The normalized form is not permitted ([`Error::DisallowedForm`])
    /// - Dot-segment reduction fails
    ///
    /// # Examples
    ///
    /// ```
    /// use vpath::app_root::StaticAppRoot;
    /// use vpath::path::{PathOptions, VirtualPath};
    ///
    /// let root = StaticAppRoot::new("/").unwrap().shared();
    /// let options = PathOptions::ALLOW_ABSOLUTE_PATH | PathOptions::ALLOW_NULL;
    ///
    /// assert!(VirtualPath::create("   ", options, &root).unwrap().is_none());
    ///
    /// let path = VirtualPath::create("/a/./b/../c", options, &root).unwrap().unwrap();
    /// assert_eq!(path.absolute().unwrap(), "/a/c");
    ///
    /// assert!(VirtualPath::create("sub/page", options, &root).is_err());
    /// ```
    pub fn create(raw: &str, options: PathOptions, root: &AppRoot) -> Result<Option<Self>> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            if options.contains(PathOptions::ALLOW_NULL) {
                return Ok(None);
            }
            return Err(Error::EmptyPath);
        }

        let bytes = trimmed.as_bytes();
        let mut needs_slash_fix = false;
        let mut may_have_dots = false;
        for (i, &b) in bytes.iter().enumerate() {
            match b {
                0 => {
                    return Err(Error::MalformedPath {
                        path: trimmed.to_string(),
                        reason: "contains a NUL character".to_string(),
                    });
                }
                b'\\' => needs_slash_fix = true,
                b'/' if i > 0 && bytes[i - 1] == b'/' => needs_slash_fix = true,
                b'.' => may_have_dots = true,
                _ => {}
            }
        }

        let mut path = Cow::Borrowed(trimmed);
        if needs_slash_fix {
            if options.contains(PathOptions::FAIL_IF_MALFORMED) {
                return Err(Error::MalformedPath {
                    path: trimmed.to_string(),
                    reason: "contains backslashes or repeated slashes".to_string(),
                });
            }
            path = Cow::Owned(fix_slashes(trimmed).into_owned());
            log::debug!("repaired slashes in '{trimmed}' to '{path}'");
        }

        if options.contains(PathOptions::ENSURE_TRAILING_SLASH) && !has_trailing_slash(&path) {
            path.to_mut().push('/');
        }

        let repr = if is_app_relative_path(&path) {
            let reduced = if may_have_dots {
                reduce_virtual_path(&path, root.as_ref())
                    .map_err(|e| reported_against(e, trimmed))?
                    .into_owned()
            } else {
                path.into_owned()
            };
            if is_app_relative_path(&reduced) {
                require(options, PathOptions::ALLOW_APP_RELATIVE_PATH, &reduced)?;
                Repr::AppRelative(reduced)
            } else {
                require(options, PathOptions::ALLOW_ABSOLUTE_PATH, &reduced)?;
                Repr::Rooted(reduced)
            }
        } else if path.starts_with('/') {
            require(options, PathOptions::ALLOW_ABSOLUTE_PATH, &path)?;
            let reduced = if may_have_dots {
                reduce_virtual_path(&path, root.as_ref())
                    .map_err(|e| reported_against(e, trimmed))?
                    .into_owned()
            } else {
                path.into_owned()
            };
            Repr::Rooted(reduced)
        } else {
            require(options, PathOptions::ALLOW_RELATIVE_PATH, &path)?;
            Repr::Fragment(path.into_owned())
        };

        Ok(Some(Self::new(repr, root)))
    }

    /// Create a path of any form.
    ///
    /// # Errors
    ///
    /// See [`create`](Self::create).
    pub fn create_any(raw: &str, root: &AppRoot) -> Result<Self> {
        Self::create_required(raw, PathOptions::ALLOW_ALL_PATH, root)
    }

    /// Create a path of any form, ensuring a trailing slash.
    ///
    /// # Errors
    ///
    /// See [`create`](Self::create).
    pub fn create_trailing_slash(raw: &str, root: &AppRoot) -> Result<Self> {
        Self::create_required(
            raw,
            PathOptions::ALLOW_ALL_PATH | PathOptions::ENSURE_TRAILING_SLASH,
            root,
        )
    }

    /// Create a path of any form, or `None` for blank input.
    ///
    /// # Errors
    ///
    /// See [`create`](Self::create).
    pub fn create_allow_null(raw: &str, root: &AppRoot) -> Result<Option<Self>> {
        Self::create(raw, PathOptions::ALLOW_ALL_PATH | PathOptions::ALLOW_NULL, root)
    }

    /// Create a rooted path.
    ///
    /// # Errors
    ///
    /// See [`create`](Self::create).
    pub fn create_absolute(raw: &str, root: &AppRoot) -> Result<Self> {
        Self::create_required(raw, PathOptions::ALLOW_ABSOLUTE_PATH, root)
    }

    /// Create a rooted or application-relative path.
    ///
    /// # Errors
    ///
    /// See [`create`](Self::create).
    pub fn create_non_relative(raw: &str, root: &AppRoot) -> Result<Self> {
        Self::create_required(raw, PathOptions::ALLOW_NON_RELATIVE_PATH, root)
    }

    /// Create a rooted path ending in `/`.
    ///
    /// # Errors
    ///
    /// See [`create`](Self::create).
    pub fn create_absolute_trailing_slash(raw: &str, root: &AppRoot) -> Result<Self> {
        Self::create_required(
            raw,
            PathOptions::ALLOW_ABSOLUTE_PATH | PathOptions::ENSURE_TRAILING_SLASH,
            root,
        )
    }

    /// Create a rooted or application-relative path ending in `/`.
    ///
    /// # Errors
    ///
    /// See [`create`](Self::create).
    pub fn create_non_relative_trailing_slash(raw: &str, root: &AppRoot) -> Result<Self> {
        Self::create_required(
            raw,
            PathOptions::ALLOW_NON_RELATIVE_PATH | PathOptions::ENSURE_TRAILING_SLASH,
            root,
        )
    }

    /// Create a rooted path, or `None` for blank input.
    ///
    /// # Errors
    ///
    /// See [`create`](Self::create).
    pub fn create_absolute_allow_null(raw: &str, root: &AppRoot) -> Result<Option<Self>> {
        Self::create(
            raw,
            PathOptions::ALLOW_ABSOLUTE_PATH | PathOptions::ALLOW_NULL,
            root,
        )
    }

    /// Create a rooted or application-relative path, or `None` for blank
    /// input.
    ///
    /// # Errors
    ///
    /// See [`create`](Self::create).
    pub fn create_non_relative_allow_null(raw: &str, root: &AppRoot) -> Result<Option<Self>> {
        Self::create(
            raw,
            PathOptions::ALLOW_NON_RELATIVE_PATH | PathOptions::ALLOW_NULL,
            root,
        )
    }

    /// Create a rooted or application-relative path ending in `/`, or `None`
    /// for blank input.
    ///
    /// # Errors
    ///
    /// See [`create`](Self::create).
    pub fn create_non_relative_trailing_slash_allow_null(
        raw: &str,
        root: &AppRoot,
    ) -> Result<Option<Self>> {
        Self::create(
            raw,
            PathOptions::ALLOW_NON_RELATIVE_PATH
                | PathOptions::ENSURE_TRAILING_SLASH
                | PathOptions::ALLOW_NULL,
            root,
        )
    }

    fn create_required(raw: &str, options: PathOptions, root: &AppRoot) -> Result<Self> {
        Self::create(raw, options, root)?.ok_or(Error::EmptyPath)
    }

    /// The root path `/`.
    #[must_use]
    pub fn root(root: &AppRoot) -> Self {
        Self::new(Repr::Rooted("/".to_string()), root)
    }

    /// The form this value was constructed from.
    #[must_use]
    pub fn form(&self) -> PathForm {
        match self.repr {
            Repr::Rooted(_) => PathForm::Absolute,
            Repr::Fragment(_) => PathForm::Relative,
            Repr::AppRelative(_) => PathForm::AppRelative,
        }
    }

    /// The absolute string.
    ///
    /// Rooted values and fragments return their source. Application-relative
    /// values are resolved against the current root once and cached: `~`
    /// becomes the root without its trailing slash (`/` stays `/`) and `~/x`
    /// becomes the root followed by `x`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownApplicationRoot`] if the value must be resolved
    /// and the root is unknown.
    pub fn absolute(&self) -> Result<&str> {
        let path = match &self.repr {
            Repr::Rooted(path) | Repr::Fragment(path) => return Ok(path.as_str()),
            Repr::AppRelative(path) => path,
        };

        if let Some(absolute) = self.absolute.get() {
            return Ok(absolute.as_str());
        }

        let app_root = current_root(self.root.as_ref(), path)?;
        let derived = if path == "~" {
            remove_trailing_slash(&app_root).to_string()
        } else {
            make_app_absolute(path, &app_root)?.into_owned()
        };
        Ok(self.absolute.get_or_init(|| derived).as_str())
    }

    /// The absolute string without a trailing slash (the root `/` excepted).
    ///
    /// # Errors
    ///
    /// See [`absolute`](Self::absolute).
    pub fn absolute_no_trailing_slash(&self) -> Result<&str> {
        self.absolute().map(remove_trailing_slash)
    }

    /// The absolute string if it is known without consulting the root.
    #[must_use]
    pub fn absolute_if_available(&self) -> Option<&str> {
        match &self.repr {
            Repr::Rooted(path) | Repr::Fragment(path) => Some(path.as_str()),
            Repr::AppRelative(_) => self.absolute.get().map(String::as_str),
        }
    }

    /// The application-relative string, or `None` if the path lies outside
    /// the application root.
    ///
    /// The conversion is attempted at most once; both a result and a miss are
    /// cached. Fragments are never under the root.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownApplicationRoot`] if the conversion is needed
    /// and the root is unknown.
    ///
    /// # Examples
    ///
    /// ```
    /// use vpath::app_root::StaticAppRoot;
    /// use vpath::path::VirtualPath;
    ///
    /// let root = StaticAppRoot::new("/app/").unwrap().shared();
    ///
    /// let inside = VirtualPath::create_absolute("/app/sub", &root).unwrap();
    /// assert_eq!(inside.app_relative_or_none().unwrap(), Some("~/sub"));
    ///
    /// let outside = VirtualPath::create_absolute("/app1", &root).unwrap();
    /// assert_eq!(outside.app_relative_or_none().unwrap(), None);
    /// assert!(outside.app_relative_conversion_attempted());
    /// ```
    pub fn app_relative_or_none(&self) -> Result<Option<&str>> {
        let path = match &self.repr {
            Repr::AppRelative(path) => return Ok(Some(path.as_str())),
            Repr::Fragment(_) => return Ok(self.app_relative.get_or_init(|| None).as_deref()),
            Repr::Rooted(path) => path,
        };

        if let Some(cached) = self.app_relative.get() {
            return Ok(cached.as_deref());
        }

        let app_root = current_root(self.root.as_ref(), path)?;
        let derived = make_app_relative_or_none(path, &app_root);
        Ok(self.app_relative.get_or_init(|| derived).as_deref())
    }

    /// The application-relative string, falling back to the absolute string
    /// for paths outside the root.
    ///
    /// # Errors
    ///
    /// See [`app_relative_or_none`](Self::app_relative_or_none).
    pub fn app_relative(&self) -> Result<&str> {
        match self.app_relative_or_none()? {
            Some(relative) => Ok(relative),
            None => self.absolute(),
        }
    }

    /// The application-relative string if it is known without consulting the
    /// root.
    #[must_use]
    pub fn app_relative_if_available(&self) -> Option<&str> {
        match &self.repr {
            Repr::AppRelative(path) => Some(path.as_str()),
            Repr::Rooted(_) | Repr::Fragment(_) => {
                self.app_relative.get().and_then(|cached| cached.as_deref())
            }
        }
    }

    /// The absolute string if available, otherwise the application-relative
    /// source. Never consults the root.
    #[must_use]
    pub fn whichever_available(&self) -> &str {
        self.absolute_if_available()
            .unwrap_or_else(|| self.repr.as_str())
    }

    /// Whether a conversion to the application-relative form has already
    /// been made (successfully or not).
    #[must_use]
    pub fn app_relative_conversion_attempted(&self) -> bool {
        self.app_relative.get().is_some()
    }

    /// Whether this is a bare relative fragment.
    #[must_use]
    pub fn is_relative(&self) -> bool {
        matches!(self.repr, Repr::Fragment(_))
    }

    /// Whether the absolute string is exactly `/`, as far as it is known.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.absolute_if_available() == Some("/")
    }

    /// Reject bare relative fragments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRelativeTarget`] if this is a fragment.
    pub fn fail_if_relative(&self) -> Result<()> {
        match &self.repr {
            Repr::Fragment(path) => Err(Error::InvalidRelativeTarget {
                path: path.clone(),
                reason: "a relative path is not allowed here".to_string(),
            }),
            Repr::Rooted(_) | Repr::AppRelative(_) => Ok(()),
        }
    }

    /// The containing directory, ending in `/`, or `None` for the root.
    ///
    /// The parent keeps the form of its source where it can: the parent of
    /// `~/a/b` is `~/a/`. The parent of `~` itself is computed from its
    /// absolute form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRelativeTarget`] for fragments, or
    /// [`Error::UnknownApplicationRoot`] when the parent of `~` is requested
    /// and the root is unknown.
    ///
    /// # Examples
    ///
    /// ```
    /// use vpath::app_root::StaticAppRoot;
    /// use vpath::path::VirtualPath;
    ///
    /// let root = StaticAppRoot::new("/").unwrap().shared();
    ///
    /// let path = VirtualPath::create_absolute("/a/b", &root).unwrap();
    /// let parent = path.parent().unwrap().unwrap();
    /// assert_eq!(parent.absolute().unwrap(), "/a/");
    ///
    /// assert!(VirtualPath::root(&root).parent().unwrap().is_none());
    /// ```
    pub fn parent(&self) -> Result<Option<Self>> {
        self.fail_if_relative()?;

        if self.is_root() {
            return Ok(None);
        }

        let mut path = remove_trailing_slash(self.whichever_available());
        if path == "~" {
            path = self.absolute_no_trailing_slash()?;
        }

        match path.rfind('/') {
            // "~" at an application root of "/"
            Some(0) if path.len() == 1 => Ok(None),
            Some(0) => Ok(Some(Self::root(&self.root))),
            Some(index) => Ok(Some(self.derived(path[..=index].to_string()))),
            None => Err(Error::InvalidRelativeTarget {
                path: path.to_string(),
                reason: "path has no parent directory".to_string(),
            }),
        }
    }

    /// Resolve `addition` against this path.
    ///
    /// A rooted or application-relative `addition` displaces the base and is
    /// returned unchanged. A fragment is appended to the directory of this
    /// path and the result is reduced.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRelativeTarget`] if `addition` is a fragment
    /// and this path is one too, plus any error from
    /// [`combine::combine`](crate::path::combine::combine).
    pub fn combine(&self, addition: &Self) -> Result<Self> {
        if !addition.is_relative() {
            return Ok(addition.clone());
        }

        self.fail_if_relative()?;

        let combined = combine::combine(
            self.whichever_available(),
            addition.repr.as_str(),
            self.root.as_ref(),
        )?;
        Ok(self.derived(combined))
    }

    /// Resolve this path against the current application root.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownApplicationRoot`] if the root is unknown, plus
    /// any error from [`combine`](Self::combine).
    ///
    /// # Examples
    ///
    /// ```
    /// use vpath::app_root::StaticAppRoot;
    /// use vpath::path::VirtualPath;
    ///
    /// let root = StaticAppRoot::new("/app/").unwrap().shared();
    /// let page = VirtualPath::create_any("sub/page", &root).unwrap();
    /// assert_eq!(page.combine_with_app_root().unwrap().absolute().unwrap(), "/app/sub/page");
    /// ```
    pub fn combine_with_app_root(&self) -> Result<Self> {
        let app_root = current_root(self.root.as_ref(), self.repr.as_str())?;
        self.derived(app_root).combine(self)
    }

    /// Resolve `addition` against `base`, or against the application root
    /// when there is no base.
    ///
    /// With neither a base nor a known root, `addition` is returned as is
    /// unless it is a fragment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRelativeTarget`] if a fragment has nothing to
    /// be resolved against, plus any error from [`combine`](Self::combine).
    pub fn combine_optional(base: Option<&Self>, addition: &Self) -> Result<Self> {
        if let Some(base) = base {
            return base.combine(addition);
        }

        match addition.root.app_root() {
            Some(app_root) => addition
                .derived(append_slash(&app_root).into_owned())
                .combine(addition),
            None => {
                addition.fail_if_relative()?;
                Ok(addition.clone())
            }
        }
    }

    /// The extension of the last segment, including its dot, or `""`.
    #[must_use]
    pub fn extension(&self) -> &str {
        get_extension(self.whichever_available())
    }

    /// The last segment, ignoring a trailing slash.
    #[must_use]
    pub fn file_name(&self) -> &str {
        get_file_name(remove_trailing_slash(self.whichever_available()))
    }

    /// Resolve to the absolute string for comparison and hashing.
    ///
    /// # Errors
    ///
    /// See [`absolute`](Self::absolute).
    pub fn resolve(&self) -> Result<ResolvedVirtualPath> {
        Ok(ResolvedVirtualPath::new(self.absolute()?.to_string()))
    }

    /// Compare the resolved absolute strings, ignoring case.
    ///
    /// # Errors
    ///
    /// See [`absolute`](Self::absolute).
    ///
    /// # Examples
    ///
    /// ```
    /// use vpath::app_root::StaticAppRoot;
    /// use vpath::path::VirtualPath;
    ///
    /// let root = StaticAppRoot::new("/app/").unwrap().shared();
    /// let a = VirtualPath::create_any("/App/Page", &root).unwrap();
    /// let b = VirtualPath::create_any("~/page", &root).unwrap();
    /// assert!(a.try_eq(&b).unwrap());
    /// ```
    pub fn try_eq(&self, other: &Self) -> Result<bool> {
        Ok(eq_ignore_case(self.absolute()?, other.absolute()?))
    }

    /// Order by the resolved absolute strings, ignoring case.
    ///
    /// # Errors
    ///
    /// See [`absolute`](Self::absolute).
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering> {
        Ok(cmp_ignore_case(self.absolute()?, other.absolute()?))
    }
}

fn require(options: PathOptions, allowed: PathOptions, path: &str) -> Result<()> {
    if options.contains(allowed) {
        Ok(())
    } else {
        Err(Error::DisallowedForm {
            path: path.to_string(),
            form: PathForm::of(path),
        })
    }
}

/// Name the caller's input, not the repaired string, in an ascent error.
fn reported_against(error: Error, input: &str) -> Error {
    match error {
        Error::AscendAboveRoot { .. } => Error::AscendAboveRoot {
            path: input.to_string(),
        },
        other => other,
    }
}

impl fmt::Display for VirtualPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.absolute() {
            Ok(absolute) => f.write_str(absolute),
            Err(_) => f.write_str(self.repr.as_str()),
        }
    }
}

impl fmt::Debug for VirtualPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualPath")
            .field("source", &self.repr.as_str())
            .field("form", &self.form())
            .field("absolute", &self.absolute.get())
            .field("app_relative", &self.app_relative.get())
            .finish_non_exhaustive()
    }
}
