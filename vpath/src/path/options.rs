//! Construction options for virtual paths.

use bitflags::bitflags;

bitflags! {
    /// Options accepted by [`VirtualPath::create`](crate::path::VirtualPath::create).
    ///
    /// The `ALLOW_*_PATH` flags decide which path forms a factory accepts;
    /// the remaining flags tune how input is normalized.
    ///
    /// # Examples
    ///
    /// ```
    /// use vpath::path::PathOptions;
    ///
    /// let options = PathOptions::ALLOW_ABSOLUTE_PATH | PathOptions::ENSURE_TRAILING_SLASH;
    /// assert!(options.contains(PathOptions::ALLOW_ABSOLUTE_PATH));
    /// assert!(!options.contains(PathOptions::ALLOW_NULL));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[repr(transparent)]
    pub struct PathOptions: u32 {
        /// Blank input yields no value instead of an error.
        const ALLOW_NULL              = 0b0000_0001;

        /// Append `/` after normalization if the path lacks one.
        const ENSURE_TRAILING_SLASH   = 0b0000_0010;

        /// Accept rooted paths such as `/app/page`.
        const ALLOW_ABSOLUTE_PATH     = 0b0000_0100;

        /// Accept application-relative paths such as `~/page`.
        const ALLOW_APP_RELATIVE_PATH = 0b0000_1000;

        /// Accept bare relative fragments such as `sub/page`.
        const ALLOW_RELATIVE_PATH     = 0b0001_0000;

        /// Reject backslashes and duplicate slashes instead of fixing them.
        const FAIL_IF_MALFORMED       = 0b0010_0000;

        /// Accept every path form.
        const ALLOW_ALL_PATH = Self::ALLOW_ABSOLUTE_PATH.bits()
            | Self::ALLOW_APP_RELATIVE_PATH.bits()
            | Self::ALLOW_RELATIVE_PATH.bits();

        /// Accept rooted and application-relative paths, but not fragments.
        const ALLOW_NON_RELATIVE_PATH = Self::ALLOW_ABSOLUTE_PATH.bits()
            | Self::ALLOW_APP_RELATIVE_PATH.bits();
    }
}
