//! Error types for the vpath library.
//!
//! This module provides the error hierarchy for virtual path construction,
//! normalization and conversion, using `thiserror` for ergonomic error
//! handling.

use std::path::PathBuf;

use thiserror::Error;

use crate::path::PathForm;

/// Result type alias for operations that may fail with a vpath error.
///
/// # Examples
///
/// ```
/// use vpath::{Error, Result};
///
/// fn example_operation() -> Result<&'static str> {
///     Ok("/app/")
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the vpath library.
///
/// Every variant is raised at the point of detection. Expected negative
/// outcomes such as "not under the application root" are reported through
/// `Option` returns instead.
#[derive(Debug, Error)]
pub enum Error {
    /// A blank path was given and null values were not allowed.
    #[error("virtual path is empty")]
    EmptyPath,

    /// The path contains characters or sequences that are never valid.
    #[error("malformed virtual path '{path}': {reason}")]
    MalformedPath {
        /// The offending path.
        path: String,
        /// Why the path is malformed.
        reason: String,
    },

    /// The path is well formed but its form was not permitted.
    #[error("{form} path '{path}' is not allowed here")]
    DisallowedForm {
        /// The offending path.
        path: String,
        /// The form the path was classified as.
        form: PathForm,
    },

    /// A conversion needed the application root but none is known.
    #[error("application root is unknown; cannot resolve '{path}'")]
    UnknownApplicationRoot {
        /// The path that needed the root.
        path: String,
    },

    /// A path cannot take part in a combination or anchoring operation.
    #[error("invalid relative target '{path}': {reason}")]
    InvalidRelativeTarget {
        /// The offending path.
        path: String,
        /// Why the path was rejected.
        reason: String,
    },

    /// A `..` segment would ascend above the topmost segment.
    #[error("cannot ascend above the root in '{path}'")]
    AscendAboveRoot {
        /// The path being reduced.
        path: String,
    },

    /// An operand was missing or unusable for the requested operation.
    #[error("invalid operand: {reason}")]
    InvalidOperand {
        /// What was wrong with the operand.
        reason: String,
    },

    /// A configuration file could not be read.
    #[error("cannot read configuration file {}: {reason}", path.display())]
    ConfigFile {
        /// The configuration file path.
        path: PathBuf,
        /// The underlying failure.
        reason: String,
    },

    /// A configuration value failed validation.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },
}

impl Error {
    /// Check if the error was caused by a missing application root.
    ///
    /// # Examples
    ///
    /// ```
    /// use vpath::Error;
    ///
    /// let err = Error::UnknownApplicationRoot { path: "~/page".into() };
    /// assert!(err.is_root_unknown());
    /// ```
    #[must_use]
    pub fn is_root_unknown(&self) -> bool {
        matches!(self, Self::UnknownApplicationRoot { .. })
    }

    /// Check if the error rejected a path because of its form.
    ///
    /// # Examples
    ///
    /// ```
    /// use vpath::Error;
    /// use vpath::path::PathForm;
    ///
    /// let err = Error::DisallowedForm { path: "sub/page".into(), form: PathForm::Relative };
    /// assert!(err.is_disallowed_form());
    /// ```
    #[must_use]
    pub fn is_disallowed_form(&self) -> bool {
        matches!(self, Self::DisallowedForm { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_path_error() {
        let display = format!("{}", Error::EmptyPath);
        assert!(display.contains("empty"));
    }

    #[test]
    fn test_malformed_path_error() {
        let err = Error::MalformedPath {
            path: "/a\\b".to_string(),
            reason: "contains backslashes".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("malformed"));
        assert!(display.contains("/a\\b"));
        assert!(display.contains("backslashes"));
    }

    #[test]
    fn test_disallowed_form_error() {
        let err = Error::DisallowedForm {
            path: "~/page".to_string(),
            form: PathForm::AppRelative,
        };
        let display = format!("{err}");
        assert!(display.contains("app-relative"));
        assert!(display.contains("~/page"));
        assert!(err.is_disallowed_form());
        assert!(!err.is_root_unknown());
    }

    #[test]
    fn test_unknown_root_error() {
        let err = Error::UnknownApplicationRoot {
            path: "~/page".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("application root is unknown"));
        assert!(err.is_root_unknown());
    }

    #[test]
    fn test_ascend_above_root_error() {
        let err = Error::AscendAboveRoot {
            path: "/a/../..".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("ascend above the root"));
        assert!(display.contains("/a/../.."));
    }

    #[test]
    fn test_config_file_error() {
        let err = Error::ConfigFile {
            path: PathBuf::from("/etc/vpath.yaml"),
            reason: "permission denied".to_string(),
        };
        let display = format!("{err}").replace(std::path::MAIN_SEPARATOR, "/");
        assert!(display.contains("/etc/vpath.yaml"));
        assert!(display.contains("permission denied"));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<()> {
            Err(Error::InvalidOperand {
                reason: "test".to_string(),
            })
        }

        assert!(returns_result().is_err());
    }
}
