//! Error types for the cs-core crate.
//!
//! This module provides two error families:
//!
//! - [`LoadError`] for failures while reading the JSON cache file
//! - [`ConfigError`] for configuration input that cannot be used as given
//!
//! Neither is fatal to the widget. A [`LoadError`] leaves the previously
//! displayed content in place, and a [`ConfigError`] on a single option is
//! logged and replaced by the documented default.

use camino::Utf8PathBuf;

/// Errors that can occur while loading the display cache file.
///
/// All variants are recoverable: the caller keeps showing the content it
/// already has and keeps animating.
///
/// # Examples
///
/// ```
/// use cs_core::LoadError;
///
/// let error = LoadError::WrongShape { found: "array" };
/// assert!(error.to_string().contains("array"));
/// ```
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum LoadError {
    /// The cache file is missing or could not be read.
    #[error("unable to read cache file {path}: {source}")]
    Unreadable {
        /// The path that was read.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The cache file does not contain valid JSON.
    #[error("cache file is not valid JSON: {source}")]
    Malformed {
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The cache file is valid JSON but the root is not an object.
    #[error("cache file root must be a JSON object, found {found}")]
    WrongShape {
        /// Name of the JSON type found at the root.
        found: &'static str,
    },
}

impl LoadError {
    /// Creates a new [`LoadError::Unreadable`] error.
    #[inline]
    pub fn unreadable(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Unreadable {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` if the file could not be read at all.
    ///
    /// A missing cache file is the normal state before the producer writes
    /// it for the first time, so callers usually log this more quietly than
    /// a parse failure.
    #[inline]
    #[must_use]
    pub const fn is_unreadable(&self) -> bool {
        matches!(self, Self::Unreadable { .. })
    }
}

/// Errors that can occur while interpreting configuration input.
///
/// # Examples
///
/// ```
/// use cs_core::ConfigError;
///
/// let error = ConfigError::InvalidOption {
///     option: "period_ms".to_owned(),
///     reason: "expected a number".to_owned(),
/// };
/// assert!(error.to_string().contains("period_ms"));
/// ```
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A configuration option has an invalid value.
    #[error("invalid configuration option '{option}': {reason}")]
    InvalidOption {
        /// The name of the invalid option.
        option: String,
        /// Explanation of why the option is invalid.
        reason: String,
    },

    /// A color string could not be parsed.
    #[error("invalid color '{0}'")]
    InvalidColor(String),

    /// An I/O error occurred while reading configuration.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    /// Creates a new [`ConfigError::InvalidOption`] error.
    #[must_use]
    pub fn invalid_option(option: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            option: option.into(),
            reason: reason.into(),
        }
    }
}
