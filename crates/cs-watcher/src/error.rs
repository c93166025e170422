//! Error types for arming and running the cache watcher.

use camino::Utf8PathBuf;

/// Errors raised while arming or running a [`CacheWatcher`](crate::CacheWatcher).
///
/// None of these stop the widget. A watcher that cannot be armed leaves the
/// widget showing whatever it loaded last. Recoverable errors are expected
/// to clear up on their own, so a later refresh can arm the watcher.
///
/// | Variant | Recoverable |
/// |---|---|
/// | [`Notify`](Self::Notify) | no |
/// | [`PathNotFound`](Self::PathNotFound) | yes, once the producer creates it |
/// | [`NotAFile`](Self::NotAFile) | no |
/// | [`ChannelClosed`](Self::ChannelClosed) | no |
/// | [`NonUtf8Path`](Self::NonUtf8Path) | yes, the event is skipped |
/// | [`Io`](Self::Io) | no |
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum WatchError {
    /// The OS watch could not be created or registered.
    #[error("notify watcher error: {0}")]
    Notify(#[from] notify::Error),

    /// The directory holding the cache file does not exist.
    #[error("cache directory does not exist: {0}")]
    PathNotFound(Utf8PathBuf),

    /// The cache path has no file name component.
    #[error("cache path does not name a file: {0}")]
    NotAFile(Utf8PathBuf),

    /// The watcher task went away before it could be joined.
    #[error("watcher channel closed unexpectedly")]
    ChannelClosed,

    /// An event carried a path that is not valid UTF-8.
    #[error("path is not valid UTF-8: {}", _0.display())]
    NonUtf8Path(std::path::PathBuf),

    /// Resolving the cache directory failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl WatchError {
    /// Creates a [`WatchError::PathNotFound`].
    #[inline]
    pub fn path_not_found(path: impl Into<Utf8PathBuf>) -> Self {
        Self::PathNotFound(path.into())
    }

    /// Creates a [`WatchError::NonUtf8Path`].
    #[inline]
    pub fn non_utf8_path(path: impl Into<std::path::PathBuf>) -> Self {
        Self::NonUtf8Path(path.into())
    }

    /// Returns `true` if a later attempt can succeed without user action.
    #[inline]
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::PathNotFound(_) | Self::NonUtf8Path(_))
    }

    /// Returns `true` if retrying will fail the same way.
    #[inline]
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !self.is_recoverable()
    }

    /// The path this error is about, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Utf8PathBuf> {
        match self {
            Self::PathNotFound(path) | Self::NotAFile(path) => Some(path),
            Self::Notify(_) | Self::ChannelClosed | Self::NonUtf8Path(_) | Self::Io(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_missing_cache_dir() {
        let err = WatchError::path_not_found("/home/me/.cache/codex-shimmer");
        assert!(err.is_recoverable());
        assert!(!err.is_fatal());
        assert_eq!(
            err.path().map(|p| p.as_str()),
            Some("/home/me/.cache/codex-shimmer")
        );
        assert_snapshot!(err, @"cache directory does not exist: /home/me/.cache/codex-shimmer");
    }

    #[test]
    fn test_not_a_file() {
        let err = WatchError::NotAFile(Utf8PathBuf::from("/"));
        assert!(err.is_fatal());
        assert_eq!(err.path().map(|p| p.as_str()), Some("/"));
        assert_snapshot!(err, @"cache path does not name a file: /");
    }

    #[test]
    fn test_non_utf8_is_recoverable() {
        let err = WatchError::non_utf8_path(PathBuf::from("latest.json"));
        assert!(err.is_recoverable());
        assert!(err.path().is_none());
    }

    #[test]
    fn test_channel_closed_and_io_are_fatal() {
        assert!(WatchError::ChannelClosed.is_fatal());
        let io = WatchError::from(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        assert!(io.is_fatal());
        assert_snapshot!(io, @"I/O error: denied");
    }
}
