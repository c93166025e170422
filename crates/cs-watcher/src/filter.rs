//! Event filtering.
//!
//! The watcher observes the whole directory that holds the cache file, so
//! the producer's temporary files, editor swap files and unrelated caches
//! all raise events. Filters run on the notify thread and drop those before
//! they reach the channel.
//!
//! ```
//! use camino::Utf8Path;
//! use cs_watcher::{FileFilter, FileNameFilter};
//!
//! let filter = FileNameFilter::new("latest.json");
//! assert!(filter.should_process(Utf8Path::new("/home/me/.cache/codex-shimmer/latest.json")));
//! assert!(!filter.should_process(Utf8Path::new("/home/me/.cache/codex-shimmer/latest.json.tmp")));
//! ```

use camino::Utf8Path;

/// Decides which paths are forwarded to the consumer.
///
/// Filters are called from notify's callback thread, so they must be
/// `Send + Sync + 'static`.
pub trait FileFilter: Send + Sync + 'static {
    /// Returns `true` if an event for `path` should be forwarded.
    fn should_process(&self, path: &Utf8Path) -> bool;
}

/// Forwards events whose final path component is the cache file name.
#[derive(Debug, Clone)]
pub struct FileNameFilter {
    name: String,
}

impl FileNameFilter {
    /// Creates a filter for `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl FileFilter for FileNameFilter {
    fn should_process(&self, path: &Utf8Path) -> bool {
        path.file_name() == Some(self.name.as_str())
    }
}
