//! Cache store holding the currently displayed content.
//!
//! The store owns the latest [`DisplayContent`] together with its derived
//! measurement. Content is swapped as a whole; the old extent is discarded
//! at the same moment so a reader never pairs new text with a stale size.

use crate::content::{DisplayContent, TagDiff};

/// Measured size of a text run in device pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Extent {
    /// Horizontal advance of the run.
    pub width: f64,
    /// Line height of the run.
    pub height: f64,
}

impl Extent {
    /// Creates a new extent.
    #[inline]
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Holds the displayed content and its measured extent.
///
/// # Examples
///
/// ```
/// use cs_core::{CacheStore, DisplayContent, Extent, TagSet};
///
/// let mut store = CacheStore::new();
/// store.set_extent(Extent::new(120.0, 18.0));
///
/// let busy: TagSet = ["busy"].into_iter().collect();
/// let diff = store.replace(DisplayContent::new(Some("Hello".into()), None, busy));
///
/// assert_eq!(store.content().text(), "Hello");
/// assert_eq!(diff.to_add, vec!["busy"]);
/// assert!(store.extent().is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CacheStore {
    content: DisplayContent,
    extent: Option<Extent>,
    generation: u64,
}

impl CacheStore {
    /// Creates a store showing the placeholder content.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current content.
    #[must_use]
    pub const fn content(&self) -> &DisplayContent {
        &self.content
    }

    /// The measured extent of the current text, if it has been measured.
    #[must_use]
    pub const fn extent(&self) -> Option<Extent> {
        self.extent
    }

    /// Records the measured extent of the current text.
    pub fn set_extent(&mut self, extent: Extent) {
        self.extent = Some(extent);
    }

    /// Number of successful replacements since creation.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Replaces the content and invalidates the extent.
    ///
    /// Returns the tag changes the host must apply to the widget.
    pub fn replace(&mut self, content: DisplayContent) -> TagDiff {
        let diff = TagDiff::between(self.content.tags(), content.tags());
        self.content = content;
        self.extent = None;
        self.generation += 1;
        diff
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::TagSet;

    fn content(text: &str, tags: &[&str]) -> DisplayContent {
        DisplayContent::new(
            Some(text.to_owned()),
            None,
            tags.iter().copied().collect::<TagSet>(),
        )
    }

    #[test]
    fn test_new_store_shows_placeholder() {
        let store = CacheStore::new();
        assert!(store.content().is_placeholder());
        assert_eq!(store.generation(), 0);
        assert!(store.extent().is_none());
    }

    #[test]
    fn test_replace_reports_tag_diff() {
        let mut store = CacheStore::new();

        let first = store.replace(content("a", &["busy"]));
        assert_eq!(first.to_add, vec!["busy"]);
        assert!(first.to_remove.is_empty());

        let second = store.replace(content("b", &["a", "b"]));
        assert_eq!(second.to_add, vec!["a", "b"]);
        assert_eq!(second.to_remove, vec!["busy"]);
        assert_eq!(store.generation(), 2);
    }

    #[test]
    fn test_replace_invalidates_extent() {
        let mut store = CacheStore::new();
        store.set_extent(Extent::new(10.0, 5.0));
        store.replace(content("longer text", &[]));
        assert!(store.extent().is_none());
    }
}
