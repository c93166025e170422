//! Display content parsed from the cache file.
//!
//! - [`DisplayContent`] - text, tooltip and tags shown by the widget
//! - [`TagSet`] - insertion-ordered set of style tags
//! - [`TagDiff`] - the tags to add and remove when the set changes

use rustc_hash::FxHashSet;
use serde::Serialize;
use smallvec::SmallVec;

/// Text shown while the cache file has no `text` member.
pub const PLACEHOLDER_TEXT: &str = "Waiting for Codex…";

/// The content displayed by the widget.
///
/// Replaced as a whole on every successful reload; never mutated in place.
///
/// # Examples
///
/// ```
/// use cs_core::{DisplayContent, PLACEHOLDER_TEXT};
///
/// let content = DisplayContent::default();
/// assert_eq!(content.text(), PLACEHOLDER_TEXT);
/// assert!(content.tooltip().is_none());
/// assert!(content.tags().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayContent {
    text: String,
    tooltip: Option<String>,
    tags: TagSet,
}

impl Default for DisplayContent {
    fn default() -> Self {
        Self::new(None, None, TagSet::new())
    }
}

impl DisplayContent {
    /// Creates content, substituting [`PLACEHOLDER_TEXT`] for a missing text.
    #[must_use]
    pub fn new(text: Option<String>, tooltip: Option<String>, tags: TagSet) -> Self {
        Self {
            text: text.unwrap_or_else(|| PLACEHOLDER_TEXT.to_owned()),
            tooltip,
            tags,
        }
    }

    /// The label text. Never absent.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The tooltip, if any.
    #[must_use]
    pub fn tooltip(&self) -> Option<&str> {
        self.tooltip.as_deref()
    }

    /// The style tags.
    #[must_use]
    pub const fn tags(&self) -> &TagSet {
        &self.tags
    }

    /// Returns `true` if the text is the placeholder.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.text == PLACEHOLDER_TEXT
    }
}

/// An insertion-ordered set of style tags.
///
/// Most cache files carry zero to a handful of tags, so the set is stored
/// inline in a [`SmallVec`].
///
/// # Examples
///
/// ```
/// use cs_core::TagSet;
///
/// let tags: TagSet = ["busy", "thinking", "busy"].into_iter().collect();
/// assert_eq!(tags.len(), 2);
/// assert!(tags.contains("thinking"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TagSet {
    tags: SmallVec<[String; 4]>,
}

impl TagSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a tag, returning `false` if it was already present.
    pub fn insert(&mut self, tag: impl Into<String>) -> bool {
        let tag = tag.into();
        if self.contains(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    /// Removes a tag, returning `true` if it was present.
    pub fn remove(&mut self, tag: &str) -> bool {
        let Some(index) = self.tags.iter().position(|t| t == tag) else {
            return false;
        };
        self.tags.remove(index);
        true
    }

    /// Returns `true` if the tag is present.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Number of tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Returns `true` if there are no tags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Iterates over the tags in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// Applies a diff, removing first and then adding.
    pub fn apply(&mut self, diff: &TagDiff) {
        for tag in &diff.to_remove {
            self.remove(tag);
        }
        for tag in &diff.to_add {
            self.insert(tag.as_str());
        }
    }
}

impl<S: Into<String>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}

/// The change needed to turn one [`TagSet`] into another.
///
/// Applying a diff computed by [`TagDiff::between`] to the old set yields a
/// set with exactly the tags of the new one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagDiff {
    /// Tags present only in the new set, in the new set's order.
    pub to_add: Vec<String>,
    /// Tags present only in the old set, in the old set's order.
    pub to_remove: Vec<String>,
}

impl TagDiff {
    /// Computes the set difference between `old` and `new`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cs_core::{TagDiff, TagSet};
    ///
    /// let old: TagSet = ["busy"].into_iter().collect();
    /// let new: TagSet = ["a", "b"].into_iter().collect();
    /// let diff = TagDiff::between(&old, &new);
    /// assert_eq!(diff.to_remove, vec!["busy"]);
    /// assert_eq!(diff.to_add, vec!["a", "b"]);
    /// ```
    #[must_use]
    pub fn between(old: &TagSet, new: &TagSet) -> Self {
        let old_lookup: FxHashSet<&str> = old.iter().collect();
        let new_lookup: FxHashSet<&str> = new.iter().collect();

        Self {
            to_add: new
                .iter()
                .filter(|tag| !old_lookup.contains(tag))
                .map(str::to_owned)
                .collect(),
            to_remove: old
                .iter()
                .filter(|tag| !new_lookup.contains(tag))
                .map(str::to_owned)
                .collect(),
        }
    }

    /// Returns `true` if the diff changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}
