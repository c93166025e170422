//! Cache file change events.
//!
//! notify reports platform-specific event kinds. They are collapsed here
//! into the handful of [`CacheEventKind`]s the widget cares about: did the
//! cache file's content possibly change, or not.
//!
//! ```text
//!  notify::EventKind                         CacheEventKind   reload?
//!  ───────────────────────────────────────  ───────────────  ───────
//!  Modify(Data(_)) / Modify(Any)             Changed          yes
//!  Create(_)                                 Created          yes
//!  Access(Close(Write))                      ChangesDone      yes
//!  Modify(Name(To))                          MovedIn          yes
//!  Modify(Name(Both | Any))                  Moved            yes
//!  Remove(_) / Modify(Name(From))            Removed          no
//!  everything else                           Other            no
//! ```

use std::time::Instant;

use camino::Utf8PathBuf;
use notify::EventKind;
use notify::event::{AccessKind, AccessMode, ModifyKind, RenameMode};

/// What happened to the cache file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheEventKind {
    /// File contents were written.
    Changed,
    /// The file was created.
    Created,
    /// A writer closed the file after writing.
    ChangesDone,
    /// Another file was renamed onto the cache path.
    MovedIn,
    /// A rename involving the cache path whose direction is unknown.
    Moved,
    /// The file was deleted or renamed away.
    Removed,
    /// Metadata, access, or anything else.
    Other,
}

impl CacheEventKind {
    /// Returns `true` if this kind of event means the file should be re-read.
    ///
    /// # Examples
    ///
    /// ```
    /// use cs_watcher::CacheEventKind;
    ///
    /// assert!(CacheEventKind::MovedIn.triggers_reload());
    /// assert!(!CacheEventKind::Removed.triggers_reload());
    /// ```
    #[inline]
    #[must_use]
    pub const fn triggers_reload(self) -> bool {
        matches!(
            self,
            Self::Changed | Self::Created | Self::ChangesDone | Self::MovedIn | Self::Moved
        )
    }
}

impl From<&EventKind> for CacheEventKind {
    fn from(kind: &EventKind) -> Self {
        match kind {
            EventKind::Create(_) => Self::Created,
            EventKind::Modify(ModifyKind::Data(_) | ModifyKind::Any) => Self::Changed,
            EventKind::Modify(ModifyKind::Name(RenameMode::To)) => Self::MovedIn,
            EventKind::Modify(ModifyKind::Name(RenameMode::Both | RenameMode::Any)) => {
                Self::Moved
            }
            EventKind::Modify(ModifyKind::Name(RenameMode::From)) | EventKind::Remove(_) => {
                Self::Removed
            }
            EventKind::Access(AccessKind::Close(AccessMode::Write)) => Self::ChangesDone,
            _ => Self::Other,
        }
    }
}

/// A change to the watched cache file.
///
/// # Examples
///
/// ```
/// use camino::Utf8PathBuf;
/// use cs_watcher::{CacheEvent, CacheEventKind};
///
/// let event = CacheEvent::new(Utf8PathBuf::from("/c/latest.json"), CacheEventKind::Changed);
/// assert!(event.triggers_reload());
/// assert_eq!(event.file_name(), Some("latest.json"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEvent {
    /// Path the event was reported for.
    pub path: Utf8PathBuf,
    /// Normalized event kind.
    pub kind: CacheEventKind,
    /// When the watcher received the event.
    pub timestamp: Instant,
}

impl CacheEvent {
    /// Creates an event stamped with the current instant.
    #[inline]
    #[must_use]
    pub fn new(path: Utf8PathBuf, kind: CacheEventKind) -> Self {
        Self::with_timestamp(path, kind, Instant::now())
    }

    /// Creates an event with an explicit timestamp.
    #[inline]
    #[must_use]
    pub const fn with_timestamp(
        path: Utf8PathBuf,
        kind: CacheEventKind,
        timestamp: Instant,
    ) -> Self {
        Self {
            path,
            kind,
            timestamp,
        }
    }

    /// Shorthand for `self.kind.triggers_reload()`.
    #[inline]
    #[must_use]
    pub const fn triggers_reload(&self) -> bool {
        self.kind.triggers_reload()
    }

    /// Final path component.
    #[inline]
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name()
    }
}
