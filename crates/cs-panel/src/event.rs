//! Events consumed by the host loop.
//!
//! Terminal input and the redraw clock arrive through [`Tui`](crate::Tui);
//! cache changes arrive straight from the [`CacheWatcher`](cs_watcher::CacheWatcher)
//! and are wrapped here so the loop handles a single type.

use crossterm::event::KeyEvent;
use cs_watcher::CacheEvent;

/// Everything the host loop reacts to.
#[derive(Debug)]
#[non_exhaustive]
pub enum Event {
    /// A key press.
    Key(KeyEvent),

    /// The terminal was resized.
    Resize {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },

    /// The cache file changed.
    CacheChanged(CacheEvent),

    /// Animation tick; fires every `tick_ms`.
    Tick,

    /// Focus gained by the terminal window.
    FocusGained,

    /// Focus lost by the terminal window.
    FocusLost,
}

impl Event {
    /// Returns `true` if this is a key event.
    #[inline]
    #[must_use]
    pub const fn is_key(&self) -> bool {
        matches!(self, Self::Key(_))
    }

    /// Returns `true` if this is a tick.
    #[inline]
    #[must_use]
    pub const fn is_tick(&self) -> bool {
        matches!(self, Self::Tick)
    }

    /// The cache event, if this is one.
    #[inline]
    #[must_use]
    pub const fn as_cache_event(&self) -> Option<&CacheEvent> {
        match self {
            Self::CacheChanged(event) => Some(event),
            _ => None,
        }
    }
}
