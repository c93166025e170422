//! Cache file watching for codex-shimmer.
//!
//! The producer process rewrites a small JSON cache file whenever the agent
//! session it follows makes progress. This crate notices those rewrites and
//! hands them to the panel's async event loop as [`CacheEvent`]s.
//!
//! - The *directory* holding the cache is watched, non-recursively, and
//!   events are narrowed to the cache file name by a [`FileFilter`]. A
//!   producer that writes `latest.json.tmp` and renames it into place is
//!   seen as a single [`CacheEventKind::MovedIn`] or [`CacheEventKind::Moved`].
//! - Raw notify events are used without debouncing. Reloading the file is
//!   cheap and the widget coalesces redraws itself.
//! - Events travel over a bounded tokio channel ([`DEFAULT_CHANNEL_CAPACITY`]).
//!
//! # Crate Dependencies
//!
//! ```text
//! cs-cli ──► cs-panel ──► cs-watcher
//! ```
//!
//! # Using with `tokio::select!`
//!
//! ```no_run
//! use camino::Utf8Path;
//! use cs_watcher::CacheWatcher;
//! use tokio::time::{Duration, interval};
//!
//! # async fn example() -> Result<(), cs_watcher::WatchError> {
//! let mut watcher = CacheWatcher::new(Utf8Path::new("./latest.json"))?;
//! let mut tick = interval(Duration::from_millis(33));
//!
//! loop {
//!     tokio::select! {
//!         Some(event) = watcher.recv() => {
//!             if event.triggers_reload() {
//!                 // re-read the cache
//!             }
//!         }
//!         _ = tick.tick() => {
//!             // redraw
//!         }
//!     }
//! }
//! # }
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod error;
pub mod events;
pub mod filter;
pub mod watcher;

pub use error::WatchError;
pub use events::{CacheEvent, CacheEventKind};
pub use filter::{FileFilter, FileNameFilter};
pub use watcher::{CacheWatcher, DEFAULT_CHANNEL_CAPACITY};
