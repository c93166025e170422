//! Cache file watcher with async event streaming.
//!
//! [`CacheWatcher`] bridges notify's callback thread to the tokio event loop.
//! It watches the directory that holds the cache file rather than the file
//! itself, so a producer that writes a temporary file and renames it over
//! the cache keeps being observed.
//!
//! ```text
//! ┌───────────────────────────── notify thread ─────────────────────────────┐
//! │  RecommendedWatcher (parent dir, non-recursive)                         │
//! │        │ notify::Event                                                  │
//! │        ▼                                                                │
//! │  map kind ──► FileFilter (cache file name) ──► blocking_send            │
//! └──────────────────────────────────────────────────────────┬──────────────┘
//!                                                            │ mpsc (100)
//! ┌──────────────────────────── tokio runtime ───────────────▼──────────────┐
//! │  CacheWatcher::recv() ──► panel event loop                              │
//! │  spawn_blocking task owns the watcher until the oneshot fires           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use camino::Utf8Path;
//! use cs_watcher::CacheWatcher;
//!
//! # async fn example() -> Result<(), cs_watcher::WatchError> {
//! let cache = Utf8Path::new("/home/me/.cache/codex-shimmer/latest.json");
//! let mut watcher = CacheWatcher::new(cache)?;
//! while let Some(event) = watcher.recv().await {
//!     if event.triggers_reload() {
//!         println!("cache changed: {:?}", event.kind);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use notify::{RecursiveMode, Watcher};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

use crate::error::WatchError;
use crate::events::{CacheEvent, CacheEventKind};
use crate::filter::{FileFilter, FileNameFilter};

/// Default capacity of the event channel.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 100;

/// Watches a single cache file and streams its change events.
///
/// # Lifecycle
///
/// 1. [`CacheWatcher::new`] registers the OS watch synchronously, so a
///    missing directory is reported to the caller immediately.
/// 2. Events arrive through [`recv`](Self::recv), which is cancel-safe
///    inside `tokio::select!`.
/// 3. [`shutdown`](Self::shutdown) stops and joins the watcher task. Dropping
///    the watcher only signals it.
///
/// Must be created from within a tokio runtime.
pub struct CacheWatcher {
    shutdown_tx: Option<oneshot::Sender<()>>,
    task_handle: Option<JoinHandle<()>>,
    event_rx: mpsc::Receiver<CacheEvent>,
    cache_path: Utf8PathBuf,
    watch_dir: Utf8PathBuf,
}

impl std::fmt::Debug for CacheWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheWatcher")
            .field("cache_path", &self.cache_path)
            .field("watch_dir", &self.watch_dir)
            .field("is_running", &self.is_running())
            .finish_non_exhaustive()
    }
}

impl CacheWatcher {
    /// Starts watching `cache_path`.
    ///
    /// The file itself need not exist yet; its directory must.
    ///
    /// # Errors
    ///
    /// - [`WatchError::NotAFile`] if `cache_path` has no file name.
    /// - [`WatchError::PathNotFound`] if the parent directory is missing.
    /// - [`WatchError::Notify`] if the OS watch cannot be registered.
    pub fn new(cache_path: &Utf8Path) -> Result<Self, WatchError> {
        Self::with_capacity(cache_path, DEFAULT_CHANNEL_CAPACITY)
    }

    /// Like [`new`](Self::new) with a custom channel capacity.
    pub fn with_capacity(
        cache_path: &Utf8Path,
        channel_capacity: usize,
    ) -> Result<Self, WatchError> {
        let name = cache_path
            .file_name()
            .ok_or_else(|| WatchError::NotAFile(cache_path.to_owned()))?;
        Self::with_filter(cache_path, FileNameFilter::new(name), channel_capacity)
    }

    /// Watches the directory holding `cache_path`, forwarding events that
    /// pass `filter`.
    pub fn with_filter<F: FileFilter>(
        cache_path: &Utf8Path,
        filter: F,
        channel_capacity: usize,
    ) -> Result<Self, WatchError> {
        let dir = parent_dir(cache_path);
        if !dir.is_dir() {
            return Err(WatchError::path_not_found(dir));
        }
        let watch_dir = dir.canonicalize_utf8()?;

        let (event_tx, event_rx) = mpsc::channel(channel_capacity.max(1));
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
            forward_event(res, &filter, &event_tx);
        })?;
        watcher.watch(watch_dir.as_std_path(), RecursiveMode::NonRecursive)?;
        info!(path = %cache_path, dir = %watch_dir, "cache watcher started");

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let task_dir = watch_dir.clone();
        let task_handle = tokio::task::spawn_blocking(move || {
            // The watch lives exactly as long as this task.
            let _ = shutdown_rx.blocking_recv();
            drop(watcher);
            info!(dir = %task_dir, "cache watcher stopped");
        });

        Ok(Self {
            shutdown_tx: Some(shutdown_tx),
            task_handle: Some(task_handle),
            event_rx,
            cache_path: cache_path.to_owned(),
            watch_dir,
        })
    }

    /// Receives the next event, or `None` once the watcher has stopped.
    pub async fn recv(&mut self) -> Option<CacheEvent> {
        self.event_rx.recv().await
    }

    /// The cache file being watched.
    #[must_use]
    pub fn cache_path(&self) -> &Utf8Path {
        &self.cache_path
    }

    /// The canonical directory the OS watch is registered on.
    #[must_use]
    pub fn watch_dir(&self) -> &Utf8Path {
        &self.watch_dir
    }

    /// Returns `true` until shutdown is signalled or the task ends.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.shutdown_tx.is_some() && self.task_handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stops the watcher and waits for its task to finish.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::ChannelClosed`] if the task panicked.
    pub async fn shutdown(mut self) -> Result<(), WatchError> {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.task_handle.take() {
            handle.await.map_err(|_join_error| WatchError::ChannelClosed)?;
        }
        Ok(())
    }
}

impl Drop for CacheWatcher {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Directory holding `cache_path`; `.` for a bare file name.
fn parent_dir(cache_path: &Utf8Path) -> &Utf8Path {
    match cache_path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    }
}

/// Runs on notify's thread: maps, filters and forwards one raw event.
fn forward_event<F: FileFilter>(
    res: notify::Result<notify::Event>,
    filter: &F,
    tx: &mpsc::Sender<CacheEvent>,
) {
    let event = match res {
        Ok(event) => event,
        Err(error) => {
            warn!(error = %error, "cache watcher error");
            return;
        }
    };

    let kind = CacheEventKind::from(&event.kind);
    for path in event.paths {
        let path = match Utf8PathBuf::try_from(path) {
            Ok(path) => path,
            Err(e) => {
                let error = WatchError::non_utf8_path(e.into_path_buf());
                warn!(error = %error, "skipping cache event");
                continue;
            }
        };

        if !filter.should_process(&path) {
            trace!(path = %path, "filtered out event");
            continue;
        }

        debug!(path = %path, kind = ?kind, "cache file event");
        if tx.blocking_send(CacheEvent::new(path, kind)).is_err() {
            debug!("event channel closed, dropping cache events");
            return;
        }
    }
}
