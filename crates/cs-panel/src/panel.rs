//! Host lifecycle around a [`ShimmerWidget`].
//!
//! [`Panel`] pairs the widget with the watcher on its cache directory and
//! exposes the entry points a panel host calls: initialize, teardown,
//! redraw notification, refresh, and named actions.

use std::time::Instant;

use camino::Utf8PathBuf;
use cs_core::ShimmerConfig;
use cs_render::{RenderPlan, TextMeasure};
use cs_watcher::{CacheEvent, CacheWatcher};
use tracing::{debug, info, warn};

use crate::action::RELOAD_ACTION;
use crate::error::PanelError;
use crate::widget::{ReloadOutcome, ShimmerWidget};

/// A shimmer widget hosted in a panel.
#[derive(Debug)]
pub struct Panel<M> {
    widget: ShimmerWidget<M>,
    watcher: Option<CacheWatcher>,
}

impl<M: TextMeasure> Panel<M> {
    /// Starts watching the cache directory, then loads the cache once.
    ///
    /// The watch is armed first so a write landing during the initial load
    /// still produces an event. Never fails: a missing or invalid cache file
    /// leaves the placeholder showing, and a watcher that cannot be armed is
    /// retried on the next [`refresh`](Self::refresh). Must be called inside
    /// a tokio runtime.
    pub fn initialize(config: ShimmerConfig, measure: M) -> Self {
        let now = Instant::now();
        let mut panel = Self {
            widget: ShimmerWidget::new(config, measure, now),
            watcher: None,
        };
        panel.arm_watcher();

        // Load errors are logged by the widget; the placeholder stays.
        panel.widget.reload(now).ok();
        info!(path = %panel.widget.config().cache_path(), "panel initialized");
        panel
    }

    /// Stops the watcher and drops the widget.
    pub async fn teardown(mut self) -> Result<(), PanelError> {
        debug!("tearing down panel");
        if let Some(watcher) = self.watcher.take() {
            watcher.shutdown().await?;
        }
        Ok(())
    }

    /// The host's allocation changed or a frame was lost; ask for a new one.
    pub fn notify_redraw(&mut self) {
        self.widget.request_redraw();
    }

    /// Reloads the cache and re-arms the watcher if it is not running.
    pub fn refresh(&mut self) -> Option<ReloadOutcome> {
        let outcome = self.widget.reload(Instant::now()).ok();
        if !self.is_watching() {
            self.arm_watcher();
        }
        outcome
    }

    /// Invokes a named action. Returns `false` for unknown names.
    pub fn invoke_action(&mut self, name: &str) -> bool {
        if name == RELOAD_ACTION {
            self.refresh();
            true
        } else {
            debug!(action = name, "ignoring unknown action");
            false
        }
    }

    /// Routes a watcher event to the widget.
    pub fn handle_cache_event(&mut self, event: &CacheEvent) -> Option<ReloadOutcome> {
        self.widget
            .on_file_event(event, Instant::now())
            .and_then(Result::ok)
    }

    /// Advances the animation.
    pub fn tick(&mut self) {
        self.widget.on_tick(Instant::now());
    }

    /// Renders the current frame for a label `allotted_height` pixels tall.
    pub fn paint(&mut self, allotted_height: f64) -> RenderPlan {
        self.widget.on_paint_request(Instant::now(), allotted_height)
    }

    /// The hosted widget.
    pub const fn widget(&self) -> &ShimmerWidget<M> {
        &self.widget
    }

    /// The hosted widget, mutably.
    pub const fn widget_mut(&mut self) -> &mut ShimmerWidget<M> {
        &mut self.widget
    }

    /// The cache watcher, if armed.
    pub const fn watcher_mut(&mut self) -> Option<&mut CacheWatcher> {
        self.watcher.as_mut()
    }

    /// Returns `true` if the cache directory is being watched.
    pub fn is_watching(&self) -> bool {
        self.watcher.as_ref().is_some_and(CacheWatcher::is_running)
    }

    /// Drops a watcher whose event stream ended.
    pub fn disarm_watcher(&mut self) {
        if self.watcher.take().is_some() {
            warn!("cache watcher stopped; press reload to re-arm");
        }
    }

    fn arm_watcher(&mut self) {
        let path = self.widget.config().cache_path();
        match CacheWatcher::new(path) {
            Ok(watcher) => {
                debug!(dir = %watcher.watch_dir(), "watching cache directory");
                self.watcher = Some(watcher);
            }
            Err(err) => {
                let target = err.path().map_or(path.as_path(), Utf8PathBuf::as_path);
                if err.is_fatal() {
                    warn!(path = %target, error = %err, "cannot watch cache directory");
                } else {
                    info!(
                        path = %target,
                        error = %err,
                        "cache directory not watchable yet; refresh will retry"
                    );
                }
                self.watcher = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::Duration;

    use cs_core::{ConfigEntry, Extent, PLACEHOLDER_TEXT};
    use cs_render::FontWeight;
    use tempfile::TempDir;

    use super::*;

    type Measure = fn(&str, FontWeight) -> Extent;

    fn eight_px_glyphs(text: &str, _weight: FontWeight) -> Extent {
        #[allow(clippy::cast_precision_loss)]
        let glyphs = text.chars().count() as f64;
        Extent::new(glyphs * 8.0, 16.0)
    }

    fn config_for(cache: &Utf8PathBuf) -> ShimmerConfig {
        ShimmerConfig::from_entries(&[ConfigEntry::new(
            "cache_path",
            format!("\"{cache}\""),
        )])
    }

    fn setup() -> (TempDir, Utf8PathBuf) {
        let dir = TempDir::new().unwrap();
        let cache = Utf8PathBuf::from_path_buf(dir.path().join("latest.json")).unwrap();
        (dir, cache)
    }

    #[tokio::test]
    async fn test_initialize_loads_and_watches() {
        let (_dir, cache) = setup();
        fs::write(&cache, r#"{"text":"Ready","tooltip":"idle"}"#).unwrap();

        let panel = Panel::initialize(config_for(&cache), eight_px_glyphs as Measure);

        assert_eq!(panel.widget().content().text(), "Ready");
        assert_eq!(panel.widget().tooltip(), Some("idle"));
        assert!(panel.is_watching());
        panel.teardown().await.unwrap();
    }

    #[tokio::test]
    async fn test_initialize_without_directory_never_fails() {
        let (dir, _) = setup();
        let cache = Utf8PathBuf::from_path_buf(dir.path().join("missing/latest.json")).unwrap();

        let mut panel = Panel::initialize(config_for(&cache), eight_px_glyphs as Measure);

        assert_eq!(panel.widget().content().text(), PLACEHOLDER_TEXT);
        assert!(!panel.is_watching());

        // Once the directory exists, refresh arms the watcher.
        fs::create_dir(dir.path().join("missing")).unwrap();
        fs::write(&cache, r#"{"text":"Late"}"#).unwrap();
        assert!(panel.refresh().is_some());
        assert_eq!(panel.widget().content().text(), "Late");
        assert!(panel.is_watching());
        panel.teardown().await.unwrap();
    }

    #[tokio::test]
    async fn test_invoke_action() {
        let (_dir, cache) = setup();
        let mut panel = Panel::initialize(config_for(&cache), eight_px_glyphs as Measure);

        fs::write(&cache, r#"{"text":"Manual"}"#).unwrap();
        assert!(!panel.invoke_action("explode"));
        assert_eq!(panel.widget().content().text(), PLACEHOLDER_TEXT);

        assert!(panel.invoke_action("reload"));
        assert_eq!(panel.widget().content().text(), "Manual");
        panel.teardown().await.unwrap();
    }

    #[tokio::test]
    async fn test_watcher_event_reloads() {
        let (_dir, cache) = setup();
        let mut panel = Panel::initialize(config_for(&cache), eight_px_glyphs as Measure);

        fs::write(&cache, r#"{"text":"Watched","class":"busy"}"#).unwrap();

        tokio::time::timeout(Duration::from_secs(5), async {
            while panel.widget().content().text() != "Watched" {
                let event = panel.watcher_mut().unwrap().recv().await.unwrap();
                panel.handle_cache_event(&event);
            }
        })
        .await
        .unwrap();

        assert!(panel.widget().tags().contains("busy"));
        panel.teardown().await.unwrap();
    }

    #[tokio::test]
    async fn test_rename_into_place_reloads_and_resets_clock() {
        let (dir, cache) = setup();
        fs::write(&cache, r#"{"text":"Before"}"#).unwrap();
        let mut panel = Panel::initialize(config_for(&cache), eight_px_glyphs as Measure);
        assert_eq!(panel.widget().content().text(), "Before");

        let staging = dir.path().join("latest.json.tmp");
        fs::write(&staging, r#"{"text":"After rename"}"#).unwrap();
        let before = Instant::now();
        fs::rename(&staging, &cache).unwrap();

        tokio::time::timeout(Duration::from_secs(5), async {
            while panel.widget().content().text() != "After rename" {
                let event = panel.watcher_mut().unwrap().recv().await.unwrap();
                panel.handle_cache_event(&event);
            }
        })
        .await
        .unwrap();

        // The reload reset the epoch to a moment after `before`.
        assert!(panel.widget().elapsed_ms(before).abs() < f64::EPSILON);
        assert!(panel.widget().is_redraw_pending());
        panel.teardown().await.unwrap();
    }

    #[tokio::test]
    async fn test_notify_redraw_and_paint() {
        let (_dir, cache) = setup();
        let mut panel = Panel::initialize(config_for(&cache), eight_px_glyphs as Measure);

        let plan = panel.paint(32.0);
        assert!(plan.is_handled());
        assert!(!panel.widget().is_redraw_pending());

        panel.notify_redraw();
        assert!(panel.widget().is_redraw_pending());
        panel.teardown().await.unwrap();
    }
}
