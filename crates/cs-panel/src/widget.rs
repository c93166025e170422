//! The reactive widget core.
//!
//! [`ShimmerWidget`] owns everything one shimmer label needs between frames:
//! configuration, the current cache content, the animation clock, the
//! renderer and its layout cache, and the state last pushed to the host
//! (tags, tooltip, size request). It has no I/O of its own beyond reading
//! the cache file on reload, and every entry point takes `now` explicitly,
//! so a host or a test drives it completely.
//!
//! ```text
//!  on_file_event ──► reload ──► CacheStore::replace ──► re-measure ──► size request
//!                                      │                      │
//!                                      ▼                      ▼
//!                               TagDiff, tooltip        clock.reset(now)
//!
//!  on_tick ──► redraw pending ──► on_paint_request ──► RenderPlan
//! ```

use std::time::{Duration, Instant};

use cs_core::{
    AnimationClock, CacheStore, DisplayContent, LoadError, ShimmerConfig, TagDiff, TagSet, loader,
};
use cs_render::{RenderPlan, ShimmerRenderer, SizeRequest, TextMeasure};
use cs_watcher::CacheEvent;
use tracing::{debug, info, warn};

/// What a successful reload changed, for the host to apply.
#[derive(Debug, Clone, PartialEq)]
pub struct ReloadOutcome {
    /// Tags to add to and remove from the widget.
    pub tags: TagDiff,
    /// The new tooltip, or `None` to clear it.
    pub tooltip: Option<String>,
    /// The new preferred size.
    pub size_request: SizeRequest,
}

/// A shimmer label bound to a cache file.
#[derive(Debug)]
pub struct ShimmerWidget<M> {
    config: ShimmerConfig,
    store: CacheStore,
    clock: AnimationClock,
    renderer: ShimmerRenderer<M>,
    applied_tags: TagSet,
    tooltip: Option<String>,
    size_request: SizeRequest,
    redraw_pending: bool,
}

impl<M: TextMeasure> ShimmerWidget<M> {
    /// Creates a widget showing the placeholder, with its epoch at `now`.
    ///
    /// Nothing is read from disk; call [`reload`](Self::reload) for that.
    pub fn new(config: ShimmerConfig, measure: M, now: Instant) -> Self {
        let clock = AnimationClock::new(now, config.tick_ms());
        let mut store = CacheStore::new();
        let mut renderer = ShimmerRenderer::new(measure);

        let extent = renderer.layout(store.content().text());
        store.set_extent(extent);

        Self {
            config,
            store,
            clock,
            renderer,
            applied_tags: TagSet::new(),
            tooltip: None,
            size_request: SizeRequest::for_extent(extent),
            redraw_pending: true,
        }
    }

    /// The widget's configuration.
    pub const fn config(&self) -> &ShimmerConfig {
        &self.config
    }

    /// The content currently displayed.
    pub const fn content(&self) -> &DisplayContent {
        self.store.content()
    }

    /// The cache store, including the measured extent and generation.
    pub const fn store(&self) -> &CacheStore {
        &self.store
    }

    /// Tags currently applied to the widget.
    pub const fn tags(&self) -> &TagSet {
        &self.applied_tags
    }

    /// Tooltip currently applied to the widget.
    pub fn tooltip(&self) -> Option<&str> {
        self.tooltip.as_deref()
    }

    /// Size the widget currently asks for.
    pub const fn size_request(&self) -> SizeRequest {
        self.size_request
    }

    /// Interval at which the host should call [`on_tick`](Self::on_tick).
    pub const fn tick_interval(&self) -> Duration {
        self.clock.tick_interval()
    }

    /// Milliseconds of animation time at `now`.
    pub fn elapsed_ms(&self, now: Instant) -> f64 {
        self.clock.elapsed_ms(now)
    }

    /// Returns `true` if a frame has been requested but not painted.
    pub const fn is_redraw_pending(&self) -> bool {
        self.redraw_pending
    }

    /// Asks for a frame.
    pub fn request_redraw(&mut self) {
        self.redraw_pending = true;
    }

    /// Clock tick: the animation has moved, so a new frame is due.
    pub fn on_tick(&mut self, _now: Instant) {
        self.request_redraw();
    }

    /// Reacts to a change in the cache directory.
    ///
    /// Returns `None` when the event kind does not warrant a reload.
    pub fn on_file_event(
        &mut self,
        event: &CacheEvent,
        now: Instant,
    ) -> Option<Result<ReloadOutcome, LoadError>> {
        if !event.triggers_reload() {
            debug!(kind = ?event.kind, path = %event.path, "ignoring cache event");
            return None;
        }
        Some(self.reload(now))
    }

    /// Produces the frame for `now` in a widget `allotted_height` pixels tall.
    pub fn on_paint_request(&mut self, now: Instant, allotted_height: f64) -> RenderPlan {
        self.redraw_pending = false;
        let elapsed = self.clock.elapsed_ms(now);
        self.renderer.render(
            self.store.content().text(),
            allotted_height,
            elapsed,
            &self.config,
        )
    }

    /// Re-reads the cache file.
    ///
    /// On success the content is replaced as a whole, the text is
    /// re-measured, the animation restarts from `now` and a redraw is
    /// requested. On failure nothing changes.
    pub fn reload(&mut self, now: Instant) -> Result<ReloadOutcome, LoadError> {
        let path = self.config.cache_path();
        let content = match loader::load(path) {
            Ok(content) => content,
            Err(err) if err.is_unreadable() => {
                info!(path = %path, error = %err, "cache file not readable yet");
                return Err(err);
            }
            Err(err) => {
                warn!(path = %path, error = %err, "ignoring invalid cache file");
                return Err(err);
            }
        };

        let tooltip = content.tooltip().map(str::to_owned);
        let tags = self.store.replace(content);

        self.renderer.invalidate();
        let extent = self.renderer.layout(self.store.content().text());
        self.store.set_extent(extent);
        self.size_request = SizeRequest::for_extent(extent);

        self.applied_tags.apply(&tags);
        self.tooltip.clone_from(&tooltip);
        self.clock.reset(now);
        self.redraw_pending = true;

        info!(
            text = %self.store.content().text(),
            width = extent.width,
            generation = self.store.generation(),
            "cache reloaded"
        );

        Ok(ReloadOutcome {
            tags,
            tooltip,
            size_request: self.size_request,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use camino::Utf8PathBuf;
    use cs_core::{ConfigEntry, Extent, PLACEHOLDER_TEXT};
    use cs_render::FontWeight;
    use cs_watcher::CacheEventKind;
    use tempfile::TempDir;

    use super::*;

    type Measure = fn(&str, FontWeight) -> Extent;

    fn ten_px_glyphs(text: &str, _weight: FontWeight) -> Extent {
        #[allow(clippy::cast_precision_loss)]
        let glyphs = text.chars().count() as f64;
        Extent::new(glyphs * 10.0, 18.0)
    }

    struct Fixture {
        _dir: TempDir,
        cache: Utf8PathBuf,
        widget: ShimmerWidget<Measure>,
        start: Instant,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let cache = Utf8PathBuf::from_path_buf(dir.path().join("latest.json")).unwrap();
            let config = ShimmerConfig::from_entries(&[ConfigEntry::new(
                "cache_path",
                quoted(cache.as_str()),
            )]);
            let start = Instant::now();
            let widget = ShimmerWidget::new(config, ten_px_glyphs as Measure, start);
            Self {
                _dir: dir,
                cache,
                widget,
                start,
            }
        }

        fn write(&self, json: &str) {
            fs::write(&self.cache, json).unwrap();
        }

        fn at(&self, ms: u64) -> Instant {
            self.start + Duration::from_millis(ms)
        }
    }

    fn quoted(raw: &str) -> String {
        format!("\"{raw}\"")
    }

    fn tag_list(tags: &TagSet) -> Vec<&str> {
        let mut list: Vec<_> = tags.iter().collect();
        list.sort_unstable();
        list
    }

    #[test]
    fn test_starts_with_placeholder() {
        let fixture = Fixture::new();
        let widget = &fixture.widget;

        assert_eq!(widget.content().text(), PLACEHOLDER_TEXT);
        assert!(widget.tags().is_empty());
        assert!(widget.tooltip().is_none());
        assert!(widget.is_redraw_pending());
        assert_eq!(widget.tick_interval(), Duration::from_millis(33));
    }

    #[test]
    fn test_reload_text_only() {
        let mut fixture = Fixture::new();
        fixture.write(r#"{"text":"Hello"}"#);
        let now = fixture.at(5_000);

        let outcome = fixture.widget.reload(now).unwrap();

        assert_eq!(fixture.widget.content().text(), "Hello");
        assert!(fixture.widget.tooltip().is_none());
        assert!(fixture.widget.tags().is_empty());
        assert!(outcome.tags.is_empty());
        assert!(fixture.widget.elapsed_ms(now).abs() < f64::EPSILON);
        assert_eq!(outcome.size_request, SizeRequest::for_extent(Extent::new(50.0, 18.0)));
        assert_eq!(fixture.widget.store().extent(), Some(Extent::new(50.0, 18.0)));
    }

    #[test]
    fn test_reload_replaces_tags() {
        let mut fixture = Fixture::new();

        fixture.write(r#"{"class":"busy"}"#);
        let first = fixture.widget.reload(fixture.at(10)).unwrap();
        assert_eq!(first.tags.to_add, vec!["busy"]);
        assert_eq!(tag_list(fixture.widget.tags()), vec!["busy"]);

        fixture.write(r#"{"class":["a","b"]}"#);
        let second = fixture.widget.reload(fixture.at(20)).unwrap();
        assert_eq!(second.tags.to_remove, vec!["busy"]);
        assert_eq!(tag_list(fixture.widget.tags()), vec!["a", "b"]);
        assert_eq!(
            tag_list(fixture.widget.tags()),
            tag_list(fixture.widget.content().tags())
        );
    }

    #[test]
    fn test_invalid_json_keeps_previous_state() {
        let mut fixture = Fixture::new();
        fixture.write(r#"{"text":"Hello","tooltip":"tip","class":"busy"}"#);
        let loaded_at = fixture.at(100);
        fixture.widget.reload(loaded_at).unwrap();
        let _ = fixture.widget.on_paint_request(loaded_at, 30.0);

        fixture.write("{not json");
        let later = fixture.at(900);
        let err = fixture.widget.reload(later).unwrap_err();

        assert!(matches!(err, LoadError::Malformed { .. }));
        assert_eq!(fixture.widget.content().text(), "Hello");
        assert_eq!(fixture.widget.tooltip(), Some("tip"));
        assert_eq!(tag_list(fixture.widget.tags()), vec!["busy"]);
        assert!((fixture.widget.elapsed_ms(later) - 800.0).abs() < 1e-6);
        assert!(!fixture.widget.is_redraw_pending());
    }

    #[test]
    fn test_empty_object_is_placeholder() {
        let mut fixture = Fixture::new();
        fixture.write(r#"{"text":"Hello","class":"busy"}"#);
        fixture.widget.reload(fixture.at(1)).unwrap();

        fixture.write("{}");
        fixture.widget.reload(fixture.at(2)).unwrap();

        assert_eq!(fixture.widget.content().text(), PLACEHOLDER_TEXT);
        assert!(fixture.widget.tooltip().is_none());
        assert!(fixture.widget.tags().is_empty());
    }

    #[test]
    fn test_same_content_twice_still_resets_epoch() {
        let mut fixture = Fixture::new();
        fixture.write(r#"{"text":"Hello","class":["x"]}"#);

        fixture.widget.reload(fixture.at(100)).unwrap();
        let first = fixture.widget.content().clone();

        let second_at = fixture.at(700);
        let outcome = fixture.widget.reload(second_at).unwrap();

        assert_eq!(fixture.widget.content(), &first);
        assert!(outcome.tags.is_empty());
        assert!(fixture.widget.elapsed_ms(second_at).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        let mut fixture = Fixture::new();
        let err = fixture.widget.reload(fixture.at(1)).unwrap_err();
        assert!(err.is_unreadable());
        assert_eq!(fixture.widget.content().text(), PLACEHOLDER_TEXT);
    }

    #[test]
    fn test_file_event_dispatch() {
        let mut fixture = Fixture::new();
        fixture.write(r#"{"text":"Hi"}"#);

        let removed = CacheEvent::new(fixture.cache.clone(), CacheEventKind::Removed);
        assert!(fixture.widget.on_file_event(&removed, fixture.at(1)).is_none());
        assert_eq!(fixture.widget.content().text(), PLACEHOLDER_TEXT);

        let moved_in = CacheEvent::new(fixture.cache.clone(), CacheEventKind::MovedIn);
        let outcome = fixture.widget.on_file_event(&moved_in, fixture.at(2));
        assert!(matches!(outcome, Some(Ok(_))));
        assert_eq!(fixture.widget.content().text(), "Hi");
    }

    #[test]
    fn test_tick_and_paint_toggle_redraw_flag() {
        let mut fixture = Fixture::new();
        let now = fixture.at(400);

        let plan = fixture.widget.on_paint_request(now, 26.0);
        assert!(plan.is_handled());
        assert!(!fixture.widget.is_redraw_pending());

        fixture.widget.on_tick(now);
        assert!(fixture.widget.is_redraw_pending());
    }
}
