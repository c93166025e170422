//! Shimmer widget core and its terminal host.
//!
//! [`ShimmerWidget`] is the reactive core: it keeps the cache content, the
//! animation clock and the renderer together and answers ticks, file events
//! and paint requests. [`Panel`] adds the host lifecycle and the cache
//! watcher. The rest of the crate hosts a panel in a terminal with ratatui.
//!
//! # Architecture
//!
//! ```text
//! crates/cs-panel/src/
//!   lib.rs      # run() and the host loop
//!   widget.rs   # ShimmerWidget: reload, tick, paint
//!   panel.rs    # Panel: initialize, teardown, refresh, actions
//!   backend.rs  # CellPainter: RenderPlan → ratatui Buffer
//!   tui.rs      # Terminal wrapper with async event streaming
//!   event.rs    # Host events
//!   action.rs   # Key bindings
//!   ui.rs       # Frame layout
//!   theme.rs    # Frame styles
//!   error.rs    # PanelError
//! ```
//!
//! # Example
//!
//! ```ignore
//! use cs_core::ShimmerConfig;
//! use cs_panel::{RunOptions, run};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), cs_panel::PanelError> {
//!     run(ShimmerConfig::default(), RunOptions::default()).await
//! }
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod action;
pub mod backend;
pub mod error;
pub mod event;
pub mod panel;
pub mod theme;
pub mod tui;
pub mod ui;
pub mod widget;

use std::time::Instant;

use cs_core::ShimmerConfig;
use cs_watcher::{CacheEvent, CacheWatcher};
use tracing::{debug, info, warn};

pub use action::Action;
pub use backend::{CellMetrics, CellPainter, ColorMode};
pub use error::PanelError;
pub use event::Event;
pub use panel::Panel;
pub use theme::Theme;
pub use tui::Tui;
pub use widget::{ReloadOutcome, ShimmerWidget};

/// How the terminal host presents the panel.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Color handling for the label and frame.
    pub color_mode: ColorMode,
    /// Virtual pixel size of a terminal cell.
    pub metrics: CellMetrics,
}

/// Hosts a shimmer panel in the terminal until the user quits.
///
/// The terminal is restored before this returns, including on error.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up or drawn, or if the
/// terminal event stream ends.
pub async fn run(config: ShimmerConfig, options: RunOptions) -> Result<(), PanelError> {
    let theme = Theme::for_mode(options.color_mode);
    let mut panel = Panel::initialize(config, options.metrics);

    let mut tui = Tui::new(panel.widget().tick_interval())?;
    tui.enter()?;

    info!("entering host loop");
    let result = run_event_loop(&mut tui, &mut panel, &theme, options.metrics).await;

    tui.exit()?;
    if let Err(e) = panel.teardown().await {
        warn!(error = %e, "error stopping cache watcher");
    }

    result
}

async fn run_event_loop(
    tui: &mut Tui,
    panel: &mut Panel<CellMetrics>,
    theme: &Theme,
    metrics: CellMetrics,
) -> Result<(), PanelError> {
    loop {
        if panel.widget().is_redraw_pending() {
            tui.draw(|frame| {
                ui::render(panel.widget_mut(), Instant::now(), frame, theme, metrics);
            })?;
        }

        let event = tokio::select! {
            event = tui.next_event() => Some(event.ok_or(PanelError::ChannelClosed)?),
            cache_event = next_cache_event(panel.watcher_mut()) => {
                cache_event.map(Event::CacheChanged)
            }
        };
        let Some(event) = event else {
            panel.disarm_watcher();
            continue;
        };

        let action = match event {
            Event::Key(key) => Action::from_key(key),
            Event::Resize { width, height } => {
                debug!(width, height, "terminal resized");
                Action::Redraw
            }
            Event::CacheChanged(cache_event) => {
                panel.handle_cache_event(&cache_event);
                Action::None
            }
            Event::Tick => Action::Tick,
            Event::FocusGained | Event::FocusLost => Action::None,
        };

        match action {
            Action::Quit => {
                info!("quit requested");
                return Ok(());
            }
            Action::Invoke(name) => {
                panel.invoke_action(name);
            }
            Action::Redraw => panel.notify_redraw(),
            Action::Tick => panel.tick(),
            Action::None => {}
        }
    }
}

/// Next event from the watcher, or never if there is none.
async fn next_cache_event(watcher: Option<&mut CacheWatcher>) -> Option<CacheEvent> {
    match watcher {
        Some(watcher) => watcher.recv().await,
        None => std::future::pending().await,
    }
}
