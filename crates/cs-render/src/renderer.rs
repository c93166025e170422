//! Frame rendering.
//!
//! A frame is always the base text pass, optionally followed by the
//! highlight pass:
//!
//! ```text
//!  text ──► measure (bold) ──► base Text op (Over)
//!                          └─► phase? ──► band ──► gradient ──► Gradient op (Screen)
//! ```

use cs_core::{Extent, ShimmerConfig};
use tracing::{debug, trace};

use crate::band::BandGeometry;
use crate::gradient::LinearGradient;
use crate::layout::{FontWeight, TextMeasure};
use crate::plan::{BlendOperator, Clip, PaintOp, Point, RenderPlan};
use crate::sweep::sweep_phase;

/// Renders one frame of `text` without caching the layout.
///
/// See [`ShimmerRenderer::render`] for the frame rules.
#[must_use]
pub fn render<M>(
    text: &str,
    allotted_height: f64,
    elapsed_ms: f64,
    config: &ShimmerConfig,
    measure: &M,
) -> RenderPlan
where
    M: TextMeasure + ?Sized,
{
    if text.is_empty() {
        return RenderPlan::unhandled();
    }
    let extent = measure.measure(text, FontWeight::Bold);
    plan_frame(text, extent, allotted_height, elapsed_ms, config)
}

/// Renders frames through a [`TextMeasure`], remembering the layout of the
/// last text it measured.
#[derive(Debug)]
pub struct ShimmerRenderer<M> {
    measure: M,
    layout: Option<(String, Extent)>,
}

impl<M: TextMeasure> ShimmerRenderer<M> {
    /// Creates a renderer with an empty layout cache.
    pub const fn new(measure: M) -> Self {
        Self {
            measure,
            layout: None,
        }
    }

    /// The measurement backend.
    pub const fn measure(&self) -> &M {
        &self.measure
    }

    /// Drops the cached layout so the next call re-measures.
    pub fn invalidate(&mut self) {
        self.layout = None;
    }

    /// Bold extent of `text`, measured at most once per distinct text.
    pub fn layout(&mut self, text: &str) -> Extent {
        if let Some((cached, extent)) = &self.layout {
            if cached == text {
                return *extent;
            }
        }
        let extent = self.measure.measure(text, FontWeight::Bold);
        debug!(
            width = extent.width,
            height = extent.height,
            "measured label layout"
        );
        self.layout = Some((text.to_owned(), extent));
        extent
    }

    /// Renders one frame.
    ///
    /// - Empty `text` yields an unhandled, empty plan.
    /// - A layout with no width yields a handled, empty plan.
    /// - Otherwise the text is vertically centered in `allotted_height` and
    ///   drawn in the base color, then the highlight gradient is screened
    ///   over the glyphs unless the sweep is paused or the highlight is
    ///   fully transparent.
    pub fn render(
        &mut self,
        text: &str,
        allotted_height: f64,
        elapsed_ms: f64,
        config: &ShimmerConfig,
    ) -> RenderPlan {
        if text.is_empty() {
            return RenderPlan::unhandled();
        }
        let extent = self.layout(text);
        plan_frame(text, extent, allotted_height, elapsed_ms, config)
    }
}

fn plan_frame(
    text: &str,
    extent: Extent,
    allotted_height: f64,
    elapsed_ms: f64,
    config: &ShimmerConfig,
) -> RenderPlan {
    if extent.width <= 0.0 {
        return RenderPlan::empty(extent);
    }

    let origin = Point::new(0.0, (allotted_height - extent.height) / 2.0);
    let mut plan = RenderPlan::empty(extent);
    plan.push(PaintOp::Text {
        origin,
        color: config.base_color(),
        operator: BlendOperator::Over,
    });

    if config.highlight_alpha() <= 0.0 {
        return plan;
    }
    let Some(phase) = sweep_phase(elapsed_ms, config.period_ms(), config.pause_ms()) else {
        return plan;
    };

    let band = BandGeometry::compute(
        extent.width,
        text.chars().count(),
        config.width_chars(),
        phase,
    );
    trace!(
        phase,
        center = band.center_px,
        band = band.band_width,
        "shimmer frame"
    );

    plan.push(PaintOp::Gradient {
        origin,
        gradient: LinearGradient::shimmer(
            &band,
            config.highlight_color(),
            config.highlight_alpha(),
        ),
        clip: Clip::GlyphOutlines,
        operator: BlendOperator::Screen,
    });
    plan
}
