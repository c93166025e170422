//! Paint plans: what one frame draws, independent of any surface.
//!
//! The renderer never touches pixels. It emits a [`RenderPlan`], an ordered
//! list of [`PaintOp`]s, and a backend (Cairo, a terminal buffer, a test
//! recorder) executes them in order.

use cs_core::{Extent, Rgba};
use smallvec::SmallVec;

use crate::gradient::LinearGradient;

/// A position in surface coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Creates a point.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// How a paint operation combines with what is already on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendOperator {
    /// Source-over.
    Over,
    /// Screen; only ever brightens.
    Screen,
}

/// Region a gradient fill is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clip {
    /// Fill only inside the glyph outlines of the laid-out text.
    GlyphOutlines,
}

/// A single drawing step.
#[derive(Debug, Clone, PartialEq)]
pub enum PaintOp {
    /// Draw the laid-out text in a solid color.
    Text {
        /// Top-left corner of the text run.
        origin: Point,
        /// Fill color, alpha included.
        color: Rgba,
        /// Compositing operator.
        operator: BlendOperator,
    },
    /// Fill a horizontal gradient.
    Gradient {
        /// Top-left corner of the text run the gradient is positioned against.
        origin: Point,
        /// The gradient, in run coordinates.
        gradient: LinearGradient,
        /// Region the fill is restricted to.
        clip: Clip,
        /// Compositing operator.
        operator: BlendOperator,
    },
}

/// Everything needed to paint one frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderPlan {
    handled: bool,
    extent: Extent,
    ops: SmallVec<[PaintOp; 2]>,
}

impl RenderPlan {
    /// A plan that paints nothing and leaves drawing to the host.
    #[must_use]
    pub fn unhandled() -> Self {
        Self::default()
    }

    /// A plan that paints nothing but reports the frame as drawn.
    #[must_use]
    pub fn empty(extent: Extent) -> Self {
        Self {
            handled: true,
            extent,
            ops: SmallVec::new(),
        }
    }

    /// Appends an operation.
    pub fn push(&mut self, op: PaintOp) {
        self.ops.push(op);
    }

    /// Whether the widget drew the frame itself.
    #[must_use]
    pub const fn is_handled(&self) -> bool {
        self.handled
    }

    /// Extent of the laid-out text.
    #[must_use]
    pub const fn extent(&self) -> Extent {
        self.extent
    }

    /// Operations in paint order.
    #[must_use]
    pub fn ops(&self) -> &[PaintOp] {
        &self.ops
    }

    /// Whether the plan draws anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// The highlight gradient, if this frame has one.
    #[must_use]
    pub fn highlight(&self) -> Option<&LinearGradient> {
        self.ops.iter().find_map(|op| match op {
            PaintOp::Gradient { gradient, .. } => Some(gradient),
            PaintOp::Text { .. } => None,
        })
    }
}
