//! Shimmer rendering for codex-shimmer.
//!
//! Turns a label, a point in time, and a [`ShimmerConfig`](cs_core::ShimmerConfig)
//! into a [`RenderPlan`]: the base text pass plus, while a sweep is in
//! progress, a Gaussian highlight gradient screened over the glyphs.
//!
//! - [`sweep`] - phase and envelope over one animation cycle
//! - [`band`] - highlight band width and position
//! - [`gradient`] - the 97-stop highlight gradient
//! - [`plan`] - backend-independent paint operations
//! - [`blend`] - Over and Screen compositing for raster backends
//! - [`layout`] - the [`TextMeasure`] seam and widget sizing
//!
//! Nothing here can fail; degenerate input produces a plan that paints
//! nothing.

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod band;
pub mod blend;
pub mod gradient;
pub mod layout;
pub mod plan;
pub mod renderer;
pub mod sweep;

pub use band::BandGeometry;
pub use gradient::{GRADIENT_STEPS, GradientStop, LinearGradient};
pub use layout::{FontWeight, SizeRequest, TextMeasure};
pub use plan::{BlendOperator, Clip, PaintOp, Point, RenderPlan};
pub use renderer::{ShimmerRenderer, render};
