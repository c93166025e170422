//! The shimmer highlight as a horizontal linear gradient.

use cs_core::Rgba;

use crate::band::BandGeometry;

/// Number of intervals between gradient stops; there are `GRADIENT_STEPS + 1`
/// stops in total.
pub const GRADIENT_STEPS: u16 = 96;

/// A color stop at a relative `offset` in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    /// Position along the gradient axis.
    pub offset: f64,
    /// Color at this position.
    pub color: Rgba,
}

/// A horizontal linear gradient from `start_x` to `end_x`.
///
/// Outside the span the gradient pads: positions left of `start_x` take the
/// first stop's color and positions right of `end_x` take the last.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    /// Left edge of the gradient, in run coordinates.
    pub start_x: f64,
    /// Right edge of the gradient, in run coordinates.
    pub end_x: f64,
    /// Stops in ascending offset order.
    pub stops: Vec<GradientStop>,
}

impl LinearGradient {
    /// Builds the Gaussian highlight for `band`.
    ///
    /// Stop `i` sits at offset `i / 96`. Its alpha is
    /// `highlight_alpha · envelope · exp(-½·δ²)`, where `δ` is the stop's
    /// distance from the band center measured in band widths.
    #[must_use]
    pub fn shimmer(band: &BandGeometry, highlight: Rgba, highlight_alpha: f64) -> Self {
        let (start_x, end_x) = band.gradient_span();
        let span = end_x - start_x;
        let peak = highlight_alpha * band.envelope;

        let stops = (0..=GRADIENT_STEPS)
            .map(|i| {
                let offset = f64::from(i) / f64::from(GRADIENT_STEPS);
                let x = start_x + offset * span;
                let delta = (x - band.center_px) / band.band_width;
                let alpha = peak * (-0.5 * delta * delta).exp();
                GradientStop {
                    offset,
                    color: highlight.with_alpha(alpha),
                }
            })
            .collect();

        Self {
            start_x,
            end_x,
            stops,
        }
    }

    /// Color of the gradient at horizontal position `x`.
    #[must_use]
    pub fn sample(&self, x: f64) -> Rgba {
        let (Some(first), Some(last)) = (self.stops.first(), self.stops.last()) else {
            return Rgba::TRANSPARENT;
        };
        let span = self.end_x - self.start_x;
        let t = if span > 0.0 {
            ((x - self.start_x) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };

        if t <= first.offset {
            return first.color;
        }
        if t >= last.offset {
            return last.color;
        }

        for pair in self.stops.windows(2) {
            let (left, right) = (pair[0], pair[1]);
            if t <= right.offset {
                let width = right.offset - left.offset;
                let local = if width > 0.0 {
                    (t - left.offset) / width
                } else {
                    1.0
                };
                return lerp(left.color, right.color, local);
            }
        }

        last.color
    }
}

fn lerp(a: Rgba, b: Rgba, t: f64) -> Rgba {
    let mix = |x: f64, y: f64| x + (y - x) * t;
    Rgba::new(
        mix(a.red, b.red),
        mix(a.green, b.green),
        mix(a.blue, b.blue),
        mix(a.alpha, b.alpha),
    )
}
