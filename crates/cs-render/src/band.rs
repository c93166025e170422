//! Highlight band geometry in glyph-run pixel space.
//!
//! The band's nominal width is `width_chars` average glyph widths. The
//! envelope scales it down towards the start and end of a sweep, but never
//! below [`MIN_BAND_FRACTION`] of a glyph. The band center travels from one
//! band width left of the text to one band width right of it, so the
//! highlight enters and leaves fully off-ink.

use crate::sweep::envelope;

/// Smallest band width, as a fraction of the average glyph width.
pub const MIN_BAND_FRACTION: f64 = 0.6;

/// Position and size of the highlight band for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandGeometry {
    /// Layout width divided by the number of code points.
    pub avg_glyph_width: f64,
    /// Width of the band after envelope scaling and flooring.
    pub band_width: f64,
    /// Envelope value for this phase.
    pub envelope: f64,
    /// Horizontal position of the band center.
    pub center_px: f64,
}

impl BandGeometry {
    /// Computes the band for a text run of `layout_width` pixels holding
    /// `glyph_count` code points, at sweep `phase`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cs_render::band::BandGeometry;
    ///
    /// // 10 glyphs of 10px, 4-glyph band, middle of the sweep.
    /// let band = BandGeometry::compute(100.0, 10, 4.0, 0.5);
    /// assert_eq!(band.avg_glyph_width, 10.0);
    /// assert_eq!(band.band_width, 40.0);
    /// assert_eq!(band.center_px, 50.0);
    /// ```
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn compute(layout_width: f64, glyph_count: usize, width_chars: f64, phase: f64) -> Self {
        let glyphs = glyph_count.max(1) as f64;
        let avg_glyph_width = layout_width / glyphs;
        let base_width = (avg_glyph_width * width_chars).max(avg_glyph_width);
        let floor = avg_glyph_width * MIN_BAND_FRACTION;

        let envelope = envelope(phase);
        let band_width = (base_width * envelope).max(floor);

        let start_offset = -band_width;
        let travel = layout_width + band_width * 2.0;
        let center_px = start_offset + phase * travel;

        Self {
            avg_glyph_width,
            band_width,
            envelope,
            center_px,
        }
    }

    /// Horizontal span covered by the gradient, two band widths either side
    /// of the center and at least one pixel wide.
    #[must_use]
    pub fn gradient_span(&self) -> (f64, f64) {
        let start = self.center_px - self.band_width * 2.0;
        let mut end = self.center_px + self.band_width * 2.0;
        if end <= start {
            end = start + 1.0;
        }
        (start, end)
    }
}
