//! Terminal paint adapter.
//!
//! Executes a [`RenderPlan`] on a ratatui [`Buffer`]. A terminal has no
//! sub-cell pixels, so each cell stands in for a `cell_width × cell_height`
//! block of the label's virtual pixel space:
//!
//! - A `Text` op writes the glyph and composites its color over the
//!   background into the cell's foreground.
//! - A `Gradient` op samples the gradient at each cell's horizontal center
//!   and composites it with the op's operator. With
//!   [`Clip::GlyphOutlines`] only cells holding visible ink are touched.

use cs_core::{Extent, Rgba};
use cs_render::blend::{over, screen};
use cs_render::{BlendOperator, Clip, FontWeight, LinearGradient, PaintOp, RenderPlan, TextMeasure};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Fraction of the gradient's peak above which a monochrome cell counts as
/// highlighted.
const MONOCHROME_CUTOFF: f64 = 0.75;

/// Maps terminal cells to the renderer's pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    /// Virtual pixels per terminal column.
    pub cell_width: f64,
    /// Virtual pixels per terminal row.
    pub cell_height: f64,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            cell_width: 8.0,
            cell_height: 16.0,
        }
    }
}

impl CellMetrics {
    /// Pixel height of `rows` terminal rows.
    #[must_use]
    pub fn rows_to_px(&self, rows: u16) -> f64 {
        f64::from(rows) * self.cell_height
    }

    /// Number of whole columns needed for `px` pixels.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn px_to_columns(&self, px: f64) -> u16 {
        (px / self.cell_width).ceil().clamp(0.0, f64::from(u16::MAX)) as u16
    }

    /// Number of whole rows needed for `px` pixels.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn px_to_rows(&self, px: f64) -> u16 {
        (px / self.cell_height).ceil().clamp(0.0, f64::from(u16::MAX)) as u16
    }
}

impl TextMeasure for CellMetrics {
    /// Terminal fonts are monospaced and bold does not change advance.
    #[allow(clippy::cast_precision_loss)]
    fn measure(&self, text: &str, _weight: FontWeight) -> Extent {
        Extent::new(text.width() as f64 * self.cell_width, self.cell_height)
    }
}

/// How colors reach the terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// 24-bit RGB foregrounds.
    #[default]
    TrueColor,
    /// No colors; the highlight band is shown as reversed cells.
    Monochrome,
}

/// Executes a plan for one label.
#[derive(Debug, Clone, Copy)]
pub struct CellPainter {
    metrics: CellMetrics,
    background: Rgba,
    mode: ColorMode,
}

impl CellPainter {
    /// Creates a painter compositing onto `background`.
    #[must_use]
    pub const fn new(metrics: CellMetrics, background: Rgba, mode: ColorMode) -> Self {
        Self {
            metrics,
            background,
            mode,
        }
    }

    /// Paints `plan` for `text` into `area` of `buf`.
    ///
    /// Unhandled and empty plans leave the buffer untouched.
    pub fn paint(&self, plan: &RenderPlan, text: &str, area: Rect, buf: &mut Buffer) {
        if !plan.is_handled() || plan.is_empty() || area.is_empty() {
            return;
        }

        let cells = self.layout_cells(text);
        let mut colors: Vec<Rgba> = vec![self.background; cells.len()];
        let mut reversed = vec![false; cells.len()];

        for op in plan.ops() {
            match op {
                PaintOp::Text {
                    color, operator, ..
                } => {
                    for slot in &mut colors {
                        *slot = composite(*operator, *color, *slot);
                    }
                }
                PaintOp::Gradient {
                    origin,
                    gradient,
                    clip,
                    operator,
                } => {
                    let peak = peak_alpha(gradient);
                    for (index, cell) in cells.iter().enumerate() {
                        if *clip == Clip::GlyphOutlines && !cell.inked {
                            continue;
                        }
                        let sample = gradient.sample(cell.center_px - origin.x);
                        colors[index] = composite(*operator, sample, colors[index]);
                        reversed[index] |=
                            peak > 0.0 && sample.alpha >= peak * MONOCHROME_CUTOFF;
                    }
                }
            }
        }

        let row = area.y + self.text_row(plan, area.height);
        for (index, cell) in cells.iter().enumerate() {
            if cell.column >= area.width {
                break;
            }
            let Some(target) = buf.cell_mut((area.x + cell.column, row)) else {
                continue;
            };
            target.set_char(cell.symbol);
            if !cell.inked {
                continue;
            }
            let mut modifier = Modifier::BOLD;
            match self.mode {
                ColorMode::TrueColor => {
                    let (r, g, b) = colors[index].to_rgb8();
                    target.set_fg(Color::Rgb(r, g, b));
                }
                ColorMode::Monochrome => {
                    if reversed[index] {
                        modifier |= Modifier::REVERSED;
                    }
                }
            }
            target.modifier.insert(modifier);
        }
    }

    /// Row offset of the text inside an area `rows` tall.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn text_row(&self, plan: &RenderPlan, rows: u16) -> u16 {
        let allotted = self.metrics.rows_to_px(rows);
        let top = ((allotted - plan.extent().height) / 2.0).max(0.0);
        let row = (top / self.metrics.cell_height).floor() as u16;
        row.min(rows.saturating_sub(1))
    }

    fn layout_cells(&self, text: &str) -> Vec<LaidOutCell> {
        let mut column: u16 = 0;
        let mut cells = Vec::with_capacity(text.len());
        for symbol in text.chars() {
            let Some(width) = symbol.width().filter(|w| *w > 0) else {
                continue;
            };
            let width = u16::try_from(width).unwrap_or(1);
            let center_px = (f64::from(column) + f64::from(width) / 2.0) * self.metrics.cell_width;
            cells.push(LaidOutCell {
                symbol,
                column,
                center_px,
                inked: !symbol.is_whitespace(),
            });
            column = column.saturating_add(width);
        }
        cells
    }
}

#[derive(Debug, Clone, Copy)]
struct LaidOutCell {
    symbol: char,
    column: u16,
    center_px: f64,
    inked: bool,
}

fn composite(operator: BlendOperator, src: Rgba, dst: Rgba) -> Rgba {
    match operator {
        BlendOperator::Over => over(src, dst),
        BlendOperator::Screen => screen(src, dst),
    }
}

fn peak_alpha(gradient: &LinearGradient) -> f64 {
    gradient
        .stops
        .iter()
        .map(|stop| stop.color.alpha)
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use cs_core::{ConfigEntry, ShimmerConfig};
    use cs_render::render;

    use super::*;

    const DARK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);

    fn rgb(buf: &Buffer, x: u16, y: u16) -> Color {
        buf.cell((x, y)).map(|cell| cell.fg).unwrap_or_default()
    }

    #[test]
    fn test_cell_metrics_measure() {
        let metrics = CellMetrics::default();
        assert_eq!(metrics.measure("abc", FontWeight::Bold), Extent::new(24.0, 16.0));
        assert_eq!(metrics.measure("日本", FontWeight::Normal), Extent::new(32.0, 16.0));
        assert_eq!(metrics.px_to_columns(17.0), 3);
        assert_eq!(metrics.px_to_rows(16.0), 1);
    }

    #[test]
    fn test_base_pass_only_during_pause() {
        let metrics = CellMetrics::default();
        let config = ShimmerConfig::default();
        let plan = render("Hi there", 48.0, 1_800.0, &config, &metrics);

        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        CellPainter::new(metrics, DARK, ColorMode::TrueColor)
            .paint(&plan, "Hi there", area, &mut buf);

        assert_eq!(buf.cell((0, 1)).map(ratatui::buffer::Cell::symbol), Some("H"));
        assert_eq!(rgb(&buf, 0, 1), Color::Rgb(0xC7, 0xD3, 0xFF));
        assert_eq!(rgb(&buf, 7, 1), Color::Rgb(0xC7, 0xD3, 0xFF));
        assert_eq!(buf.cell((0, 0)).map(ratatui::buffer::Cell::symbol), Some(" "));
    }

    #[test]
    fn test_highlight_brightens_inked_cells_only() {
        let metrics = CellMetrics::default();
        let config = ShimmerConfig::from_entries(&[ConfigEntry::new("highlight_alpha", "1")]);
        // Mid-sweep: the band sits on the middle of the text.
        let text = "abc def";
        let plan = render(text, 16.0, 800.0, &config, &metrics);

        let area = Rect::new(0, 0, 10, 1);
        let mut buf = Buffer::empty(area);
        CellPainter::new(metrics, DARK, ColorMode::TrueColor)
            .paint(&plan, text, area, &mut buf);

        let Color::Rgb(r, _, _) = rgb(&buf, 2, 0) else {
            panic!("expected rgb foreground");
        };
        assert!(r > 0xC7);
        // The space is not ink and keeps the reset foreground.
        assert_eq!(rgb(&buf, 3, 0), Color::Reset);
    }

    #[test]
    fn test_monochrome_reverses_band() {
        let metrics = CellMetrics::default();
        let config = ShimmerConfig::from_entries(&[ConfigEntry::new("highlight_alpha", "1")]);
        let text = "0123456789";
        let plan = render(text, 16.0, 800.0, &config, &metrics);

        let area = Rect::new(0, 0, 12, 1);
        let mut buf = Buffer::empty(area);
        CellPainter::new(metrics, DARK, ColorMode::Monochrome)
            .paint(&plan, text, area, &mut buf);

        let reversed = |x: u16| {
            buf.cell((x, 0))
                .is_some_and(|cell| cell.modifier.contains(Modifier::REVERSED))
        };
        assert!(reversed(5));
        assert!(!reversed(0));
        assert_eq!(rgb(&buf, 5, 0), Color::Reset);
    }

    #[test]
    fn test_unhandled_plan_paints_nothing() {
        let area = Rect::new(0, 0, 4, 1);
        let mut buf = Buffer::empty(area);
        let painter = CellPainter::new(CellMetrics::default(), DARK, ColorMode::TrueColor);
        painter.paint(&RenderPlan::unhandled(), "", area, &mut buf);
        assert_eq!(buf, Buffer::empty(area));
    }
}
