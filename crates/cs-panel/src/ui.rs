//! Frame layout for the terminal host.
//!
//! ```text
//! ┌ codex-shimmer ───────────────────────┐
//! │ Waiting for Codex…                   │  ← label, sized by the size request
//! │                                      │
//! │ tooltip: Thinking about tests        │
//! │ tags: busy                           │
//! │ r reload  q quit                     │
//! └──────────────────────────────────────┘
//! ```

use std::time::Instant;

use cs_core::config::APP_NAME;
use cs_render::TextMeasure;
use cs_render::layout::HORIZONTAL_PADDING;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::backend::{CellMetrics, CellPainter};
use crate::theme::Theme;
use crate::widget::ShimmerWidget;

/// Renders one frame of the panel.
pub fn render<M: TextMeasure>(
    widget: &mut ShimmerWidget<M>,
    now: Instant,
    frame: &mut Frame,
    theme: &Theme,
    metrics: CellMetrics,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style)
        .title(Span::styled(format!(" {APP_NAME} "), theme.title_style));
    let inner = block.inner(frame.area());
    frame.render_widget(block, frame.area());

    let request = widget.size_request();
    let label_rows = metrics.px_to_rows(request.height).max(1);
    let [label_area, details_area] =
        Layout::vertical([Constraint::Length(label_rows), Constraint::Min(0)]).areas(inner);
    let label_area = Rect {
        width: metrics.px_to_columns(request.width).min(label_area.width),
        ..label_area
    };

    let plan = widget.on_paint_request(now, metrics.rows_to_px(label_area.height));
    let painter = CellPainter::new(metrics, theme.background, theme.color_mode);
    let text = widget.content().text().to_owned();
    painter.paint(
        &plan,
        &text,
        inset(label_area, metrics.px_to_columns(HORIZONTAL_PADDING / 2.0)),
        frame.buffer_mut(),
    );

    let details = Paragraph::new(detail_lines(widget, theme));
    frame.render_widget(details, inset(details_area, 1));
}

fn detail_lines<'a, M: TextMeasure>(widget: &'a ShimmerWidget<M>, theme: &Theme) -> Vec<Line<'a>> {
    let tooltip = match widget.tooltip() {
        Some(tooltip) => Span::styled(tooltip, theme.tooltip_style),
        None => Span::styled("none", theme.hint_style),
    };

    let mut tags = vec![Span::raw("tags: ")];
    if widget.tags().is_empty() {
        tags.push(Span::styled("none", theme.hint_style));
    }
    for tag in widget.tags().iter() {
        tags.push(Span::styled(format!(" {tag} "), theme.tag_style));
        tags.push(Span::raw(" "));
    }

    vec![
        Line::from(""),
        Line::from(vec![Span::raw("tooltip: "), tooltip]),
        Line::from(tags),
        Line::from(Span::styled("r reload  q quit", theme.hint_style)),
    ]
}

/// Shrinks `area` by `columns` on the left.
fn inset(area: Rect, columns: u16) -> Rect {
    let columns = columns.min(area.width);
    Rect {
        x: area.x + columns,
        width: area.width - columns,
        ..area
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use camino::Utf8PathBuf;
    use cs_core::{ConfigEntry, ShimmerConfig};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use tempfile::TempDir;

    use super::*;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .filter_map(|x| buf.cell((x, y)).map(ratatui::buffer::Cell::symbol))
            .collect()
    }

    fn draw(widget: &mut ShimmerWidget<CellMetrics>) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(40, 8)).unwrap();
        let now = Instant::now();
        terminal
            .draw(|frame| render(widget, now, frame, &Theme::dark(), CellMetrics::default()))
            .unwrap();
        terminal.backend().buffer().clone()
    }

    #[test]
    fn test_inset() {
        assert_eq!(inset(Rect::new(2, 3, 10, 1), 1), Rect::new(3, 3, 9, 1));
        assert_eq!(inset(Rect::new(0, 0, 1, 1), 4), Rect::new(1, 0, 0, 1));
    }

    #[test]
    fn test_placeholder_frame() {
        let mut widget = ShimmerWidget::new(
            ShimmerConfig::default(),
            CellMetrics::default(),
            Instant::now(),
        );
        let buf = draw(&mut widget);

        assert!(row_text(&buf, 0).contains(APP_NAME));
        assert!(row_text(&buf, 1).contains("Waiting for Codex"));
        assert!(row_text(&buf, 4).contains("tooltip: none"));
        assert!(row_text(&buf, 5).contains("tags: none"));
        assert!(row_text(&buf, 6).contains("r reload"));
        assert!(!widget.is_redraw_pending());
    }

    #[test]
    fn test_loaded_content_frame() {
        let dir = TempDir::new().unwrap();
        let cache = Utf8PathBuf::from_path_buf(dir.path().join("latest.json")).unwrap();
        fs::write(&cache, r#"{"text":"Compiling","tooltip":"cargo","class":["busy"]}"#).unwrap();
        let config =
            ShimmerConfig::from_entries(&[ConfigEntry::new("cache_path", format!("\"{cache}\""))]);

        let mut widget = ShimmerWidget::new(config, CellMetrics::default(), Instant::now());
        widget.reload(Instant::now()).unwrap();
        let buf = draw(&mut widget);

        assert!(row_text(&buf, 1).contains("Compiling"));
        assert!(row_text(&buf, 4).contains("tooltip: cargo"));
        assert!(row_text(&buf, 5).contains(" busy "));
    }
}
