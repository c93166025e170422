//! Colors and styles for the terminal host.
//!
//! The shimmer label itself is colored by the render plan; the theme only
//! covers the frame around it and the background the plan composites onto.

use cs_core::Rgba;
use ratatui::style::{Color, Modifier, Style};

use crate::backend::ColorMode;

/// Theme configuration for the host.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Background the label's colors are composited onto.
    pub background: Rgba,

    /// How label colors reach the terminal.
    pub color_mode: ColorMode,

    /// Style for the panel border.
    pub border_style: Style,

    /// Style for the panel title.
    pub title_style: Style,

    /// Style for the tooltip line.
    pub tooltip_style: Style,

    /// Style for applied tags.
    pub tag_style: Style,

    /// Style for the key hint line.
    pub hint_style: Style,
}

impl Theme {
    /// Truecolor theme for dark terminal backgrounds.
    #[must_use]
    pub fn dark() -> Self {
        Self {
            background: Rgba::from_rgb8(24, 24, 32),
            color_mode: ColorMode::TrueColor,
            border_style: Style::default().fg(Color::Rgb(80, 80, 100)),
            title_style: Style::default()
                .fg(Color::Rgb(100, 150, 255))
                .add_modifier(Modifier::BOLD),
            tooltip_style: Style::default().fg(Color::Rgb(180, 180, 180)),
            tag_style: Style::default()
                .fg(Color::Rgb(24, 24, 32))
                .bg(Color::Rgb(100, 150, 255)),
            hint_style: Style::default().fg(Color::Rgb(128, 128, 128)),
        }
    }

    /// Theme without colors, for `--no-color` and dumb terminals.
    #[must_use]
    pub fn monochrome() -> Self {
        Self {
            background: Rgba::BLACK,
            color_mode: ColorMode::Monochrome,
            border_style: Style::default(),
            title_style: Style::default().add_modifier(Modifier::BOLD),
            tooltip_style: Style::default().add_modifier(Modifier::ITALIC),
            tag_style: Style::default().add_modifier(Modifier::REVERSED),
            hint_style: Style::default().add_modifier(Modifier::DIM),
        }
    }

    /// Picks the theme for a color mode.
    #[must_use]
    pub fn for_mode(mode: ColorMode) -> Self {
        match mode {
            ColorMode::TrueColor => Self::dark(),
            ColorMode::Monochrome => Self::monochrome(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_mode() {
        assert_eq!(Theme::for_mode(ColorMode::TrueColor), Theme::dark());
        assert_eq!(Theme::for_mode(ColorMode::Monochrome), Theme::monochrome());
        assert_eq!(Theme::default(), Theme::dark());
    }

    #[test]
    fn test_monochrome_has_no_colors() {
        let theme = Theme::monochrome();
        for style in [
            theme.border_style,
            theme.title_style,
            theme.tooltip_style,
            theme.tag_style,
            theme.hint_style,
        ] {
            assert_eq!(style.fg, None);
            assert_eq!(style.bg, None);
        }
    }
}
