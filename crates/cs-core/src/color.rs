//! RGBA colors and color-string parsing.
//!
//! Colors are stored as straight (non-premultiplied) `f64` channels in
//! `[0, 1]`. [`Rgba::parse`] accepts the same families of color strings a
//! desktop panel stylesheet would:
//!
//! - `#rgb`, `#rrggbb`, `#rrrgggbbb`, `#rrrrggggbbbb`
//! - `rgb(r, g, b)` and `rgba(r, g, b, a)`, channels as `0-255` or percentages
//! - a small set of named colors (`white`, `black`, `red`, ..., `transparent`)
//!
//! # Examples
//!
//! ```
//! use cs_core::Rgba;
//!
//! let color: Rgba = "#C7D3FF".parse().unwrap();
//! assert_eq!(color.to_rgb8(), (0xC7, 0xD3, 0xFF));
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// A straight-alpha RGBA color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    /// Red channel.
    pub red: f64,
    /// Green channel.
    pub green: f64,
    /// Blue channel.
    pub blue: f64,
    /// Alpha channel.
    pub alpha: f64,
}

impl Rgba {
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Creates a color from raw channel values.
    #[inline]
    #[must_use]
    pub const fn new(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from 8-bit channels.
    #[must_use]
    pub fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::new(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
            1.0,
        )
    }

    /// Returns the same color with a different alpha, clamped to `[0, 1]`.
    #[inline]
    #[must_use]
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Returns the color channels as 8-bit values, ignoring alpha.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let quantize = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        (
            quantize(self.red),
            quantize(self.green),
            quantize(self.blue),
        )
    }

    /// Parses a color string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidColor`] if the string is not one of the
    /// supported forms.
    pub fn parse(input: &str) -> Result<Self, ConfigError> {
        let trimmed = input.trim();
        let invalid = || ConfigError::InvalidColor(input.to_owned());

        if let Some(hex) = trimmed.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(invalid);
        }

        let lower = trimmed.to_ascii_lowercase();
        if let Some(args) = function_args(&lower, "rgba") {
            return parse_channels(args, true).ok_or_else(invalid);
        }
        if let Some(args) = function_args(&lower, "rgb") {
            return parse_channels(args, false).ok_or_else(invalid);
        }

        named(&lower).ok_or_else(invalid)
    }
}

impl FromStr for Rgba {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b) = self.to_rgb8();
        write!(f, "#{r:02X}{g:02X}{b:02X}")?;
        if self.alpha < 1.0 {
            write!(f, " @ {:.2}", self.alpha)?;
        }
        Ok(())
    }
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let digits = match hex.len() {
        3 | 6 | 9 | 12 => hex.len() / 3,
        _ => return None,
    };
    let max = f64::from((1_u32 << (4 * digits)) - 1);
    let channel = |index: usize| -> Option<f64> {
        let start = index * digits;
        let raw = u32::from_str_radix(hex.get(start..start + digits)?, 16).ok()?;
        Some(f64::from(raw) / max)
    };
    Some(Rgba::new(channel(0)?, channel(1)?, channel(2)?, 1.0))
}

fn function_args<'a>(input: &'a str, name: &str) -> Option<&'a str> {
    input
        .strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

fn parse_channels(args: &str, with_alpha: bool) -> Option<Rgba> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    let expected = if with_alpha { 4 } else { 3 };
    if parts.len() != expected {
        return None;
    }

    let channel = |raw: &str| -> Option<f64> {
        let value = if let Some(percent) = raw.strip_suffix('%') {
            percent.trim().parse::<f64>().ok()? / 100.0
        } else {
            raw.parse::<f64>().ok()? / 255.0
        };
        value.is_finite().then(|| value.clamp(0.0, 1.0))
    };

    let alpha = if with_alpha {
        let a = parts[3].parse::<f64>().ok()?;
        if !a.is_finite() {
            return None;
        }
        a.clamp(0.0, 1.0)
    } else {
        1.0
    };

    Some(Rgba::new(
        channel(parts[0])?,
        channel(parts[1])?,
        channel(parts[2])?,
        alpha,
    ))
}

/// Named colors, using the X11 values a GTK panel would resolve them to.
fn named(name: &str) -> Option<Rgba> {
    let color = match name {
        "transparent" => return Some(Rgba::TRANSPARENT),
        "black" => Rgba::from_rgb8(0, 0, 0),
        "white" => Rgba::from_rgb8(255, 255, 255),
        "red" => Rgba::from_rgb8(255, 0, 0),
        "green" => Rgba::from_rgb8(0, 255, 0),
        "blue" => Rgba::from_rgb8(0, 0, 255),
        "yellow" => Rgba::from_rgb8(255, 255, 0),
        "cyan" => Rgba::from_rgb8(0, 255, 255),
        "magenta" => Rgba::from_rgb8(255, 0, 255),
        "orange" => Rgba::from_rgb8(255, 165, 0),
        "purple" => Rgba::from_rgb8(160, 32, 240),
        "gray" | "grey" => Rgba::from_rgb8(190, 190, 190),
        _ => return None,
    };
    Some(color)
}
