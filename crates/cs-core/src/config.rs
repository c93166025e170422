//! Configuration for the shimmer widget.
//!
//! Configuration reaches the widget as a flat list of [`ConfigEntry`] values,
//! where each value is itself a small JSON literal (`1600`, `"#FFFFFF"`,
//! `"~/.cache/codex-shimmer/latest.json"`). [`ShimmerConfig::from_entries`]
//! turns that list into a validated, clamped, immutable configuration:
//!
//! | Key | Type | Default | Range |
//! |-----|------|---------|-------|
//! | `cache_path` | string | `~/.cache/codex-shimmer/latest.json` | `~` expanded |
//! | `period_ms` | number | 1600 | ≥ 200 |
//! | `pause_ms` | number | 500 | ≥ 0 |
//! | `width_chars` (alias `width`) | number | 4 | 1..=20 |
//! | `tick_ms` | number | 33 | 5..=1000 |
//! | `cycles` | number | 1 | 0.1..=6 |
//! | `highlight_alpha` | number | 0.35 | 0..=1 |
//! | `base_alpha` | number | 1.0 | 0..=1 |
//! | `base_color` | color string | `#C7D3FF` | |
//! | `highlight_color` | color string | `#FFFFFF` | |
//!
//! Initialization never fails. A value that is not valid JSON, or has the
//! wrong JSON type, is logged and replaced by its default.

use std::str::FromStr;

use camino::Utf8PathBuf;
use serde_json::Value;
use tracing::warn;

use crate::color::Rgba;
use crate::error::ConfigError;

/// Application directory name under `~/.cache`.
pub const APP_NAME: &str = "codex-shimmer";

/// Default sweep duration in milliseconds.
pub const DEFAULT_PERIOD_MS: f64 = 1600.0;
/// Minimum sweep duration in milliseconds.
pub const MIN_PERIOD_MS: f64 = 200.0;
/// Default idle gap after each sweep in milliseconds.
pub const DEFAULT_PAUSE_MS: f64 = 500.0;
/// Default band width in average glyph widths.
pub const DEFAULT_WIDTH_CHARS: f64 = 4.0;
/// Allowed band width range in average glyph widths.
pub const WIDTH_CHARS_RANGE: (f64, f64) = (1.0, 20.0);
/// Default redraw cadence in milliseconds.
pub const DEFAULT_TICK_MS: u32 = 33;
/// Allowed redraw cadence range in milliseconds.
pub const TICK_MS_RANGE: (u32, u32) = (5, 1000);
/// Default repetition count.
pub const DEFAULT_CYCLES: f64 = 1.0;
/// Allowed repetition count range.
pub const CYCLES_RANGE: (f64, f64) = (0.1, 6.0);
/// Default peak highlight opacity.
pub const DEFAULT_HIGHLIGHT_ALPHA: f64 = 0.35;
/// Default base text opacity.
pub const DEFAULT_BASE_ALPHA: f64 = 1.0;
/// Default base text color (`#C7D3FF`).
pub const DEFAULT_BASE_COLOR: Rgba = Rgba::new(199.0 / 255.0, 211.0 / 255.0, 1.0, 1.0);
/// Default highlight color (`#FFFFFF`).
pub const DEFAULT_HIGHLIGHT_COLOR: Rgba = Rgba::WHITE;

/// A single configuration key with a JSON-literal value.
///
/// # Examples
///
/// ```
/// use cs_core::ConfigEntry;
///
/// let entry: ConfigEntry = "period_ms=1200".parse().unwrap();
/// assert_eq!(entry.key, "period_ms");
/// assert_eq!(entry.value, "1200");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    /// Option name.
    pub key: String,
    /// Raw JSON literal.
    pub value: String,
}

impl ConfigEntry {
    /// Creates a new entry.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Converts a JSON object into entries, one per member.
    ///
    /// Member values are re-serialized so they go through the same
    /// literal parsing as every other source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] if `value` is not an object.
    pub fn from_json_object(value: &Value) -> Result<Vec<Self>, ConfigError> {
        let Value::Object(members) = value else {
            return Err(ConfigError::invalid_option(
                "<root>",
                "configuration file must contain a JSON object",
            ));
        };
        Ok(members
            .iter()
            .map(|(key, value)| Self::new(key.clone(), value.to_string()))
            .collect())
    }
}

impl FromStr for ConfigEntry {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, value) = s
            .split_once('=')
            .ok_or_else(|| ConfigError::invalid_option(s, "expected KEY=VALUE"))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(ConfigError::invalid_option(s, "empty key"));
        }
        Ok(Self::new(key, value.trim()))
    }
}

/// Validated animation and appearance parameters.
///
/// Every field is within its documented range once constructed; consumers
/// never re-validate. The struct is immutable: fields are private and read
/// through accessors.
///
/// # Examples
///
/// ```
/// use cs_core::{ConfigEntry, ShimmerConfig};
///
/// let config = ShimmerConfig::from_entries(&[
///     ConfigEntry::new("period_ms", "50"),
///     ConfigEntry::new("width_chars", "50"),
///     ConfigEntry::new("tick_ms", "1"),
/// ]);
/// assert_eq!(config.period_ms(), 200.0);
/// assert_eq!(config.width_chars(), 20.0);
/// assert_eq!(config.tick_ms(), 5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ShimmerConfig {
    cache_path: Utf8PathBuf,
    period_ms: f64,
    pause_ms: f64,
    width_chars: f64,
    tick_ms: u32,
    cycles: f64,
    highlight_alpha: f64,
    base_alpha: f64,
    base_color: Rgba,
    highlight_color: Rgba,
}

impl Default for ShimmerConfig {
    fn default() -> Self {
        Self::from_entries(&[])
    }
}

impl ShimmerConfig {
    /// Builds a configuration from raw entries, falling back to defaults.
    ///
    /// When a key appears more than once, the first occurrence wins.
    #[must_use]
    pub fn from_entries(entries: &[ConfigEntry]) -> Self {
        let reader = EntryReader { entries };

        let cache_path = reader
            .string("cache_path")
            .map_or_else(default_cache_path, |raw| expand_user_path(&raw));

        let period_ms = reader.number("period_ms", DEFAULT_PERIOD_MS);
        let width_chars = if reader.contains("width_chars") {
            reader.number("width_chars", DEFAULT_WIDTH_CHARS)
        } else {
            reader.number("width", DEFAULT_WIDTH_CHARS)
        };
        let pause_ms = reader.number("pause_ms", DEFAULT_PAUSE_MS);
        let cycles = reader.number("cycles", DEFAULT_CYCLES);
        let tick_ms = reader.unsigned("tick_ms", DEFAULT_TICK_MS);
        let base_color = reader.color("base_color", DEFAULT_BASE_COLOR);
        let highlight_color = reader.color("highlight_color", DEFAULT_HIGHLIGHT_COLOR);
        let highlight_alpha = reader
            .number("highlight_alpha", DEFAULT_HIGHLIGHT_ALPHA)
            .clamp(0.0, 1.0);
        let base_alpha = reader
            .number("base_alpha", DEFAULT_BASE_ALPHA)
            .clamp(0.0, 1.0);

        Self {
            cache_path,
            period_ms: period_ms.max(MIN_PERIOD_MS),
            pause_ms: pause_ms.max(0.0),
            width_chars: width_chars.clamp(WIDTH_CHARS_RANGE.0, WIDTH_CHARS_RANGE.1),
            tick_ms: tick_ms.clamp(TICK_MS_RANGE.0, TICK_MS_RANGE.1),
            cycles: cycles.clamp(CYCLES_RANGE.0, CYCLES_RANGE.1),
            highlight_alpha,
            base_alpha,
            base_color: base_color.with_alpha(base_alpha),
            highlight_color: highlight_color.with_alpha(highlight_alpha),
        }
    }

    /// Path of the JSON cache file.
    #[must_use]
    pub fn cache_path(&self) -> &Utf8PathBuf {
        &self.cache_path
    }

    /// Duration of one sweep traversal in milliseconds.
    #[must_use]
    pub const fn period_ms(&self) -> f64 {
        self.period_ms
    }

    /// Idle gap after each sweep in milliseconds.
    #[must_use]
    pub const fn pause_ms(&self) -> f64 {
        self.pause_ms
    }

    /// Nominal band width in average glyph widths.
    #[must_use]
    pub const fn width_chars(&self) -> f64 {
        self.width_chars
    }

    /// Redraw cadence in milliseconds.
    #[must_use]
    pub const fn tick_ms(&self) -> u32 {
        self.tick_ms
    }

    /// Repetition count.
    ///
    /// Parsed and clamped for compatibility with existing panel
    /// configurations; the sweep itself always runs once per
    /// `period_ms + pause_ms`.
    #[must_use]
    pub const fn cycles(&self) -> f64 {
        self.cycles
    }

    /// Peak highlight opacity.
    #[must_use]
    pub const fn highlight_alpha(&self) -> f64 {
        self.highlight_alpha
    }

    /// Base text opacity.
    #[must_use]
    pub const fn base_alpha(&self) -> f64 {
        self.base_alpha
    }

    /// Base text color, alpha already set to [`base_alpha`](Self::base_alpha).
    #[must_use]
    pub const fn base_color(&self) -> Rgba {
        self.base_color
    }

    /// Highlight color, alpha already set to
    /// [`highlight_alpha`](Self::highlight_alpha).
    #[must_use]
    pub const fn highlight_color(&self) -> Rgba {
        self.highlight_color
    }
}

/// Returns `~/.cache/codex-shimmer/latest.json`.
///
/// Falls back to a relative `.cache/...` path when the home directory is
/// unknown.
#[must_use]
pub fn default_cache_path() -> Utf8PathBuf {
    home_dir()
        .unwrap_or_default()
        .join(".cache")
        .join(APP_NAME)
        .join("latest.json")
}

/// Expands a leading `~` to the user's home directory.
///
/// # Examples
///
/// ```
/// use cs_core::config::expand_user_path;
///
/// assert_eq!(expand_user_path("/tmp/latest.json").as_str(), "/tmp/latest.json");
/// assert!(!expand_user_path("~/latest.json").as_str().starts_with('~'));
/// ```
#[must_use]
pub fn expand_user_path(path: &str) -> Utf8PathBuf {
    match (path.strip_prefix('~'), home_dir()) {
        (Some(rest), Some(home)) => home.join(rest.trim_start_matches('/')),
        _ => Utf8PathBuf::from(path),
    }
}

fn home_dir() -> Option<Utf8PathBuf> {
    dirs::home_dir().and_then(|home| Utf8PathBuf::from_path_buf(home).ok())
}

/// Typed lookups over the raw entry list.
struct EntryReader<'a> {
    entries: &'a [ConfigEntry],
}

impl EntryReader<'_> {
    fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|entry| entry.key == key)
    }

    fn literal(&self, key: &str) -> Option<Result<Value, ConfigError>> {
        let entry = self.entries.iter().find(|entry| entry.key == key)?;
        Some(
            serde_json::from_str(&entry.value)
                .map_err(|e| ConfigError::invalid_option(key, e.to_string())),
        )
    }

    /// Runs `extract` on the literal for `key`, logging and discarding
    /// any failure.
    fn extract<T>(
        &self,
        key: &str,
        extract: impl FnOnce(&Value) -> Result<T, ConfigError>,
    ) -> Option<T> {
        let parsed = self.literal(key)?.and_then(|value| extract(&value));
        match parsed {
            Ok(value) => Some(value),
            Err(error) => {
                warn!(option = key, error = %error, "Ignoring configuration value, using default");
                None
            }
        }
    }

    fn number(&self, key: &str, fallback: f64) -> f64 {
        self.extract(key, |value| {
            value
                .as_f64()
                .ok_or_else(|| ConfigError::invalid_option(key, "expected a number"))
        })
        .unwrap_or(fallback)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn unsigned(&self, key: &str, fallback: u32) -> u32 {
        self.extract(key, |value| {
            let Value::Number(number) = value else {
                return Err(ConfigError::invalid_option(key, "expected a number"));
            };
            let integer = number
                .as_i64()
                .or_else(|| number.as_u64().map(|n| i64::try_from(n).unwrap_or(i64::MAX)))
                .or_else(|| number.as_f64().map(|n| n.trunc() as i64))
                .unwrap_or_default();
            Ok(u32::try_from(integer.max(0)).unwrap_or(u32::MAX))
        })
        .unwrap_or(fallback)
    }

    fn string(&self, key: &str) -> Option<String> {
        self.extract(key, |value| {
            value
                .as_str()
                .map(str::to_owned)
                .ok_or_else(|| ConfigError::invalid_option(key, "expected a string"))
        })
    }

    fn color(&self, key: &str, fallback: Rgba) -> Rgba {
        self.extract(key, |value| {
            value
                .as_str()
                .ok_or_else(|| ConfigError::invalid_option(key, "expected a color string"))
                .and_then(Rgba::parse)
        })
        .unwrap_or(fallback)
    }
}
