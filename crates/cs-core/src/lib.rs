//! Core types, configuration, and cache loading for codex-shimmer.
//!
//! This crate provides the foundational pieces shared across the workspace:
//!
//! - [`ShimmerConfig`] - validated, clamped animation and appearance settings
//! - [`Rgba`] - colors and color-string parsing
//! - [`DisplayContent`], [`TagSet`], [`TagDiff`] - what the widget shows
//! - [`loader`] - reading the producer's JSON cache file
//! - [`CacheStore`] - the current content and its measured [`Extent`]
//! - [`AnimationClock`] - elapsed time since the animation epoch
//! - Error types ([`LoadError`], [`ConfigError`])
//!
//! # Crate Dependencies
//!
//! ```text
//! cs-cli ──► cs-panel ──► cs-render ──► cs-core
//!                    ├──► cs-watcher
//!                    └──────────────────► cs-core
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod clock;
pub mod color;
pub mod config;
pub mod content;
pub mod error;
pub mod loader;
pub mod store;

pub use clock::AnimationClock;
pub use color::Rgba;
pub use config::{ConfigEntry, ShimmerConfig};
pub use content::{DisplayContent, PLACEHOLDER_TEXT, TagDiff, TagSet};
pub use error::{ConfigError, LoadError};
pub use store::{CacheStore, Extent};
