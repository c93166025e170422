//! Terminal host for the codex-shimmer widget.
//!
//! Runs a shimmer panel in the terminal, driven by the JSON cache file a
//! producer writes, or prints what the widget would load from it.
//!
//! # Usage
//!
//! ```bash
//! # Host the panel (default command)
//! codex-shimmer run --cache-path ~/.cache/codex-shimmer/latest.json
//!
//! # Tweak the animation
//! codex-shimmer --set period_ms=1200 --set highlight_color='#ffd700'
//!
//! # Print the parsed cache content
//! codex-shimmer inspect
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

use std::io::Write;

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use color_eyre::eyre::{WrapErr, eyre};
use cs_core::{ConfigEntry, ShimmerConfig, loader};
use cs_panel::{CellMetrics, ColorMode, RunOptions};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// CLI ARGUMENT TYPES
// =============================================================================

/// Animated shimmer label driven by a JSON cache file.
#[derive(Parser)]
#[command(name = "codex-shimmer", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Command to execute (defaults to `run`).
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path of the JSON cache file.
    #[arg(short, long, global = true, env = "CODEX_SHIMMER_CACHE")]
    cache_path: Option<String>,

    /// Configuration entry as KEY=VALUE; may be repeated.
    ///
    /// VALUE is a JSON literal. Anything that is not valid JSON is taken as
    /// a string, so `--set base_color=#ff8800` works unquoted.
    #[arg(short, long = "set", value_name = "KEY=VALUE", global = true)]
    set: Vec<ConfigEntry>,

    /// JSON file holding an object of configuration entries.
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<Utf8PathBuf>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
}

/// Available subcommands.
#[derive(Subcommand, Clone, Copy)]
enum Commands {
    /// Host the shimmer panel in the terminal.
    Run,

    /// Load the cache file once and print the parsed content as JSON.
    Inspect,
}

// =============================================================================
// INITIALIZATION FUNCTIONS
// =============================================================================

/// Initializes the tracing subscriber.
///
/// Respects `RUST_LOG` if set, otherwise `debug` with `--verbose` and
/// `info` by default. Logs go to stderr so they never land in the frame.
fn init_tracing(verbose: bool, no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "info" };
        EnvFilter::new(format!("{level},mio=warn,notify=warn"))
    });

    let use_ansi = !no_color && std::env::var("NO_COLOR").is_err();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(use_ansi)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

/// Builds the entry list, highest priority first.
///
/// `ShimmerConfig::from_entries` keeps the first occurrence of a key, so the
/// order is `--cache-path`, then `--set` (last flag first), then the
/// `--config` file.
fn collect_entries(cli: &Cli) -> color_eyre::Result<Vec<ConfigEntry>> {
    let mut entries = Vec::new();

    if let Some(path) = &cli.cache_path {
        entries.push(ConfigEntry::new("cache_path", json_string(path)));
    }

    entries.extend(cli.set.iter().rev().map(|entry| {
        ConfigEntry::new(entry.key.clone(), json_literal(&entry.value))
    }));

    if let Some(file) = &cli.config {
        let raw = std::fs::read_to_string(file)
            .wrap_err_with(|| format!("cannot read config file {file}"))?;
        let value: serde_json::Value = serde_json::from_str(&raw)
            .wrap_err_with(|| format!("config file {file} is not valid JSON"))?;
        entries.extend(ConfigEntry::from_json_object(&value)?);
    }

    Ok(entries)
}

/// Keeps valid JSON literals, quotes everything else as a string.
fn json_literal(raw: &str) -> String {
    if serde_json::from_str::<serde_json::Value>(raw).is_ok() {
        raw.to_owned()
    } else {
        json_string(raw)
    }
}

fn json_string(raw: &str) -> String {
    serde_json::Value::String(raw.to_owned()).to_string()
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

/// Hosts the panel until the user quits or SIGTERM arrives.
async fn run_panel(config: ShimmerConfig, no_color: bool) -> color_eyre::Result<()> {
    info!(cache_path = %config.cache_path(), "starting panel");

    let options = RunOptions {
        color_mode: if no_color {
            ColorMode::Monochrome
        } else {
            ColorMode::TrueColor
        },
        metrics: CellMetrics::default(),
    };

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut sigterm = signal(SignalKind::terminate())?;

        tokio::select! {
            result = cs_panel::run(config, options) => {
                result.map_err(|e| eyre!("terminal host error: {e}"))?;
            }
            _ = sigterm.recv() => {
                info!("received SIGTERM, shutting down");
            }
        }
    }

    #[cfg(not(unix))]
    {
        cs_panel::run(config, options)
            .await
            .map_err(|e| eyre!("terminal host error: {e}"))?;
    }

    Ok(())
}

/// Prints the content the widget would display.
fn run_inspect(config: &ShimmerConfig) -> color_eyre::Result<()> {
    let content = loader::load(config.cache_path())?;
    let json = serde_json::to_string_pretty(&content)
        .map_err(|e| eyre!("failed to serialize content: {e}"))?;

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{json}")?;
    Ok(())
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Application entry point.
#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.no_color);

    let entries = collect_entries(&cli)?;
    let config = ShimmerConfig::from_entries(&entries);

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_panel(config, cli.no_color).await,
        Commands::Inspect => run_inspect(&config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("codex-shimmer").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_json_literal() {
        assert_eq!(json_literal("1200"), "1200");
        assert_eq!(json_literal("\"#fff\""), "\"#fff\"");
        assert_eq!(json_literal("#ff8800"), "\"#ff8800\"");
        assert_eq!(json_literal("/tmp/x.json"), "\"/tmp/x.json\"");
    }

    #[test]
    fn test_default_command_is_run() {
        let cli = parse(&[]);
        assert!(cli.command.is_none());
        assert!(matches!(parse(&["inspect"]).command, Some(Commands::Inspect)));
    }

    #[test]
    fn test_priority_order() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = Utf8PathBuf::from_path_buf(dir.path().join("config.json")).unwrap();
        std::fs::write(
            &file,
            r#"{"period_ms": 900, "pause_ms": 100, "cache_path": "/from/file.json"}"#,
        )
        .unwrap();

        let cli = parse(&[
            "--config",
            file.as_str(),
            "--set",
            "period_ms=1000",
            "--set",
            "period_ms=1100",
            "--set",
            "cache_path=/from/set.json",
            "--cache-path",
            "/from/flag.json",
        ]);
        let config = ShimmerConfig::from_entries(&collect_entries(&cli).unwrap());

        assert_eq!(config.cache_path().as_str(), "/from/flag.json");
        assert!((config.period_ms() - 1100.0).abs() < f64::EPSILON);
        assert!((config.pause_ms() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_set_color_unquoted() {
        let cli = parse(&["--set", "base_color=#000000", "--set", "base_alpha=0.5"]);
        let config = ShimmerConfig::from_entries(&collect_entries(&cli).unwrap());
        assert_eq!(config.base_color().to_rgb8(), (0, 0, 0));
        assert!((config.base_color().alpha - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bad_config_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = Utf8PathBuf::from_path_buf(dir.path().join("config.json")).unwrap();
        std::fs::write(&file, "[1, 2]").unwrap();

        let cli = parse(&["--config", file.as_str()]);
        assert!(collect_entries(&cli).is_err());
    }
}
