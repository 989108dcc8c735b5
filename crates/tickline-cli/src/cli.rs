//! CLI argument definitions for tickline.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `chart` | Fetch bars and derive the candlestick chart for a symbol |
//! | `windows` | List the selectable chart windows |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--strict` | `false` | Treat warnings as errors |
//! | `--timeout-ms` | `10000` | Request timeout in ms |
//! | `--no-cache` | `false` | Bypass the response cache |

use clap::{Args, Parser, Subcommand, ValueEnum};
use tickline_core::{catalog, DEFAULT_TIMEOUT_MS};

/// Candlestick chart data for a symbol.
///
/// Fetches historical bars from the remote quote service, normalizes them
/// into a time-indexed series, and derives the per-bar trend plus the bar
/// width a charting surface needs.
#[derive(Debug, Parser)]
#[command(
    name = "tickline",
    author,
    version,
    about = "Candlestick chart data for a symbol"
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Treat warnings and errors as failures (exit code 5).
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    /// Request timeout budget in milliseconds.
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Bypass the response cache for this invocation.
    #[arg(long, global = true, default_value_t = false)]
    pub no_cache: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table format for terminal display.
    Table,
    /// Single JSON object output.
    Json,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch bars and derive the candlestick chart for a symbol.
    ///
    /// # Examples
    ///
    ///   tickline chart AAPL
    ///   tickline chart ^DJI --window 4 --pretty
    Chart(ChartArgs),

    /// List the selectable chart windows (range/interval pairs).
    Windows,
}

#[derive(Debug, Args)]
pub struct ChartArgs {
    /// Ticker symbol. Passed to the quote service as-is; an unknown ticker
    /// surfaces as a service error, not a local validation failure.
    pub symbol: String,

    /// Chart window index from `tickline windows`.
    #[arg(long, default_value_t = catalog::DEFAULT_WINDOW_INDEX)]
    pub window: usize,
}
