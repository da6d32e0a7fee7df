use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::{parse_instant, OutputFormat};

/// Holiday banner rules: pick, normalize, lint and watch catalogs.
///
/// Every instant is local wall-clock time. The clock is read only when no
/// `--at`, `HOLIDAY_DATE_OVERRIDE` or config `date_override` is given.
#[derive(Parser, Debug)]
#[command(name = "holiday", version, about = "Holiday banner rule engine")]
pub struct CliArgs {
    /// Path to config file (default: ~/.config/holiday/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log line format on stderr
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the holiday active at an instant
    Pick(PickArgs),
    /// Print the canonical catalog as JSON
    Normalize(CatalogArgs),
    /// Report dropped records and rules that can never match
    Lint(CatalogArgs),
    /// Hot-reload the catalog and print the winner whenever it changes
    Watch(WatchArgs),
}

#[derive(Args, Debug)]
pub struct CatalogArgs {
    /// Catalog file or directory (overrides env var and config file)
    #[arg(long, env = "HOLIDAY_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Output format (overrides env var and config file)
    #[arg(long, env = "HOLIDAY_OUTPUT", value_enum)]
    pub output: Option<OutputFormat>,
}

#[derive(Args, Debug)]
pub struct PickArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Local instant to evaluate, e.g. 2025-12-24T18:00
    #[arg(long, env = "HOLIDAY_DATE_OVERRIDE", value_parser = parse_instant)]
    pub at: Option<NaiveDateTime>,

    /// Print every matching holiday in rank order instead of the winner only
    #[arg(long)]
    pub all: bool,
}

#[derive(Args, Debug)]
pub struct WatchArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Fixed local instant to evaluate on every tick
    #[arg(long, env = "HOLIDAY_DATE_OVERRIDE", value_parser = parse_instant)]
    pub at: Option<NaiveDateTime>,

    /// Seconds between evaluations
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval_secs: u64,
}
