mod cli;
mod config;
mod terminal;

use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use holiday_rules::loader::{LoadResult, LoadStatus};
use holiday_rules::{matching, HolidayLoader};

use crate::cli::{CatalogArgs, CliArgs, Command, LogFormat, PickArgs, WatchArgs};
use crate::config::{reference_instant, CliConfig};
use crate::terminal::Terminal;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // `.env` must be read before clap resolves `env = ...` defaults.
    dotenvy::dotenv().ok();

    let args = CliArgs::parse();
    init_tracing(args.log_format);

    let config = CliConfig::load(args.config.as_deref()).context("failed to load configuration")?;

    match args.command {
        Command::Pick(pick) => run_pick(&config, pick),
        Command::Normalize(catalog) => run_normalize(&config, catalog),
        Command::Lint(catalog) => run_lint(&config, catalog),
        Command::Watch(watch) => run_watch(&config, watch).await,
    }
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

/// Load the catalog, failing only when the root itself cannot be read.
fn load_catalog(path: &Path) -> Result<(HolidayLoader, Vec<LoadResult>)> {
    let loader = HolidayLoader::new(path);
    let results = loader
        .load_all()
        .with_context(|| format!("failed to load catalog {}", path.display()))?;
    info!(
        path = %loader.root().display(),
        files = loader.file_count(),
        records = loader.records().len(),
        "catalog loaded"
    );
    Ok((loader, results))
}

fn run_pick(config: &CliConfig, args: PickArgs) -> Result<ExitCode> {
    let catalog_path = config.resolve_catalog(args.catalog.catalog.as_deref());
    let terminal = Terminal::new(config.resolve_output(args.catalog.output));
    let now = reference_instant(config.resolve_override(args.at)?);

    let (loader, _) = load_catalog(&catalog_path)?;
    let catalog = loader.catalog();
    let ranked = matching(&catalog, now);
    terminal.print_matches(now, &ranked, args.all)?;
    Ok(ExitCode::SUCCESS)
}

fn run_normalize(config: &CliConfig, args: CatalogArgs) -> Result<ExitCode> {
    let catalog_path = config.resolve_catalog(args.catalog.as_deref());
    let terminal = Terminal::new(config.resolve_output(args.output));

    let (loader, _) = load_catalog(&catalog_path)?;
    terminal.print_catalog(&loader.catalog())?;
    Ok(ExitCode::SUCCESS)
}

fn run_lint(config: &CliConfig, args: CatalogArgs) -> Result<ExitCode> {
    let catalog_path = config.resolve_catalog(args.catalog.as_deref());
    let terminal = Terminal::new(config.resolve_output(args.output));

    let (loader, results) = load_catalog(&catalog_path)?;
    terminal.print_load_problems(&results)?;
    let report = loader.validate();
    terminal.print_report(&report)?;

    let failed_files = results
        .iter()
        .any(|r| matches!(r.status, LoadStatus::Failed { .. }));
    if report.valid && !failed_files {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

async fn run_watch(config: &CliConfig, args: WatchArgs) -> Result<ExitCode> {
    let catalog_path = config.resolve_catalog(args.catalog.catalog.as_deref());
    let terminal = Terminal::new(config.resolve_output(args.catalog.output));
    let fixed = config.resolve_override(args.at)?;

    let (mut loader, _) = load_catalog(&catalog_path)?;
    loader.watch().context("failed to start catalog watcher")?;

    let mut ticker = tokio::time::interval(Duration::from_secs(args.interval_secs));
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let mut last_generation = loader.generation();
    // Outer `None` until the first tick has printed.
    let mut last_winner: Option<Option<String>> = None;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let generation = loader.generation();
                if generation != last_generation {
                    info!(generation, "catalog changed on disk");
                    last_generation = generation;
                }

                let now = reference_instant(fixed);
                let catalog = loader.catalog();
                let ranked = matching(&catalog, now);
                let winner = ranked.first().map(|h| h.id.clone());
                if last_winner.as_ref() != Some(&winner) {
                    if let Err(e) = terminal.print_matches(now, &ranked, false) {
                        warn!(error = %e, "failed to print winner");
                    }
                    last_winner = Some(winner);
                }
            }
            result = &mut shutdown => {
                if let Err(e) = result {
                    warn!(error = %e, "failed to listen for ctrl-c");
                }
                info!("watch stopped");
                break;
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
