use anyhow::Result;
use chrono::NaiveDateTime;
use crossterm::{
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use holiday_rules::loader::{LoadResult, LoadStatus};
use holiday_rules::schema::{DatePredicate, MonthDay};
use holiday_rules::{Holiday, ValidationResult};
use serde_json::json;
use std::io::{self, Write};

use crate::config::OutputFormat;

/// Color scheme for terminal output.
struct Colors;

impl Colors {
    const HOLIDAY: Color = Color::Cyan;
    const ERROR: Color = Color::Red;
    const WARNING: Color = Color::Yellow;
    const DIM: Color = Color::DarkGrey;
}

/// Writes command results to stdout in the selected format.
pub struct Terminal {
    format: OutputFormat,
}

impl Terminal {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print the winner, or the full ranking when `all` is set.
    pub fn print_matches(&self, now: NaiveDateTime, ranked: &[&Holiday], all: bool) -> Result<()> {
        let shown = if all { ranked } else { &ranked[..ranked.len().min(1)] };

        if self.format == OutputFormat::Json {
            let value = if all {
                json!({ "at": now, "matches": shown })
            } else {
                json!({ "at": now, "holiday": shown.first() })
            };
            return print_json(&value);
        }

        let mut stdout = io::stdout();
        if shown.is_empty() {
            execute!(
                stdout,
                SetForegroundColor(Colors::DIM),
                Print(format!("{now}: no active holiday\n")),
                ResetColor,
            )?;
        }
        for holiday in shown {
            execute!(
                stdout,
                SetForegroundColor(Colors::DIM),
                Print(format!("{now}  ")),
                SetForegroundColor(Colors::HOLIDAY),
                Print(&holiday.id),
                ResetColor,
                Print(format!("  {}\n", summary(holiday))),
            )?;
        }
        stdout.flush()?;
        Ok(())
    }

    /// Print the canonical catalog. Always JSON.
    pub fn print_catalog(&self, catalog: &[Holiday]) -> Result<()> {
        print_json(&json!({ "holidays": catalog }))
    }

    /// Print lint diagnostics.
    pub fn print_report(&self, report: &ValidationResult) -> Result<()> {
        if self.format == OutputFormat::Json {
            return print_json(report);
        }

        let mut stdout = io::stdout();
        for error in &report.errors {
            execute!(
                stdout,
                SetForegroundColor(Colors::ERROR),
                Print("error"),
                ResetColor,
                Print(format!("   {}: {}\n", error.path, error.message)),
            )?;
        }
        for warning in &report.warnings {
            execute!(
                stdout,
                SetForegroundColor(Colors::WARNING),
                Print("warning"),
                ResetColor,
                Print(format!(" {}: {}\n", warning.path, warning.message)),
            )?;
            if let Some(suggestion) = &warning.suggestion {
                execute!(
                    stdout,
                    SetForegroundColor(Colors::DIM),
                    Print(format!("        {suggestion}\n")),
                    ResetColor,
                )?;
            }
        }
        execute!(
            stdout,
            Print(format!(
                "{} error(s), {} warning(s)\n",
                report.errors.len(),
                report.warnings.len()
            )),
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Print per-file problems from a catalog load. Successful files are silent.
    pub fn print_load_problems(&self, results: &[LoadResult]) -> Result<()> {
        if self.format == OutputFormat::Json {
            return Ok(());
        }
        let mut stdout = io::stdout();
        for result in results {
            let line = match &result.status {
                LoadStatus::Failed { error } => format!("{}: {error}\n", result.path.display()),
                LoadStatus::Loaded { rejected, .. } if *rejected > 0 => format!(
                    "{}: {rejected} element(s) are not holiday records\n",
                    result.path.display()
                ),
                _ => continue,
            };
            execute!(
                stdout,
                SetForegroundColor(Colors::ERROR),
                Print("file"),
                ResetColor,
                Print(format!("    {line}")),
            )?;
        }
        stdout.flush()?;
        Ok(())
    }
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

/// One-line description of a rule: priority, predicate and banner text.
pub fn summary(holiday: &Holiday) -> String {
    let mut line = format!("priority={} {}", holiday.priority, describe(&holiday.predicate));
    if let Some(text) = holiday.content.as_ref().and_then(|c| c.text.as_deref()) {
        line.push_str(&format!("  \"{text}\""));
    }
    line
}

/// Compact predicate notation: `01-01`, `12-20..=01-06`, `02-12,02-13`.
pub fn describe(predicate: &DatePredicate) -> String {
    fn md(day: MonthDay) -> String {
        format!("{:02}-{:02}", day.month(), day.day())
    }

    match predicate {
        DatePredicate::Single(day) => md(*day),
        DatePredicate::Range(range) => {
            let op = if range.inclusive { "..=" } else { "<..<" };
            format!("{}{op}{}", md(range.start), md(range.end))
        }
        DatePredicate::Multi(days) => days.iter().map(|d| md(*d)).collect::<Vec<_>>().join(","),
    }
}
