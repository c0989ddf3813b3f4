//! Logs command - view and manage the local event log

use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use super::get_gastos_dir;
use crate::output;
use gastos_core::services::logging::now_ms;
use gastos_core::services::LogEntry;
use gastos_core::{EntryPoint, LoggingService};

#[derive(Subcommand)]
pub enum LogsCommands {
    /// Show recent log entries
    List {
        /// Number of entries to show
        #[arg(short, long, default_value = "50")]
        limit: usize,
        /// Show only errors
        #[arg(long)]
        errors: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Clear old log entries
    Clear {
        /// Delete logs older than N days
        #[arg(long, default_value = "30")]
        older_than_days: u64,
        /// Skip confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Copy the log database for troubleshooting
    Export {
        /// Destination file
        #[arg(short, long, default_value = "gastos-logs.duckdb")]
        output: PathBuf,
    },
    /// Show log statistics and database path
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn get_logging_service() -> Result<LoggingService> {
    let gastos_dir = get_gastos_dir()?;
    std::fs::create_dir_all(&gastos_dir)?;
    LoggingService::new(&gastos_dir, EntryPoint::Cli, env!("CARGO_PKG_VERSION"))
}

fn format_timestamp(timestamp_ms: i64) -> String {
    use chrono::{TimeZone, Utc};
    Utc.timestamp_millis_opt(timestamp_ms)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| timestamp_ms.to_string())
}

fn entries_table(entries: &[LogEntry]) -> comfy_table::Table {
    let mut table = output::create_table();
    table.set_header(vec!["Time", "Entry", "Event", "Where", "Error"]);

    for entry in entries {
        let location = [entry.command.as_deref(), entry.route.as_deref(), entry.source.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");

        table.add_row(vec![
            format_timestamp(entry.timestamp),
            entry.entry_point.clone(),
            entry.event.clone(),
            location,
            entry.error_message.clone().unwrap_or_default().red().to_string(),
        ]);
    }
    table
}

fn list(limit: usize, errors_only: bool, json: bool) -> Result<()> {
    let service = get_logging_service()?;
    let entries = if errors_only {
        service.get_errors(limit)?
    } else {
        service.get_recent(limit)?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else if entries.is_empty() {
        println!("No log entries found.");
    } else {
        println!("{}", entries_table(&entries));
    }
    Ok(())
}

fn clear(older_than_days: u64, force: bool, json: bool) -> Result<()> {
    let service = get_logging_service()?;
    let cutoff_ms = now_ms() - (older_than_days as i64 * 24 * 60 * 60 * 1000);

    if !force && !json {
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(format!("Delete logs older than {} days?", older_than_days))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let deleted = service.delete_before(cutoff_ms)?;
    if json {
        println!("{}", serde_json::json!({ "deleted": deleted }));
    } else {
        println!("Deleted {} log entries", deleted);
    }
    Ok(())
}

fn stats(json: bool) -> Result<()> {
    let service = get_logging_service()?;
    let total = service.count()?;
    let errors = service.error_count()?;
    let db_path = service.db_path();
    let size_bytes = std::fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);

    if json {
        println!(
            "{}",
            serde_json::json!({
                "total_entries": total,
                "error_count": errors,
                "database_path": db_path.to_string_lossy(),
                "database_size_bytes": size_bytes
            })
        );
        return Ok(());
    }

    println!("{}", "Event log".bold());
    println!("  Entries:  {}", total);
    println!("  Errors:   {}", errors);
    println!("  Database: {} ({})", db_path.display(), output::format_size(size_bytes));
    Ok(())
}

pub fn run(command: LogsCommands) -> Result<()> {
    match command {
        LogsCommands::List { limit, errors, json } => list(limit, errors, json),
        LogsCommands::Clear {
            older_than_days,
            force,
            json,
        } => clear(older_than_days, force, json),
        LogsCommands::Export { output: path } => {
            let written = get_logging_service()?.export(&path)?;
            output::success(&format!("Logs exported to {}", written.display()));
            Ok(())
        }
        LogsCommands::Stats { json } => stats(json),
    }
}
