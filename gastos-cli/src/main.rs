//! gastos CLI - household finance dashboard in your terminal

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;
mod server;

use commands::{aggregate, demo, doctor, logs, read, serve};
use gastos_core::EntryPoint;

/// gastos - income, expenses and savings from your spreadsheet
#[derive(Parser)]
#[command(name = "gastos", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the configured range and show the summary
    Read {
        /// A1 range to read instead of the configured one
        #[arg(long)]
        range: Option<String>,
        /// Output format
        #[arg(long, default_value = "table", value_parser = ["table", "json", "csv"])]
        format: String,
        /// Output as JSON (shorthand for --format json)
        #[arg(long)]
        json: bool,
        /// Include the raw cells
        #[arg(long)]
        raw: bool,
    },

    /// Summarize a JSON grid from a file or stdin, without network access
    Aggregate {
        /// Read the grid from a file
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Column policy preset (headers, letters); defaults to settings
        #[arg(long)]
        policy: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the HTTP API
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: String,
        /// Do not require an identity token
        #[arg(long)]
        no_auth: bool,
    },

    /// Check configuration and credentials
    Doctor {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage demo mode
    Demo {
        #[command(subcommand)]
        command: Option<demo::DemoCommands>,
    },

    /// View and manage the local event log
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Read { .. } => "read",
            Commands::Aggregate { .. } => "aggregate",
            Commands::Serve { .. } => "serve",
            Commands::Doctor { .. } => "doctor",
            Commands::Demo { .. } => "demo",
            Commands::Logs { .. } => "logs",
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(logger) = commands::get_logger(EntryPoint::Cli) {
        let _ = logger.log_command(cli.command.name());
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Read { range, format, json, raw } => {
            let fmt = if json { "json".to_string() } else { format };
            read::run(range.as_deref(), &fmt, raw)
        }
        Commands::Aggregate { file, policy, json } => aggregate::run(file.as_deref(), policy.as_deref(), json),
        Commands::Serve { addr, no_auth } => serve::run(&addr, no_auth),
        Commands::Doctor { json } => doctor::run(json),
        Commands::Demo { command } => demo::run(command),
        Commands::Logs { command } => logs::run(command),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();

        let cli = Cli::try_parse_from(["gastos", "read", "--range", "2024!A1:Z", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Read { json: true, .. }));

        assert!(Cli::try_parse_from(["gastos", "read", "--format", "xml"]).is_err());
    }
}
