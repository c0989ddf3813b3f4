//! Aggregate command - run the engine on a grid offline

use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::get_gastos_dir;
use crate::output;
use gastos_core::config::Config;
use gastos_core::services::summarize;
use gastos_core::{ColumnPolicy, Grid, OperationResult};

/// Accepted inputs: a bare 2-D array, or a `/api/sheets` payload
#[derive(Deserialize)]
#[serde(untagged)]
enum GridInput {
    Rows(Vec<Vec<JsonValue>>),
    Payload { values: Vec<Vec<JsonValue>> },
}

pub fn parse_grid(text: &str) -> Result<Grid> {
    let input: GridInput = serde_json::from_str(text)
        .context("Input must be a JSON array of rows or an object with a \"values\" array")?;
    let rows = match input {
        GridInput::Rows(rows) | GridInput::Payload { values: rows } => rows,
    };
    Ok(Grid::from_json_rows(rows))
}

fn resolve_policy(name: Option<&str>) -> Result<ColumnPolicy> {
    match name {
        Some(name) => ColumnPolicy::preset(name)
            .with_context(|| format!("Unknown column policy: {}. Available: headers, letters", name)),
        None => Ok(Config::load(&get_gastos_dir()?)
            .map(|config| config.column_policy)
            .unwrap_or_default()),
    }
}

pub fn run(file: Option<&Path>, policy: Option<&str>, json: bool) -> Result<()> {
    let text = if let Some(path) = file {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read grid file: {:?}", path))?
    } else if atty::isnt(atty::Stream::Stdin) {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read grid from stdin")?;
        buffer
    } else {
        anyhow::bail!("No grid provided. Use --file or pipe JSON from stdin.");
    };

    let grid = parse_grid(&text)?;
    let policy = resolve_policy(policy)?;
    let summary = summarize(&grid, &policy)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&OperationResult::ok(&summary))?);
    } else {
        println!("{}", output::summary_table(&summary));
        println!("{} row(s) used", summary.rows_used);
    }
    Ok(())
}
