//! Read command - fetch the configured range and summarize it

use std::io;

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use super::{block_on, get_context, get_logger, log_event};
use crate::output;
use gastos_core::services::DashboardReport;
use gastos_core::{EntryPoint, Grid, LogEvent, OperationResult, SheetValues};

/// JSON payload: the report, plus the raw cells with `--raw`
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReadPayload {
    #[serde(flatten)]
    report: DashboardReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    values: Option<Grid>,
}

pub fn run(range: Option<&str>, format: &str, raw: bool) -> Result<()> {
    let logger = get_logger(EntryPoint::Cli);
    let ctx = get_context()?;
    let source = ctx.dashboard_service.source_name().to_string();

    let result = block_on(ctx.dashboard_service.read(range))?;
    let (values, report) = match result {
        Ok(read) => {
            log_event(&logger, LogEvent::new("sheet_read").with_command("read").with_source(&source));
            read
        }
        Err(e) => {
            log_event(
                &logger,
                LogEvent::new("sheet_read_failed")
                    .with_command("read")
                    .with_source(&source)
                    .with_error(e.to_string()),
            );
            if format == "json" {
                println!("{}", serde_json::to_string_pretty(&OperationResult::<()>::fail(e.to_string()))?);
            }
            return Err(e.into());
        }
    };

    match format {
        "json" => {
            let payload = ReadPayload {
                report,
                values: raw.then_some(values.values),
            };
            println!("{}", serde_json::to_string_pretty(&OperationResult::ok(payload))?);
        }
        "csv" => {
            if raw {
                write_grid_csv(&values)?;
            } else {
                write_summary_csv(&report)?;
            }
        }
        _ => {
            println!(
                "{} {} ({})",
                "Sheet".bold(),
                report.range,
                report.source.dimmed()
            );
            println!("{}", output::summary_table(&report.summary));
            println!("{} row(s) used", report.summary.rows_used);
            if raw {
                println!();
                println!("{}", output::grid_table(&values.values));
            }
        }
    }

    Ok(())
}

fn write_grid_csv(values: &SheetValues) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(io::stdout());
    for row in values.values.rows() {
        writer.write_record(row.iter().map(|c| c.text().into_owned()))?;
    }
    writer.flush()?;
    Ok(())
}

fn write_summary_csv(report: &DashboardReport) -> Result<()> {
    let summary = &report.summary;
    let mut writer = csv::Writer::from_writer(io::stdout());
    writer.write_record(["item", "amount"])?;

    let mut record = |item: &str, amount: f64| writer.write_record([item, format!("{:.2}", amount).as_str()]);
    record("income", summary.totals.income)?;
    for category in &summary.expenses_by_category {
        record(&category.name, category.amount)?;
    }
    record("expenses", summary.totals.expenses)?;
    record("savings", summary.totals.savings)?;
    record("investment", summary.totals.investment)?;
    record("balance", summary.balance)?;

    writer.flush()?;
    Ok(())
}
