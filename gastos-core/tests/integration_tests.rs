//! Integration tests for the dashboard flow
//!
//! The sheet source is an in-memory fake so these run without network
//! access or credentials.
//!
//! Run with: cargo test --test integration_tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tempfile::TempDir;

use gastos_core::config::Config;
use gastos_core::ports::SheetSource;
use gastos_core::services::{DashboardService, EntryPoint, LogEvent, LoggingService};
use gastos_core::{ColumnPolicy, CoreResult, Error, GastosContext, Grid, OperationResult, SheetValues};

/// Fake source that serves one grid and counts fetches
struct FixedSource {
    grid: Grid,
    fetches: AtomicUsize,
}

impl FixedSource {
    fn new(grid: Grid) -> Arc<Self> {
        Arc::new(Self {
            grid,
            fetches: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl SheetSource for FixedSource {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn fetch_range(&self, spreadsheet_id: &str, range: &str) -> CoreResult<SheetValues> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(SheetValues {
            spreadsheet_id: spreadsheet_id.to_string(),
            range: range.to_string(),
            values: self.grid.clone(),
        })
    }
}

/// Source that always fails the way an unreachable API does
struct DownSource;

#[async_trait]
impl SheetSource for DownSource {
    fn name(&self) -> &str {
        "down"
    }

    async fn fetch_range(&self, _: &str, _: &str) -> CoreResult<SheetValues> {
        Err(Error::fetch("connection refused"))
    }
}

fn household_grid() -> Grid {
    Grid::from_text(vec![
        vec!["MES", "TOTAL_INGRESOS", "INGRESOS", "MENSUAL", "OCIO", "AHORRO", "Inversión"],
        vec!["Enero", "1.234,56", "999", "500", "100,5", "200", "50"],
        vec!["Febrero", "1.000", "999", "450", "", "abc", "50"],
        vec!["", "", "", "", "", "", ""],
        vec!["Resumen", "99.999", "", "", "", "", ""],
    ])
}

#[tokio::test]
async fn test_summary_end_to_end() {
    let source = FixedSource::new(household_grid());
    let service = DashboardService::new(
        source.clone(),
        Some("sheet-1".to_string()),
        "2025!A1:Z",
        ColumnPolicy::headers(),
    );

    let report = service.summary(None).await.unwrap();

    assert_eq!(report.spreadsheet_id, "sheet-1");
    assert_eq!(report.range, "2025!A1:Z");
    assert_eq!(report.source, "fixed");
    assert_eq!(report.summary.rows_used, 2);
    assert!((report.summary.totals.income - 2234.56).abs() < 1e-9);
    assert!((report.summary.totals.expenses - 1050.5).abs() < 1e-9);
    assert!((report.summary.totals.savings - 200.0).abs() < 1e-9);
    assert!((report.summary.totals.investment - 100.0).abs() < 1e-9);
    assert!((report.summary.balance - 1184.06).abs() < 1e-9);
    assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_range_override_and_blank_override() {
    let source = FixedSource::new(household_grid());
    let service = DashboardService::new(source, Some("sheet-1".to_string()), "2025!A1:Z", ColumnPolicy::headers());

    let (values, _) = service.read(Some("2024!A1:Z")).await.unwrap();
    assert_eq!(values.range, "2024!A1:Z");

    let (values, _) = service.read(Some("   ")).await.unwrap();
    assert_eq!(values.range, "2025!A1:Z");
}

#[tokio::test]
async fn test_missing_spreadsheet_id_never_fetches() {
    let source = FixedSource::new(household_grid());
    let service = DashboardService::new(source.clone(), None, "2025!A1:Z", ColumnPolicy::headers());

    let err = service.summary(None).await.unwrap_err();
    assert!(matches!(err, Error::Config(_)));
    assert!(err.to_string().contains("SHEET_ID"));
    assert_eq!(source.fetches.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_fetch_failure_as_operation_result() {
    let service = DashboardService::new(
        Arc::new(DownSource),
        Some("sheet-1".to_string()),
        "2025!A1:Z",
        ColumnPolicy::headers(),
    );

    let err = service.summary(None).await.unwrap_err();
    assert_eq!(err.status_code(), 500);

    let payload: OperationResult<SheetValues> = service.fetch(None).await.into();
    let json = serde_json::to_value(&payload).unwrap();
    assert_eq!(json["ok"], false);
    assert!(json["error"].as_str().unwrap().contains("connection refused"));
    assert!(json.get("values").is_none());
}

#[tokio::test]
async fn test_invalid_letter_policy_is_an_error() {
    let mut policy = ColumnPolicy::letters();
    policy.savings = gastos_core::ColumnSelector::letter("T?");
    let service = DashboardService::new(FixedSource::new(household_grid()), Some("s".to_string()), "A:Z", policy);

    let err = service.summary(None).await.unwrap_err();
    assert!(matches!(err, Error::InvalidColumnLetter(_)));
    assert_eq!(err.status_code(), 400);
}

#[tokio::test]
async fn test_concurrent_reads_are_independent() {
    let source = FixedSource::new(household_grid());
    let service = Arc::new(DashboardService::new(
        source.clone(),
        Some("sheet-1".to_string()),
        "2025!A1:Z",
        ColumnPolicy::headers(),
    ));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.summary(None).await.map(|r| r.summary) })
        })
        .collect();

    let mut summaries = Vec::new();
    for handle in handles {
        summaries.push(handle.await.unwrap().unwrap());
    }

    assert!(summaries.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(source.fetches.load(Ordering::SeqCst), 8);
}

#[tokio::test]
async fn test_demo_context_reads_without_credentials() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("settings.json"), r#"{"app": {"demoMode": true}}"#).unwrap();

    let ctx = GastosContext::new(dir.path()).unwrap();
    if !ctx.config.demo_mode {
        // GASTOS_DEMO_MODE=false in the environment wins over the file
        return;
    }

    let report = ctx.dashboard_service.summary(None).await.unwrap();
    assert_eq!(report.source, "demo");
    assert_eq!(report.summary.rows_used, 12);
}

#[test]
fn test_auth_disabled_has_no_gate() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("settings.json"), r#"{"auth": {"required": false}}"#).unwrap();

    let ctx = GastosContext::new(dir.path()).unwrap();
    assert!(ctx.identity_gate().unwrap().is_none());
}

#[test]
fn test_config_round_trip_keeps_settings() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("settings.json"),
        r#"{"sheet": {"spreadsheetId": "abc"}, "columnPolicy": "letters", "custom": [1, 2]}"#,
    )
    .unwrap();

    let mut config = Config::load(dir.path()).unwrap();
    config.enable_demo_mode();
    config.save(dir.path()).unwrap();

    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("settings.json")).unwrap()).unwrap();
    assert_eq!(saved["sheet"]["spreadsheetId"], "abc");
    assert_eq!(saved["columnPolicy"], "letters");
    assert_eq!(saved["custom"], serde_json::json!([1, 2]));
    assert_eq!(saved["app"]["demoMode"], true);
}

#[test]
fn test_event_log_round_trip() {
    let dir = TempDir::new().unwrap();
    let logger = LoggingService::new(dir.path(), EntryPoint::Server, "0.1.0").unwrap();

    logger
        .log(LogEvent::new("sheets_read").with_route("/api/sheets").with_source("fixed"))
        .unwrap();
    logger
        .log(LogEvent::new("request_rejected").with_route("/api/summary").with_error("Forbidden"))
        .unwrap();

    assert_eq!(logger.count().unwrap(), 2);
    let errors = logger.get_errors(10).unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].event, "request_rejected");
    assert_eq!(errors[0].entry_point, "server");
}
