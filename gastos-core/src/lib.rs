//! gastos core - household finance dashboard logic
//!
//! This crate follows a hexagonal layout:
//!
//! - **domain**: grid, column policy, summary, principal, credential
//! - **ports**: trait definitions for external dependencies (SheetSource, IdentityProvider)
//! - **services**: the aggregation engine and the use cases built on it
//! - **adapters**: Google Sheets, demo sheet, Firebase identity

pub mod adapters;
pub mod config;
pub mod domain;
pub mod log_migrations;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use adapters::demo::{DemoSheetSource, DEMO_SPREADSHEET_ID};
use adapters::firebase::FirebaseIdentityProvider;
use adapters::google_sheets::GoogleSheetsSource;
use config::Config;
use ports::SheetSource;
use services::credentials::SERVICE_ACCOUNT_ENV;
use services::*;

// Re-export commonly used types at crate root
pub use domain::result::{Error, OperationResult, Result as CoreResult};
pub use domain::{
    CategoryTotal, CellValue, ColumnPolicy, ColumnSelector, ExpenseCategory, Grid, Principal,
    Summary, SummaryTotals,
};
pub use ports::SheetValues;
pub use services::{EntryPoint, LogEvent, LoggingService};

/// Main context for gastos operations
///
/// Holds the resolved configuration and the services built from it.
pub struct GastosContext {
    pub config: Config,
    pub dashboard_service: DashboardService,
    pub doctor_service: DoctorService,
}

impl GastosContext {
    /// Create a new context from the gastos directory
    ///
    /// Demo mode reads the built-in sheet; otherwise the Google Sheets
    /// source decodes `GOOGLE_SERVICE_ACCOUNT_JSON` on first use.
    pub fn new(gastos_dir: &Path) -> Result<Self> {
        let config = Config::load(gastos_dir)?;

        let (source, spreadsheet_id): (Arc<dyn SheetSource>, Option<String>) = if config.demo_mode {
            (
                Arc::new(DemoSheetSource::new()),
                Some(
                    config
                        .spreadsheet_id
                        .clone()
                        .unwrap_or_else(|| DEMO_SPREADSHEET_ID.to_string()),
                ),
            )
        } else {
            (
                Arc::new(GoogleSheetsSource::from_env(SERVICE_ACCOUNT_ENV)),
                config.spreadsheet_id.clone(),
            )
        };

        Ok(Self::with_source(config, source, spreadsheet_id))
    }

    /// Create a context around an explicit sheet source
    pub fn with_source(
        config: Config,
        source: Arc<dyn SheetSource>,
        spreadsheet_id: Option<String>,
    ) -> Self {
        let dashboard_service = DashboardService::new(
            source,
            spreadsheet_id,
            config.range.clone(),
            config.column_policy.clone(),
        );
        let doctor_service = DoctorService::new(config.clone());

        Self {
            config,
            dashboard_service,
            doctor_service,
        }
    }

    /// Identity gate for the HTTP server
    ///
    /// `None` when authentication is disabled in settings. When it is
    /// required, a missing `FIREBASE_API_KEY` is a configuration error.
    pub fn identity_gate(&self) -> Result<Option<IdentityGate>> {
        if !self.config.auth_required {
            return Ok(None);
        }

        let api_key = self.config.identity_api_key().ok_or_else(|| {
            Error::config(format!("Missing env {}", config::IDENTITY_API_KEY_ENV))
        })?;
        let provider = FirebaseIdentityProvider::new(&api_key)?;

        Ok(Some(IdentityGate::new(
            Arc::new(provider),
            self.config.allow_list.clone(),
        )))
    }
}
