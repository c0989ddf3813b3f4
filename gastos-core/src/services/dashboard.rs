//! Dashboard service - one fetch followed by one aggregation pass

use std::sync::Arc;

use serde::Serialize;

use crate::domain::result::{Error, Result};
use crate::domain::{ColumnPolicy, Summary};
use crate::ports::{SheetSource, SheetValues};

use super::aggregation::summarize;

/// Summary for one read, along with where it came from
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub spreadsheet_id: String,
    pub range: String,
    pub source: String,
    pub summary: Summary,
}

/// Reads the configured sheet and summarizes it
///
/// Stateless: every call fetches afresh and nothing is cached between
/// calls, so concurrent reads never observe each other.
pub struct DashboardService {
    source: Arc<dyn SheetSource>,
    spreadsheet_id: Option<String>,
    default_range: String,
    policy: ColumnPolicy,
}

impl DashboardService {
    pub fn new(
        source: Arc<dyn SheetSource>,
        spreadsheet_id: Option<String>,
        default_range: impl Into<String>,
        policy: ColumnPolicy,
    ) -> Self {
        Self {
            source,
            spreadsheet_id,
            default_range: default_range.into(),
            policy,
        }
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    pub fn policy(&self) -> &ColumnPolicy {
        &self.policy
    }

    pub fn default_range(&self) -> &str {
        &self.default_range
    }

    fn spreadsheet_id(&self) -> Result<&str> {
        self.spreadsheet_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| Error::config("Missing env SHEET_ID"))
    }

    /// Fetch the raw cells; `range` overrides the configured default
    pub async fn fetch(&self, range: Option<&str>) -> Result<SheetValues> {
        let spreadsheet_id = self.spreadsheet_id()?;
        let range = range
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(self.default_range.as_str());
        self.source.fetch_range(spreadsheet_id, range).await
    }

    /// Fetch and summarize
    ///
    /// The engine only runs once a grid is in hand; fetch failures are
    /// returned untouched.
    pub async fn read(&self, range: Option<&str>) -> Result<(SheetValues, DashboardReport)> {
        let values = self.fetch(range).await?;
        let summary = summarize(&values.values, &self.policy)?;
        let report = DashboardReport {
            spreadsheet_id: values.spreadsheet_id.clone(),
            range: values.range.clone(),
            source: self.source.name().to_string(),
            summary,
        };
        Ok((values, report))
    }

    /// Fetch and summarize, dropping the raw grid
    pub async fn summary(&self, range: Option<&str>) -> Result<DashboardReport> {
        self.read(range).await.map(|(_, report)| report)
    }
}
