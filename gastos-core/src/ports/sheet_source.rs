//! Spreadsheet source port
//!
//! Defines the interface for fetching a cell range from a spreadsheet
//! (Google Sheets, demo data, test fixtures).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::result::Result;
use crate::domain::Grid;

/// Raw cells returned for one range query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetValues {
    pub spreadsheet_id: String,
    /// Range as echoed back by the source (A1 notation)
    pub range: String,
    pub values: Grid,
}

/// Spreadsheet fetch trait
///
/// One call is one remote read. Implementations do not retry and do not
/// cache; a failure comes back as `Error::Fetch` or `Error::Credential`.
#[async_trait]
pub trait SheetSource: Send + Sync {
    /// Source name (e.g., "google-sheets", "demo")
    fn name(&self) -> &str;

    /// Fetch the cells of `range` in `spreadsheet_id`
    async fn fetch_range(&self, spreadsheet_id: &str, range: &str) -> Result<SheetValues>;
}
