//! Summary totals produced from one read of the sheet

use serde::{Deserialize, Serialize};

/// The four headline figures
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryTotals {
    pub income: f64,
    pub expenses: f64,
    pub savings: f64,
    pub investment: f64,
}

/// Amount accumulated for one expense category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub name: String,
    pub amount: f64,
}

/// Everything the dashboard shows for one read
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    #[serde(flatten)]
    pub totals: SummaryTotals,
    /// Per-category expenses, in policy order; they sum to `totals.expenses`
    pub expenses_by_category: Vec<CategoryTotal>,
    /// Income minus expenses
    pub balance: f64,
    /// Number of data rows inside the effective row window
    pub rows_used: usize,
}
