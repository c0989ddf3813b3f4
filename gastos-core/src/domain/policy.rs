//! Column selection policy
//!
//! A policy says which spreadsheet columns feed each summary total. Columns
//! are picked either by header name (ordered alternates, first match wins)
//! or by a fixed column letter.
//!
//! ```json
//! {
//!   "income": { "names": ["TOTAL_INGRESOS", "INGRESOS"] },
//!   "savings": { "letter": "T" },
//!   "investment": { "names": [] },
//!   "expenses": [ { "name": "OCIO", "column": { "names": ["TOTAL_OCIO", "OCIO"] } } ]
//! }
//! ```

use serde::{Deserialize, Serialize};

/// How one logical column is located in a grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnSelector {
    /// Header-name candidates, in preference order
    Names(Vec<String>),
    /// Fixed spreadsheet column letter, independent of headers
    Letter(String),
}

impl ColumnSelector {
    pub fn names<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Names(candidates.into_iter().map(Into::into).collect())
    }

    pub fn letter(letter: impl Into<String>) -> Self {
        Self::Letter(letter.into())
    }

    /// Selector that never matches anything
    pub fn none() -> Self {
        Self::Names(Vec::new())
    }

    /// `TOTAL_<NAME>` falling back to the raw `<NAME>` column
    pub fn total_or_raw(name: &str) -> Self {
        Self::Names(vec![format!("TOTAL_{}", name), name.to_string()])
    }
}

/// One expense category; every category is summed into total expenses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseCategory {
    pub name: String,
    pub column: ColumnSelector,
}

impl ExpenseCategory {
    pub fn new(name: impl Into<String>, column: ColumnSelector) -> Self {
        Self {
            name: name.into(),
            column,
        }
    }
}

/// Column selectors for all summary totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnPolicy {
    pub income: ColumnSelector,
    pub savings: ColumnSelector,
    pub investment: ColumnSelector,
    #[serde(default)]
    pub expenses: Vec<ExpenseCategory>,
}

/// Expense categories the dashboard sheet is organised around
pub const EXPENSE_CATEGORIES: [&str; 5] = ["MENSUAL", "OCIO", "TRABAJO", "DEPORTE", "OTROS"];

impl ColumnPolicy {
    /// Resolve every total by header name, preferring `TOTAL_*` columns
    pub fn headers() -> Self {
        Self {
            income: ColumnSelector::total_or_raw("INGRESOS"),
            savings: ColumnSelector::total_or_raw("AHORRO"),
            investment: ColumnSelector::total_or_raw("INVERSION"),
            expenses: EXPENSE_CATEGORIES
                .iter()
                .map(|name| ExpenseCategory::new(*name, ColumnSelector::total_or_raw(name)))
                .collect(),
        }
    }

    /// Fixed column letters of the original yearly sheet layout
    pub fn letters() -> Self {
        let letters = ["D", "G", "J", "M", "W"];
        Self {
            income: ColumnSelector::letter("Q"),
            savings: ColumnSelector::letter("T"),
            investment: ColumnSelector::none(),
            expenses: EXPENSE_CATEGORIES
                .iter()
                .zip(letters)
                .map(|(name, letter)| ExpenseCategory::new(*name, ColumnSelector::letter(letter)))
                .collect(),
        }
    }

    /// Look up a built-in preset by name
    pub fn preset(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "headers" => Some(Self::headers()),
            "letters" => Some(Self::letters()),
            _ => None,
        }
    }
}

impl Default for ColumnPolicy {
    fn default() -> Self {
        Self::headers()
    }
}
