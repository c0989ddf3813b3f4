//! Aggregation engine - raw grid to summary totals
//!
//! Pure computation: no I/O, no shared state, input is never mutated.
//! Malformed cells count as 0 and unresolved columns contribute nothing;
//! the only failure is a policy naming an invalid column letter.

use crate::domain::grid::{cell, is_row_blank};
use crate::domain::result::Result;
use crate::domain::{
    CategoryTotal, CellValue, ColumnPolicy, ColumnSelector, Grid, Row, Summary, SummaryTotals,
};

use super::columns::{column_letter_to_index, resolve_column};
use super::money::parse_amount;

/// Data rows before the first fully blank row
///
/// The sheet holds a contiguous block of records followed by blank filler
/// rows; nothing at or after the first blank row is ever counted.
pub fn select_row_window(rows: &[Row]) -> &[Row] {
    let end = rows
        .iter()
        .position(|row| is_row_blank(row))
        .unwrap_or(rows.len());
    &rows[..end]
}

/// Column index for a selector; `None` means the column is absent
pub fn resolve_selector(headers: &[CellValue], selector: &ColumnSelector) -> Result<Option<usize>> {
    match selector {
        ColumnSelector::Names(candidates) => Ok(resolve_column(headers, candidates)),
        ColumnSelector::Letter(letter) => column_letter_to_index(letter).map(Some),
    }
}

/// A policy with every selector resolved against one header row
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPolicy {
    pub income: Option<usize>,
    pub savings: Option<usize>,
    pub investment: Option<usize>,
    pub expenses: Vec<(String, Option<usize>)>,
}

impl ResolvedPolicy {
    pub fn resolve(headers: &[CellValue], policy: &ColumnPolicy) -> Result<Self> {
        Ok(Self {
            income: resolve_selector(headers, &policy.income)?,
            savings: resolve_selector(headers, &policy.savings)?,
            investment: resolve_selector(headers, &policy.investment)?,
            expenses: policy
                .expenses
                .iter()
                .map(|category| {
                    resolve_selector(headers, &category.column).map(|idx| (category.name.clone(), idx))
                })
                .collect::<Result<_>>()?,
        })
    }
}

fn amount_at(row: &[CellValue], index: Option<usize>) -> f64 {
    index.map(|i| parse_amount(cell(row, i))).unwrap_or(0.0)
}

/// Aggregate a grid into the full dashboard summary
pub fn summarize(grid: &Grid, policy: &ColumnPolicy) -> Result<Summary> {
    let headers: &[CellValue] = grid.headers().map(Vec::as_slice).unwrap_or(&[]);
    let resolved = ResolvedPolicy::resolve(headers, policy)?;
    let window = select_row_window(grid.data_rows());

    let mut totals = SummaryTotals::default();
    let mut by_category: Vec<CategoryTotal> = resolved
        .expenses
        .iter()
        .map(|(name, _)| CategoryTotal {
            name: name.clone(),
            amount: 0.0,
        })
        .collect();

    for row in window {
        totals.income += amount_at(row, resolved.income);
        totals.savings += amount_at(row, resolved.savings);
        totals.investment += amount_at(row, resolved.investment);

        for (category, (_, index)) in by_category.iter_mut().zip(&resolved.expenses) {
            let amount = amount_at(row, *index);
            category.amount += amount;
            totals.expenses += amount;
        }
    }

    Ok(Summary {
        totals,
        expenses_by_category: by_category,
        balance: totals.income - totals.expenses,
        rows_used: window.len(),
    })
}

/// Aggregate a grid into the four headline totals
pub fn aggregate(grid: &Grid, policy: &ColumnPolicy) -> Result<SummaryTotals> {
    summarize(grid, policy).map(|summary| summary.totals)
}
