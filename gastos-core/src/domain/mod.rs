//! Core domain entities
//!
//! Pure data structures shared by services and adapters - no I/O.

mod credential;
pub mod grid;
pub mod policy;
mod principal;
pub mod result;
mod summary;

pub use credential::ServiceAccountCredential;
pub use grid::{CellValue, Grid, Row};
pub use policy::{ColumnPolicy, ColumnSelector, ExpenseCategory};
pub use principal::{AllowList, Principal};
pub use summary::{CategoryTotal, Summary, SummaryTotals};
