//! Spreadsheet grid domain model

use std::borrow::Cow;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;

/// A single raw cell as returned by a range query
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
}

impl CellValue {
    /// Cell text, the uniform view every consumer works with
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            CellValue::Empty => Cow::Borrowed(""),
            CellValue::Text(s) => Cow::Borrowed(s.as_str()),
            CellValue::Number(n) => Cow::Owned(n.to_string()),
        }
    }

    /// True when the cell text is empty after trimming
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(_) => false,
        }
    }
}

impl From<JsonValue> for CellValue {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => CellValue::Empty,
            JsonValue::String(s) => CellValue::Text(s),
            JsonValue::Number(n) => n
                .as_f64()
                .map(CellValue::Number)
                .unwrap_or_else(|| CellValue::Text(n.to_string())),
            JsonValue::Bool(b) => CellValue::Text(if b { "TRUE" } else { "FALSE" }.to_string()),
            other => CellValue::Text(other.to_string()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Empty => serializer.serialize_none(),
            CellValue::Text(s) => serializer.serialize_str(s),
            CellValue::Number(n) => serializer.serialize_f64(*n),
        }
    }
}

impl<'de> Deserialize<'de> for CellValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        JsonValue::deserialize(deserializer).map(CellValue::from)
    }
}

/// One row of cells; may be shorter than the header row
pub type Row = Vec<CellValue>;

/// Rectangular-ish table of raw cells; row 0 is the header row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    rows: Vec<Row>,
}

impl Grid {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Build a grid from rows of plain text, mostly for tests and demo data
    pub fn from_text<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self::new(
            rows.into_iter()
                .map(|row| row.into_iter().map(|c| CellValue::Text(c.into())).collect())
                .collect(),
        )
    }

    /// Build a grid from the nested JSON arrays a range query returns
    pub fn from_json_rows(rows: Vec<Vec<JsonValue>>) -> Self {
        Self::new(
            rows.into_iter()
                .map(|row| row.into_iter().map(CellValue::from).collect())
                .collect(),
        )
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Header row, if the grid has any rows
    pub fn headers(&self) -> Option<&Row> {
        self.rows.first()
    }

    /// Every row after the header row
    pub fn data_rows(&self) -> &[Row] {
        self.rows.get(1..).unwrap_or(&[])
    }

    /// Widest row length, used when rendering
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// Cell at `index`, with missing cells reading as empty
pub fn cell(row: &[CellValue], index: usize) -> &CellValue {
    static EMPTY: CellValue = CellValue::Empty;
    row.get(index).unwrap_or(&EMPTY)
}

/// A row is blank when every cell is empty after trimming (zero cells included)
pub fn is_row_blank(row: &[CellValue]) -> bool {
    row.iter().all(CellValue::is_blank)
}
