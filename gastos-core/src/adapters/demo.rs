//! Demo spreadsheet source
//!
//! Serves a fixed yearly sheet shaped like the real dashboard sheet: one
//! header row, twelve monthly rows, then a few blank rows the way a
//! spreadsheet range usually comes back padded.

use async_trait::async_trait;

use crate::domain::result::Result;
use crate::domain::{CellValue, Grid, Row};
use crate::ports::{SheetSource, SheetValues};

pub const DEMO_SPREADSHEET_ID: &str = "demo";

const HEADERS: [&str; 9] = [
    "MES",
    "MENSUAL",
    "OCIO",
    "TRABAJO",
    "DEPORTE",
    "OTROS",
    "TOTAL_INGRESOS",
    "AHORRO",
    "INVERSIÓN",
];

// mensual, ocio, trabajo, deporte, otros, ingresos, ahorro, inversion
const MONTHS: [(&str, [&str; 8]); 12] = [
    ("Enero", ["950,00", "120,50", "45,00", "39,90", "60,00", "2.450,00", "400,00", "150,00"]),
    ("Febrero", ["950,00", "85,20", "32,10", "39,90", "18,75", "2.450,00", "450,00", "150,00"]),
    ("Marzo", ["950,00", "210,00", "60,00", "39,90", "95,40", "2.450,00", "300,00", "150,00"]),
    ("Abril", ["962,30", "140,00", "20,00", "39,90", "12,00", "2.450,00", "500,00", "200,00"]),
    ("Mayo", ["962,30", "98,60", "44,50", "55,00", "30,00", "2.600,00", "500,00", "200,00"]),
    ("Junio", ["962,30", "310,80", "15,00", "39,90", "120,00", "3.900,00", "1.200,00", "300,00"]),
    ("Julio", ["962,30", "420,00", "0,00", "39,90", "80,00", "2.600,00", "350,00", "200,00"]),
    ("Agosto", ["962,30", "380,25", "0,00", "0,00", "45,00", "2.600,00", "250,00", "200,00"]),
    ("Septiembre", ["975,00", "110,00", "72,00", "39,90", "22,50", "2.600,00", "500,00", "200,00"]),
    ("Octubre", ["975,00", "135,40", "58,30", "39,90", "64,10", "2.600,00", "500,00", "200,00"]),
    ("Noviembre", ["975,00", "190,00", "40,00", "39,90", "210,00", "2.600,00", "400,00", "200,00"]),
    ("Diciembre", ["975,00", "560,00", "25,00", "39,90", "150,00", "3.900,00", "900,00", "300,00"]),
];

const TRAILING_BLANK_ROWS: usize = 3;

/// Generate the demo grid
pub fn generate_demo_grid() -> Grid {
    let mut rows: Vec<Row> = Vec::with_capacity(MONTHS.len() + TRAILING_BLANK_ROWS + 1);
    rows.push(HEADERS.iter().map(|h| CellValue::from(*h)).collect());

    for (month, amounts) in MONTHS {
        let mut row: Row = vec![CellValue::from(month)];
        row.extend(amounts.iter().map(|a| CellValue::from(*a)));
        rows.push(row);
    }

    for _ in 0..TRAILING_BLANK_ROWS {
        rows.push(vec![CellValue::Empty; HEADERS.len()]);
    }

    Grid::new(rows)
}

/// Sheet source that never leaves the process
#[derive(Debug, Default, Clone)]
pub struct DemoSheetSource;

impl DemoSheetSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SheetSource for DemoSheetSource {
    fn name(&self) -> &str {
        "demo"
    }

    async fn fetch_range(&self, spreadsheet_id: &str, range: &str) -> Result<SheetValues> {
        Ok(SheetValues {
            spreadsheet_id: spreadsheet_id.to_string(),
            range: range.to_string(),
            values: generate_demo_grid(),
        })
    }
}
