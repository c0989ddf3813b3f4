//! Monetary cell normalization
//!
//! The sheet is authored in a European locale: "1.234,56" means 1234.56.
//! Dots are always thousands separators and commas always decimal
//! separators, so a dot-decimal value such as "12.5" reads as 125. That
//! matches how the sheet's owner reads their own numbers and is kept as is.

use crate::domain::CellValue;

/// Convert a raw cell to an amount; anything unparsable is 0
pub fn parse_amount(cell: &CellValue) -> f64 {
    match cell {
        CellValue::Empty => 0.0,
        CellValue::Number(n) => finite_or_zero(*n),
        CellValue::Text(s) => parse_amount_text(s),
    }
}

/// Text form of [`parse_amount`]
pub fn parse_amount_text(raw: &str) -> f64 {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '€' && *c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    if cleaned.is_empty() {
        return 0.0;
    }

    cleaned.parse::<f64>().map(finite_or_zero).unwrap_or(0.0)
}

fn finite_or_zero(n: f64) -> f64 {
    if n.is_finite() {
        n
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_european_format() {
        assert!(approx(parse_amount_text("1.234,56"), 1234.56));
        assert!(approx(parse_amount_text("1.000.000,5"), 1_000_000.5));
        assert!(approx(parse_amount_text("200,00"), 200.0));
    }

    #[test]
    fn test_currency_and_whitespace() {
        assert!(approx(parse_amount_text(" 1 234,50 € "), 1234.5));
        assert!(approx(parse_amount_text("€-12,3"), -12.3));
        assert!(approx(parse_amount_text("18\u{a0}€"), 18.0));
    }

    #[test]
    fn test_dot_decimal_is_read_as_thousands() {
        assert!(approx(parse_amount_text("12.5"), 125.0));
    }

    #[test]
    fn test_empty_and_garbage() {
        assert_eq!(parse_amount(&CellValue::Empty), 0.0);
        assert_eq!(parse_amount_text(""), 0.0);
        assert_eq!(parse_amount_text("   "), 0.0);
        assert_eq!(parse_amount_text("n/a"), 0.0);
        assert_eq!(parse_amount_text("1,2,3"), 0.0);
        assert_eq!(parse_amount_text("inf"), 0.0);
        assert_eq!(parse_amount_text("NaN"), 0.0);
    }

    #[test]
    fn test_numbers_pass_through() {
        assert_eq!(parse_amount(&CellValue::Number(12.5)), 12.5);
        assert_eq!(parse_amount(&CellValue::Number(f64::INFINITY)), 0.0);
    }
}
