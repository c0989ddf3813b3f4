//! Column resolution - header names and column letters to indices

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use crate::domain::result::{Error, Result};
use crate::domain::CellValue;

/// Normalize a header label for comparison
///
/// Trims, uppercases and strips diacritics, so "Inversión " and
/// "INVERSION" compare equal.
pub fn normalize_header(label: &str) -> String {
    label
        .trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_uppercase()
}

/// Index of the first header matching any candidate, in candidate order
///
/// Every candidate is tried against the whole header row before moving to
/// the next one; a repeated label resolves to its lowest index.
pub fn resolve_column<S: AsRef<str>>(headers: &[CellValue], candidates: &[S]) -> Option<usize> {
    let normalized: Vec<String> = headers.iter().map(|h| normalize_header(&h.text())).collect();

    candidates.iter().find_map(|candidate| {
        let wanted = normalize_header(candidate.as_ref());
        if wanted.is_empty() {
            return None;
        }
        normalized.iter().position(|h| *h == wanted)
    })
}

/// Zero-based index of a spreadsheet column letter (A=0, Z=25, AA=26)
pub fn column_letter_to_index(letter: &str) -> Result<usize> {
    let letters = letter.trim();
    if letters.is_empty() {
        return Err(Error::InvalidColumnLetter(letter.to_string()));
    }

    let mut n: usize = 0;
    for c in letters.chars() {
        let c = c.to_ascii_uppercase();
        if !c.is_ascii_uppercase() {
            return Err(Error::InvalidColumnLetter(letter.to_string()));
        }
        let digit = (c as usize) - ('A' as usize) + 1;
        n = n
            .checked_mul(26)
            .and_then(|n| n.checked_add(digit))
            .ok_or_else(|| Error::InvalidColumnLetter(letter.to_string()))?;
    }

    Ok(n - 1)
}

/// Spreadsheet column letter for a zero-based index (0=A, 26=AA)
pub fn index_to_column_letter(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}
