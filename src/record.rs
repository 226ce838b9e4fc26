//! Row mapping shared by every persisted table.
//!
//! Local CSV files and the remote spreadsheet both hand rows over as loose
//! `column -> text` maps. `Record` turns those maps into typed rows and back,
//! backfilling anything missing so the rest of the crate never sees a partial
//! row.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

lazy_static! {
    // Spreadsheets like to turn "1001" into 1001.0
    static ref FLOAT_INTEGER_REGEX: Regex = Regex::new(r"^(-?[0-9]+)\.0+$").unwrap();
}

/// A loose row as read from CSV or the remote sheet.
pub type Fields = HashMap<String, String>;

/// A typed table row with a fixed column set.
pub trait Record: Sized {
    /// Column headers in persisted order.
    const COLUMNS: &'static [&'static str];

    /// Build a row, backfilling defaults for missing or unparsable columns.
    fn from_fields(fields: &Fields) -> Self;

    /// Build a row that came from a spreadsheet, which may have reformatted
    /// numeric-looking keys.
    fn from_sheet(fields: &Fields) -> Self {
        Self::from_fields(fields)
    }

    /// Cell values in `COLUMNS` order.
    fn to_fields(&self) -> Vec<String>;

    /// Cell values keyed by column name.
    fn to_map(&self) -> Fields {
        Self::COLUMNS
            .iter()
            .map(|c| c.to_string())
            .zip(self.to_fields())
            .collect()
    }
}

/// Text value of a column, trimmed; empty when absent.
pub fn text(fields: &Fields, column: &str) -> String {
    fields
        .get(column)
        .map(|v| v.trim().to_string())
        .unwrap_or_default()
}

/// Text value of a column, or `default` when absent or blank.
pub fn text_or(fields: &Fields, column: &str, default: &str) -> String {
    let value = text(fields, column);
    if value.is_empty() {
        default.to_string()
    } else {
        value
    }
}

/// Text value of a column, or `default` only when the column is absent.
///
/// A blank cell is kept blank.
pub fn present_or(fields: &Fields, column: &str, default: &str) -> String {
    fields
        .get(column)
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| default.to_string())
}

/// Identifier with spreadsheet float artifacts removed (`1001.0` -> `1001`).
pub fn normalize_key(value: &str) -> String {
    let value = value.trim();
    match FLOAT_INTEGER_REGEX.captures(value) {
        Some(caps) => caps[1].to_string(),
        None => value.to_string(),
    }
}

/// Non-negative decimal, `0.0` when blank or invalid.
pub fn decimal(fields: &Fields, column: &str) -> f64 {
    text(fields, column)
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v.max(0.0))
        .unwrap_or(0.0)
}

/// Non-negative integer, accepting `"10.0"` style values.
pub fn integer_or(fields: &Fields, column: &str, default: u32) -> u32 {
    let raw = text(fields, column);
    if let Ok(v) = raw.parse::<u32>() {
        return v;
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => v.trunc() as u32,
        Ok(v) if v.is_finite() => 0,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> Fields {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("1001.0"), "1001");
        assert_eq!(normalize_key(" 4800016644290 "), "4800016644290");
        assert_eq!(normalize_key("10.50"), "10.50");
        assert_eq!(normalize_key("ABC-1.0"), "ABC-1.0");
    }

    #[test]
    fn test_numeric_backfill() {
        let row = fields(&[("Price", "abc"), ("Quantity", "12.0"), ("Min", "-3")]);
        assert_eq!(decimal(&row, "Price"), 0.0);
        assert_eq!(integer_or(&row, "Quantity", 0), 12);
        assert_eq!(integer_or(&row, "Min", 5), 0);
        assert_eq!(integer_or(&row, "Missing", 5), 5);
    }

    #[test]
    fn test_text_or_default() {
        let row = fields(&[("Category", "  ")]);
        assert_eq!(text_or(&row, "Category", "General"), "General");
        assert_eq!(text_or(&row, "Other", "x"), "x");
    }

    #[test]
    fn test_present_or_keeps_blank_cells() {
        let row = fields(&[("DTI", "  ")]);
        assert_eq!(present_or(&row, "DTI", "pending"), "");
        assert_eq!(present_or(&row, "BIR", "pending"), "pending");
    }
}
