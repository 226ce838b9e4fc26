use crate::error::{Result, StoreError};
use crate::product::Product;
use crate::record::normalize_key;
use crate::saving;
use std::path::Path;

/// Parse an uploaded inventory backup
///
/// The header row decides which column is which; missing columns are
/// backfilled and spreadsheet float artifacts in barcodes (`1001.0`) are
/// cleaned up. Fully blank lines are skipped.
///
/// # Errors
/// * `InvalidProduct` if the file has no `Barcode` column
/// * `Csv` for malformed CSV
pub fn from_csv(data: &[u8]) -> Result<Vec<Product>> {
    let mut rdr = csv::Reader::from_reader(data);
    let has_barcode = rdr
        .headers()?
        .iter()
        .any(|h| h.trim().trim_start_matches('\u{feff}') == "Barcode");
    if !has_barcode {
        return Err(StoreError::InvalidProduct(
            "backup has no Barcode column".to_string(),
        ));
    }

    let products: Vec<Product> = saving::read_csv(strip_bom(data))?;
    Ok(products
        .into_iter()
        .filter(|p| !(p.barcode.is_empty() && p.name.is_empty()))
        .map(|mut p| {
            p.barcode = normalize_key(&p.barcode);
            p
        })
        .collect())
}

/// Load a backup from disk, see [`from_csv`]
pub fn load_backup(filepath: impl AsRef<Path>) -> Result<Vec<Product>> {
    let data = std::fs::read(filepath)?;
    from_csv(&data)
}

// Excel likes to prefix CSV exports with a UTF-8 byte order mark
fn strip_bom(data: &[u8]) -> &[u8] {
    data.strip_prefix(b"\xEF\xBB\xBF".as_slice()).unwrap_or(data)
}
