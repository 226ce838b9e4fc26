use crate::error::Result;
use crate::product::Product;
use crate::record::Record;
use crate::saving;
use chrono::Local;

/// Export the inventory as CSV
///
/// The output uses the persisted column set, so it can be restored later
/// through [`crate::loader::from_csv`].
///
/// # Examples
/// ```
/// use storefront::downloader::to_csv;
/// use storefront::product::Product;
///
/// let csv = to_csv(&[Product::new("1001", "Rice", 50.0, 10)]).unwrap();
/// assert!(csv.starts_with("Barcode,Name,Category"));
/// ```
pub fn to_csv(products: &[Product]) -> Result<String> {
    let mut buffer = Vec::new();
    saving::write_csv(products, &mut buffer)?;
    // csv only ever writes the UTF-8 it was given
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Export the inventory as an XLSX workbook
///
/// Image payloads are left out of the workbook; they are only useful to the
/// app itself and would blow past spreadsheet cell limits.
pub fn to_xlsx(products: &[Product]) -> Result<Vec<u8>> {
    use rust_xlsxwriter::{Format, Workbook, Worksheet};

    let mut workbook = Workbook::new();
    let mut worksheet = Worksheet::new();
    worksheet.set_name("Inventory")?;
    let bold = Format::new().set_bold();

    let columns: Vec<&str> = Product::COLUMNS
        .iter()
        .copied()
        .filter(|c| *c != "Image_Data")
        .collect();
    for (c, name) in columns.iter().enumerate() {
        worksheet.write_string_with_format(0, c as u16, *name, &bold)?;
    }

    for (r, p) in products.iter().enumerate() {
        let row = (r + 1) as u32;
        worksheet.write_string(row, 0, &p.barcode)?;
        worksheet.write_string(row, 1, &p.name)?;
        worksheet.write_string(row, 2, &p.category)?;
        worksheet.write_number(row, 3, p.price)?;
        worksheet.write_number(row, 4, p.quantity)?;
        worksheet.write_number(row, 5, p.min_threshold)?;
        worksheet.write_string(row, 6, &p.description)?;
    }

    workbook.push_worksheet(worksheet);
    let buffer = workbook.save_to_buffer()?;
    Ok(buffer)
}

/// Download name for a backup taken now, e.g. `inventory_backup_20240131.csv`
pub fn backup_filename(extension: &str) -> String {
    format!(
        "inventory_backup_{}.{}",
        Local::now().format("%Y%m%d"),
        extension
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_export_keeps_text_barcodes() {
        let mut p = Product::new("0012345", "Vinegar, 1L", 32.0, 4);
        p.description = "say \"hi\"".to_string();
        let csv = to_csv(&[p]).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("Barcode,Name,Category,Price,Quantity,Min_Threshold,Image_Data,Description")
        );
        assert_eq!(
            lines.next(),
            Some("0012345,\"Vinegar, 1L\",General,32,4,5,,\"say \"\"hi\"\"\"")
        );
    }

    #[test]
    fn test_xlsx_export_is_a_zip() {
        let bytes = to_xlsx(&[Product::new("1", "Salt", 12.0, 30)]).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_backup_filename() {
        let name = backup_filename("csv");
        assert!(name.starts_with("inventory_backup_"));
        assert!(name.ends_with(".csv"));
        assert_eq!(name.len(), "inventory_backup_20240131.csv".len());
    }
}
