use crate::error::Result;
use crate::record::{Fields, Record};
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Write a whole table to a CSV file, replacing any previous content
///
/// The rows go to a temporary file next to `path` which is then renamed over
/// it, so readers never observe a half-written table.
pub fn save_table<R: Record>(rows: &[R], path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    write_csv(rows, &mut tmp)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;

    log::debug!("Saved {} rows to {}", rows.len(), path.display());
    Ok(())
}

/// Read a table from a CSV file
///
/// Returns `Ok(None)` when the file does not exist.
pub fn load_table<R: Record>(path: &Path) -> Result<Option<Vec<R>>> {
    if !path.exists() {
        return Ok(None);
    }
    let file = std::fs::File::open(path)?;
    let rows = read_csv(file)?;
    log::debug!("Loaded {} rows from {}", rows.len(), path.display());
    Ok(Some(rows))
}

/// Serialize rows as CSV with a header line
pub fn write_csv<R: Record, W: Write>(rows: &[R], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(R::COLUMNS)?;
    for row in rows {
        wtr.write_record(row.to_fields())?;
    }
    wtr.flush()?;
    Ok(())
}

/// Parse header-keyed CSV rows, backfilling missing columns
pub fn read_csv<R: Record, Rd: Read>(reader: Rd) -> Result<Vec<R>> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let mut rows = Vec::new();
    for fields in rdr.deserialize::<Fields>() {
        rows.push(R::from_fields(&fields?));
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::Product;

    #[test]
    fn test_read_csv_with_missing_columns() {
        let data = "Barcode,Name,Price\n1001,Rice,50\n2002.0,\"Oil, 1L\",120.5\n";
        let rows: Vec<Product> = read_csv(data.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].barcode, "2002");
        assert_eq!(rows[1].name, "Oil, 1L");
        assert_eq!(rows[1].price, 120.5);
        assert_eq!(rows[0].category, "General");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let rows: Option<Vec<Product>> = load_table(&dir.path().join("nope.csv")).unwrap();
        assert!(rows.is_none());
    }

    #[test]
    fn test_save_overwrites_whole_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.csv");

        save_table(
            &[Product::new("1", "A", 1.0, 1), Product::new("2", "B", 2.0, 2)],
            &path,
        )
        .unwrap();
        save_table(&[Product::new("3", "C", 3.0, 3)], &path).unwrap();

        let rows: Vec<Product> = load_table(&path).unwrap().unwrap();
        assert_eq!(rows, vec![Product::new("3", "C", 3.0, 3)]);
    }
}
