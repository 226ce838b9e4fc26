use crate::record::{self, Fields, Record};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CATEGORY: &str = "General";
pub const DEFAULT_MIN_THRESHOLD: u32 = 5;

/// One inventory row, keyed by `barcode`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Primary key and the payload printed on labels. Always text.
    pub barcode: String,
    pub name: String,
    #[serde(default = "default_category")]
    pub category: String,
    pub price: f64,
    pub quantity: u32,
    #[serde(default = "default_min_threshold")]
    pub min_threshold: u32,
    /// Base64 PNG; the empty string means "no image"
    #[serde(default)]
    pub image_data: String,
    #[serde(default)]
    pub description: String,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn default_min_threshold() -> u32 {
    DEFAULT_MIN_THRESHOLD
}

/// Derived stock classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    OutOfStock,
    LowStock,
    InStock,
}

impl StockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::OutOfStock => "out of stock",
            StockStatus::LowStock => "low stock",
            StockStatus::InStock => "in stock",
        }
    }
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Product {
    /// A product with default category, threshold and no image
    pub fn new(barcode: &str, name: &str, price: f64, quantity: u32) -> Self {
        Self {
            barcode: barcode.trim().to_string(),
            name: name.to_string(),
            category: default_category(),
            price: price.max(0.0),
            quantity,
            min_threshold: DEFAULT_MIN_THRESHOLD,
            image_data: String::new(),
            description: String::new(),
        }
    }

    pub fn stock_status(&self) -> StockStatus {
        if self.quantity == 0 {
            StockStatus::OutOfStock
        } else if self.quantity <= self.min_threshold {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }

    pub fn has_image(&self) -> bool {
        !self.image_data.is_empty()
    }
}

impl Record for Product {
    const COLUMNS: &'static [&'static str] = &[
        "Barcode",
        "Name",
        "Category",
        "Price",
        "Quantity",
        "Min_Threshold",
        "Image_Data",
        "Description",
    ];

    fn from_fields(fields: &Fields) -> Self {
        Self {
            barcode: record::text(fields, "Barcode"),
            name: record::text(fields, "Name"),
            category: record::text_or(fields, "Category", DEFAULT_CATEGORY),
            price: record::decimal(fields, "Price"),
            quantity: record::integer_or(fields, "Quantity", 0),
            min_threshold: record::integer_or(fields, "Min_Threshold", DEFAULT_MIN_THRESHOLD),
            image_data: record::text(fields, "Image_Data"),
            description: record::text(fields, "Description"),
        }
    }

    fn from_sheet(fields: &Fields) -> Self {
        let mut product = Self::from_fields(fields);
        product.barcode = record::normalize_key(&product.barcode);
        product
    }

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.barcode.clone(),
            self.name.clone(),
            self.category.clone(),
            self.price.to_string(),
            self.quantity.to_string(),
            self.min_threshold.to_string(),
            self.image_data.clone(),
            self.description.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_status_boundaries() {
        let mut p = Product::new("1", "Soap", 20.0, 0);
        p.min_threshold = 5;
        assert_eq!(p.stock_status(), StockStatus::OutOfStock);

        p.quantity = 1;
        assert_eq!(p.stock_status(), StockStatus::LowStock);

        p.quantity = 5;
        assert_eq!(p.stock_status(), StockStatus::LowStock);

        p.quantity = 6;
        assert_eq!(p.stock_status(), StockStatus::InStock);
    }

    #[test]
    fn test_from_fields_backfills_missing_columns() {
        let mut fields = Fields::new();
        fields.insert("Barcode".to_string(), "1001.0".to_string());
        fields.insert("Name".to_string(), "Rice".to_string());

        let p = Product::from_sheet(&fields);
        assert_eq!(p.barcode, "1001");
        assert_eq!(p.category, DEFAULT_CATEGORY);
        assert_eq!(p.min_threshold, DEFAULT_MIN_THRESHOLD);
        assert_eq!(p.quantity, 0);
        assert!(!p.has_image());
    }

    #[test]
    fn test_local_rows_keep_barcode_text() {
        let mut fields = Fields::new();
        fields.insert("Barcode".to_string(), " 5.0 ".to_string());
        assert_eq!(Product::from_fields(&fields).barcode, "5.0");
        assert_eq!(Product::from_sheet(&fields).barcode, "5");
    }

    #[test]
    fn test_fields_follow_column_order() {
        let p = Product::new("42", "Sardines", 18.5, 3);
        let fields = p.to_fields();
        assert_eq!(fields.len(), Product::COLUMNS.len());
        assert_eq!(fields[0], "42");
        assert_eq!(fields[3], "18.5");
        assert_eq!(Product::from_fields(&p.to_map()), p);
    }
}
