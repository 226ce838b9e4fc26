//! Inventory store: the product table for one session.
//!
//! The in-memory table is authoritative until the next explicit reload.
//! Every mutation builds the next table, persists it whole through the
//! [`Mirror`] and only then swaps it in, so a failed local write leaves the
//! table as it was. There is no separate save step.

use crate::error::{Result, StoreError};
use crate::mirror::{Mirror, PersistReport, Source};
use crate::product::Product;
use std::collections::BTreeSet;

/// Proof that a delete was requested for an existing product.
///
/// Obtained from [`Inventory::request_delete`] and consumed by
/// [`Inventory::delete`]; the caller keeps it while asking the user to
/// confirm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    barcode: String,
}

impl PendingDelete {
    pub fn barcode(&self) -> &str {
        &self.barcode
    }
}

pub struct Inventory {
    products: Vec<Product>,
    mirror: Mirror,
}

impl Inventory {
    /// Load the table from the mirror (remote, local file, or empty)
    pub fn load(mirror: Mirror) -> Result<Self> {
        let (products, source) = mirror.load::<Product>()?;
        log::info!("Inventory loaded with {} products ({:?})", products.len(), source);
        Ok(Self { products, mirror })
    }

    /// Drop the in-memory table and read it again from the mirrors
    pub fn reload(&mut self) -> Result<Source> {
        let (products, source) = self.mirror.load::<Product>()?;
        self.products = products;
        Ok(source)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Exact barcode lookup
    pub fn find_by_barcode(&self, code: &str) -> Option<&Product> {
        let code = code.trim();
        self.products.iter().find(|p| p.barcode == code)
    }

    /// Case-insensitive substring match on the product name
    ///
    /// An empty (or blank) query returns the whole table.
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.products.iter().collect();
        }
        self.products
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Distinct categories, sorted
    pub fn categories(&self) -> Vec<String> {
        self.products
            .iter()
            .map(|p| p.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Products that are out of stock or at/below their threshold
    pub fn low_stock(&self) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.quantity <= p.min_threshold)
            .collect()
    }

    /// Append a new product and persist
    ///
    /// # Errors
    /// * `DuplicateBarcode` if the barcode is taken; the table is unchanged
    /// * `InvalidProduct` if the barcode or name is blank
    pub fn insert(&mut self, product: Product) -> Result<PersistReport> {
        let product = validate(product)?;
        if self.position(&product.barcode).is_some() {
            return Err(StoreError::DuplicateBarcode(product.barcode));
        }
        log::info!("Adding product {} ({})", product.barcode, product.name);
        let mut next = self.products.clone();
        next.push(product);
        self.commit(next)
    }

    /// Replace the row stored under `key` and persist
    ///
    /// The barcode may change, but not to one owned by another row.
    ///
    /// # Errors
    /// * `NotFound` if `key` is not in the table
    /// * `DuplicateBarcode` if the new barcode collides with another row
    pub fn update_by_key(&mut self, key: &str, product: Product) -> Result<PersistReport> {
        let product = validate(product)?;
        let index = self
            .position(key)
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;

        if let Some(other) = self.position(&product.barcode) {
            if other != index {
                return Err(StoreError::DuplicateBarcode(product.barcode));
            }
        }

        log::info!("Updating product {} -> {}", key, product.barcode);
        let mut next = self.products.clone();
        next[index] = product;
        self.commit(next)
    }

    /// Quick edit of stock and/or price without touching other fields
    pub fn patch_stock(
        &mut self,
        key: &str,
        quantity: Option<u32>,
        price: Option<f64>,
    ) -> Result<PersistReport> {
        if let Some(price) = price {
            if !price.is_finite() || price < 0.0 {
                return Err(StoreError::InvalidProduct(format!("price {} is negative", price)));
            }
        }
        let index = self
            .position(key)
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;
        let mut next = self.products.clone();
        let product = &mut next[index];
        if let Some(quantity) = quantity {
            product.quantity = quantity;
        }
        if let Some(price) = price {
            product.price = price;
        }
        self.commit(next)
    }

    /// Set or clear (with `""`) the stored image of a product
    pub fn set_image(&mut self, key: &str, image_data: String) -> Result<PersistReport> {
        let index = self
            .position(key)
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;
        let mut next = self.products.clone();
        next[index].image_data = image_data;
        self.commit(next)
    }

    /// First step of a delete: check the product exists
    pub fn request_delete(&self, key: &str) -> Result<PendingDelete> {
        match self.find_by_barcode(key) {
            Some(p) => Ok(PendingDelete {
                barcode: p.barcode.clone(),
            }),
            None => Err(StoreError::NotFound(key.to_string())),
        }
    }

    /// Remove a confirmed product and persist
    pub fn delete(&mut self, confirmed: PendingDelete) -> Result<PersistReport> {
        let index = self
            .position(&confirmed.barcode)
            .ok_or_else(|| StoreError::NotFound(confirmed.barcode.clone()))?;
        let mut next = self.products.clone();
        let removed = next.remove(index);
        let report = self.commit(next)?;
        log::info!("Deleted product {} ({})", removed.barcode, removed.name);
        Ok(report)
    }

    /// Replace the whole table (backup restore) and persist
    ///
    /// # Errors
    /// * `DuplicateBarcode` if the new rows repeat a barcode; nothing changes
    pub fn replace_all(&mut self, products: Vec<Product>) -> Result<PersistReport> {
        let mut seen = BTreeSet::new();
        let mut validated = Vec::with_capacity(products.len());
        for product in products {
            let product = validate(product)?;
            if !seen.insert(product.barcode.clone()) {
                return Err(StoreError::DuplicateBarcode(product.barcode));
            }
            validated.push(product);
        }
        log::info!("Replacing inventory with {} products", validated.len());
        self.commit(validated)
    }

    /// Write the whole table to the local file and, best-effort, the remote
    pub fn persist(&self) -> Result<PersistReport> {
        self.mirror.persist(&self.products)
    }

    // The candidate table only replaces the current one once the local
    // write succeeded.
    fn commit(&mut self, next: Vec<Product>) -> Result<PersistReport> {
        let report = self.mirror.persist(&next)?;
        self.products = next;
        Ok(report)
    }

    fn position(&self, key: &str) -> Option<usize> {
        let key = key.trim();
        self.products.iter().position(|p| p.barcode == key)
    }
}

fn validate(mut product: Product) -> Result<Product> {
    product.barcode = product.barcode.trim().to_string();
    product.name = product.name.trim().to_string();
    if product.barcode.is_empty() {
        return Err(StoreError::InvalidProduct("barcode is required".to_string()));
    }
    if product.name.is_empty() {
        return Err(StoreError::InvalidProduct("name is required".to_string()));
    }
    if !product.price.is_finite() || product.price < 0.0 {
        return Err(StoreError::InvalidProduct(format!(
            "price {} is negative",
            product.price
        )));
    }
    if product.category.trim().is_empty() {
        product.category = crate::product::DEFAULT_CATEGORY.to_string();
    }
    Ok(product)
}
