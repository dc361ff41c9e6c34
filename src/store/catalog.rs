use crate::common::{error::StoreError, money::Money};
use crate::domain::product::Product;
use crate::store::codec;
use std::{
    collections::BTreeSet,
    fs::{File, OpenOptions},
    io::ErrorKind,
    path::PathBuf,
};
use tracing::debug;

/// Owns the products file. Every mutation is a full read of the file followed
/// by a full rewrite (records are variable-width text lines, so there is no
/// in-place patching). A failure mid-rewrite leaves the file partially
/// written.
///
/// Single writer assumed: one process, one active admin or cashier session
/// per store. Nothing else may touch the file.
#[derive(Debug)]
pub struct CatalogStore {
    path: PathBuf,
}

impl CatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// All products in file order. A missing file is an empty catalog, not an
    /// error; a malformed line aborts the whole load.
    pub fn list_all(&self) -> Result<Vec<Product>, StoreError> {
        match File::open(&self.path) {
            Ok(file) => codec::read_products(file),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn list_by_category(&self, category: &str) -> Result<Vec<Product>, StoreError> {
        Ok(self
            .list_all()?
            .into_iter()
            .filter(|p| p.category == category)
            .collect())
    }

    /// Distinct categories, lexicographically ordered.
    pub fn categories(&self) -> Result<Vec<String>, StoreError> {
        let categories: BTreeSet<String> = self
            .list_all()?
            .into_iter()
            .map(|p| p.category)
            .collect();
        Ok(categories.into_iter().collect())
    }

    /// Appends one product. Fails with `DuplicateKey` if the (category, name)
    /// pair is already on file, or `NegativePrice` for a price below zero.
    /// The price sign is re-checked here regardless of UI validation; the
    /// stock field is non-negative by type.
    pub fn add(
        &self,
        category: &str,
        name: &str,
        price: Money,
        stock: u32,
    ) -> Result<(), StoreError> {
        if price < Money::zero() {
            return Err(StoreError::NegativePrice);
        }

        let products = self.list_all()?;
        if products.iter().any(|p| p.key_matches(category, name)) {
            return Err(StoreError::DuplicateKey(format!(
                "product {category}/{name}"
            )));
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        codec::write_products(file, &[Product::new(category, name, price, stock)])?;

        debug!(category, name, "product added");
        Ok(())
    }

    /// Replaces the record matching the old key with the new field values.
    /// Whole-file rewrite: every other record is re-encoded unchanged.
    pub fn update(
        &self,
        old_category: &str,
        old_name: &str,
        new_category: &str,
        new_name: &str,
        new_price: Money,
        new_stock: u32,
    ) -> Result<(), StoreError> {
        if new_price < Money::zero() {
            return Err(StoreError::NegativePrice);
        }

        self.replace(old_category, old_name, |_| {
            Some(Product::new(new_category, new_name, new_price, new_stock))
        })
    }

    /// Rewrites the file omitting the matching record.
    pub fn delete(&self, category: &str, name: &str) -> Result<(), StoreError> {
        self.replace(category, name, |_| None)
    }

    /// Same rewrite as `update`, but only the stock field changes.
    pub fn set_stock(&self, category: &str, name: &str, new_stock: u32) -> Result<(), StoreError> {
        self.replace(category, name, |found| {
            Some(Product::new(
                found.category.clone(),
                found.name.clone(),
                found.price,
                new_stock,
            ))
        })
    }

    /// Shared read-rewrite cycle: maps the record matching (category, name)
    /// through `f` (None deletes it) and rewrites every record. `NotFound`
    /// is returned before anything is written, so a miss leaves the file
    /// untouched.
    fn replace(
        &self,
        category: &str,
        name: &str,
        f: impl Fn(&Product) -> Option<Product>,
    ) -> Result<(), StoreError> {
        let products = self.list_all()?;
        if !products.iter().any(|p| p.key_matches(category, name)) {
            return Err(StoreError::NotFound(format!("product {category}/{name}")));
        }

        let rewritten: Vec<Product> = products
            .into_iter()
            .filter_map(|p| {
                if p.key_matches(category, name) {
                    f(&p)
                } else {
                    Some(p)
                }
            })
            .collect();

        let file = File::create(&self.path)?;
        codec::write_products(file, &rewritten)?;

        debug!(category, name, records = rewritten.len(), "catalog rewritten");
        Ok(())
    }
}
