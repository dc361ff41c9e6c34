use crate::common::money::Money;

/// One catalog record. Identified by the (category, name) pair, which is
/// unique across the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub category: String,
    pub name: String,
    pub price: Money,
    pub stock: u32,
}

impl Product {
    pub fn new(
        category: impl Into<String>,
        name: impl Into<String>,
        price: Money,
        stock: u32,
    ) -> Self {
        Self {
            category: category.into(),
            name: name.into(),
            price,
            stock,
        }
    }

    pub fn key_matches(&self, category: &str, name: &str) -> bool {
        self.category == category && self.name == name
    }
}
