use crate::common::{error::StoreError, money::Money};
use crate::domain::{
    account::{Account, Role},
    product::Product,
};
use std::{
    io::{Read, Write},
    str::FromStr,
};

#[derive(serde::Serialize, serde::Deserialize)]
/// On-disk product row: `category,name,price,stock`, no header. Price stays a
/// string here so parse failures can carry the product's identity.
struct ProductRow {
    category: String,
    name: String,
    price: String,
    stock: u32,
}

#[derive(serde::Serialize, serde::Deserialize)]
/// On-disk account row: `username,password`, no header.
struct AccountRow {
    username: String,
    password: String,
}

/// Decodes every product row from `r`.
///
/// Decoding is strict: a row with the wrong field count or an unparseable
/// price or stock aborts the whole load with `Parse`. Blank lines are
/// skipped. Field values are never unescaped, matching the writer.
pub fn read_products<R: Read>(r: R) -> Result<Vec<Product>, StoreError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(r);

    let mut products = Vec::new();
    for row in rdr.deserialize::<ProductRow>() {
        let row = row.map_err(|e| StoreError::Parse(e.to_string()))?;
        let price = Money::from_str(&row.price).map_err(|e| {
            StoreError::Parse(format!(
                "bad price for {}/{}: {e}",
                row.category, row.name
            ))
        })?;
        products.push(Product::new(row.category, row.name, price, row.stock));
    }
    Ok(products)
}

/// Encodes products to `w`, one row per product, prices with two decimals.
///
/// Quoting is disabled: a field value containing the delimiter is written
/// as-is and corrupts the row boundary on the next parse, exactly as the
/// file format has always behaved.
pub fn write_products<W: Write>(w: W, products: &[Product]) -> Result<(), StoreError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(w);

    for product in products {
        let row = ProductRow {
            category: product.category.clone(),
            name: product.name.clone(),
            price: product.price.to_string_2dp(),
            stock: product.stock,
        };
        wtr.serialize(row)
            .map_err(|e| StoreError::Parse(e.to_string()))?;
    }

    wtr.flush()?;
    Ok(())
}

/// Decodes account rows from `r`, tagging each with `role`.
pub fn read_accounts<R: Read>(r: R, role: Role) -> Result<Vec<Account>, StoreError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(r);

    let mut accounts = Vec::new();
    for row in rdr.deserialize::<AccountRow>() {
        let row = row.map_err(|e| StoreError::Parse(e.to_string()))?;
        accounts.push(Account::new(row.username, row.password, role));
    }
    Ok(accounts)
}

pub fn write_accounts<W: Write>(w: W, accounts: &[Account]) -> Result<(), StoreError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(w);

    for account in accounts {
        let row = AccountRow {
            username: account.username.clone(),
            password: account.password.clone(),
        };
        wtr.serialize(row)
            .map_err(|e| StoreError::Parse(e.to_string()))?;
    }

    wtr.flush()?;
    Ok(())
}
