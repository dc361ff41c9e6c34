use crate::common::error::StoreError;
use crate::domain::bill::Bill;
use crate::store::{catalog::CatalogStore, ledger::LedgerStore};
use tracing::{info, warn};

/// Commits one sale: assigns the next ledger sequence number, appends the
/// ledger line, then decrements stock for every cart line.
///
/// Precondition: the bill has at least one line. The session gates on
/// `EmptyBill` before calling; this function does not re-check.
///
/// The ledger append and the per-line stock writes are not one transaction.
/// A failure partway through returns the first error and leaves the steps
/// already done in place; nothing is rolled back.
pub fn commit(
    bill: &Bill,
    catalog: &CatalogStore,
    ledger: &LedgerStore,
) -> Result<u64, StoreError> {
    let sequence_number = ledger.next_sequence_number()?;
    ledger.append(sequence_number, bill.final_amount())?;

    for line in bill.lines() {
        let new_stock = line.product.stock - line.quantity;
        if let Err(e) = catalog.set_stock(&line.product.category, &line.product.name, new_stock) {
            warn!(
                sequence_number,
                category = %line.product.category,
                name = %line.product.name,
                "stock decrement failed after ledger append; sale partially committed"
            );
            return Err(e);
        }
    }

    info!(
        sequence_number,
        amount = %bill.final_amount(),
        lines = bill.lines().len(),
        "sale committed"
    );
    Ok(sequence_number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::money::Money;
    use crate::domain::account::{Account, Role};
    use crate::domain::product::Product;
    use std::{fs, str::FromStr};
    use tempfile::tempdir;

    fn money(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    #[test]
    fn commit_appends_ledger_line_and_decrements_stock() {
        let dir = tempdir().unwrap();
        let catalog = CatalogStore::new(dir.path().join("products.txt"));
        let ledger = LedgerStore::new(dir.path().join("bills.txt"));
        catalog
            .add("Electronics", "Laptop", money("1200.00"), 10)
            .unwrap();

        let mut bill = Bill::new(Account::new("john", "john123", Role::Cashier));
        let laptop = catalog.list_by_category("Electronics").unwrap()[0].clone();
        bill.add_line(laptop, 2).unwrap();
        bill.apply_payment_method(crate::domain::bill::PaymentMethod::Card);

        let sequence = commit(&bill, &catalog, &ledger).unwrap();

        assert_eq!(sequence, 1);
        assert_eq!(
            fs::read_to_string(dir.path().join("bills.txt")).unwrap(),
            "Bill 1: 2160.00\n"
        );
        let products = catalog.list_all().unwrap();
        assert_eq!(products[0].stock, 8);
    }

    #[test]
    fn commit_decrements_every_line() {
        let dir = tempdir().unwrap();
        let catalog = CatalogStore::new(dir.path().join("products.txt"));
        let ledger = LedgerStore::new(dir.path().join("bills.txt"));
        catalog
            .add("Electronics", "Laptop", money("1200.00"), 10)
            .unwrap();
        catalog.add("Groceries", "Milk", money("2.50"), 60).unwrap();

        let mut bill = Bill::new(Account::new("john", "john123", Role::Cashier));
        for product in catalog.list_all().unwrap() {
            bill.add_line(product, 3).unwrap();
        }

        commit(&bill, &catalog, &ledger).unwrap();

        let products = catalog.list_all().unwrap();
        assert_eq!(products[0].stock, 7);
        assert_eq!(products[1].stock, 57);
    }

    #[test]
    fn ledger_append_survives_a_failed_stock_decrement() {
        let dir = tempdir().unwrap();
        let catalog = CatalogStore::new(dir.path().join("products.txt"));
        let ledger = LedgerStore::new(dir.path().join("bills.txt"));
        catalog
            .add("Electronics", "Laptop", money("1200.00"), 10)
            .unwrap();

        let mut bill = Bill::new(Account::new("john", "john123", Role::Cashier));
        let laptop = catalog.list_all().unwrap()[0].clone();
        bill.add_line(laptop, 1).unwrap();

        // Admin deletes the product between cart build and commit. The ledger
        // line lands, the stock write fails, nothing is rolled back.
        catalog.delete("Electronics", "Laptop").unwrap();

        let err = commit(&bill, &catalog, &ledger).unwrap_err();

        assert!(matches!(err, StoreError::NotFound(_)));
        assert_eq!(
            fs::read_to_string(dir.path().join("bills.txt")).unwrap(),
            "Bill 1: 1200.00\n"
        );
    }
}
