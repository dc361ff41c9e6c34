use crate::checkout::orchestrator;
use crate::common::{error::StoreError, money::Money};
use crate::domain::{
    account::{Account, Role},
    bill::{Bill, PaymentMethod},
    product::Product,
};
use crate::store::{accounts::AccountStore, catalog::CatalogStore, ledger::LedgerStore};

/// Dispatches a login attempt to the store for the requested role.
pub fn login(
    store: &AccountStore,
    username: &str,
    password: &str,
    role: Role,
) -> Result<Option<Account>, StoreError> {
    match role {
        Role::Admin => store.authenticate_admin(username, password),
        Role::Cashier => store.authenticate_cashier(username, password),
    }
}

/// One cashier's working state: the bill under construction.
///
/// The bill moves Empty -> Building -> Committed; a successful commit is
/// terminal for that bill, and the session immediately starts a fresh empty
/// one for the same cashier.
#[derive(Debug)]
pub struct CashierSession {
    cashier: Account,
    bill: Bill,
}

impl CashierSession {
    pub fn new(cashier: Account) -> Self {
        let bill = Bill::new(cashier.clone());
        Self { cashier, bill }
    }

    pub fn cashier(&self) -> &Account {
        &self.cashier
    }

    pub fn bill(&self) -> &Bill {
        &self.bill
    }

    pub fn add_to_cart(&mut self, product: Product, quantity: u32) -> Result<(), StoreError> {
        self.bill.add_line(product, quantity)
    }

    pub fn remove_from_cart(&mut self, index: usize) -> Result<(), StoreError> {
        self.bill.remove_line(index)
    }

    pub fn apply_payment_method(&mut self, method: PaymentMethod) -> Money {
        self.bill.apply_payment_method(method)
    }

    /// Commits the current bill and starts a fresh one on success.
    ///
    /// Rejects an empty bill before any file is touched; on any commit error
    /// the bill is kept so the cashier can retry.
    pub fn commit(
        &mut self,
        catalog: &CatalogStore,
        ledger: &LedgerStore,
    ) -> Result<u64, StoreError> {
        if self.bill.is_empty() {
            return Err(StoreError::EmptyBill);
        }

        let sequence_number = orchestrator::commit(&self.bill, catalog, ledger)?;
        self.bill = Bill::new(self.cashier.clone());
        Ok(sequence_number)
    }
}
