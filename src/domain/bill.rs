use crate::common::{error::StoreError, money::Money};
use crate::domain::{account::Account, product::Product};

const CARD_DISCOUNT_PCT: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Cash,
    Card,
}

/// One (product, quantity) pair on a bill. Holds the product snapshot taken
/// when the line was added; never persisted on its own.
#[derive(Debug, Clone)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
    pub subtotal: Money,
}

impl CartLine {
    fn new(product: Product, quantity: u32) -> Self {
        let subtotal = product.price * quantity;
        Self {
            product,
            quantity,
            subtotal,
        }
    }
}

/// One in-progress sale for a single cashier session.
///
/// Lines keep insertion order; that order is also the removal index space.
/// Subtotal, discount and final amount are recomputed on every line or
/// payment-method change. A committed bill is never reused; the session
/// replaces it with a fresh empty one after a successful commit.
#[derive(Debug, Clone)]
pub struct Bill {
    cashier: Account,
    lines: Vec<CartLine>,
    subtotal: Money,
    payment_method: Option<PaymentMethod>,
    discount: Money,
    final_amount: Money,
}

impl Bill {
    pub fn new(cashier: Account) -> Self {
        Self {
            cashier,
            lines: Vec::new(),
            subtotal: Money::zero(),
            payment_method: None,
            discount: Money::zero(),
            final_amount: Money::zero(),
        }
    }

    pub fn cashier(&self) -> &Account {
        &self.cashier
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn subtotal(&self) -> Money {
        self.subtotal
    }

    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment_method
    }

    pub fn discount(&self) -> Money {
        self.discount
    }

    pub fn final_amount(&self) -> Money {
        self.final_amount
    }

    /// Adds a line for `quantity` units of `product`.
    ///
    /// Stock sufficiency is checked against the snapshot the caller loaded
    /// for display; commit does not re-validate against the live file.
    pub fn add_line(&mut self, product: Product, quantity: u32) -> Result<(), StoreError> {
        if quantity > product.stock {
            return Err(StoreError::InsufficientStock {
                available: product.stock,
            });
        }

        self.lines.push(CartLine::new(product, quantity));
        self.recompute();
        Ok(())
    }

    pub fn remove_line(&mut self, index: usize) -> Result<(), StoreError> {
        if index >= self.lines.len() {
            return Err(StoreError::IndexOutOfRange);
        }
        self.lines.remove(index);
        self.recompute();
        Ok(())
    }

    /// Selects the payment method and returns the resulting final amount.
    /// Card gets a 10% discount; anything else pays the subtotal. Idempotent,
    /// safe to call on every UI refresh.
    pub fn apply_payment_method(&mut self, method: PaymentMethod) -> Money {
        self.payment_method = Some(method);
        self.recompute();
        self.final_amount
    }

    fn recompute(&mut self) {
        self.subtotal = self
            .lines
            .iter()
            .fold(Money::zero(), |acc, line| acc + line.subtotal);
        self.discount = match self.payment_method {
            Some(PaymentMethod::Card) => self.subtotal.percent(CARD_DISCOUNT_PCT),
            _ => Money::zero(),
        };
        self.final_amount = self.subtotal - self.discount;
    }
}
