use bigdecimal::{BigDecimal, ParseBigDecimalError, ToPrimitive};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
const SCALE: i64 = 100;

#[derive(Debug, Clone, Copy, Default)]
/// A monetary value stored in cents.
///
/// Wrapping an `i64` keeps prices and bill totals out of floating point:
/// every price on file has at most two fractional digits, so cents are exact.
///
/// # Examples
/// ```
/// use smart_mart::common::money::Money;
///
/// let price = Money::new(120000); // 1200.00
/// assert_eq!(price.as_cents(), 120000);
/// assert_eq!(price.to_string_2dp(), "1200.00");
/// ```
pub struct Money(i64);

impl Money {
    pub fn new(cents: i64) -> Self {
        Self(cents)
    }

    pub fn zero() -> Self {
        Money(0)
    }

    pub fn as_cents(&self) -> i64 {
        self.0
    }

    pub fn to_string_2dp(&self) -> String {
        let bd = BigDecimal::from(self.0) / BigDecimal::from(SCALE);
        format!("{:.2}", bd)
    }

    /// `pct` percent of this amount, rounded half-up to the nearest cent.
    pub fn percent(&self, pct: i64) -> Money {
        Money((self.0 * pct + 50).div_euclid(100))
    }
}

impl std::str::FromStr for Money {
    type Err = ParseBigDecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t.is_empty() {
            return Err(ParseBigDecimalError::Other("empty amount".into()));
        }

        let bd: BigDecimal = t.parse()?;

        // Scale to cents
        let scaled = (bd * BigDecimal::from(SCALE)).round(0);
        let value: i64 = scaled
            .to_i64()
            .ok_or_else(|| ParseBigDecimalError::Other("amount overflow".into()))?;

        Ok(Money(value))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_2dp())
    }
}

impl PartialEq for Money {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
impl Eq for Money {}

impl PartialOrd for Money {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.0.cmp(&other.0))
    }
}

impl Add for Money {
    type Output = Money;
    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;
    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl Mul<u32> for Money {
    type Output = Money;
    fn mul(self, qty: u32) -> Money {
        Money(self.0 * i64::from(qty))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        *self = *self - rhs;
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}
