// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::fmt;
use thiserror::Error;

/// Upper bound for a single transaction amount, inclusive.
const MAX_TRANSACTION_MINOR_UNITS: i64 = 1_000_000; // 10000.00

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    #[error("invalid amount '{0}'")]
    Unparseable(String),
    #[error("amount '{0}' has more than 2 decimal places")]
    TooPrecise(String),
    #[error("amount '{0}' must not be negative")]
    Negative(String),
    #[error("transaction amount {0} is outside the allowed range (0.00, 10000.00]")]
    OutOfRange(Money),
}

/// An exact currency amount held at 2-decimal-place scale.
///
/// The inner value is always non-negative and always rescaled to exactly
/// two fractional digits, so `Display` and database round-trips are stable.
/// Binary floating point appears only at the serialization boundary via
/// [`Money::to_api_number`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Parse a decimal string such as `"100.00"` or `"0.3"`.
    ///
    /// Rejects negative values and values carrying more than two
    /// significant fractional digits; `"1.230"` is accepted as `1.23`.
    pub fn from_decimal_str(s: &str) -> Result<Money, MoneyError> {
        let t = s.trim();
        let d: Decimal = t
            .parse()
            .map_err(|_| MoneyError::Unparseable(t.to_string()))?;
        Self::from_decimal(d)
    }

    pub fn from_decimal(d: Decimal) -> Result<Money, MoneyError> {
        if d.is_sign_negative() && !d.is_zero() {
            return Err(MoneyError::Negative(d.to_string()));
        }
        if d.normalize().scale() > 2 {
            return Err(MoneyError::TooPrecise(d.to_string()));
        }
        let mut d = d;
        d.rescale(2);
        Ok(Money(d))
    }

    /// Exact addition; `None` on overflow of the underlying decimal.
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Exact subtraction; `None` if the result would be negative.
    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        let d = self.0.checked_sub(rhs.0)?;
        if d < Decimal::ZERO {
            None
        } else {
            Some(Money(d))
        }
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Enforce the per-transaction bound: strictly positive, at most 10000.00.
    pub fn validate_transaction_amount(self) -> Result<Money, MoneyError> {
        let max = Decimal::new(MAX_TRANSACTION_MINOR_UNITS, 2);
        if self.is_zero() || self.0 > max {
            return Err(MoneyError::OutOfRange(self));
        }
        Ok(self)
    }

    /// Render as a plain JSON number with exactly 2 decimal places.
    /// This is the only place `Money` touches binary floating point.
    pub fn to_api_number(&self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }

    /// Stable TEXT form for storage, always `{:.2}`.
    pub fn to_db_string(&self) -> String {
        format!("{:.2}", self.0)
    }

    /// Rebuild from a stored TEXT column. Stored values were written by
    /// [`Money::to_db_string`], so anything unparseable is data corruption.
    pub fn from_db_str(s: &str) -> Result<Money, MoneyError> {
        Self::from_decimal_str(s)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid() {
        assert_eq!(Money::from_decimal_str("100.00").unwrap().to_db_string(), "100.00");
        assert_eq!(Money::from_decimal_str("0.3").unwrap().to_db_string(), "0.30");
        assert_eq!(Money::from_decimal_str("7").unwrap().to_db_string(), "7.00");
        assert_eq!(Money::from_decimal_str(" 2.50 ").unwrap().to_db_string(), "2.50");
        // Trailing zeros beyond two places are not significant.
        assert_eq!(Money::from_decimal_str("1.230").unwrap().to_db_string(), "1.23");
    }

    #[test]
    fn parse_rejects_precision() {
        assert!(matches!(
            Money::from_decimal_str("1.234"),
            Err(MoneyError::TooPrecise(_))
        ));
        assert!(matches!(
            Money::from_decimal_str("0.001"),
            Err(MoneyError::TooPrecise(_))
        ));
    }

    #[test]
    fn parse_rejects_negative_and_garbage() {
        assert!(matches!(
            Money::from_decimal_str("-1.00"),
            Err(MoneyError::Negative(_))
        ));
        assert!(matches!(
            Money::from_decimal_str("abc"),
            Err(MoneyError::Unparseable(_))
        ));
        assert!(matches!(
            Money::from_decimal_str(""),
            Err(MoneyError::Unparseable(_))
        ));
    }

    #[test]
    fn arithmetic_is_exact() {
        let a = Money::from_decimal_str("0.10").unwrap();
        let b = Money::from_decimal_str("0.20").unwrap();
        let sum = a.checked_add(b).unwrap();
        assert_eq!(sum, Money::from_decimal_str("0.30").unwrap());
        assert_eq!(sum.to_db_string(), "0.30");
    }

    #[test]
    fn subtraction_refuses_negative() {
        let a = Money::from_decimal_str("50.00").unwrap();
        let b = Money::from_decimal_str("50.01").unwrap();
        assert!(a.checked_sub(b).is_none());
        assert_eq!(
            b.checked_sub(a).unwrap(),
            Money::from_decimal_str("0.01").unwrap()
        );
    }

    #[test]
    fn transaction_bounds() {
        assert!(Money::ZERO.validate_transaction_amount().is_err());
        assert!(Money::from_decimal_str("10000.00")
            .unwrap()
            .validate_transaction_amount()
            .is_ok());
        assert!(Money::from_decimal_str("10000.01")
            .unwrap()
            .validate_transaction_amount()
            .is_err());
        assert!(Money::from_decimal_str("0.01")
            .unwrap()
            .validate_transaction_amount()
            .is_ok());
    }

    #[test]
    fn api_number_is_two_dp() {
        let m = Money::from_decimal_str("70.00").unwrap();
        assert_eq!(m.to_api_number(), 70.00);
        let m = Money::from_decimal_str("0.30").unwrap();
        assert_eq!(m.to_api_number(), 0.30);
    }

    #[test]
    fn ordering() {
        let a = Money::from_decimal_str("1.00").unwrap();
        let b = Money::from_decimal_str("2.00").unwrap();
        assert!(a < b);
        assert_eq!(a, Money::from_decimal_str("1").unwrap());
    }
}
