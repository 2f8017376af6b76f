//! Monetary primitives
//!
//! Domain newtypes for money with validation at construction time,
//! so invalid values cannot exist inside the ledger.

use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// Maximum allowed value for any amount or balance (1 trillion)
const MAX_AMOUNT: &str = "1000000000000";

/// Maximum decimal places (cents)
const MAX_SCALE: u32 = 2;

/// A validated, strictly positive monetary amount.
///
/// # Invariants
/// - Value is always positive (> 0)
/// - Maximum 2 decimal places
/// - Never exceeds [`MAX_AMOUNT`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Amount(Decimal);

/// Errors that can occur when creating an `Amount` or `Balance`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("amount must be positive (got {0})")]
    NotPositive(Decimal),

    #[error("amount has too many decimal places (max {MAX_SCALE}, got {0})")]
    TooManyDecimals(u32),

    #[error("amount exceeds maximum allowed value ({MAX_AMOUNT})")]
    Overflow,

    #[error("balance cannot be negative (got {0})")]
    NegativeBalance(Decimal),
}

impl Amount {
    /// Create a new `Amount` with validation.
    ///
    /// # Errors
    /// - `AmountError::NotPositive` if value <= 0
    /// - `AmountError::TooManyDecimals` if more than 2 decimal places
    /// - `AmountError::Overflow` if value exceeds the maximum
    pub fn new(value: Decimal) -> Result<Self, AmountError> {
        if value <= Decimal::ZERO {
            return Err(AmountError::NotPositive(value));
        }

        if value.normalize().scale() > MAX_SCALE {
            return Err(AmountError::TooManyDecimals(value.scale()));
        }

        if value > max_value() {
            return Err(AmountError::Overflow);
        }

        Ok(Self(value))
    }

    /// Get the underlying `Decimal` value.
    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

fn max_value() -> Decimal {
    // The constant is well-formed; parsing it cannot fail.
    Decimal::from_str(MAX_AMOUNT).expect("invalid MAX_AMOUNT constant")
}

/// An account balance. Unlike [`Amount`], a `Balance` can be zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Balance(Decimal);

impl Balance {
    /// Create a new balance (zero or positive).
    pub fn new(value: Decimal) -> Result<Self, AmountError> {
        if value < Decimal::ZERO {
            return Err(AmountError::NegativeBalance(value));
        }

        if value.normalize().scale() > MAX_SCALE {
            return Err(AmountError::TooManyDecimals(value.scale()));
        }

        if value > max_value() {
            return Err(AmountError::Overflow);
        }

        Ok(Self(value))
    }

    /// Create a zero balance.
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Get the underlying value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Check whether the balance covers a withdrawal of `amount`.
    pub fn is_sufficient_for(&self, amount: &Amount) -> bool {
        self.0 >= amount.value()
    }

    /// Add an amount. Fails only if the result would exceed the cap.
    pub fn credit(&self, amount: &Amount) -> Result<Balance, AmountError> {
        Balance::new(self.0 + amount.value())
    }

    /// Subtract an amount. Returns `None` if the balance is insufficient.
    pub fn debit(&self, amount: &Amount) -> Option<Balance> {
        if self.is_sufficient_for(amount) {
            Some(Self(self.0 - amount.value()))
        } else {
            None
        }
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl Default for Balance {
    fn default() -> Self {
        Self::zero()
    }
}
