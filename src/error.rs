//! Error handling module
//!
//! Centralized error taxonomy for the ledger. Every public operation
//! either returns its declared result or fails with exactly one of
//! these kinds, before any state mutation occurs.

use rust_decimal::Decimal;

use crate::domain::AmountError;

/// Ledger-wide Result type
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Ledger error kinds
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LedgerError {
    /// Malformed input: empty identifier, negative initial balance,
    /// self-transfer
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Non-positive or otherwise unrepresentable amount
    #[error("invalid amount: {0}")]
    InvalidAmount(#[from] AmountError),

    /// Withdrawal or transfer exceeds the available balance
    #[error("insufficient funds: required {required}, available {available}")]
    InsufficientFunds {
        required: Decimal,
        available: Decimal,
    },

    /// Account number collision on creation
    #[error("account {0} already exists")]
    DuplicateAccount(String),

    /// Lookup or transfer referencing an unknown account number
    #[error("account not found: {0}")]
    AccountNotFound(String),
}

impl LedgerError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn insufficient_funds(required: Decimal, available: Decimal) -> Self {
        Self::InsufficientFunds {
            required,
            available,
        }
    }
}
