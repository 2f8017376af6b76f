//! Transaction records
//!
//! Immutable history entries. A record is an append-only fact about an
//! account; it is never edited after it has been written.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// What kind of operation produced a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Opening entry written at account construction
    Initial,
    Deposit,
    Withdrawal,
    TransferOut,
    TransferIn,
}

/// One entry in an account's transaction history.
///
/// `counterparty` and `transfer_id` are set only for the two legs of a
/// transfer; the same `transfer_id` links a `TransferOut` to its
/// matching `TransferIn` on the other account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub kind: TransactionKind,

    /// Operation amount. Zero only for an `Initial` record of an
    /// account opened with a zero balance.
    pub amount: Decimal,

    /// Balance snapshot immediately after the operation
    pub resulting_balance: Decimal,

    pub timestamp: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub counterparty: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub transfer_id: Option<Uuid>,
}

impl fmt::Display for TransactionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.kind, &self.counterparty) {
            (TransactionKind::Initial, _) => {
                write!(f, "Initial balance: ${:.2}", self.amount)?;
            }
            (TransactionKind::Deposit, _) => {
                write!(f, "Deposited: ${:.2}", self.amount)?;
            }
            (TransactionKind::Withdrawal, _) => {
                write!(f, "Withdrawn: ${:.2}", self.amount)?;
            }
            (TransactionKind::TransferOut, Some(to)) => {
                write!(f, "Transferred to {}: ${:.2}", to, self.amount)?;
            }
            (TransactionKind::TransferIn, Some(from)) => {
                write!(f, "Received from {}: ${:.2}", from, self.amount)?;
            }
            // Transfer legs always carry a counterparty; render
            // defensively if one is somehow missing.
            (TransactionKind::TransferOut, None) => {
                write!(f, "Transferred: ${:.2}", self.amount)?;
            }
            (TransactionKind::TransferIn, None) => {
                write!(f, "Received: ${:.2}", self.amount)?;
            }
        }
        write!(
            f,
            " | Balance: ${:.2} | {}",
            self.resulting_balance,
            self.timestamp.format("%Y-%m-%d %H:%M:%S")
        )
    }
}
