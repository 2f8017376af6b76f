//! Domain types
//!
//! Pure value types shared by the ledger: validated monetary
//! primitives and immutable transaction records.

mod amount;
mod transaction;

pub use amount::{Amount, AmountError, Balance};
pub use transaction::{TransactionKind, TransactionRecord};
