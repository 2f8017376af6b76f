//! bank_ledger
//!
//! In-memory ledger of bank accounts: deposits, withdrawals, atomic
//! two-account transfers, and an append-only transaction history. The
//! registry and accounts are safe to share between threads; the console
//! menu in [`cli`] is one caller among possibly many.

pub mod account;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod registry;

pub use account::Account;
pub use config::Config;
pub use domain::{Amount, AmountError, Balance, TransactionKind, TransactionRecord};
pub use error::{LedgerError, LedgerResult};
pub use registry::{AccountRegistry, TransferReceipt};
