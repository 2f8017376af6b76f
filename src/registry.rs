//! Account registry
//!
//! Owns account identity and executes transfers as a single logical
//! operation. Structural changes to the account map are exclusive with
//! each other and with aggregate queries; per-account mutation goes
//! through each account's own lock.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::account::Account;
use crate::domain::{Amount, Balance};
use crate::error::{LedgerError, LedgerResult};

/// Summary of a completed transfer, linking both history legs through
/// `transfer_id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferReceipt {
    pub transfer_id: Uuid,
    pub from_account: String,
    pub to_account: String,
    pub amount: Decimal,
}

/// Registry of all accounts, keyed by account number.
///
/// Construct one explicitly at startup and share it (`Arc`) with every
/// caller; tests build isolated registries per case.
#[derive(Debug, Default)]
pub struct AccountRegistry {
    accounts: RwLock<BTreeMap<String, Arc<Account>>>,
}

impl AccountRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new account and return it.
    ///
    /// # Errors
    /// - `LedgerError::InvalidArgument` on empty account number, empty
    ///   owner name, or negative initial balance
    /// - `LedgerError::DuplicateAccount` if the number is taken
    pub fn create_account(
        &self,
        account_number: &str,
        owner_name: &str,
        initial_balance: Decimal,
    ) -> LedgerResult<Arc<Account>> {
        let account_number = account_number.trim();
        let owner_name = owner_name.trim();

        if account_number.is_empty() {
            return Err(LedgerError::invalid_argument("account number cannot be empty"));
        }
        if owner_name.is_empty() {
            return Err(LedgerError::invalid_argument("owner name cannot be empty"));
        }
        let initial = Balance::new(initial_balance).map_err(|e| {
            LedgerError::invalid_argument(format!("invalid initial balance: {e}"))
        })?;

        let mut accounts = self.accounts.write();
        if accounts.contains_key(account_number) {
            return Err(LedgerError::DuplicateAccount(account_number.to_string()));
        }

        let account = Arc::new(Account::open(
            account_number.to_string(),
            owner_name.to_string(),
            initial,
        ));
        accounts.insert(account_number.to_string(), Arc::clone(&account));

        tracing::info!(account = %account_number, owner = %owner_name, balance = %initial, "account created");
        Ok(account)
    }

    /// Look up an account by number.
    ///
    /// # Errors
    /// `LedgerError::AccountNotFound` if absent.
    pub fn get_account(&self, account_number: &str) -> LedgerResult<Arc<Account>> {
        self.accounts
            .read()
            .get(account_number)
            .cloned()
            .ok_or_else(|| LedgerError::AccountNotFound(account_number.to_string()))
    }

    /// Move money between two accounts atomically.
    ///
    /// Either both legs happen (source debited, destination credited,
    /// one TransferOut and one TransferIn appended, each naming the
    /// counterparty) or nothing changes. Both new balances are
    /// validated before either leg commits, and both account locks are
    /// held across the commit, so no caller can observe a debit
    /// without its matching credit.
    ///
    /// # Errors
    /// - `LedgerError::InvalidArgument` if `from == to` or the amount
    ///   is not positive
    /// - `LedgerError::AccountNotFound` if either account is missing
    /// - `LedgerError::InsufficientFunds` if the source balance is
    ///   less than the amount
    pub fn transfer(
        &self,
        from_number: &str,
        to_number: &str,
        amount: Decimal,
    ) -> LedgerResult<TransferReceipt> {
        if from_number == to_number {
            return Err(LedgerError::invalid_argument(
                "cannot transfer to the same account",
            ));
        }
        if amount <= Decimal::ZERO {
            return Err(LedgerError::invalid_argument(format!(
                "transfer amount must be positive (got {amount})"
            )));
        }
        let amount = Amount::new(amount)?;

        let (from_account, to_account) = {
            let accounts = self.accounts.read();
            let from = accounts
                .get(from_number)
                .cloned()
                .ok_or_else(|| LedgerError::AccountNotFound(from_number.to_string()))?;
            let to = accounts
                .get(to_number)
                .cloned()
                .ok_or_else(|| LedgerError::AccountNotFound(to_number.to_string()))?;
            (from, to)
        };

        // Lock both accounts in account-number order, not call order,
        // so opposite-direction transfers cannot deadlock.
        let (mut first, mut second) = if from_number < to_number {
            (from_account.lock_state(), to_account.lock_state())
        } else {
            (to_account.lock_state(), from_account.lock_state())
        };
        let (from_state, to_state) = if from_number < to_number {
            (&mut *first, &mut *second)
        } else {
            (&mut *second, &mut *first)
        };

        // Validate both legs before committing either: the debit must
        // cover, and the credited balance must stay representable.
        if !from_state.balance().is_sufficient_for(&amount) {
            return Err(LedgerError::insufficient_funds(
                amount.value(),
                from_state.balance().value(),
            ));
        }
        to_state.balance().credit(&amount)?;

        // Commit. No fallible step past this point.
        let transfer_id = Uuid::new_v4();
        from_state.transfer_out(&amount, to_number, transfer_id)?;
        to_state.transfer_in(&amount, from_number, transfer_id)?;

        tracing::info!(
            %transfer_id,
            from = %from_number,
            to = %to_number,
            %amount,
            "transfer completed"
        );

        Ok(TransferReceipt {
            transfer_id,
            from_account: from_number.to_string(),
            to_account: to_number.to_string(),
            amount: amount.value(),
        })
    }

    /// Sum of all account balances.
    pub fn total_bank_balance(&self) -> Decimal {
        self.accounts
            .read()
            .values()
            .map(|account| account.balance())
            .sum()
    }

    /// Number of accounts.
    pub fn accounts_count(&self) -> usize {
        self.accounts.read().len()
    }

    /// Snapshot of all accounts in account-number order, for summaries.
    pub fn accounts(&self) -> Vec<Arc<Account>> {
        self.accounts.read().values().cloned().collect()
    }
}
