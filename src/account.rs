//! Account
//!
//! A single bank account: immutable identity plus a lock-guarded
//! (balance, history) pair. The account guards balance consistency and
//! keeps an auditable, append-only history; callers only ever observe
//! the pair as one consistent snapshot.

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, MutexGuard};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::{Amount, Balance, TransactionKind, TransactionRecord};
use crate::error::{LedgerError, LedgerResult};

/// A bank account.
///
/// Identity (number, owner, creation time) is immutable; the mutable
/// state lives behind a mutex so concurrent deposits, withdrawals and
/// transfer legs on the same account cannot interleave their
/// check-then-update sequences.
#[derive(Debug)]
pub struct Account {
    account_number: String,
    owner_name: String,
    created_at: DateTime<Utc>,
    state: Mutex<AccountState>,
}

/// The mutable half of an account: current balance and the append-only
/// transaction log. Only reachable through the owning account's mutex.
#[derive(Debug)]
pub(crate) struct AccountState {
    balance: Balance,
    history: Vec<TransactionRecord>,
}

impl AccountState {
    pub(crate) fn balance(&self) -> Balance {
        self.balance
    }

    /// Append a record and move the balance to `new_balance`.
    /// All validation has happened by the time this runs.
    fn commit(
        &mut self,
        kind: TransactionKind,
        amount: Decimal,
        new_balance: Balance,
        counterparty: Option<String>,
        transfer_id: Option<Uuid>,
    ) -> Decimal {
        self.balance = new_balance;
        self.history.push(TransactionRecord {
            kind,
            amount,
            resulting_balance: new_balance.value(),
            timestamp: Utc::now(),
            counterparty,
            transfer_id,
        });
        new_balance.value()
    }

    /// Debit leg of a transfer. Registry-only primitive; the caller
    /// holds both account locks.
    pub(crate) fn transfer_out(
        &mut self,
        amount: &Amount,
        counterparty: &str,
        transfer_id: Uuid,
    ) -> LedgerResult<Decimal> {
        let new_balance = self.balance.debit(amount).ok_or_else(|| {
            LedgerError::insufficient_funds(amount.value(), self.balance.value())
        })?;
        Ok(self.commit(
            TransactionKind::TransferOut,
            amount.value(),
            new_balance,
            Some(counterparty.to_string()),
            Some(transfer_id),
        ))
    }

    /// Credit leg of a transfer. Registry-only primitive.
    pub(crate) fn transfer_in(
        &mut self,
        amount: &Amount,
        counterparty: &str,
        transfer_id: Uuid,
    ) -> LedgerResult<Decimal> {
        let new_balance = self.balance.credit(amount)?;
        Ok(self.commit(
            TransactionKind::TransferIn,
            amount.value(),
            new_balance,
            Some(counterparty.to_string()),
            Some(transfer_id),
        ))
    }
}

impl Account {
    /// Open an account with a validated starting balance, recording the
    /// opening entry. Accounts are only ever constructed through the
    /// registry's create operation.
    pub(crate) fn open(account_number: String, owner_name: String, initial: Balance) -> Self {
        let created_at = Utc::now();
        let state = AccountState {
            balance: initial,
            history: vec![TransactionRecord {
                kind: TransactionKind::Initial,
                amount: initial.value(),
                resulting_balance: initial.value(),
                timestamp: created_at,
                counterparty: None,
                transfer_id: None,
            }],
        };
        Self {
            account_number,
            owner_name,
            created_at,
            state: Mutex::new(state),
        }
    }

    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Current balance.
    pub fn balance(&self) -> Decimal {
        self.state.lock().balance.value()
    }

    /// Deposit money into the account and return the new balance.
    ///
    /// # Errors
    /// `LedgerError::InvalidAmount` if `amount` is not positive.
    pub fn deposit(&self, amount: Decimal) -> LedgerResult<Decimal> {
        let amount = Amount::new(amount)?;
        let mut state = self.state.lock();
        let new_balance = state.balance.credit(&amount)?;
        let result = state.commit(TransactionKind::Deposit, amount.value(), new_balance, None, None);
        tracing::debug!(account = %self.account_number, %amount, balance = %result, "deposit");
        Ok(result)
    }

    /// Withdraw money from the account and return the new balance.
    ///
    /// # Errors
    /// - `LedgerError::InvalidAmount` if `amount` is not positive
    /// - `LedgerError::InsufficientFunds` if `amount` exceeds the balance
    pub fn withdraw(&self, amount: Decimal) -> LedgerResult<Decimal> {
        let amount = Amount::new(amount)?;
        let mut state = self.state.lock();
        let new_balance = state.balance.debit(&amount).ok_or_else(|| {
            LedgerError::insufficient_funds(amount.value(), state.balance.value())
        })?;
        let result =
            state.commit(TransactionKind::Withdrawal, amount.value(), new_balance, None, None);
        tracing::debug!(account = %self.account_number, %amount, balance = %result, "withdraw");
        Ok(result)
    }

    /// Formatted read-only snapshot of the account. Pure.
    pub fn account_info(&self) -> String {
        let balance = self.balance();
        format!(
            "Account: {} | Owner: {} | Balance: ${:.2} | Created: {}",
            self.account_number,
            self.owner_name,
            balance,
            self.created_at.format("%Y-%m-%d %H:%M:%S"),
        )
    }

    /// Ordered snapshot of the transaction history. The internal log
    /// cannot be mutated through the returned records.
    pub fn transaction_history(&self) -> Vec<TransactionRecord> {
        self.state.lock().history.clone()
    }

    /// Exclusive access to the mutable state, for the registry's
    /// transfer protocol.
    pub(crate) fn lock_state(&self) -> MutexGuard<'_, AccountState> {
        self.state.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AmountError;
    use rust_decimal_macros::dec;

    fn account(balance: Decimal) -> Account {
        Account::open(
            "123456789".to_string(),
            "John Doe".to_string(),
            Balance::new(balance).unwrap(),
        )
    }

    #[test]
    fn test_open_records_initial_entry() {
        let account = account(dec!(1000));
        assert_eq!(account.balance(), dec!(1000));

        let history = account.transaction_history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].kind, TransactionKind::Initial);
        assert_eq!(history[0].resulting_balance, dec!(1000));
    }

    #[test]
    fn test_open_with_zero_balance() {
        let account = account(dec!(0));
        let history = account.transaction_history();
        assert_eq!(history[0].amount, dec!(0));
    }

    #[test]
    fn test_deposit() {
        let account = account(dec!(1000));
        let new_balance = account.deposit(dec!(500)).unwrap();
        assert_eq!(new_balance, dec!(1500));
        assert_eq!(account.balance(), dec!(1500));
    }

    #[test]
    fn test_deposit_negative_amount() {
        let account = account(dec!(1000));
        let result = account.deposit(dec!(-100));
        assert!(matches!(
            result,
            Err(LedgerError::InvalidAmount(AmountError::NotPositive(_)))
        ));
        // Failed operation leaves balance and history untouched
        assert_eq!(account.balance(), dec!(1000));
        assert_eq!(account.transaction_history().len(), 1);
    }

    #[test]
    fn test_withdraw() {
        let account = account(dec!(1000));
        let new_balance = account.withdraw(dec!(300)).unwrap();
        assert_eq!(new_balance, dec!(700));
    }

    #[test]
    fn test_withdraw_insufficient_funds() {
        let account = account(dec!(1000));
        let result = account.withdraw(dec!(2000));
        assert_eq!(
            result,
            Err(LedgerError::insufficient_funds(dec!(2000), dec!(1000)))
        );
        assert_eq!(account.balance(), dec!(1000));
    }

    #[test]
    fn test_withdraw_exact_balance() {
        let account = account(dec!(1000));
        assert_eq!(account.withdraw(dec!(1000)).unwrap(), dec!(0));
    }

    #[test]
    fn test_withdraw_zero_amount() {
        let account = account(dec!(1000));
        assert!(matches!(
            account.withdraw(dec!(0)),
            Err(LedgerError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_history_order_and_length() {
        let account = account(dec!(1000));
        account.deposit(dec!(200)).unwrap();
        account.withdraw(dec!(100)).unwrap();

        let history = account.transaction_history();
        assert_eq!(history.len(), 3); // Initial + deposit + withdraw
        assert!(history[1].to_string().contains("Deposited: $200.00"));
        assert!(history[2].to_string().contains("Withdrawn: $100.00"));
    }

    #[test]
    fn test_history_snapshot_is_detached() {
        let account = account(dec!(1000));
        let mut snapshot = account.transaction_history();
        snapshot.clear();
        assert_eq!(account.transaction_history().len(), 1);
    }

    #[test]
    fn test_account_info() {
        let account = account(dec!(1000));
        let info = account.account_info();
        assert!(info.contains("123456789"));
        assert!(info.contains("John Doe"));
        assert!(info.contains("$1000.00"));
    }
}
