//! Console menu
//!
//! Interactive menu loop over the ledger. Dispatch is a lookup from
//! command key to handler function rather than a branching switch;
//! handlers own all text I/O so the ledger core never touches the
//! console. Handlers read from a `BufRead` and write to a `Write` so
//! tests can script a whole session.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::LedgerResult;
use crate::registry::AccountRegistry;

type Handler = fn(&AccountRegistry, &mut dyn BufRead, &mut dyn Write) -> io::Result<()>;

struct MenuEntry {
    key: &'static str,
    label: &'static str,
    handler: Handler,
}

const MENU: &[MenuEntry] = &[
    MenuEntry {
        key: "1",
        label: "Create a new account",
        handler: create_account,
    },
    MenuEntry {
        key: "2",
        label: "Deposit money",
        handler: deposit,
    },
    MenuEntry {
        key: "3",
        label: "Withdraw money",
        handler: withdraw,
    },
    MenuEntry {
        key: "4",
        label: "Transfer money",
        handler: transfer,
    },
    MenuEntry {
        key: "5",
        label: "Check balance",
        handler: check_balance,
    },
    MenuEntry {
        key: "6",
        label: "Transaction history",
        handler: transaction_history,
    },
    MenuEntry {
        key: "7",
        label: "Bank summary",
        handler: bank_summary,
    },
];

const EXIT_KEY: &str = "0";

/// Run the menu loop until the user exits or input ends.
pub fn run(
    registry: &AccountRegistry,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> io::Result<()> {
    writeln!(output, "=== Bank Ledger ===")?;
    loop {
        print_menu(output)?;
        let Some(choice) = prompt(input, output, "Select an option: ")? else {
            break;
        };
        if choice == EXIT_KEY {
            writeln!(output, "Exiting...")?;
            break;
        }
        match MENU.iter().find(|entry| entry.key == choice) {
            Some(entry) => (entry.handler)(registry, input, output)?,
            None => writeln!(output, "Invalid choice!")?,
        }
    }
    Ok(())
}

fn print_menu(output: &mut dyn Write) -> io::Result<()> {
    writeln!(output, "\n=== Main menu ===")?;
    for entry in MENU {
        writeln!(output, "{}. {}", entry.key, entry.label)?;
    }
    writeln!(output, "{}. Exit", EXIT_KEY)
}

/// Create a few demo accounts at startup.
pub fn seed_demo_accounts(registry: &AccountRegistry) -> LedgerResult<()> {
    registry.create_account("1001", "Alice Johnson", Decimal::from(5000))?;
    registry.create_account("1002", "Bob Martinez", Decimal::from(3000))?;
    registry.create_account("1003", "Carol Chen", Decimal::from(10000))?;
    tracing::info!("demo accounts seeded");
    Ok(())
}

// ---------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------

fn create_account(
    registry: &AccountRegistry,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> io::Result<()> {
    writeln!(output, "\n=== Create account ===")?;
    let Some(number) = prompt(input, output, "Account number: ")? else {
        return Ok(());
    };
    let Some(owner) = prompt(input, output, "Owner name: ")? else {
        return Ok(());
    };
    let Some(balance) = prompt_decimal(input, output, "Initial balance: ")? else {
        return Ok(());
    };

    match registry.create_account(&number, &owner, balance) {
        Ok(account) => {
            writeln!(output, "Account created!")?;
            writeln!(output, "{}", account.account_info())?;
        }
        Err(e) => writeln!(output, "Error: {e}")?,
    }
    Ok(())
}

fn deposit(
    registry: &AccountRegistry,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> io::Result<()> {
    writeln!(output, "\n=== Deposit ===")?;
    let Some(number) = prompt(input, output, "Account number: ")? else {
        return Ok(());
    };
    let Some(amount) = prompt_decimal(input, output, "Amount to deposit: ")? else {
        return Ok(());
    };

    match registry
        .get_account(&number)
        .and_then(|account| account.deposit(amount))
    {
        Ok(balance) => {
            writeln!(output, "Deposited: ${amount:.2}")?;
            writeln!(output, "New balance: ${balance:.2}")?;
        }
        Err(e) => writeln!(output, "Error: {e}")?,
    }
    Ok(())
}

fn withdraw(
    registry: &AccountRegistry,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> io::Result<()> {
    writeln!(output, "\n=== Withdraw ===")?;
    let Some(number) = prompt(input, output, "Account number: ")? else {
        return Ok(());
    };
    let Some(amount) = prompt_decimal(input, output, "Amount to withdraw: ")? else {
        return Ok(());
    };

    match registry
        .get_account(&number)
        .and_then(|account| account.withdraw(amount))
    {
        Ok(balance) => {
            writeln!(output, "Withdrawn: ${amount:.2}")?;
            writeln!(output, "New balance: ${balance:.2}")?;
        }
        Err(e) => writeln!(output, "Error: {e}")?,
    }
    Ok(())
}

fn transfer(
    registry: &AccountRegistry,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> io::Result<()> {
    writeln!(output, "\n=== Transfer ===")?;
    let Some(from) = prompt(input, output, "From account: ")? else {
        return Ok(());
    };
    let Some(to) = prompt(input, output, "To account: ")? else {
        return Ok(());
    };
    let Some(amount) = prompt_decimal(input, output, "Amount to transfer: ")? else {
        return Ok(());
    };

    match registry.transfer(&from, &to, amount) {
        Ok(receipt) => {
            writeln!(output, "Transferred: ${:.2}", receipt.amount)?;
            writeln!(
                output,
                "From account {} to account {}",
                receipt.from_account, receipt.to_account
            )?;
        }
        Err(e) => writeln!(output, "Error: {e}")?,
    }
    Ok(())
}

fn check_balance(
    registry: &AccountRegistry,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> io::Result<()> {
    writeln!(output, "\n=== Balance ===")?;
    let Some(number) = prompt(input, output, "Account number: ")? else {
        return Ok(());
    };

    match registry.get_account(&number) {
        Ok(account) => writeln!(output, "{}", account.account_info())?,
        Err(e) => writeln!(output, "Error: {e}")?,
    }
    Ok(())
}

fn transaction_history(
    registry: &AccountRegistry,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> io::Result<()> {
    writeln!(output, "\n=== Transaction history ===")?;
    let Some(number) = prompt(input, output, "Account number: ")? else {
        return Ok(());
    };

    match registry.get_account(&number) {
        Ok(account) => {
            writeln!(output, "History for account {number}:")?;
            for record in account.transaction_history() {
                writeln!(output, "  - {record}")?;
            }
        }
        Err(e) => writeln!(output, "Error: {e}")?,
    }
    Ok(())
}

fn bank_summary(
    registry: &AccountRegistry,
    _input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> io::Result<()> {
    writeln!(output, "\n=== Bank summary ===")?;
    writeln!(
        output,
        "Total bank balance: ${:.2}",
        registry.total_bank_balance()
    )?;
    writeln!(output, "Number of accounts: {}", registry.accounts_count())
}

// ---------------------------------------------------------------------
// Input helpers
// ---------------------------------------------------------------------

/// Prompt for one line of input. Returns `None` on end of input.
fn prompt(
    input: &mut dyn BufRead,
    output: &mut dyn Write,
    label: &str,
) -> io::Result<Option<String>> {
    write!(output, "{label}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Prompt for a decimal value, re-asking until the input parses.
fn prompt_decimal(
    input: &mut dyn BufRead,
    output: &mut dyn Write,
    label: &str,
) -> io::Result<Option<Decimal>> {
    loop {
        let Some(line) = prompt(input, output, label)? else {
            return Ok(None);
        };
        match Decimal::from_str(&line) {
            Ok(value) => return Ok(Some(value)),
            Err(_) => writeln!(output, "Please enter a number!")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Cursor;

    fn run_session(registry: &AccountRegistry, script: &str) -> String {
        let mut input = Cursor::new(script.to_string());
        let mut output = Vec::new();
        run(registry, &mut input, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_create_account_session() {
        let registry = AccountRegistry::new();
        let output = run_session(&registry, "1\n777\nDave\n100\n0\n");

        assert!(output.contains("Account created!"));
        assert_eq!(registry.get_account("777").unwrap().balance(), dec!(100));
    }

    #[test]
    fn test_deposit_and_balance_session() {
        let registry = AccountRegistry::new();
        registry.create_account("111", "Alice", dec!(1000)).unwrap();

        let output = run_session(&registry, "2\n111\n250\n5\n111\n0\n");
        assert!(output.contains("Deposited: $250.00"));
        assert!(output.contains("New balance: $1250.00"));
        assert!(output.contains("$1250.00"));
    }

    #[test]
    fn test_transfer_session() {
        let registry = AccountRegistry::new();
        registry.create_account("111", "Alice", dec!(1000)).unwrap();
        registry.create_account("222", "Bob", dec!(500)).unwrap();

        let output = run_session(&registry, "4\n111\n222\n300\n0\n");
        assert!(output.contains("Transferred: $300.00"));
        assert_eq!(registry.get_account("111").unwrap().balance(), dec!(700));
        assert_eq!(registry.get_account("222").unwrap().balance(), dec!(800));
    }

    #[test]
    fn test_errors_are_rendered_not_propagated() {
        let registry = AccountRegistry::new();
        registry.create_account("111", "Alice", dec!(100)).unwrap();

        let output = run_session(&registry, "3\n111\n5000\n0\n");
        assert!(output.contains("Error: insufficient funds"));
        assert_eq!(registry.get_account("111").unwrap().balance(), dec!(100));
    }

    #[test]
    fn test_invalid_choice_and_retry_on_bad_number() {
        let registry = AccountRegistry::new();
        registry.create_account("111", "Alice", dec!(100)).unwrap();

        let output = run_session(&registry, "9\n2\n111\nabc\n50\n0\n");
        assert!(output.contains("Invalid choice!"));
        assert!(output.contains("Please enter a number!"));
        assert_eq!(registry.get_account("111").unwrap().balance(), dec!(150));
    }

    #[test]
    fn test_end_of_input_terminates_loop() {
        let registry = AccountRegistry::new();
        let output = run_session(&registry, "");
        assert!(output.contains("Main menu"));
    }

    #[test]
    fn test_seed_demo_accounts() {
        let registry = AccountRegistry::new();
        seed_demo_accounts(&registry).unwrap();

        assert_eq!(registry.accounts_count(), 3);
        assert_eq!(registry.total_bank_balance(), dec!(18000));
    }
}
