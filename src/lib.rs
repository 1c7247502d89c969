//! # Bank Ledger
//!
//! An in-memory ledger of savings and checking accounts: deposits,
//! withdrawals, transfers, monthly interest, overdraft handling and a
//! per-account transaction history.
//!
//! ## Design Principles
//!
//! - **Fixed-point arithmetic**: every amount is a [`Money`] with 4 decimal
//!   places via `rust_decimal`
//! - **Append-only history**: each balance change records immutable
//!   [`Transaction`]s in its account
//! - **Policy per account type**: [`SavingsAccount`] and [`CheckingAccount`]
//!   share an [`AccountCore`] and implement [`BankAccount`]
//! - **One owner**: the [`Bank`] registry owns every account for the
//!   session; there is no global state
//!
//! ## Example
//!
//! ```
//! use bank_ledger::{Bank, BankAccount, Money};
//!
//! let mut bank = Bank::new("Example Bank");
//! bank.create_savings_account("Ann", Money::from_units(1_000), None).unwrap();
//! bank.create_checking_account("Ben", Money::from_units(500), None).unwrap();
//!
//! bank.transfer("SAV-1001", "CHK-1002", Money::from_units(200)).unwrap();
//! assert_eq!(bank.get_account("CHK-1002").unwrap().balance(), Money::from_units(700));
//! ```

pub mod account;
pub mod bank;
pub mod config;
pub mod console;
pub mod error;
pub mod money;
pub mod report;
pub mod seed;
pub mod transaction;

pub use account::{
    Account, AccountCore, AccountKind, AccountNumber, BankAccount, CheckingAccount,
    SavingsAccount,
};
pub use bank::{Bank, MaintenanceReport};
pub use config::BankConfig;
pub use console::Console;
pub use error::{BankError, Result};
pub use money::Money;
pub use report::{BalanceSummary, BankSummary};
pub use transaction::{Channel, Transaction, TxKind};
