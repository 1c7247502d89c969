//! Error types for the bank ledger.

use crate::money::Money;
use rust_decimal::Decimal;
use thiserror::Error;

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, BankError>;

/// Errors raised by accounts, the bank registry and the front-ends.
///
/// Every domain variant is user-facing: the console prints it and keeps
/// going. Nothing here is retried.
#[derive(Error, Debug)]
pub enum BankError {
    /// Amount is not positive or exceeds the per-transaction maximum
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Withdrawal would breach a balance floor or the overdraft headroom
    #[error("Insufficient funds: {0}")]
    InsufficientFunds(String),

    /// Savings account used up its monthly withdrawals
    #[error("Monthly withdrawal limit reached ({used}/{limit}). Try again next month.")]
    WithdrawalLimitExceeded { used: u32, limit: u32 },

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Same-account transfer or an ineligible source account
    #[error("Transfer failed: {0}")]
    TransferFailed(String),

    #[error("Interest rate {0} must be between 0 and 0.20")]
    InvalidInterestRate(Decimal),

    #[error("Overdraft limit ${0} must be between $0 and $10000")]
    InvalidOverdraftLimit(Money),

    /// Generic banking failure, e.g. closing an account that still holds funds
    #[error("{0}")]
    Banking(String),

    /// Failed to read input or write output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reading or writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Environment variable with an unusable value
    #[error("Invalid configuration: {key}={value:?}")]
    InvalidConfig { key: String, value: String },
}
