//! Transaction records kept in each account's history.

use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// The kind of balance-affecting event a transaction records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TxKind {
    /// Cash credited to the account, including overdraft repayments.
    Deposit,

    /// Cash debited from the account.
    Withdrawal,

    /// Credit leg of a transfer between two accounts.
    TransferIn,

    /// Debit leg of a transfer between two accounts.
    TransferOut,

    /// Monthly interest credit.
    Interest,

    /// Charge levied by the bank, e.g. the overdraft fee.
    Fee,
}

impl TxKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::Deposit => "DEPOSIT",
            TxKind::Withdrawal => "WITHDRAWAL",
            TxKind::TransferIn => "TRANSFER_IN",
            TxKind::TransferOut => "TRANSFER_OUT",
            TxKind::Interest => "INTEREST",
            TxKind::Fee => "FEE",
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// How money enters or leaves an account.
///
/// Deposits and withdrawals made over the counter are `Cash`; the two legs
/// of a transfer carry the counterparty's account number so the history
/// names it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Channel {
    Cash,
    TransferTo(String),
    TransferFrom(String),
}

impl Channel {
    /// Kind recorded for money coming in through this channel.
    pub fn credit_kind(&self) -> TxKind {
        match self {
            Channel::TransferFrom(_) => TxKind::TransferIn,
            _ => TxKind::Deposit,
        }
    }

    /// Kind recorded for money going out through this channel.
    pub fn debit_kind(&self) -> TxKind {
        match self {
            Channel::TransferTo(_) => TxKind::TransferOut,
            _ => TxKind::Withdrawal,
        }
    }

    /// Appends the counterparty to a posting description.
    pub fn describe(&self, detail: &str) -> String {
        match self {
            Channel::Cash => detail.to_string(),
            Channel::TransferTo(to) => format!("{}, transfer to {}", detail, to),
            Channel::TransferFrom(from) => format!("{}, transfer from {}", detail, from),
        }
    }
}

/// One immutable balance-affecting event.
///
/// Created only by the owning account; `balance_after` is the balance the
/// account reports once this posting has been applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    id: String,
    kind: TxKind,
    amount: Money,
    balance_after: Money,
    timestamp: DateTime<Utc>,
    description: String,
}

impl Transaction {
    pub(crate) fn new(
        id: String,
        kind: TxKind,
        amount: Money,
        balance_after: Money,
        description: impl Into<String>,
    ) -> Self {
        Transaction {
            id,
            kind,
            amount,
            balance_after,
            timestamp: Utc::now(),
            description: description.into(),
        }
    }

    /// Identifier unique within the owning account.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> TxKind {
        self.kind
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn balance_after(&self) -> Money {
        self.balance_after
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Column header matching the `Display` row layout.
    pub fn table_header() -> String {
        format!(
            "| {:<14} | {:<12} | {:>12} | {:>12} | {:<19} | {}",
            "TXN ID", "TYPE", "AMOUNT", "BALANCE", "TIMESTAMP", "DESCRIPTION"
        )
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "| {:<14} | {:<12} | {:>12} | {:>12} | {:<19} | {}",
            self.id,
            self.kind,
            self.amount.to_string(),
            self.balance_after.to_string(),
            self.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            self.description
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn money(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    #[test]
    fn test_channel_kinds() {
        assert_eq!(Channel::Cash.credit_kind(), TxKind::Deposit);
        assert_eq!(Channel::Cash.debit_kind(), TxKind::Withdrawal);

        let out = Channel::TransferTo("CHK-1002".to_string());
        assert_eq!(out.debit_kind(), TxKind::TransferOut);

        let incoming = Channel::TransferFrom("SAV-1001".to_string());
        assert_eq!(incoming.credit_kind(), TxKind::TransferIn);
    }

    #[test]
    fn test_channel_describe_names_counterparty() {
        assert_eq!(Channel::Cash.describe("Deposit"), "Deposit");
        assert_eq!(
            Channel::TransferTo("CHK-1002".to_string()).describe("Withdrawal"),
            "Withdrawal, transfer to CHK-1002"
        );
        assert_eq!(
            Channel::TransferFrom("SAV-1001".to_string()).describe("Deposit"),
            "Deposit, transfer from SAV-1001"
        );
    }

    #[test]
    fn test_display_row() {
        let tx = Transaction::new(
            "SAV-1001-0001".to_string(),
            TxKind::Deposit,
            money("500"),
            money("500"),
            "Initial deposit",
        );

        let row = tx.to_string();
        assert!(row.starts_with("| SAV-1001-0001"));
        assert!(row.contains("DEPOSIT"));
        assert!(row.contains("500.00"));
        assert!(row.ends_with("Initial deposit"));
        assert!(Transaction::table_header().contains("DESCRIPTION"));
    }

    #[test]
    fn test_kind_serializes_screaming_case() {
        assert_eq!(TxKind::TransferOut.as_str(), "TRANSFER_OUT");
        assert_eq!(TxKind::Fee.to_string(), "FEE");
    }
}
