//! Account model shared by every account type.
//!
//! `AccountCore` holds the state all accounts have in common (number,
//! holder, balance, history). Each variant composes a core and implements
//! [`BankAccount`] with its own withdrawal, deposit and interest policy.
//!
//! # Invariants
//!
//! - The balance changes only through deposit, withdrawal or interest
//!   postings, and every change appends at least one [`Transaction`].
//! - History is append-only; insertion order is chronological order.
//! - Transaction ids come from a per-account counter.

pub mod checking;
pub mod savings;

pub use checking::CheckingAccount;
pub use savings::SavingsAccount;

use crate::error::{BankError, Result};
use crate::money::Money;
use crate::transaction::{Channel, Transaction, TxKind};
use chrono::{DateTime, Utc};
use log::debug;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// Largest amount accepted by a single deposit or withdrawal.
pub const MAX_TRANSACTION_AMOUNT: Money = Money::from_units(1_000_000);

/// Rejects amounts that are not positive or exceed [`MAX_TRANSACTION_AMOUNT`].
pub fn validate_amount(amount: Money) -> Result<()> {
    if !amount.is_positive() {
        return Err(BankError::InvalidAmount(
            "Amount must be positive".to_string(),
        ));
    }
    if amount > MAX_TRANSACTION_AMOUNT {
        return Err(BankError::InvalidAmount(format!(
            "Amount exceeds maximum transaction limit of ${}",
            MAX_TRANSACTION_AMOUNT
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AccountKind {
    Savings,
    Checking,
}

impl AccountKind {
    /// Prefix used in account numbers.
    pub fn prefix(&self) -> &'static str {
        match self {
            AccountKind::Savings => "SAV",
            AccountKind::Checking => "CHK",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AccountKind::Savings => "Savings",
            AccountKind::Checking => "Checking",
        }
    }
}

/// Account number of the form `<PREFIX>-<sequence>`, e.g. `SAV-1001`.
///
/// Ordering follows the bank-wide sequence, i.e. account opening order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountNumber {
    sequence: u64,
    kind: AccountKind,
}

impl AccountNumber {
    pub fn new(kind: AccountKind, sequence: u64) -> Self {
        AccountNumber { sequence, kind }
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.kind.prefix(), self.sequence)
    }
}

impl FromStr for AccountNumber {
    type Err = BankError;

    fn from_str(s: &str) -> Result<Self> {
        let not_found = || BankError::AccountNotFound(s.to_string());

        let (prefix, sequence) = s.split_once('-').ok_or_else(not_found)?;
        let kind = match prefix {
            "SAV" => AccountKind::Savings,
            "CHK" => AccountKind::Checking,
            _ => return Err(not_found()),
        };
        let digits = sequence;
        let sequence = digits.parse::<u64>().map_err(|_| not_found())?;
        // Only the canonical spelling names an account: no sign, no leading zeros.
        if sequence.to_string() != digits {
            return Err(not_found());
        }

        Ok(AccountNumber::new(kind, sequence))
    }
}

/// State shared by every account type.
#[derive(Debug, Clone)]
pub struct AccountCore {
    number: AccountNumber,
    holder: String,
    balance: Money,
    created_at: DateTime<Utc>,
    transactions: Vec<Transaction>,
    tx_counter: u32,
}

impl AccountCore {
    /// Opens the core with an opening balance.
    ///
    /// A positive opening balance is recorded as an initial deposit; zero
    /// records nothing. Negative opening balances are rejected.
    fn open(number: AccountNumber, holder: impl Into<String>, opening: Money) -> Result<Self> {
        if opening.is_negative() {
            return Err(BankError::InvalidAmount(
                "Initial balance cannot be negative".to_string(),
            ));
        }

        let mut core = AccountCore {
            number,
            holder: holder.into(),
            balance: opening,
            created_at: Utc::now(),
            transactions: Vec::new(),
            tx_counter: 0,
        };

        if opening.is_positive() {
            core.record(TxKind::Deposit, opening, opening, "Initial deposit");
        }

        Ok(core)
    }

    /// Appends a transaction with the next per-account id.
    fn record(
        &mut self,
        kind: TxKind,
        amount: Money,
        balance_after: Money,
        description: impl Into<String>,
    ) {
        self.tx_counter += 1;
        let id = format!("{}-{:04}", self.number, self.tx_counter);
        let tx = Transaction::new(id, kind, amount, balance_after, description);

        debug!(
            "{}: {} {} ({}), balance now {}",
            self.number,
            tx.kind(),
            amount,
            tx.description(),
            balance_after
        );
        self.transactions.push(tx);
    }

    /// Plain credit used by accounts without special deposit rules.
    fn deposit(&mut self, amount: Money, channel: &Channel) -> Result<()> {
        validate_amount(amount)?;

        self.balance += amount;
        let balance = self.balance;
        self.record(
            channel.credit_kind(),
            amount,
            balance,
            channel.describe("Deposit"),
        );
        Ok(())
    }

    pub fn number(&self) -> &AccountNumber {
        &self.number
    }

    pub fn holder(&self) -> &str {
        &self.holder
    }

    /// Raw stored balance, before any variant-specific adjustment.
    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Full history in chronological order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The last `count` transactions in chronological order, or all of
    /// them when fewer exist.
    pub fn recent_transactions(&self, count: usize) -> &[Transaction] {
        let start = self.transactions.len().saturating_sub(count);
        &self.transactions[start..]
    }
}

/// The contract every account type fulfils.
pub trait BankAccount {
    /// Shared account state.
    fn core(&self) -> &AccountCore;

    fn kind(&self) -> AccountKind;

    /// Annual interest rate as a fraction (0.025 = 2.5%).
    fn interest_rate(&self) -> Decimal;

    /// Whether a withdrawal of `amount` would currently be permitted.
    fn can_withdraw(&self, amount: Money) -> bool;

    /// Debits the account through the given channel.
    fn post_withdrawal(&mut self, amount: Money, channel: &Channel) -> Result<()>;

    /// Credits the account through the given channel.
    fn post_deposit(&mut self, amount: Money, channel: &Channel) -> Result<()>;

    /// Credits one month of interest and returns the amount credited
    /// (zero when nothing was applied).
    fn apply_interest(&mut self) -> Money;

    /// Balance reported to the holder.
    fn balance(&self) -> Money {
        self.core().balance()
    }

    /// Largest amount the account currently allows to be withdrawn.
    fn available_balance(&self) -> Money {
        self.core().balance()
    }

    fn withdraw(&mut self, amount: Money) -> Result<()> {
        self.post_withdrawal(amount, &Channel::Cash)
    }

    fn deposit(&mut self, amount: Money) -> Result<()> {
        self.post_deposit(amount, &Channel::Cash)
    }

    fn number(&self) -> &AccountNumber {
        self.core().number()
    }

    fn holder(&self) -> &str {
        self.core().holder()
    }

    fn account_type(&self) -> &'static str {
        self.kind().label()
    }

    fn transactions(&self) -> &[Transaction] {
        self.core().transactions()
    }

    fn recent_transactions(&self, count: usize) -> &[Transaction] {
        self.core().recent_transactions(count)
    }
}

/// Writes the multi-line account description used by the `Display` impls.
fn write_details(
    f: &mut fmt::Formatter<'_>,
    account: &dyn BankAccount,
    extra: &[(&str, String)],
) -> fmt::Result {
    let rule = "═".repeat(50);
    let rate = account.interest_rate() * Decimal::ONE_HUNDRED;

    writeln!(f, "{}", rule)?;
    writeln!(f, "  Account Type: {}", account.account_type())?;
    writeln!(f, "  Account Number: {}", account.number())?;
    writeln!(f, "  Account Holder: {}", account.holder())?;
    writeln!(f, "  Current Balance: ${}", account.balance())?;
    writeln!(f, "  Available Balance: ${}", account.available_balance())?;
    writeln!(f, "  Interest Rate: {:.2}%", rate)?;
    for (label, value) in extra {
        writeln!(f, "  {}: {}", label, value)?;
    }
    writeln!(f, "  Total Transactions: {}", account.transactions().len())?;
    write!(f, "{}", rule)
}

/// Any account held by the bank.
#[derive(Debug, Clone)]
pub enum Account {
    Savings(SavingsAccount),
    Checking(CheckingAccount),
}

impl Account {
    pub fn as_savings(&self) -> Option<&SavingsAccount> {
        match self {
            Account::Savings(account) => Some(account),
            Account::Checking(_) => None,
        }
    }

    pub fn as_savings_mut(&mut self) -> Option<&mut SavingsAccount> {
        match self {
            Account::Savings(account) => Some(account),
            Account::Checking(_) => None,
        }
    }

    pub fn as_checking(&self) -> Option<&CheckingAccount> {
        match self {
            Account::Checking(account) => Some(account),
            Account::Savings(_) => None,
        }
    }

    pub fn as_checking_mut(&mut self) -> Option<&mut CheckingAccount> {
        match self {
            Account::Checking(account) => Some(account),
            Account::Savings(_) => None,
        }
    }

    /// One-line description, e.g. for account listings.
    pub fn summary_line(&self) -> String {
        format!(
            "{} Account [{}] - {} | Balance: ${}",
            self.account_type(),
            self.number(),
            self.holder(),
            self.balance()
        )
    }

    fn inner(&self) -> &dyn BankAccount {
        match self {
            Account::Savings(account) => account,
            Account::Checking(account) => account,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn BankAccount {
        match self {
            Account::Savings(account) => account,
            Account::Checking(account) => account,
        }
    }
}

impl BankAccount for Account {
    fn core(&self) -> &AccountCore {
        self.inner().core()
    }

    fn kind(&self) -> AccountKind {
        self.inner().kind()
    }

    fn interest_rate(&self) -> Decimal {
        self.inner().interest_rate()
    }

    fn can_withdraw(&self, amount: Money) -> bool {
        self.inner().can_withdraw(amount)
    }

    fn post_withdrawal(&mut self, amount: Money, channel: &Channel) -> Result<()> {
        self.inner_mut().post_withdrawal(amount, channel)
    }

    fn post_deposit(&mut self, amount: Money, channel: &Channel) -> Result<()> {
        self.inner_mut().post_deposit(amount, channel)
    }

    fn apply_interest(&mut self) -> Money {
        self.inner_mut().apply_interest()
    }

    fn balance(&self) -> Money {
        self.inner().balance()
    }

    fn available_balance(&self) -> Money {
        self.inner().available_balance()
    }
}

impl From<SavingsAccount> for Account {
    fn from(account: SavingsAccount) -> Self {
        Account::Savings(account)
    }
}

impl From<CheckingAccount> for Account {
    fn from(account: CheckingAccount) -> Self {
        Account::Checking(account)
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Account::Savings(account) => fmt::Display::fmt(account, f),
            Account::Checking(account) => fmt::Display::fmt(account, f),
        }
    }
}
