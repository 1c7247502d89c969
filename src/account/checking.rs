//! Checking accounts: overdraft protection with a one-off entry fee.

use super::{validate_amount, write_details, AccountCore, AccountKind, AccountNumber, BankAccount};
use crate::error::{BankError, Result};
use crate::money::Money;
use crate::transaction::{Channel, TxKind};
use log::{debug, info};
use rust_decimal::Decimal;
use std::fmt;

pub const DEFAULT_OVERDRAFT_LIMIT: Money = Money::from_units(500);

pub const MAX_OVERDRAFT_LIMIT: Money = Money::from_units(10_000);

/// Charged once each time the account goes from clear to overdrawn.
pub const OVERDRAFT_FEE: Money = Money::from_units(35);

/// 0.1% annual, paid only on a positive balance with no overdraft.
pub const INTEREST_RATE: Decimal = Decimal::from_parts(1, 0, 0, false, 3);

/// Smaller monthly interest amounts are not credited.
const MINIMUM_INTEREST: Money = Money::from_cents(1);

fn check_limit(limit: Money) -> Result<()> {
    if limit.is_negative() || limit > MAX_OVERDRAFT_LIMIT {
        return Err(BankError::InvalidOverdraftLimit(limit));
    }
    Ok(())
}

/// A checking account.
///
/// The raw balance never goes negative: a withdrawal larger than it zeroes
/// the raw balance and moves the shortfall into `current_overdraft`.
///
/// - reported balance = raw balance − current overdraft
/// - available balance = raw balance + (overdraft limit − current overdraft)
///
/// Deposits repay the overdraft before they touch the raw balance.
#[derive(Debug, Clone)]
pub struct CheckingAccount {
    core: AccountCore,
    overdraft_limit: Money,
    current_overdraft: Money,
    overdraft_usage_count: u32,
    total_overdraft_fees: Money,
}

impl CheckingAccount {
    /// Opens `CHK-<sequence>` with the given overdraft limit.
    pub fn open(
        sequence: u64,
        holder: impl Into<String>,
        opening: Money,
        overdraft_limit: Money,
    ) -> Result<Self> {
        check_limit(overdraft_limit)?;
        let number = AccountNumber::new(AccountKind::Checking, sequence);

        Ok(CheckingAccount {
            core: AccountCore::open(number, holder, opening)?,
            overdraft_limit,
            current_overdraft: Money::ZERO,
            overdraft_usage_count: 0,
            total_overdraft_fees: Money::ZERO,
        })
    }

    pub fn overdraft_limit(&self) -> Money {
        self.overdraft_limit
    }

    pub fn set_overdraft_limit(&mut self, limit: Money) -> Result<()> {
        check_limit(limit)?;
        self.overdraft_limit = limit;
        Ok(())
    }

    /// Amount currently owed on the overdraft, fees included.
    pub fn current_overdraft(&self) -> Money {
        self.current_overdraft
    }

    /// Overdraft headroom left; negative once fees push past the limit.
    pub fn remaining_overdraft(&self) -> Money {
        self.overdraft_limit - self.current_overdraft
    }

    /// Number of times the account entered overdraft.
    pub fn overdraft_usage_count(&self) -> u32 {
        self.overdraft_usage_count
    }

    pub fn total_overdraft_fees(&self) -> Money {
        self.total_overdraft_fees
    }

    pub fn is_in_overdraft(&self) -> bool {
        self.current_overdraft.is_positive()
    }

    /// Stored balance, ignoring the overdraft owed.
    pub fn raw_balance(&self) -> Money {
        self.core.balance
    }

    fn record(&mut self, kind: TxKind, amount: Money, description: impl Into<String>) {
        let balance = self.balance();
        self.core.record(kind, amount, balance, description);
    }

    fn charge_overdraft_fee(&mut self) {
        self.current_overdraft += OVERDRAFT_FEE;
        self.total_overdraft_fees += OVERDRAFT_FEE;
        self.overdraft_usage_count += 1;
        self.record(TxKind::Fee, OVERDRAFT_FEE, "Overdraft fee");

        info!(
            "{} entered overdraft, charged {} fee (owed {})",
            self.core.number, OVERDRAFT_FEE, self.current_overdraft
        );
    }
}

impl BankAccount for CheckingAccount {
    fn core(&self) -> &AccountCore {
        &self.core
    }

    fn kind(&self) -> AccountKind {
        AccountKind::Checking
    }

    fn interest_rate(&self) -> Decimal {
        INTEREST_RATE
    }

    fn can_withdraw(&self, amount: Money) -> bool {
        amount <= self.available_balance()
    }

    /// Draws on the overdraft for any shortfall. The fee is charged only
    /// when the account was clear before this withdrawal, and is recorded
    /// ahead of the withdrawal itself.
    fn post_withdrawal(&mut self, amount: Money, channel: &Channel) -> Result<()> {
        validate_amount(amount)?;

        let available = self.available_balance();
        if amount > available {
            return Err(BankError::InsufficientFunds(format!(
                "Cannot withdraw ${}. Available (incl. overdraft): ${}",
                amount, available
            )));
        }

        if amount <= self.core.balance {
            self.core.balance -= amount;
            self.record(channel.debit_kind(), amount, channel.describe("Withdrawal"));
            return Ok(());
        }

        let shortfall = amount - self.core.balance;
        let was_clear = self.current_overdraft.is_zero();

        self.core.balance = Money::ZERO;
        self.current_overdraft += shortfall;

        if was_clear {
            self.charge_overdraft_fee();
        }

        let detail = format!("Withdrawal (used ${} overdraft)", shortfall);
        self.record(channel.debit_kind(), amount, channel.describe(&detail));
        Ok(())
    }

    fn post_deposit(&mut self, amount: Money, channel: &Channel) -> Result<()> {
        validate_amount(amount)?;
        let kind = channel.credit_kind();

        if !self.is_in_overdraft() {
            self.core.balance += amount;
            self.record(kind, amount, channel.describe("Deposit"));
            return Ok(());
        }

        if amount < self.current_overdraft {
            self.current_overdraft -= amount;
            let detail = format!(
                "Partial overdraft repayment (${} remaining)",
                self.current_overdraft
            );
            self.record(kind, amount, channel.describe(&detail));
            return Ok(());
        }

        let repaid = self.current_overdraft;
        let remainder = amount - repaid;

        self.current_overdraft = Money::ZERO;
        self.record(kind, repaid, channel.describe("Overdraft repayment"));
        debug!("{} cleared its overdraft", self.core.number);

        if remainder.is_positive() {
            self.core.balance += remainder;
            self.record(kind, remainder, channel.describe("Deposit"));
        }
        Ok(())
    }

    /// Credits `balance * 0.001 / 12` when the account is clear and the
    /// result is at least one cent.
    fn apply_interest(&mut self) -> Money {
        if !self.core.balance.is_positive() || self.is_in_overdraft() {
            return Money::ZERO;
        }

        let monthly_rate = INTEREST_RATE / Decimal::from(12);
        // Threshold applies to the exact amount, before rounding to Money scale.
        let exact = self.core.balance.as_decimal() * monthly_rate;
        if exact < MINIMUM_INTEREST.as_decimal() {
            debug!(
                "{}: interest {} below one cent, not credited",
                self.core.number, exact
            );
            return Money::ZERO;
        }

        let interest = Money::new(exact);
        self.core.balance += interest;
        let description = format!(
            "Monthly interest @ {:.2}%",
            INTEREST_RATE * Decimal::ONE_HUNDRED
        );
        self.record(TxKind::Interest, interest, description);
        interest
    }

    fn balance(&self) -> Money {
        self.core.balance - self.current_overdraft
    }

    fn available_balance(&self) -> Money {
        self.core.balance + (self.overdraft_limit - self.current_overdraft)
    }
}

impl fmt::Display for CheckingAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.is_in_overdraft() {
            "IN OVERDRAFT"
        } else {
            "Clear"
        };

        write_details(
            f,
            self,
            &[
                ("Overdraft Limit", format!("${}", self.overdraft_limit)),
                ("Current Overdraft", format!("${}", self.current_overdraft)),
                ("Overdraft Status", status.to_string()),
                (
                    "Total Overdraft Fees",
                    format!("${}", self.total_overdraft_fees),
                ),
            ],
        )
    }
}
