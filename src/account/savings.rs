//! Savings accounts: interest-bearing, with a balance floor and a monthly
//! withdrawal cap.

use super::{validate_amount, write_details, AccountCore, AccountKind, AccountNumber, BankAccount};
use crate::error::{BankError, Result};
use crate::money::Money;
use crate::transaction::{Channel, TxKind};
use log::debug;
use rust_decimal::Decimal;
use std::fmt;

/// Balance a withdrawal may never take the account below.
pub const MINIMUM_BALANCE: Money = Money::from_units(100);

/// Successful withdrawals allowed between two monthly resets.
pub const MAX_WITHDRAWALS_PER_MONTH: u32 = 6;

/// 2.5% annual.
pub const DEFAULT_INTEREST_RATE: Decimal = Decimal::from_parts(25, 0, 0, false, 3);

/// 20% annual.
pub const MAX_INTEREST_RATE: Decimal = Decimal::from_parts(20, 0, 0, false, 2);

fn check_rate(rate: Decimal) -> Result<()> {
    if rate < Decimal::ZERO || rate > MAX_INTEREST_RATE {
        return Err(BankError::InvalidInterestRate(rate));
    }
    Ok(())
}

/// A savings account.
///
/// # Invariants
///
/// - A withdrawal never leaves the balance below [`MINIMUM_BALANCE`].
/// - At most [`MAX_WITHDRAWALS_PER_MONTH`] withdrawals succeed until
///   [`SavingsAccount::reset_monthly_withdrawals`] is called.
/// - `accumulated_interest` only grows, by exactly what interest credits.
#[derive(Debug, Clone)]
pub struct SavingsAccount {
    core: AccountCore,
    interest_rate: Decimal,
    withdrawals_this_month: u32,
    accumulated_interest: Money,
}

impl SavingsAccount {
    /// Opens `SAV-<sequence>` with the given annual interest rate.
    pub fn open(
        sequence: u64,
        holder: impl Into<String>,
        opening: Money,
        interest_rate: Decimal,
    ) -> Result<Self> {
        check_rate(interest_rate)?;
        let number = AccountNumber::new(AccountKind::Savings, sequence);

        Ok(SavingsAccount {
            core: AccountCore::open(number, holder, opening)?,
            interest_rate,
            withdrawals_this_month: 0,
            accumulated_interest: Money::ZERO,
        })
    }

    pub fn set_interest_rate(&mut self, rate: Decimal) -> Result<()> {
        check_rate(rate)?;
        self.interest_rate = rate;
        Ok(())
    }

    pub fn withdrawals_this_month(&self) -> u32 {
        self.withdrawals_this_month
    }

    pub fn remaining_withdrawals(&self) -> u32 {
        MAX_WITHDRAWALS_PER_MONTH.saturating_sub(self.withdrawals_this_month)
    }

    /// Starts a new withdrawal period. Records no transaction.
    pub fn reset_monthly_withdrawals(&mut self) {
        self.withdrawals_this_month = 0;
    }

    /// Lifetime total of interest credited.
    pub fn accumulated_interest(&self) -> Money {
        self.accumulated_interest
    }

    pub fn minimum_balance(&self) -> Money {
        MINIMUM_BALANCE
    }
}

impl BankAccount for SavingsAccount {
    fn core(&self) -> &AccountCore {
        &self.core
    }

    fn kind(&self) -> AccountKind {
        AccountKind::Savings
    }

    fn interest_rate(&self) -> Decimal {
        self.interest_rate
    }

    fn can_withdraw(&self, amount: Money) -> bool {
        self.core.balance - amount >= MINIMUM_BALANCE
            && self.withdrawals_this_month < MAX_WITHDRAWALS_PER_MONTH
    }

    /// The monthly cap is checked before the balance floor, so a capped
    /// account reports the cap whatever the amount.
    fn post_withdrawal(&mut self, amount: Money, channel: &Channel) -> Result<()> {
        validate_amount(amount)?;

        if self.withdrawals_this_month >= MAX_WITHDRAWALS_PER_MONTH {
            return Err(BankError::WithdrawalLimitExceeded {
                used: self.withdrawals_this_month,
                limit: MAX_WITHDRAWALS_PER_MONTH,
            });
        }

        if self.core.balance - amount < MINIMUM_BALANCE {
            return Err(BankError::InsufficientFunds(format!(
                "Withdrawal would bring balance below minimum (${}). Available: ${}",
                MINIMUM_BALANCE,
                self.available_balance()
            )));
        }

        self.core.balance -= amount;
        self.withdrawals_this_month += 1;

        let detail = format!(
            "Withdrawal ({}/{} this month)",
            self.withdrawals_this_month, MAX_WITHDRAWALS_PER_MONTH
        );
        let balance = self.core.balance;
        self.core
            .record(channel.debit_kind(), amount, balance, channel.describe(&detail));
        Ok(())
    }

    fn post_deposit(&mut self, amount: Money, channel: &Channel) -> Result<()> {
        self.core.deposit(amount, channel)
    }

    /// Credits `balance * rate / 12`. Any positive amount is credited.
    fn apply_interest(&mut self) -> Money {
        let monthly_rate = self.interest_rate / Decimal::from(12);
        let interest = self.core.balance * monthly_rate;

        if !interest.is_positive() {
            debug!("{}: no interest to credit", self.core.number);
            return Money::ZERO;
        }

        self.core.balance += interest;
        self.accumulated_interest += interest;

        let balance = self.core.balance;
        let description = format!(
            "Monthly interest @ {:.2}%",
            self.interest_rate * Decimal::ONE_HUNDRED
        );
        self.core
            .record(TxKind::Interest, interest, balance, description);
        interest
    }

    fn available_balance(&self) -> Money {
        (self.core.balance - MINIMUM_BALANCE).max(Money::ZERO)
    }
}

impl fmt::Display for SavingsAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_details(
            f,
            self,
            &[
                ("Minimum Balance", format!("${}", MINIMUM_BALANCE)),
                (
                    "Withdrawals This Month",
                    format!(
                        "{}/{}",
                        self.withdrawals_this_month, MAX_WITHDRAWALS_PER_MONTH
                    ),
                ),
                (
                    "Accumulated Interest",
                    format!("${}", self.accumulated_interest),
                ),
            ],
        )
    }
}
