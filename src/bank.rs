//! The bank registry.
//!
//! Owns every open account keyed by account number, hands out account
//! numbers from a single bank-wide sequence, and orchestrates operations
//! that span accounts: transfers, interest runs and monthly maintenance.

use crate::account::{
    checking, savings, Account, AccountNumber, BankAccount, CheckingAccount, SavingsAccount,
};
use crate::account::validate_amount;
use crate::error::{BankError, Result};
use crate::money::Money;
use crate::report::{BalanceSummary, BankSummary};
use crate::transaction::Channel;
use log::{debug, info, warn};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Account numbers start right after this value.
pub const FIRST_SEQUENCE: u64 = 1000;

/// Outcome of a monthly maintenance run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaintenanceReport {
    /// Accounts interest was applied to.
    pub accounts_processed: usize,

    /// Total interest credited across all accounts.
    pub interest_credited: Money,

    /// Savings accounts whose withdrawal counter was reset.
    pub withdrawal_counters_reset: usize,
}

/// The bank: a registry of accounts for one banking session.
///
/// Listing operations return accounts in opening order.
pub struct Bank {
    name: String,

    accounts: HashMap<AccountNumber, Account>,

    /// Last sequence number handed out.
    sequence: u64,
}

impl Bank {
    /// Creates a bank with no accounts.
    pub fn new(name: impl Into<String>) -> Self {
        Bank {
            name: name.into(),
            accounts: HashMap::new(),
            sequence: FIRST_SEQUENCE,
        }
    }

    pub fn bank_name(&self) -> &str {
        &self.name
    }

    /// Opens a savings account, at the default rate unless one is given.
    ///
    /// An opening balance of zero is allowed and records no transaction.
    pub fn create_savings_account(
        &mut self,
        holder: &str,
        opening: Money,
        interest_rate: Option<Decimal>,
    ) -> Result<&Account> {
        let rate = interest_rate.unwrap_or(savings::DEFAULT_INTEREST_RATE);
        let account = SavingsAccount::open(self.sequence + 1, holder, opening, rate)?;
        Ok(self.register(account.into()))
    }

    /// Opens a checking account, with the default overdraft limit unless
    /// one is given.
    pub fn create_checking_account(
        &mut self,
        holder: &str,
        opening: Money,
        overdraft_limit: Option<Money>,
    ) -> Result<&Account> {
        let limit = overdraft_limit.unwrap_or(checking::DEFAULT_OVERDRAFT_LIMIT);
        let account = CheckingAccount::open(self.sequence + 1, holder, opening, limit)?;
        Ok(self.register(account.into()))
    }

    /// Stores a freshly opened account, committing its sequence number.
    fn register(&mut self, account: Account) -> &Account {
        self.sequence = account.number().sequence();
        info!(
            "Opened {} for {} with {}",
            account.number(),
            account.holder(),
            account.balance()
        );

        let number = account.number().clone();
        self.accounts.entry(number).or_insert(account)
    }

    /// Looks up an account, failing with `AccountNotFound`.
    pub fn get_account(&self, number: &str) -> Result<&Account> {
        self.find_account(number)
            .ok_or_else(|| BankError::AccountNotFound(number.to_string()))
    }

    pub fn get_account_mut(&mut self, number: &str) -> Result<&mut Account> {
        number
            .parse::<AccountNumber>()
            .ok()
            .and_then(|key| self.accounts.get_mut(&key))
            .ok_or_else(|| BankError::AccountNotFound(number.to_string()))
    }

    pub fn find_account(&self, number: &str) -> Option<&Account> {
        let key = number.parse::<AccountNumber>().ok()?;
        self.accounts.get(&key)
    }

    pub fn account_exists(&self, number: &str) -> bool {
        self.find_account(number).is_some()
    }

    /// Every open account, in opening order.
    pub fn all_accounts(&self) -> Vec<&Account> {
        let mut accounts: Vec<&Account> = self.accounts.values().collect();
        accounts.sort_by(|a, b| a.number().cmp(b.number()));
        accounts
    }

    /// Accounts whose holder matches `holder`, ignoring case.
    pub fn accounts_by_holder(&self, holder: &str) -> Vec<&Account> {
        let wanted = holder.to_lowercase();
        self.all_accounts()
            .into_iter()
            .filter(|a| a.holder().to_lowercase() == wanted)
            .collect()
    }

    pub fn savings_accounts(&self) -> Vec<&SavingsAccount> {
        self.all_accounts()
            .into_iter()
            .filter_map(Account::as_savings)
            .collect()
    }

    pub fn checking_accounts(&self) -> Vec<&CheckingAccount> {
        self.all_accounts()
            .into_iter()
            .filter_map(Account::as_checking)
            .collect()
    }

    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    pub fn deposit(&mut self, number: &str, amount: Money) -> Result<()> {
        self.get_account_mut(number)?.deposit(amount)
    }

    pub fn withdraw(&mut self, number: &str, amount: Money) -> Result<()> {
        self.get_account_mut(number)?.withdraw(amount)
    }

    /// Moves `amount` from one account to another.
    ///
    /// All checks run before either account changes: same-account transfers
    /// and an ineligible source fail with `TransferFailed`, unknown numbers
    /// with `AccountNotFound`, bad amounts with `InvalidAmount`. Should the
    /// credit leg still fail, the source is restored to its prior state.
    pub fn transfer(&mut self, from: &str, to: &str, amount: Money) -> Result<()> {
        let same_key = match (from.parse::<AccountNumber>(), to.parse::<AccountNumber>()) {
            (Ok(source), Ok(dest)) => source == dest,
            _ => false,
        };
        if from == to || same_key {
            return Err(BankError::TransferFailed(
                "Cannot transfer to the same account".to_string(),
            ));
        }

        let source = self.get_account(from)?;
        self.get_account(to)?;
        validate_amount(amount)?;

        if !source.can_withdraw(amount) {
            let available = source.available_balance();
            warn!(
                "Transfer {} -> {} of {} rejected, available {}",
                from, to, amount, available
            );
            return Err(BankError::TransferFailed(format!(
                "Insufficient funds for transfer. Available: ${}, Requested: ${}",
                available, amount
            )));
        }

        let source = self.get_account_mut(from)?;
        let snapshot = source.clone();
        source
            .post_withdrawal(amount, &Channel::TransferTo(to.to_string()))
            .map_err(|e| BankError::TransferFailed(e.to_string()))?;

        let credited = self
            .get_account_mut(to)
            .and_then(|dest| dest.post_deposit(amount, &Channel::TransferFrom(from.to_string())));

        if let Err(e) = credited {
            warn!("Transfer {} -> {} rolled back: {}", from, to, e);
            *self.get_account_mut(from)? = snapshot;
            return Err(BankError::TransferFailed(e.to_string()));
        }

        info!("Transferred {} from {} to {}", amount, from, to);
        Ok(())
    }

    /// Applies a month of interest to every account. Returns the total
    /// credited.
    pub fn apply_interest_to_all_accounts(&mut self) -> Money {
        self.accounts
            .values_mut()
            .map(|account| account.apply_interest())
            .sum()
    }

    pub fn apply_interest_to_savings_accounts(&mut self) -> Money {
        self.accounts
            .values_mut()
            .filter_map(Account::as_savings_mut)
            .map(|account| account.apply_interest())
            .sum()
    }

    /// Lifetime interest credited to savings accounts still open.
    pub fn total_interest_earned(&self) -> Money {
        self.savings_accounts()
            .iter()
            .map(|a| a.accumulated_interest())
            .sum()
    }

    /// Credits interest everywhere, then resets every savings account's
    /// monthly withdrawal counter. The only path that resets the counters.
    pub fn perform_monthly_maintenance(&mut self) -> MaintenanceReport {
        let accounts_processed = self.accounts.len();
        let interest_credited = self.apply_interest_to_all_accounts();

        let mut withdrawal_counters_reset = 0;
        for account in self.accounts.values_mut().filter_map(Account::as_savings_mut) {
            account.reset_monthly_withdrawals();
            withdrawal_counters_reset += 1;
        }

        info!(
            "Monthly maintenance: {} accounts, {} interest credited, {} counters reset",
            accounts_processed, interest_credited, withdrawal_counters_reset
        );

        MaintenanceReport {
            accounts_processed,
            interest_credited,
            withdrawal_counters_reset,
        }
    }

    /// Removes an account for good. Only allowed at a balance of exactly zero.
    pub fn close_account(&mut self, number: &str) -> Result<Account> {
        let balance = self.get_account(number)?.balance();
        if !balance.is_zero() {
            return Err(BankError::Banking(format!(
                "Cannot close account with non-zero balance: ${}",
                balance
            )));
        }

        let key = number.parse::<AccountNumber>()?;
        let account = self
            .accounts
            .remove(&key)
            .ok_or_else(|| BankError::AccountNotFound(number.to_string()))?;

        info!("Closed {}", key);
        Ok(account)
    }

    /// Sum of reported balances across all accounts.
    pub fn total_deposits(&self) -> Money {
        self.accounts.values().map(|a| a.balance()).sum()
    }

    pub fn balance_summary(&self) -> BalanceSummary {
        let savings = self.savings_accounts();
        let checking = self.checking_accounts();

        BalanceSummary {
            total_savings: savings.iter().map(|a| a.balance()).sum(),
            total_checking: checking.iter().map(|a| a.balance()).sum(),
            total_overdraft_used: checking.iter().map(|a| a.current_overdraft()).sum(),
            grand_total: self.total_deposits(),
        }
    }

    /// Read-only snapshot for the bank report.
    pub fn summary(&self) -> BankSummary {
        debug!("Building summary for {}", self.name);

        BankSummary {
            bank_name: self.name.clone(),
            total_accounts: self.account_count(),
            savings_accounts: self.savings_accounts().len(),
            checking_accounts: self.checking_accounts().len(),
            balances: self.balance_summary(),
        }
    }
}

impl Default for Bank {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_BANK_NAME)
    }
}
