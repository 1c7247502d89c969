//! Read-side reporting: bank summary and account statements.

use crate::account::BankAccount;
use crate::error::Result;
use crate::money::Money;
use std::fmt;
use std::io::Write;

/// Balance totals across the bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceSummary {
    pub total_savings: Money,

    /// Reported checking balances, overdrafts already netted off.
    pub total_checking: Money,

    pub total_overdraft_used: Money,

    /// Sum of every account's reported balance.
    pub grand_total: Money,
}

impl BalanceSummary {
    /// Labelled rows in report order.
    pub fn rows(&self) -> [(&'static str, Money); 4] {
        [
            ("Total Savings", self.total_savings),
            ("Total Checking", self.total_checking),
            ("Total Overdraft Used", self.total_overdraft_used),
            ("Grand Total", self.grand_total),
        ]
    }
}

/// Snapshot of the bank printed by the summary report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankSummary {
    pub bank_name: String,
    pub total_accounts: usize,
    pub savings_accounts: usize,
    pub checking_accounts: usize,
    pub balances: BalanceSummary,
}

impl fmt::Display for BankSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "═".repeat(62);
        let title = format!("{} - Summary Report", self.bank_name);

        writeln!(f, "╔{}╗", rule)?;
        writeln!(f, "║  {:<60}║", title)?;
        writeln!(f, "╠{}╣", rule)?;
        writeln!(f, "║  {:<60}║", format!("Total Accounts: {}", self.total_accounts))?;
        writeln!(f, "║  {:<60}║", format!("Savings Accounts: {}", self.savings_accounts))?;
        writeln!(f, "║  {:<60}║", format!("Checking Accounts: {}", self.checking_accounts))?;
        writeln!(f, "╠{}╣", rule)?;
        for (label, amount) in self.balances.rows() {
            let row = format!("{:<30} ${:>18}", format!("{}:", label), amount.to_string());
            writeln!(f, "║  {:<60}║", row)?;
        }
        write!(f, "╚{}╝", rule)
    }
}

/// Writes an account's full history as CSV.
///
/// Columns: `id,kind,amount,balance_after,timestamp,description`, amounts
/// with 4 decimal places, timestamps in RFC 3339.
pub fn write_statement<W: Write>(account: &dyn BankAccount, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    if account.transactions().is_empty() {
        csv_writer.write_record([
            "id",
            "kind",
            "amount",
            "balance_after",
            "timestamp",
            "description",
        ])?;
    }
    for tx in account.transactions() {
        csv_writer.serialize(tx)?;
    }

    csv_writer.flush()?;
    Ok(())
}
