//! Interactive text menu over the bank registry.
//!
//! Presentation only: every action is a thin call into [`Bank`]. Banking
//! errors are shown to the user and the menu carries on; only I/O errors
//! end the session. End of input exits as if `0` had been chosen.

use crate::account::BankAccount;
use crate::bank::Bank;
use crate::error::{BankError, Result};
use crate::money::Money;
use crate::report::write_statement;
use crate::transaction::Transaction;
use std::io::{BufRead, Write};
use std::str::FromStr;

pub struct Console<'a, R, W> {
    bank: &'a mut Bank,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Console<'a, R, W> {
    pub fn new(bank: &'a mut Bank, input: R, output: W) -> Self {
        Console {
            bank,
            input,
            output,
        }
    }

    /// Runs the menu loop until the user exits or input ends.
    pub fn run(&mut self) -> Result<()> {
        self.print_welcome()?;

        loop {
            self.print_menu()?;
            let Some(choice) = self.prompt_number::<u32>("Enter your choice: ")? else {
                break;
            };

            let outcome = match choice {
                0 => break,
                1 => self.create_account(),
                2 => self.view_account_details(),
                3 => self.deposit_funds(),
                4 => self.withdraw_funds(),
                5 => self.transfer_funds(),
                6 => self.view_transaction_history(),
                7 => self.monthly_maintenance(),
                8 => self.list_all_accounts(),
                9 => self.show_bank_summary(),
                _ => self.print_error("Invalid choice. Please select 0-9."),
            };

            match outcome {
                Ok(()) => {}
                Err(BankError::Io(e)) => return Err(BankError::Io(e)),
                Err(e) => self.print_error(&e.to_string())?,
            }
        }

        self.print_goodbye()
    }

    fn create_account(&mut self) -> Result<()> {
        self.print_header("CREATE NEW ACCOUNT")?;
        writeln!(self.output, "  1. Savings Account")?;
        writeln!(self.output, "  2. Checking Account")?;
        writeln!(self.output, "  0. Back to Main Menu")?;

        let Some(kind) = self.prompt_number::<u32>("Select account type: ")? else {
            return Ok(());
        };
        match kind {
            0 => return Ok(()),
            1 | 2 => {}
            _ => return self.print_error("Invalid account type"),
        }

        let Some(holder) = self.prompt("Enter account holder name: ")? else {
            return Ok(());
        };
        if holder.is_empty() {
            return self.print_error("Account holder name cannot be empty");
        }
        let Some(opening) = self.prompt_number::<Money>("Enter initial deposit amount: $")? else {
            return Ok(());
        };

        let details = if kind == 1 {
            let details = self
                .bank
                .create_savings_account(&holder, opening, None)?
                .to_string();
            self.print_success("Savings account created successfully!")?;
            details
        } else {
            let Some(limit) = self.prompt_number::<Money>("Enter overdraft limit (default 500): $")? else {
                return Ok(());
            };
            let limit = Some(limit).filter(Money::is_positive);
            let details = self
                .bank
                .create_checking_account(&holder, opening, limit)?
                .to_string();
            self.print_success("Checking account created successfully!")?;
            details
        };

        writeln!(self.output, "\n{}", details)?;
        Ok(())
    }

    fn view_account_details(&mut self) -> Result<()> {
        self.print_header("ACCOUNT DETAILS")?;
        let Some(number) = self.prompt("Enter account number: ")? else {
            return Ok(());
        };

        let details = self.bank.get_account(&number)?.to_string();
        writeln!(self.output, "\n{}", details)?;
        Ok(())
    }

    fn deposit_funds(&mut self) -> Result<()> {
        self.print_header("DEPOSIT FUNDS")?;
        let Some(number) = self.prompt("Enter account number: ")? else {
            return Ok(());
        };
        let Some(amount) = self.prompt_number::<Money>("Enter deposit amount: $")? else {
            return Ok(());
        };

        self.bank.deposit(&number, amount)?;
        let balance = self.bank.get_account(&number)?.balance();

        self.print_success(&format!("Successfully deposited ${}", amount))?;
        writeln!(self.output, "  New balance: ${}", balance)?;
        Ok(())
    }

    fn withdraw_funds(&mut self) -> Result<()> {
        self.print_header("WITHDRAW FUNDS")?;
        let Some(number) = self.prompt("Enter account number: ")? else {
            return Ok(());
        };

        let available = self.bank.get_account(&number)?.available_balance();
        writeln!(self.output, "  Available balance: ${}", available)?;
        let Some(amount) = self.prompt_number::<Money>("Enter withdrawal amount: $")? else {
            return Ok(());
        };

        self.bank.withdraw(&number, amount)?;
        let balance = self.bank.get_account(&number)?.balance();

        self.print_success(&format!("Successfully withdrew ${}", amount))?;
        writeln!(self.output, "  New balance: ${}", balance)?;
        Ok(())
    }

    fn transfer_funds(&mut self) -> Result<()> {
        self.print_header("TRANSFER FUNDS")?;
        let Some(from) = self.prompt("Enter source account number: ")? else {
            return Ok(());
        };

        let available = self.bank.get_account(&from)?.available_balance();
        writeln!(self.output, "  Available balance: ${}", available)?;
        let Some(to) = self.prompt("Enter destination account number: ")? else {
            return Ok(());
        };
        let Some(amount) = self.prompt_number::<Money>("Enter transfer amount: $")? else {
            return Ok(());
        };

        self.bank.transfer(&from, &to, amount)?;

        self.print_success(&format!(
            "Successfully transferred ${} from {} to {}",
            amount, from, to
        ))?;
        let source = self.bank.get_account(&from)?.balance();
        let dest = self.bank.get_account(&to)?.balance();
        writeln!(self.output, "  Source account new balance: ${}", source)?;
        writeln!(self.output, "  Destination account new balance: ${}", dest)?;
        Ok(())
    }

    fn view_transaction_history(&mut self) -> Result<()> {
        self.print_header("TRANSACTION HISTORY")?;
        let Some(number) = self.prompt("Enter account number: ")? else {
            return Ok(());
        };
        self.bank.get_account(&number)?;
        let Some(count) = self.prompt_number::<usize>("Show last N transactions (0 for all): ")? else {
            return Ok(());
        };

        let account = self.bank.get_account(&number)?;
        let transactions = match count {
            0 => account.transactions(),
            n => account.recent_transactions(n),
        };

        writeln!(self.output, "\nTransaction History for {}", account.number())?;
        writeln!(
            self.output,
            "Account Holder: {} | Current Balance: ${}\n",
            account.holder(),
            account.balance()
        )?;

        if transactions.is_empty() {
            writeln!(self.output, "  No transactions found.")?;
            return Ok(());
        }

        writeln!(self.output, "{}", Transaction::table_header())?;
        writeln!(self.output, "{}", "-".repeat(100))?;
        for tx in transactions {
            writeln!(self.output, "{}", tx)?;
        }
        writeln!(self.output, "{}", "-".repeat(100))?;
        writeln!(
            self.output,
            "Showing {} of {} transactions",
            transactions.len(),
            account.transactions().len()
        )?;

        let Some(export) = self.prompt("Export full statement as CSV? (y/N): ")? else {
            return Ok(());
        };
        if is_yes(&export) {
            let account = self.bank.get_account(&number)?;
            writeln!(self.output)?;
            write_statement(account, &mut self.output)?;
        }
        Ok(())
    }

    fn monthly_maintenance(&mut self) -> Result<()> {
        self.print_header("APPLY MONTHLY INTEREST")?;
        writeln!(
            self.output,
            "This will apply interest to all accounts and reset monthly limits."
        )?;
        let Some(confirm) = self.prompt("Proceed? (yes/no): ")? else {
            return Ok(());
        };
        if !is_yes(&confirm) {
            writeln!(self.output, "  Operation cancelled.")?;
            return Ok(());
        }

        let report = self.bank.perform_monthly_maintenance();
        self.print_success("Monthly maintenance completed!")?;
        writeln!(
            self.output,
            "  - Interest applied to {} accounts (${} credited)",
            report.accounts_processed, report.interest_credited
        )?;
        writeln!(
            self.output,
            "  - {} savings withdrawal counters reset",
            report.withdrawal_counters_reset
        )?;
        Ok(())
    }

    fn list_all_accounts(&mut self) -> Result<()> {
        self.print_header("ALL ACCOUNTS")?;
        if self.bank.account_count() == 0 {
            writeln!(self.output, "  No accounts found.")?;
            return Ok(());
        }

        let rule = "-".repeat(80);
        let out = &mut self.output;

        writeln!(out, "\nSAVINGS ACCOUNTS:")?;
        writeln!(out, "{}", rule)?;
        let savings = self.bank.savings_accounts();
        if savings.is_empty() {
            writeln!(out, "  None")?;
        } else {
            writeln!(
                out,
                "  {:<15} {:<25} {:>15} {:>15}",
                "ACCOUNT #", "HOLDER", "BALANCE", "AVAILABLE"
            )?;
            writeln!(out, "{}", rule)?;
            for account in savings {
                writeln!(
                    out,
                    "  {:<15} {:<25} {:>15} {:>15}",
                    account.number().to_string(),
                    account.holder(),
                    format!("${}", account.balance()),
                    format!("${}", account.available_balance())
                )?;
            }
        }

        writeln!(out, "\nCHECKING ACCOUNTS:")?;
        writeln!(out, "{}", rule)?;
        let checking = self.bank.checking_accounts();
        if checking.is_empty() {
            writeln!(out, "  None")?;
        } else {
            writeln!(
                out,
                "  {:<15} {:<25} {:>15} {:>15} {:>10}",
                "ACCOUNT #", "HOLDER", "BALANCE", "AVAILABLE", "OVERDRAFT"
            )?;
            writeln!(out, "{}", rule)?;
            for account in checking {
                let overdraft = if account.is_in_overdraft() {
                    format!("${}", account.current_overdraft())
                } else {
                    "Clear".to_string()
                };
                writeln!(
                    out,
                    "  {:<15} {:<25} {:>15} {:>15} {:>10}",
                    account.number().to_string(),
                    account.holder(),
                    format!("${}", account.balance()),
                    format!("${}", account.available_balance()),
                    overdraft
                )?;
            }
        }

        writeln!(out, "{}", rule)?;
        writeln!(out, "  Total Accounts: {}", self.bank.account_count())?;
        Ok(())
    }

    fn show_bank_summary(&mut self) -> Result<()> {
        let summary = self.bank.summary();
        writeln!(self.output, "\n{}", summary)?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        self.read_line()
    }

    /// Prompts until the answer parses as `T`.
    fn prompt_number<T: FromStr>(&mut self, prompt: &str) -> Result<Option<T>> {
        let mut current = prompt.to_string();
        loop {
            let Some(line) = self.prompt(&current)? else {
                return Ok(None);
            };
            match line.parse::<T>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => current = format!("Invalid input. {}", prompt),
            }
        }
    }

    fn print_header(&mut self, title: &str) -> Result<()> {
        writeln!(self.output, "\n═══════════ {} ══════════", title)?;
        Ok(())
    }

    fn print_success(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "\n✓ {}", message)?;
        Ok(())
    }

    fn print_error(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "\n✗ Error: {}", message)?;
        Ok(())
    }

    fn print_welcome(&mut self) -> Result<()> {
        writeln!(self.output, "\n  Welcome to {}!", self.bank.bank_name())?;
        writeln!(self.output, "  Your trusted partner in financial management.")?;
        Ok(())
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output, "\n═══════════════════ MAIN MENU ══════════════════")?;
        for (key, label) in [
            (1, "Create Account"),
            (2, "View Account Details"),
            (3, "Deposit Funds"),
            (4, "Withdraw Funds"),
            (5, "Transfer Funds"),
            (6, "View Transaction History"),
            (7, "Apply Monthly Interest"),
            (8, "List All Accounts"),
            (9, "Bank Summary Report"),
            (0, "Exit"),
        ] {
            writeln!(self.output, "  {}. {}", key, label)?;
        }
        writeln!(self.output, "════════════════════════════════════════════════")?;
        Ok(())
    }

    fn print_goodbye(&mut self) -> Result<()> {
        writeln!(self.output, "\n  Thank you for using {}!", self.bank.bank_name())?;
        writeln!(self.output, "  Have a great day!")?;
        Ok(())
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.to_lowercase().as_str(), "y" | "yes")
}
