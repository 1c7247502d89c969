//! Opening accounts in bulk: from a CSV file or the built-in demo set.

use crate::account::BankAccount;
use crate::bank::Bank;
use crate::error::Result;
use crate::money::Money;
use csv::{ReaderBuilder, Trim};
use log::{debug, info, warn};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;
use std::str::FromStr;

/// Raw row as read from a seed CSV.
///
/// `option` is the annual rate for savings accounts and the overdraft limit
/// for checking accounts; leave it empty for the defaults.
#[derive(Debug, Deserialize)]
pub struct AccountRecord {
    /// Account type: savings or checking
    #[serde(rename = "type")]
    pub account_type: String,

    pub holder: String,

    pub opening_balance: String,

    pub option: Option<String>,
}

impl AccountRecord {
    /// Parses the raw row into an opening request.
    ///
    /// Returns `None` for an unknown type, an empty holder, or unparseable
    /// numbers.
    pub fn parse(&self) -> Option<OpeningRequest> {
        let holder = self.holder.trim();
        if holder.is_empty() {
            return None;
        }
        let opening = Money::from_str(&self.opening_balance).ok()?;
        let option = self
            .option
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        match self.account_type.trim().to_lowercase().as_str() {
            "savings" => {
                let interest_rate = match option {
                    Some(s) => Some(Decimal::from_str(s).ok()?),
                    None => None,
                };
                Some(OpeningRequest::Savings {
                    holder: holder.to_string(),
                    opening,
                    interest_rate,
                })
            }
            "checking" => {
                let overdraft_limit = match option {
                    Some(s) => Some(Money::from_str(s).ok()?),
                    None => None,
                };
                Some(OpeningRequest::Checking {
                    holder: holder.to_string(),
                    opening,
                    overdraft_limit,
                })
            }
            _ => None,
        }
    }
}

/// A validated request to open one account.
#[derive(Debug, Clone, PartialEq)]
pub enum OpeningRequest {
    Savings {
        holder: String,
        opening: Money,
        interest_rate: Option<Decimal>,
    },
    Checking {
        holder: String,
        opening: Money,
        overdraft_limit: Option<Money>,
    },
}

impl OpeningRequest {
    /// Opens the account, returning its number.
    pub fn open(&self, bank: &mut Bank) -> Result<String> {
        let account = match self {
            OpeningRequest::Savings {
                holder,
                opening,
                interest_rate,
            } => bank.create_savings_account(holder, *opening, *interest_rate)?,
            OpeningRequest::Checking {
                holder,
                opening,
                overdraft_limit,
            } => bank.create_checking_account(holder, *opening, *overdraft_limit)?,
        };
        Ok(account.number().to_string())
    }
}

/// Opens accounts from CSV with header `type,holder,opening_balance,option`.
///
/// Rows are read one at a time. Unparseable rows and rows the bank rejects
/// are logged at warn level and skipped. Returns the number of accounts
/// opened.
pub fn load_accounts<R: Read>(bank: &mut Bank, reader: R) -> Result<usize> {
    let mut csv_reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut opened = 0;
    for (row_idx, result) in csv_reader.deserialize::<AccountRecord>().enumerate() {
        let row_num = row_idx + 2; // 1-indexed, accounting for header row

        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!("Row {}: CSV parse error: {}", row_num, e);
                continue;
            }
        };

        let Some(request) = record.parse() else {
            warn!("Row {}: Failed to parse account record", row_num);
            continue;
        };

        match request.open(bank) {
            Ok(number) => {
                debug!("Row {}: Opened {}", row_num, number);
                opened += 1;
            }
            Err(e) => warn!("Row {}: {}", row_num, e),
        }
    }

    info!("Opened {} accounts from seed file", opened);
    Ok(opened)
}

/// Opens the four demo accounts. Returns their numbers in opening order.
pub fn seed_demo_accounts(bank: &mut Bank) -> Result<Vec<String>> {
    let demo = [
        OpeningRequest::Savings {
            holder: "John Smith".to_string(),
            opening: Money::from_units(5_000),
            interest_rate: None,
        },
        OpeningRequest::Savings {
            holder: "Jane Doe".to_string(),
            opening: Money::from_units(10_000),
            interest_rate: Some(Decimal::from_parts(35, 0, 0, false, 3)),
        },
        OpeningRequest::Checking {
            holder: "John Smith".to_string(),
            opening: Money::from_units(2_500),
            overdraft_limit: None,
        },
        OpeningRequest::Checking {
            holder: "Bob Wilson".to_string(),
            opening: Money::from_units(1_000),
            overdraft_limit: Some(Money::from_units(1_000)),
        },
    ];

    demo.iter().map(|request| request.open(bank)).collect()
}
