//! Runtime configuration read from the environment.
//!
//! # Environment Variables
//!
//! - `BANK_NAME`: display name of the bank (default `First National Bank`)
//! - `BANK_DEMO_ACCOUNTS`: open the demo accounts at startup when no seed
//!   file is given (`true`/`false`, `1`/`0`, `yes`/`no`; default `true`)

use crate::error::{BankError, Result};
use std::env;

pub const DEFAULT_BANK_NAME: &str = "First National Bank";

const BANK_NAME: &str = "BANK_NAME";
const BANK_DEMO_ACCOUNTS: &str = "BANK_DEMO_ACCOUNTS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankConfig {
    pub bank_name: String,
    pub demo_accounts: bool,
}

impl BankConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bank_name = lookup(BANK_NAME)
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_BANK_NAME.to_string());

        let demo_accounts = match lookup(BANK_DEMO_ACCOUNTS) {
            Some(value) => parse_flag(BANK_DEMO_ACCOUNTS, &value)?,
            None => true,
        };

        Ok(BankConfig {
            bank_name,
            demo_accounts,
        })
    }
}

impl Default for BankConfig {
    fn default() -> Self {
        BankConfig {
            bank_name: DEFAULT_BANK_NAME.to_string(),
            demo_accounts: true,
        }
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(BankError::InvalidConfig {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
