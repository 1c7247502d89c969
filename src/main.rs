//! Bank Ledger CLI
//!
//! Interactive menu over an in-memory bank.
//!
//! # Usage
//!
//! ```bash
//! cargo run                    # starts with the demo accounts
//! cargo run -- accounts.csv    # opens accounts from a seed file instead
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `info` to control logging verbosity
//! - `BANK_NAME`, `BANK_DEMO_ACCOUNTS`: see `bank_ledger::config`

use bank_ledger::{seed, Bank, BankConfig, Console, Result};
use log::info;
use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = BankConfig::from_env()?;
    let mut bank = Bank::new(config.bank_name.as_str());

    let args: Vec<String> = env::args().collect();
    if let Some(seed_path) = args.get(1) {
        let file = File::open(seed_path)?;
        seed::load_accounts(&mut bank, BufReader::new(file))?;
    } else if config.demo_accounts {
        let numbers = seed::seed_demo_accounts(&mut bank)?;
        info!("Opened demo accounts {}", numbers.join(", "));
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    Console::new(&mut bank, stdin.lock(), stdout.lock()).run()
}
