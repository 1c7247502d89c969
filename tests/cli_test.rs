//! Integration tests for the bank-ledger binary.
//!
//! These tests run the actual binary and drive the menu through stdin.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

/// Binary with demo accounts disabled and a fixed bank name
fn ledger() -> Command {
    let mut cmd = Command::cargo_bin("bank-ledger").unwrap();
    cmd.env("BANK_NAME", "Test Bank")
        .env("BANK_DEMO_ACCOUNTS", "false");
    cmd
}

/// Writes a seed CSV to a temporary file
fn seed_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_exit_immediately() {
    ledger()
        .write_stdin("0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome to Test Bank!"))
        .stdout(predicate::str::contains("Thank you for using Test Bank!"));
}

#[test]
fn test_end_of_input_exits_cleanly() {
    ledger().write_stdin("").assert().success();
}

#[test]
fn test_no_accounts_without_demo() {
    ledger()
        .write_stdin("8\n0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No accounts found."));
}

#[test]
fn test_demo_accounts_seeded_by_default() {
    let mut cmd = Command::cargo_bin("bank-ledger").unwrap();
    cmd.env_remove("BANK_DEMO_ACCOUNTS")
        .env_remove("BANK_NAME")
        .write_stdin("2\nSAV-1002\n0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome to First National Bank!"))
        .stdout(predicate::str::contains("Account Holder: Jane Doe"))
        .stdout(predicate::str::contains("Interest Rate: 3.50%"));
}

#[test]
fn test_seed_file_and_transfer() {
    let seed = seed_file(
        "type,holder,opening_balance,option\n\
         savings,Ann,1000,\n\
         checking,Ben,500,\n",
    );

    ledger()
        .arg(seed.path())
        .write_stdin("5\nSAV-1001\nCHK-1002\n200\n9\n0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Successfully transferred $200.00 from SAV-1001 to CHK-1002",
        ))
        .stdout(predicate::str::contains("Source account new balance: $800.00"))
        .stdout(predicate::str::contains("Destination account new balance: $700.00"))
        .stdout(predicate::str::contains("Total Accounts: 2"));
}

#[test]
fn test_overdraft_session() {
    let seed = seed_file("type,holder,opening_balance,option\nchecking,Ben,100,500\n");

    ledger()
        .arg(seed.path())
        .write_stdin("4\nCHK-1001\n300\n2\nCHK-1001\n0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Available balance: $600.00"))
        .stdout(predicate::str::contains("New balance: $-235.00"))
        .stdout(predicate::str::contains("Overdraft Status: IN OVERDRAFT"));
}

#[test]
fn test_banking_errors_do_not_end_session() {
    let seed = seed_file("type,holder,opening_balance,option\nsavings,Ann,500,\n");

    ledger()
        .arg(seed.path())
        .write_stdin("3\nSAV-1001\n-5\n4\nSAV-1001\n450\n0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("✗ Error: Invalid amount: Amount must be positive"))
        .stdout(predicate::str::contains("✗ Error: Insufficient funds:"))
        .stdout(predicate::str::contains("Thank you for using Test Bank!"));
}

#[test]
fn test_missing_seed_file_error() {
    ledger()
        .arg("nonexistent.csv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_invalid_config_error() {
    let mut cmd = Command::cargo_bin("bank-ledger").unwrap();
    cmd.env("BANK_DEMO_ACCOUNTS", "sometimes")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration: BANK_DEMO_ACCOUNTS"));
}
