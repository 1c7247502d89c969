//! Behavioural tests for the ledger library.
//!
//! Exercises the public API the way a front-end would: through the bank
//! registry and the `BankAccount` contract.

use bank_ledger::{Bank, BankAccount, BankError, Money, TxKind};
use rust_decimal::Decimal;
use std::str::FromStr;

fn money(s: &str) -> Money {
    Money::from_str(s).unwrap()
}

fn rate(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn balance(bank: &Bank, number: &str) -> Money {
    bank.get_account(number).unwrap().balance()
}

fn history_len(bank: &Bank, number: &str) -> usize {
    bank.get_account(number).unwrap().transactions().len()
}

/// SAV-1001 with 1000 and CHK-1002 with 500.
fn two_account_bank() -> Bank {
    let mut bank = Bank::new("Test Bank");
    bank.create_savings_account("Ann", money("1000"), None).unwrap();
    bank.create_checking_account("Ben", money("500"), None).unwrap();
    bank
}

// ==================== DEPOSITS ====================

#[test]
fn test_deposit_appends_one_matching_transaction() {
    let mut bank = two_account_bank();

    for (number, amount) in [("SAV-1001", "12.34"), ("CHK-1002", "0.01"), ("CHK-1002", "1000000")] {
        let before = balance(&bank, number);
        let count = history_len(&bank, number);

        bank.deposit(number, money(amount)).unwrap();

        let account = bank.get_account(number).unwrap();
        assert_eq!(account.balance(), before + money(amount));
        assert_eq!(account.transactions().len(), count + 1);

        let tx = account.transactions().last().unwrap();
        assert_eq!(tx.kind(), TxKind::Deposit);
        assert_eq!(tx.amount(), money(amount));
        assert_eq!(tx.balance_after(), account.balance());
    }
}

#[test]
fn test_invalid_deposit_changes_nothing() {
    let mut bank = two_account_bank();

    for amount in ["0", "-10", "1000000.0001"] {
        let result = bank.deposit("SAV-1001", money(amount));
        assert!(matches!(result, Err(BankError::InvalidAmount(_))));
    }

    assert_eq!(balance(&bank, "SAV-1001"), money("1000"));
    assert_eq!(history_len(&bank, "SAV-1001"), 1);
}

#[test]
fn test_deposit_to_unknown_account() {
    let mut bank = two_account_bank();
    let result = bank.deposit("CHK-4040", money("10"));
    assert!(matches!(result, Err(BankError::AccountNotFound(n)) if n == "CHK-4040"));
}

// ==================== SAVINGS ====================

#[test]
fn test_savings_minimum_balance() {
    let mut bank = Bank::new("Test Bank");
    bank.create_savings_account("Ann", money("500"), None).unwrap();

    assert_eq!(
        bank.get_account("SAV-1001").unwrap().available_balance(),
        money("400")
    );

    let result = bank.withdraw("SAV-1001", money("450"));
    assert!(matches!(result, Err(BankError::InsufficientFunds(_))));
    assert_eq!(balance(&bank, "SAV-1001"), money("500"));
    assert_eq!(history_len(&bank, "SAV-1001"), 1);
}

#[test]
fn test_savings_monthly_limit() {
    let mut bank = Bank::new("Test Bank");
    bank.create_savings_account("Ann", money("5000"), None).unwrap();

    for _ in 0..6 {
        bank.withdraw("SAV-1001", money("100")).unwrap();
    }

    for amount in ["1", "100", "4000"] {
        let result = bank.withdraw("SAV-1001", money(amount));
        assert!(matches!(
            result,
            Err(BankError::WithdrawalLimitExceeded { used: 6, limit: 6 })
        ));
    }
    assert_eq!(balance(&bank, "SAV-1001"), money("4400"));

    bank.perform_monthly_maintenance();
    assert!(bank.withdraw("SAV-1001", money("100")).is_ok());
}

#[test]
fn test_savings_interest_through_maintenance() {
    let mut bank = Bank::new("Test Bank");
    bank.create_savings_account("Ann", money("12000"), Some(rate("0.12")))
        .unwrap();

    let report = bank.perform_monthly_maintenance();
    assert_eq!(report.interest_credited, money("120"));

    let savings = bank.get_account("SAV-1001").unwrap().as_savings().unwrap();
    assert_eq!(savings.balance(), money("12120"));
    assert_eq!(savings.accumulated_interest(), money("120"));
}

// ==================== CHECKING ====================

#[test]
fn test_checking_available_balance() {
    let mut bank = Bank::new("Test Bank");
    bank.create_checking_account("Ben", money("1000"), None).unwrap();

    let account = bank.get_account("CHK-1001").unwrap();
    assert_eq!(account.available_balance(), money("1500"));
}

#[test]
fn test_checking_overdraft_entry_and_repayment() {
    let mut bank = Bank::new("Test Bank");
    bank.create_checking_account("Ben", money("100"), Some(money("500")))
        .unwrap();

    bank.withdraw("CHK-1001", money("300")).unwrap();
    {
        let checking = bank.get_account("CHK-1001").unwrap().as_checking().unwrap();
        assert_eq!(checking.current_overdraft(), money("235"));
        assert_eq!(checking.raw_balance(), Money::ZERO);
        assert_eq!(checking.balance(), money("-235"));
        assert!(checking.is_in_overdraft());

        let kinds: Vec<TxKind> = checking.transactions().iter().map(|t| t.kind()).collect();
        assert_eq!(kinds, [TxKind::Deposit, TxKind::Fee, TxKind::Withdrawal]);
    }

    bank.deposit("CHK-1001", money("285")).unwrap();
    let checking = bank.get_account("CHK-1001").unwrap().as_checking().unwrap();
    assert_eq!(checking.current_overdraft(), Money::ZERO);
    assert_eq!(checking.balance(), money("50"));
    assert!(!checking.is_in_overdraft());
}

#[test]
fn test_checking_fee_once_per_overdraft_entry() {
    let mut bank = Bank::new("Test Bank");
    bank.create_checking_account("Ben", money("0"), Some(money("1000")))
        .unwrap();

    bank.withdraw("CHK-1001", money("100")).unwrap();
    bank.withdraw("CHK-1001", money("100")).unwrap();
    bank.withdraw("CHK-1001", money("100")).unwrap();

    let checking = bank.get_account("CHK-1001").unwrap().as_checking().unwrap();
    assert_eq!(checking.total_overdraft_fees(), money("35"));
    assert_eq!(checking.current_overdraft(), money("335"));
    assert_eq!(checking.overdraft_usage_count(), 1);
}

#[test]
fn test_checking_withdrawal_beyond_headroom() {
    let mut bank = two_account_bank();
    let result = bank.withdraw("CHK-1002", money("1000.01"));
    assert!(matches!(result, Err(BankError::InsufficientFunds(_))));
    assert_eq!(balance(&bank, "CHK-1002"), money("500"));
}

#[test]
fn test_checking_interest_threshold_differs_from_savings() {
    let mut bank = Bank::new("Test Bank");
    bank.create_checking_account("Ben", money("119"), None).unwrap();
    bank.create_savings_account("Ann", money("1"), Some(rate("0.01")))
        .unwrap();

    bank.apply_interest_to_all_accounts();

    assert_eq!(balance(&bank, "CHK-1001"), money("119"));
    assert_eq!(history_len(&bank, "CHK-1001"), 1);
    assert_eq!(balance(&bank, "SAV-1002"), money("1.0008"));
    assert_eq!(history_len(&bank, "SAV-1002"), 2);
}

#[test]
fn test_checking_interest_just_below_one_cent() {
    let mut bank = Bank::new("Test Bank");
    bank.create_checking_account("Ben", money("119.5"), None).unwrap();

    assert_eq!(bank.apply_interest_to_all_accounts(), Money::ZERO);
    assert_eq!(balance(&bank, "CHK-1001"), money("119.5"));
    assert_eq!(history_len(&bank, "CHK-1001"), 1);
}

// ==================== TRANSFERS ====================

#[test]
fn test_transfer_between_types() {
    let mut bank = two_account_bank();
    bank.transfer("SAV-1001", "CHK-1002", money("200")).unwrap();

    assert_eq!(balance(&bank, "SAV-1001"), money("800"));
    assert_eq!(balance(&bank, "CHK-1002"), money("700"));
}

#[test]
fn test_transfer_to_same_account() {
    let mut bank = two_account_bank();
    let result = bank.transfer("SAV-1001", "SAV-1001", money("10"));
    assert!(matches!(result, Err(BankError::TransferFailed(_))));
    assert_eq!(history_len(&bank, "SAV-1001"), 1);
}

#[test]
fn test_non_canonical_account_numbers_are_unknown() {
    let mut bank = two_account_bank();

    for alias in ["SAV-01001", "SAV-+1001", "SAV-001001"] {
        assert!(!bank.account_exists(alias));
        assert!(matches!(
            bank.get_account(alias),
            Err(BankError::AccountNotFound(_))
        ));

        let result = bank.transfer("SAV-1001", alias, money("10"));
        assert!(result.is_err());
    }

    assert_eq!(balance(&bank, "SAV-1001"), money("1000"));
    assert_eq!(history_len(&bank, "SAV-1001"), 1);
}

#[test]
fn test_transfer_counts_against_savings_limit() {
    let mut bank = two_account_bank();
    for _ in 0..6 {
        bank.transfer("SAV-1001", "CHK-1002", money("10")).unwrap();
    }

    let result = bank.transfer("SAV-1001", "CHK-1002", money("10"));
    assert!(matches!(result, Err(BankError::TransferFailed(_))));
    assert_eq!(balance(&bank, "SAV-1001"), money("940"));
    assert_eq!(balance(&bank, "CHK-1002"), money("560"));
}

#[test]
fn test_transfer_from_unknown_source() {
    let mut bank = two_account_bank();
    let result = bank.transfer("SAV-7777", "CHK-1002", money("10"));
    assert!(matches!(result, Err(BankError::AccountNotFound(_))));
    assert_eq!(balance(&bank, "CHK-1002"), money("500"));
}

// ==================== LIFECYCLE ====================

#[test]
fn test_zero_opening_balance_records_nothing() {
    let mut bank = Bank::new("Test Bank");
    let account = bank.create_savings_account("Ann", Money::ZERO, None).unwrap();
    assert!(account.transactions().is_empty());
}

#[test]
fn test_negative_opening_balance_rejected() {
    let mut bank = Bank::new("Test Bank");
    let result = bank.create_checking_account("Ben", money("-0.01"), None);
    assert!(matches!(result, Err(BankError::InvalidAmount(_))));
    assert_eq!(bank.account_count(), 0);
}

#[test]
fn test_close_account() {
    let mut bank = two_account_bank();

    assert!(matches!(
        bank.close_account("SAV-1001"),
        Err(BankError::Banking(_))
    ));

    bank.withdraw("CHK-1002", money("500")).unwrap();
    bank.close_account("CHK-1002").unwrap();

    assert!(!bank.account_exists("CHK-1002"));
    assert!(matches!(
        bank.get_account("CHK-1002"),
        Err(BankError::AccountNotFound(_))
    ));
    assert_eq!(bank.account_count(), 1);

    let next = bank.create_checking_account("Cy", Money::ZERO, None).unwrap();
    assert_eq!(next.number().to_string(), "CHK-1003");
}

#[test]
fn test_transaction_ids_are_per_account() {
    let mut bank = two_account_bank();
    bank.deposit("SAV-1001", money("1")).unwrap();
    bank.deposit("CHK-1002", money("1")).unwrap();

    let savings_ids: Vec<String> = bank
        .get_account("SAV-1001")
        .unwrap()
        .transactions()
        .iter()
        .map(|t| t.id().to_string())
        .collect();
    assert_eq!(savings_ids, ["SAV-1001-0001", "SAV-1001-0002"]);

    let checking = bank.get_account("CHK-1002").unwrap();
    assert_eq!(checking.transactions()[1].id(), "CHK-1002-0002");
}

#[test]
fn test_recent_transactions() {
    let mut bank = two_account_bank();
    for amount in ["1", "2", "3"] {
        bank.deposit("SAV-1001", money(amount)).unwrap();
    }

    let account = bank.get_account("SAV-1001").unwrap();
    let recent: Vec<Money> = account
        .recent_transactions(2)
        .iter()
        .map(|t| t.amount())
        .collect();
    assert_eq!(recent, [money("2"), money("3")]);
    assert_eq!(account.recent_transactions(10).len(), 4);
}
