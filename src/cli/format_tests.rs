#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::format::*;
use crate::models::{PaymentMethod, Transaction};
use crate::query::MonthSummary;

fn summary(total: Decimal, limit: Decimal) -> MonthSummary {
    MonthSummary {
        month: "2024-05".into(),
        total,
        debit_total: total,
        credit_total: Decimal::ZERO,
        count: 3,
        limit,
    }
}

// ── format_amount ─────────────────────────────────────────────

#[test]
fn test_format_amount_separators() {
    assert_eq!(format_amount(dec!(1234567.89)), "1,234,567.89");
    assert_eq!(format_amount(dec!(999.5)), "999.50");
    assert_eq!(format_amount(dec!(1000)), "1,000.00");
    assert_eq!(format_amount(dec!(100000)), "100,000.00");
}

#[test]
fn test_format_amount_zero_and_negative() {
    assert_eq!(format_amount(Decimal::ZERO), "0.00");
    assert_eq!(format_amount(dec!(-20)), "-20.00");
    assert_eq!(format_amount(dec!(-1234.5)), "-1,234.50");
}

#[test]
fn test_format_amount_rounds_extra_places() {
    assert_eq!(format_amount(dec!(10.005)), "10.00");
    assert_eq!(format_amount(dec!(10.015)), "10.02");
    assert_eq!(format_amount(dec!(-0.001)), "0.00");
}

// ── fit_description ───────────────────────────────────────────

#[test]
fn test_fit_description_short_text_unchanged() {
    assert_eq!(fit_description("Coffee", 10), "Coffee");
}

#[test]
fn test_fit_description_cuts_with_ellipsis() {
    assert_eq!(fit_description("Weekly groceries", 8), "Weekly …");
}

#[test]
fn test_fit_description_flattens_newlines() {
    assert_eq!(fit_description("Rent\n  June\tflat", 40), "Rent June flat");
}

#[test]
fn test_fit_description_zero_width() {
    assert_eq!(fit_description("Coffee", 0), "");
}

#[test]
fn test_fit_description_unicode() {
    assert_eq!(fit_description("日本語テスト", 4), "日本語…");
}

// ── transaction_row ───────────────────────────────────────────

#[test]
fn test_transaction_row_contents() {
    let txn = Transaction {
        id: "abc".into(),
        description: "Groceries".into(),
        amount: dec!(1520.4),
        method: PaymentMethod::Credit,
        date: "2024-05-02".into(),
        time: String::new(),
        created_at: 1,
    };
    let row = transaction_row(&txn);
    assert!(row.starts_with("2024-05-02 --:-- CREDIT"));
    assert!(row.contains("1,520.40"));
    assert!(row.contains("Groceries"));
    assert!(row.ends_with("abc"));
}

#[test]
fn test_transaction_row_stays_on_one_line() {
    let txn = Transaction {
        id: "x1".into(),
        description: "Hardware store\nscrews and a very long list of other things".into(),
        amount: dec!(7),
        method: PaymentMethod::Debit,
        date: "2024-05-03".into(),
        time: "17:05".into(),
        created_at: 1,
    };
    let row = transaction_row(&txn);
    assert!(!row.contains('\n'));
    assert!(row.starts_with("2024-05-03 17:05 DEBIT "));
    assert!(row.contains("Hardware store screws and a…"));
}

// ── summary_lines ─────────────────────────────────────────────

#[test]
fn test_summary_without_budget() {
    let lines = summary_lines(&summary(dec!(80), Decimal::ZERO));
    assert_eq!(lines[0], "spendlog - 2024-05");
    assert_eq!(lines.last().unwrap(), "  Budget:     not set");
    assert!(!lines.iter().any(|l| l.contains("Used:")));
}

#[test]
fn test_summary_under_budget() {
    let lines = summary_lines(&summary(dec!(125), dec!(500)));
    assert!(lines.contains(&"  Budget:     500.00".to_string()));
    assert!(lines.contains(&"  Used:       25%".to_string()));
    assert_eq!(lines.last().unwrap(), "  Remaining:  375.00");
}

#[test]
fn test_summary_over_budget() {
    let lines = summary_lines(&summary(dec!(1150), dec!(1000)));
    assert!(lines.contains(&"  Used:       115%".to_string()));
    assert_eq!(lines.last().unwrap(), "  Over by:    150.00");
}
