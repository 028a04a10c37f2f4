#![allow(clippy::unwrap_used)]

use super::*;
use crate::models::{MonthlyBudget, PaymentMethod, Transaction};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn make_txn(id: &str, date: &str, time: &str, created_at: i64) -> Transaction {
    Transaction {
        id: id.into(),
        description: format!("Purchase {id}"),
        amount: dec!(10.00),
        method: PaymentMethod::Debit,
        date: date.into(),
        time: time.into(),
        created_at,
    }
}

// ── Lifecycle ─────────────────────────────────────────────────

#[test]
fn test_fresh_store_is_empty() {
    let db = Database::open_in_memory().unwrap();
    assert!(db.transactions().get_all().unwrap().is_empty());
    assert!(db.budgets().get_all().unwrap().is_empty());
    assert_eq!(db.transactions().count().unwrap(), 0);
}

#[test]
fn test_file_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spendlog.db");

    let db = Database::open(&path).unwrap();
    db.transactions()
        .add(&make_txn("a", "2024-01-10", "09:00", 1))
        .unwrap();
    db.budgets()
        .put(&MonthlyBudget::new("2024-01".into(), dec!(400)))
        .unwrap();
    db.close().unwrap();

    let db = Database::open(&path).unwrap();
    let all = db.transactions().get_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, "a");
    assert_eq!(db.budgets().limit_for("2024-01").unwrap(), dec!(400));
}

// ── Transaction CRUD ──────────────────────────────────────────

#[test]
fn test_transaction_add_and_get() {
    let db = Database::open_in_memory().unwrap();
    let txn = make_txn("a", "2024-01-10", "09:00", 1);
    db.transactions().add(&txn).unwrap();

    let fetched = db.transactions().get("a").unwrap();
    assert_eq!(fetched, Some(txn));
}

#[test]
fn test_transaction_get_not_found() {
    let db = Database::open_in_memory().unwrap();
    assert!(db.transactions().get("missing").unwrap().is_none());
}

#[test]
fn test_transaction_add_duplicate_id_rejected() {
    let db = Database::open_in_memory().unwrap();
    let original = make_txn("a", "2024-01-10", "09:00", 1);
    db.transactions().add(&original).unwrap();

    let mut clash = make_txn("a", "2024-02-01", "12:00", 2);
    clash.description = "Different".into();
    let err = db.transactions().add(&clash).unwrap_err();
    assert!(
        matches!(err, StoreError::DuplicateKey { kind: "transaction", ref key } if key == "a"),
        "unexpected error: {err:?}"
    );

    let all = db.transactions().get_all().unwrap();
    assert_eq!(all, vec![original]);
}

#[test]
fn test_transaction_put_inserts_when_absent() {
    let db = Database::open_in_memory().unwrap();
    let txn = make_txn("a", "2024-01-10", "09:00", 1);
    db.transactions().put(&txn).unwrap();
    assert_eq!(db.transactions().get("a").unwrap(), Some(txn));
}

#[test]
fn test_transaction_put_overwrites_when_present() {
    let db = Database::open_in_memory().unwrap();
    db.transactions()
        .add(&make_txn("a", "2024-01-10", "09:00", 1))
        .unwrap();

    let mut edited = make_txn("a", "2024-01-12", "18:45", 1);
    edited.description = "Dinner".into();
    edited.amount = dec!(55.20);
    edited.method = PaymentMethod::Credit;
    db.transactions().put(&edited).unwrap();

    assert_eq!(db.transactions().get("a").unwrap(), Some(edited));
    assert_eq!(db.transactions().count().unwrap(), 1);
}

#[test]
fn test_transaction_put_keeps_created_at() {
    let db = Database::open_in_memory().unwrap();
    db.transactions()
        .add(&make_txn("a", "2024-01-10", "09:00", 1_700_000_000_000))
        .unwrap();

    let mut edited = make_txn("a", "2024-01-10", "09:30", 42);
    edited.description = "Brunch".into();
    db.transactions().put(&edited).unwrap();

    let stored = db.transactions().get("a").unwrap().unwrap();
    assert_eq!(stored.created_at, 1_700_000_000_000);
    assert_eq!(stored.time, "09:30");
    assert_eq!(stored.description, "Brunch");
}

#[test]
fn test_transaction_delete() {
    let db = Database::open_in_memory().unwrap();
    db.transactions()
        .add(&make_txn("a", "2024-01-10", "09:00", 1))
        .unwrap();
    db.transactions()
        .add(&make_txn("b", "2024-01-11", "09:00", 2))
        .unwrap();

    db.transactions().delete("a").unwrap();
    let remaining: Vec<String> = db
        .transactions()
        .get_all()
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(remaining, vec!["b"]);
}

#[test]
fn test_transaction_delete_missing_is_noop() {
    let db = Database::open_in_memory().unwrap();
    db.transactions()
        .add(&make_txn("a", "2024-01-10", "09:00", 1))
        .unwrap();

    db.transactions().delete("nope").unwrap();
    db.transactions().delete("nope").unwrap();
    assert_eq!(db.transactions().count().unwrap(), 1);
}

#[test]
fn test_transaction_clear() {
    let db = Database::open_in_memory().unwrap();
    db.transactions()
        .add(&make_txn("a", "2024-01-10", "09:00", 1))
        .unwrap();
    db.budgets()
        .put(&MonthlyBudget::new("2024-01".into(), dec!(100)))
        .unwrap();

    db.transactions().clear().unwrap();
    assert!(db.transactions().get_all().unwrap().is_empty());
    // Other kind untouched
    assert_eq!(db.budgets().get_all().unwrap().len(), 1);
}

#[test]
fn test_get_all_keeps_insertion_order() {
    let db = Database::open_in_memory().unwrap();
    for (id, date) in [("z", "2024-03-01"), ("a", "2024-01-01"), ("m", "2024-02-01")] {
        db.transactions().add(&make_txn(id, date, "", 1)).unwrap();
    }
    let ids: Vec<String> = db
        .transactions()
        .get_all()
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(ids, vec!["z", "a", "m"]);
}

// ── Date index ────────────────────────────────────────────────

#[test]
fn test_date_range_inclusive_bounds() {
    let db = Database::open_in_memory().unwrap();
    for (id, date) in [
        ("before", "2024-01-31"),
        ("first", "2024-02-01"),
        ("mid", "2024-02-14"),
        ("last", "2024-02-29"),
        ("after", "2024-03-01"),
    ] {
        db.transactions().add(&make_txn(id, date, "12:00", 1)).unwrap();
    }

    let ids: Vec<String> = db
        .transactions()
        .get_by_date_range("2024-02-01", "2024-02-29")
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(ids, vec!["first", "mid", "last"]);
}

#[test]
fn test_date_range_is_string_comparison() {
    let db = Database::open_in_memory().unwrap();
    db.transactions()
        .add(&make_txn("a", "2024-04-30", "", 1))
        .unwrap();

    // "-31" does not exist for April but still bounds the range as a string.
    let found = db
        .transactions()
        .get_by_date_range("2024-04-01", "2024-04-31")
        .unwrap();
    assert_eq!(found.len(), 1);
}

#[test]
fn test_date_range_empty() {
    let db = Database::open_in_memory().unwrap();
    db.transactions()
        .add(&make_txn("a", "2024-01-10", "", 1))
        .unwrap();
    assert!(db
        .transactions()
        .get_by_date_range("2025-01-01", "2025-01-31")
        .unwrap()
        .is_empty());
}

// ── Budget CRUD ───────────────────────────────────────────────

#[test]
fn test_budget_missing_month_is_zero() {
    let db = Database::open_in_memory().unwrap();
    assert_eq!(db.budgets().limit_for("2099-01").unwrap(), Decimal::ZERO);
    assert!(db.budgets().get("2099-01").unwrap().is_none());
}

#[test]
fn test_budget_put_upserts() {
    let db = Database::open_in_memory().unwrap();
    db.budgets()
        .put(&MonthlyBudget::new("2024-01".into(), dec!(500)))
        .unwrap();
    db.budgets()
        .put(&MonthlyBudget::new("2024-01".into(), dec!(650.50)))
        .unwrap();

    assert_eq!(db.budgets().limit_for("2024-01").unwrap(), dec!(650.50));
    assert_eq!(db.budgets().get_all().unwrap().len(), 1);
}

#[test]
fn test_budget_add_duplicate_month_rejected() {
    let db = Database::open_in_memory().unwrap();
    db.budgets()
        .add(&MonthlyBudget::new("2024-01".into(), dec!(500)))
        .unwrap();
    let err = db
        .budgets()
        .add(&MonthlyBudget::new("2024-01".into(), dec!(1)))
        .unwrap_err();
    assert!(matches!(err, StoreError::DuplicateKey { kind: "budget", .. }));
    assert_eq!(db.budgets().limit_for("2024-01").unwrap(), dec!(500));
}

#[test]
fn test_budget_different_months() {
    let db = Database::open_in_memory().unwrap();
    db.budgets()
        .put(&MonthlyBudget::new("2024-02".into(), dec!(200)))
        .unwrap();
    db.budgets()
        .put(&MonthlyBudget::new("2024-01".into(), dec!(100)))
        .unwrap();

    let months: Vec<String> = db
        .budgets()
        .get_all()
        .unwrap()
        .into_iter()
        .map(|b| b.month)
        .collect();
    assert_eq!(months, vec!["2024-01", "2024-02"]);
}

#[test]
fn test_budget_delete_and_clear() {
    let db = Database::open_in_memory().unwrap();
    db.budgets()
        .put(&MonthlyBudget::new("2024-01".into(), dec!(100)))
        .unwrap();
    db.budgets()
        .put(&MonthlyBudget::new("2024-02".into(), dec!(200)))
        .unwrap();

    db.budgets().delete("2024-01").unwrap();
    db.budgets().delete("2024-01").unwrap();
    assert_eq!(db.budgets().limit_for("2024-01").unwrap(), Decimal::ZERO);

    db.budgets().clear().unwrap();
    assert!(db.budgets().get_all().unwrap().is_empty());
}

// ── Atomic writes ─────────────────────────────────────────────

#[test]
fn test_write_commits_on_success() {
    let mut db = Database::open_in_memory().unwrap();
    db.write(|conn| {
        TransactionTable::new(conn).add(&make_txn("a", "2024-01-10", "", 1))?;
        BudgetTable::new(conn).put(&MonthlyBudget::new("2024-01".into(), dec!(5)))
    })
    .unwrap();

    assert_eq!(db.transactions().count().unwrap(), 1);
    assert_eq!(db.budgets().limit_for("2024-01").unwrap(), dec!(5));
}

#[test]
fn test_write_rolls_back_on_error() {
    let mut db = Database::open_in_memory().unwrap();
    db.transactions()
        .add(&make_txn("keep", "2024-01-10", "", 1))
        .unwrap();

    let result = db.write(|conn| {
        let txns = TransactionTable::new(conn);
        txns.clear()?;
        txns.add(&make_txn("new", "2024-01-11", "", 2))?;
        txns.add(&make_txn("new", "2024-01-12", "", 3))
    });
    assert!(matches!(result, Err(StoreError::DuplicateKey { .. })));

    let ids: Vec<String> = db
        .transactions()
        .get_all()
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(ids, vec!["keep"]);
}

// ── Engine failures ───────────────────────────────────────────

#[test]
fn test_engine_failure_surfaces_as_storage_error() {
    let db = Database::open_in_memory().unwrap();
    db.conn.execute_batch("DROP TABLE budgets;").unwrap();

    let err = db
        .budgets()
        .put(&MonthlyBudget::new("2024-01".into(), dec!(1)))
        .unwrap_err();
    assert!(matches!(err, StoreError::Storage(_)));
}

#[test]
fn test_corrupt_amount_is_reported_not_defaulted() {
    let db = Database::open_in_memory().unwrap();
    db.conn
        .execute(
            "INSERT INTO transactions (id, description, amount, method, date, time, created_at)
             VALUES ('x', 'Bad', 'not-a-number', 'DEBIT', '2024-01-01', '', 1)",
            [],
        )
        .unwrap();

    let err = db.transactions().get_all().unwrap_err();
    assert!(matches!(err, StoreError::Storage(_)));
}

// ── Decimal precision ─────────────────────────────────────────

#[test]
fn test_decimal_precision_preserved() {
    let db = Database::open_in_memory().unwrap();
    let mut txn = make_txn("a", "2024-01-10", "", 1);
    txn.amount = dec!(1234.5678);
    db.transactions().add(&txn).unwrap();

    let fetched = db.transactions().get("a").unwrap().unwrap();
    assert_eq!(fetched.amount, dec!(1234.5678));
    assert_eq!(fetched.amount.to_string(), "1234.5678");
}

// ── Schema migration ──────────────────────────────────────────

#[test]
fn test_schema_version_set() {
    let db = Database::open_in_memory().unwrap();
    assert_eq!(db.schema_version().unwrap(), schema::CURRENT_VERSION);
}

#[test]
fn test_double_migrate_idempotent() {
    let mut db = Database::open_in_memory().unwrap();
    db.migrate().unwrap();
    db.migrate().unwrap();
    assert_eq!(db.schema_version().unwrap(), schema::CURRENT_VERSION);
}

#[test]
fn test_migrates_v1_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("old.db");
    {
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(schema::SCHEMA_V1).unwrap();
        conn.execute(
            "INSERT INTO transactions (id, description, amount, method, date, created_at)
             VALUES ('legacy', 'Old entry', '12.34', 'CREDIT', '2023-11-05', 42)",
            [],
        )
        .unwrap();
    }

    let db = Database::open(&path).unwrap();
    assert_eq!(db.schema_version().unwrap(), schema::CURRENT_VERSION);

    let legacy = db.transactions().get("legacy").unwrap().unwrap();
    assert_eq!(legacy.time, "");
    assert_eq!(legacy.amount, dec!(12.34));
    assert_eq!(legacy.method, PaymentMethod::Credit);

    let has_index: bool = db
        .conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='index' AND name='idx_transactions_date')",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert!(has_index);
}
