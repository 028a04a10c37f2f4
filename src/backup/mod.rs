use serde::Deserialize;
use serde_json::Value;

use crate::db::{BudgetTable, Database, RecordStore, TransactionTable};
use crate::error::{Result, StoreError};
use crate::models::{BackupSnapshot, MonthlyBudget, Transaction, SNAPSHOT_VERSION};

/// Counts of records written by an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ImportStats {
    pub(crate) transactions: usize,
    pub(crate) budgets: usize,
}

/// Dump both record kinds as-is.
pub(crate) fn export(db: &Database) -> Result<BackupSnapshot> {
    let transactions = db.transactions().get_all()?;
    let budgets = db.budgets().get_all()?;
    let snapshot = BackupSnapshot::new(transactions, budgets);
    tracing::info!(
        transactions = snapshot.transactions.len(),
        budgets = snapshot.budgets.len(),
        timestamp = snapshot.timestamp,
        "exported snapshot"
    );
    Ok(snapshot)
}

pub(crate) fn to_json(snapshot: &BackupSnapshot) -> Result<String> {
    serde_json::to_string_pretty(snapshot).map_err(StoreError::Encode)
}

/// Parse backup text and replace the store's contents with it.
pub(crate) fn import_json(db: &mut Database, raw: &str) -> Result<ImportStats> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| StoreError::InvalidBackup(format!("not valid JSON: {e}")))?;
    import(db, &value)
}

/// Replace the store's contents with a snapshot.
///
/// Only the presence of the `transactions` and `budgets` arrays is checked up
/// front; the store is untouched if either is missing. Records are then
/// decoded and inserted one by one with `add` semantics inside a single SQL
/// transaction, so a bad record rolls the whole import back and readers never
/// see a half-replaced store.
pub(crate) fn import(db: &mut Database, snapshot: &Value) -> Result<ImportStats> {
    let transactions = required_array(snapshot, "transactions")?;
    let budgets = required_array(snapshot, "budgets")?;

    if let Some(version) = snapshot.get("version").and_then(Value::as_u64) {
        if version != u64::from(SNAPSHOT_VERSION) {
            tracing::warn!(version, expected = SNAPSHOT_VERSION, "importing backup with unexpected version");
        }
    }

    let stats = db
        .write(|conn| {
            let txn_table = TransactionTable::new(conn);
            let budget_table = BudgetTable::new(conn);
            txn_table.clear()?;
            budget_table.clear()?;

            for (index, raw) in transactions.iter().enumerate() {
                let txn = Transaction::deserialize(raw).map_err(|e| {
                    StoreError::import_failed("transaction", index, StoreError::MalformedRecord(e))
                })?;
                txn_table
                    .add(&txn)
                    .map_err(|e| StoreError::import_failed("transaction", index, e))?;
            }

            for (index, raw) in budgets.iter().enumerate() {
                let budget = MonthlyBudget::deserialize(raw).map_err(|e| {
                    StoreError::import_failed("budget", index, StoreError::MalformedRecord(e))
                })?;
                budget_table
                    .add(&budget)
                    .map_err(|e| StoreError::import_failed("budget", index, e))?;
            }

            Ok(ImportStats {
                transactions: transactions.len(),
                budgets: budgets.len(),
            })
        })
        .inspect_err(|e| tracing::error!(error = %e, "import rolled back"))?;

    tracing::info!(
        transactions = stats.transactions,
        budgets = stats.budgets,
        "imported snapshot"
    );
    Ok(stats)
}

fn required_array<'v>(snapshot: &'v Value, key: &str) -> Result<&'v Vec<Value>> {
    match snapshot.get(key) {
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(StoreError::InvalidBackup(format!(
            "'{key}' must be an array"
        ))),
        None => Err(StoreError::InvalidBackup(format!("missing '{key}'"))),
    }
}
