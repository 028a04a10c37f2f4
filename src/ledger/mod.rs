use rust_decimal::Decimal;

use crate::backup::{self, ImportStats};
use crate::db::{BudgetTable, Database, RecordStore, TransactionTable};
use crate::error::{Result, StoreError};
use crate::models::{
    is_clock_time, is_iso_date, is_month_token, BackupSnapshot, MonthlyBudget, PaymentMethod,
    Transaction,
};
use crate::query::{self, MonthSummary};

/// Caller-supplied fields for a new transaction. `id` and `created_at` are
/// assigned by [`Ledger::add_transaction`].
#[derive(Debug, Clone)]
pub(crate) struct NewTransaction {
    pub(crate) description: String,
    pub(crate) amount: Decimal,
    pub(crate) method: PaymentMethod,
    pub(crate) date: String,
    pub(crate) time: String,
}

/// The data-management surface over one open store.
///
/// Field checks happen here, before anything reaches the store.
pub(crate) struct Ledger {
    db: Database,
}

impl Ledger {
    pub(crate) fn new(db: Database) -> Self {
        Self { db }
    }

    pub(crate) fn close(self) -> Result<()> {
        self.db.close()
    }

    pub(crate) fn database(&self) -> &Database {
        &self.db
    }

    // ── Transactions ──────────────────────────────────────────

    pub(crate) fn add_transaction(&self, new: NewTransaction) -> Result<Transaction> {
        let txn = Transaction::new(
            new.description.trim().to_string(),
            new.amount,
            new.method,
            new.date,
            new.time,
        );
        validate_transaction(&txn)?;
        self.db.transactions().add(&txn)?;
        tracing::debug!(id = %txn.id, date = %txn.date, "added transaction");
        Ok(txn)
    }

    /// Upsert an edited transaction after re-validating its fields.
    pub(crate) fn update_transaction(&self, txn: &Transaction) -> Result<()> {
        validate_transaction(txn)?;
        self.db.transactions().put(txn)?;
        tracing::debug!(id = %txn.id, "updated transaction");
        Ok(())
    }

    pub(crate) fn delete_transaction(&self, id: &str) -> Result<()> {
        self.db.transactions().delete(id)?;
        tracing::debug!(id, "deleted transaction");
        Ok(())
    }

    pub(crate) fn transaction(&self, id: &str) -> Result<Option<Transaction>> {
        self.db.transactions().get(id)
    }

    pub(crate) fn list_for_month(&self, month: &str) -> Result<Vec<Transaction>> {
        query::list_for_month(&self.db, month)
    }

    pub(crate) fn month_summary(&self, month: &str) -> Result<MonthSummary> {
        query::month_summary(&self.db, month)
    }

    // ── Budgets ───────────────────────────────────────────────

    /// The month's limit, zero when none is set.
    pub(crate) fn get_budget(&self, month: &str) -> Result<Decimal> {
        check_month(month)?;
        self.db.budgets().limit_for(month)
    }

    pub(crate) fn set_budget(&self, month: &str, limit: Decimal) -> Result<()> {
        check_month(month)?;
        if limit < Decimal::ZERO {
            return Err(StoreError::validation(format!(
                "budget limit must not be negative, got {limit}"
            )));
        }
        self.db
            .budgets()
            .put(&MonthlyBudget::new(month.to_string(), limit))?;
        tracing::info!(month, %limit, "set budget");
        Ok(())
    }

    // ── Data management ───────────────────────────────────────

    /// Remove every transaction and budget in one atomic step.
    pub(crate) fn clear_all(&mut self) -> Result<()> {
        self.db.write(|conn| {
            TransactionTable::new(conn).clear()?;
            BudgetTable::new(conn).clear()
        })?;
        tracing::warn!("cleared all data");
        Ok(())
    }

    pub(crate) fn export(&self) -> Result<BackupSnapshot> {
        backup::export(&self.db)
    }

    /// Replace all data with the contents of a backup file's text.
    pub(crate) fn import_json(&mut self, raw: &str) -> Result<ImportStats> {
        backup::import_json(&mut self.db, raw)
    }
}

fn check_month(month: &str) -> Result<()> {
    if is_month_token(month) {
        Ok(())
    } else {
        Err(StoreError::validation(format!(
            "invalid month '{month}', expected YYYY-MM"
        )))
    }
}

fn validate_transaction(txn: &Transaction) -> Result<()> {
    if txn.id.trim().is_empty() {
        return Err(StoreError::validation("transaction id must not be empty"));
    }
    if txn.description.trim().is_empty() {
        return Err(StoreError::validation("description must not be empty"));
    }
    if txn.amount <= Decimal::ZERO {
        return Err(StoreError::validation(format!(
            "amount must be positive, got {}",
            txn.amount
        )));
    }
    if !is_iso_date(&txn.date) {
        return Err(StoreError::validation(format!(
            "invalid date '{}', expected YYYY-MM-DD",
            txn.date
        )));
    }
    if txn.has_time() && !is_clock_time(&txn.time) {
        return Err(StoreError::validation(format!(
            "invalid time '{}', expected HH:MM",
            txn.time
        )));
    }
    Ok(())
}
