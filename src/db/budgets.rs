use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;

use super::{decimal_column, insert_error, RecordStore};
use crate::error::Result;
use crate::models::MonthlyBudget;

/// The budget keyspace, one row per `YYYY-MM` month.
pub(crate) struct BudgetTable<'c> {
    conn: &'c Connection,
}

impl<'c> BudgetTable<'c> {
    pub(crate) fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// The limit for `month`, or zero when no budget row exists.
    pub(crate) fn limit_for(&self, month: &str) -> Result<Decimal> {
        Ok(self
            .get(month)?
            .map(|budget| budget.limit)
            .unwrap_or(Decimal::ZERO))
    }
}

impl RecordStore for BudgetTable<'_> {
    type Key = str;
    type Record = MonthlyBudget;

    fn add(&self, budget: &MonthlyBudget) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO budgets (month, limit_amount) VALUES (?1, ?2)",
                params![budget.month, budget.limit.to_string()],
            )
            .map_err(|e| insert_error(e, "budget", &budget.month))?;
        Ok(())
    }

    fn put(&self, budget: &MonthlyBudget) -> Result<()> {
        self.conn.execute(
            "INSERT INTO budgets (month, limit_amount)
             VALUES (?1, ?2)
             ON CONFLICT(month) DO UPDATE SET limit_amount = ?2",
            params![budget.month, budget.limit.to_string()],
        )?;
        Ok(())
    }

    /// Required by [`RecordStore`]. Budgets are only removed through `clear`;
    /// the ledger never calls this.
    fn delete(&self, month: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM budgets WHERE month = ?1", params![month])?;
        Ok(())
    }

    fn get(&self, month: &str) -> Result<Option<MonthlyBudget>> {
        Ok(self
            .conn
            .query_row(
                "SELECT month, limit_amount FROM budgets WHERE month = ?1",
                params![month],
                from_row,
            )
            .optional()?)
    }

    fn get_all(&self) -> Result<Vec<MonthlyBudget>> {
        let mut stmt = self
            .conn
            .prepare("SELECT month, limit_amount FROM budgets ORDER BY month")?;
        let rows = stmt.query_map([], from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    fn clear(&self) -> Result<()> {
        self.conn.execute("DELETE FROM budgets", [])?;
        Ok(())
    }
}

fn from_row(row: &Row<'_>) -> rusqlite::Result<MonthlyBudget> {
    Ok(MonthlyBudget {
        month: row.get(0)?,
        limit: decimal_column(row, 1)?,
    })
}
