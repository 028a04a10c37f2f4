use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{decimal_column, insert_error, RecordStore};
use crate::error::Result;
use crate::models::{PaymentMethod, Transaction};

const COLUMNS: &str = "id, description, amount, method, date, time, created_at";

/// The transaction keyspace, keyed by `id` with a secondary index on `date`.
///
/// Works over any connection, including an open SQL transaction.
pub(crate) struct TransactionTable<'c> {
    conn: &'c Connection,
}

impl<'c> TransactionTable<'c> {
    pub(crate) fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// All transactions whose `date` lies within `[start, end]` by string
    /// comparison, in insertion order.
    pub(crate) fn get_by_date_range(&self, start: &str, end: &str) -> Result<Vec<Transaction>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {COLUMNS} FROM transactions
             WHERE date >= ?1 AND date <= ?2
             ORDER BY rowid"
        ))?;
        let rows = stmt.query_map(params![start, end], from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?)
    }
}

impl RecordStore for TransactionTable<'_> {
    type Key = str;
    type Record = Transaction;

    fn add(&self, txn: &Transaction) -> Result<()> {
        self.conn
            .execute(
                &format!("INSERT INTO transactions ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"),
                params![
                    txn.id,
                    txn.description,
                    txn.amount.to_string(),
                    txn.method.as_str(),
                    txn.date,
                    txn.time,
                    txn.created_at,
                ],
            )
            .map_err(|e| insert_error(e, "transaction", &txn.id))?;
        Ok(())
    }

    /// An existing record keeps its stored `created_at`.
    fn put(&self, txn: &Transaction) -> Result<()> {
        self.conn.execute(
            &format!(
                "INSERT INTO transactions ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                 ON CONFLICT(id) DO UPDATE SET
                    description = excluded.description,
                    amount = excluded.amount,
                    method = excluded.method,
                    date = excluded.date,
                    time = excluded.time"
            ),
            params![
                txn.id,
                txn.description,
                txn.amount.to_string(),
                txn.method.as_str(),
                txn.date,
                txn.time,
                txn.created_at,
            ],
        )?;
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM transactions WHERE id = ?1", params![id])?;
        Ok(())
    }

    fn get(&self, id: &str) -> Result<Option<Transaction>> {
        Ok(self
            .conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM transactions WHERE id = ?1"),
                params![id],
                from_row,
            )
            .optional()?)
    }

    fn get_all(&self) -> Result<Vec<Transaction>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {COLUMNS} FROM transactions ORDER BY rowid"))?;
        let rows = stmt.query_map([], from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    fn clear(&self) -> Result<()> {
        self.conn.execute("DELETE FROM transactions", [])?;
        Ok(())
    }
}

fn from_row(row: &Row<'_>) -> rusqlite::Result<Transaction> {
    let method: String = row.get(3)?;
    let method = PaymentMethod::parse(&method).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            3,
            rusqlite::types::Type::Text,
            format!("unknown payment method '{method}'").into(),
        )
    })?;
    Ok(Transaction {
        id: row.get(0)?,
        description: row.get(1)?,
        amount: decimal_column(row, 2)?,
        method,
        date: row.get(4)?,
        time: row.get(5)?,
        created_at: row.get(6)?,
    })
}

