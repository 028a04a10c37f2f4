mod budgets;
mod schema;
mod transactions;

use rusqlite::{ffi, params, Connection, Row};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Result, StoreError};

pub(crate) use budgets::BudgetTable;
pub(crate) use transactions::TransactionTable;

/// Keyed storage for one record kind.
///
/// Every method is a single SQL statement, so each call either applies fully
/// or not at all.
pub(crate) trait RecordStore {
    type Key: ?Sized;
    type Record;

    /// Insert a new record; fails with [`StoreError::DuplicateKey`] when the key exists.
    fn add(&self, record: &Self::Record) -> Result<()>;
    /// Insert or overwrite by key.
    fn put(&self, record: &Self::Record) -> Result<()>;
    /// Remove by key. Missing keys are not an error.
    fn delete(&self, key: &Self::Key) -> Result<()>;
    fn get(&self, key: &Self::Key) -> Result<Option<Self::Record>>;
    fn get_all(&self) -> Result<Vec<Self::Record>>;
    fn clear(&self) -> Result<()>;
}

pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        let mut db = Self { conn };
        db.migrate()?;
        tracing::info!(path = %path.display(), version = db.schema_version()?, "opened store");
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Flush and close the underlying connection.
    pub(crate) fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, err)| StoreError::Storage(err))?;
        tracing::debug!("closed store");
        Ok(())
    }

    fn migrate(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;

        let has_version_table: bool = tx.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            tx.execute_batch(schema::SCHEMA)?;
            tx.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            tx.commit()?;
            tracing::debug!(version = schema::CURRENT_VERSION, "created schema");
            return Ok(());
        }

        let current: i32 = tx
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                tracing::info!(from = from_version, to = from_version + 1, "migrating schema");
                tx.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            tx.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    pub(crate) fn schema_version(&self) -> Result<i32> {
        Ok(self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })?)
    }

    pub(crate) fn transactions(&self) -> TransactionTable<'_> {
        TransactionTable::new(&self.conn)
    }

    pub(crate) fn budgets(&self) -> BudgetTable<'_> {
        BudgetTable::new(&self.conn)
    }

    /// Run `f` inside one SQL transaction. Commits when `f` succeeds; any
    /// error rolls every statement back.
    pub(crate) fn write<T>(&mut self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let tx = self.conn.transaction()?;
        let out = f(&tx)?;
        tx.commit()?;
        Ok(out)
    }
}

/// Decimals are stored as TEXT to keep their exact scale.
fn decimal_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let text: String = row.get(idx)?;
    Decimal::from_str(&text).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn insert_error(err: rusqlite::Error, kind: &'static str, key: &str) -> StoreError {
    if let rusqlite::Error::SqliteFailure(e, _) = &err {
        if e.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY {
            return StoreError::DuplicateKey {
                kind,
                key: key.to_string(),
            };
        }
    }
    StoreError::Storage(err)
}

#[cfg(test)]
mod tests;
