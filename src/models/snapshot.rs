use serde::{Deserialize, Serialize};

use super::{MonthlyBudget, Transaction};

pub const SNAPSHOT_VERSION: u32 = 1;

/// A complete dump of both record kinds, as written to a backup file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupSnapshot {
    pub version: u32,
    /// Epoch milliseconds at export time.
    pub timestamp: i64,
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<MonthlyBudget>,
}

impl BackupSnapshot {
    pub fn new(transactions: Vec<Transaction>, budgets: Vec<MonthlyBudget>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            timestamp: chrono::Utc::now().timestamp_millis(),
            transactions,
            budgets,
        }
    }

    /// Suggested file name for this snapshot, keyed by its export timestamp.
    pub fn file_name(&self) -> String {
        format!("spendlog-backup-{}.json", self.timestamp)
    }
}
