use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentMethod {
    Debit,
    Credit,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debit => "DEBIT",
            Self::Credit => "CREDIT",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "debit" | "d" => Some(Self::Debit),
            "credit" | "c" => Some(Self::Credit),
            _ => None,
        }
    }

    pub fn all() -> &'static [PaymentMethod] {
        &[Self::Debit, Self::Credit]
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single recorded expense. Field names on the wire follow the backup
/// file format (`createdAt` in camelCase).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    pub method: PaymentMethod,
    /// Format: "YYYY-MM-DD"
    pub date: String,
    /// Format: "HH:MM", empty when the caller gave no time.
    #[serde(default)]
    pub time: String,
    /// Epoch milliseconds.
    pub created_at: i64,
}

impl Transaction {
    /// Build a fresh transaction with a new id and the current time as `created_at`.
    pub fn new(
        description: String,
        amount: Decimal,
        method: PaymentMethod,
        date: String,
        time: String,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            description,
            amount,
            method,
            date,
            time,
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn has_time(&self) -> bool {
        !self.time.is_empty()
    }
}
