use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyBudget {
    /// Format: "YYYY-MM"
    pub month: String,
    /// Zero means no limit is set for the month.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub limit: Decimal,
}

impl MonthlyBudget {
    pub fn new(month: String, limit: Decimal) -> Self {
        Self { month, limit }
    }
}
