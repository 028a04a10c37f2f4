use rust_decimal::Decimal;

use crate::db::Database;
use crate::error::{Result, StoreError};
use crate::models::{is_month_token, PaymentMethod, Transaction};

/// The inclusive `[first, last]` date-string bounds of a month.
///
/// The upper bound is always the literal day `31`: dates are zero-padded ISO
/// strings, so string comparison against `-31` covers every real day of any
/// month without calendar arithmetic.
pub(crate) fn month_bounds(month: &str) -> (String, String) {
    (format!("{month}-01"), format!("{month}-31"))
}

/// Every transaction dated inside `month`, newest first.
pub(crate) fn list_for_month(db: &Database, month: &str) -> Result<Vec<Transaction>> {
    if !is_month_token(month) {
        return Err(StoreError::validation(format!(
            "invalid month '{month}', expected YYYY-MM"
        )));
    }
    let (start, end) = month_bounds(month);
    let mut txns = db.transactions().get_by_date_range(&start, &end)?;
    sort_newest_first(&mut txns);
    Ok(txns)
}

/// Order by date descending, then time descending, then `created_at`
/// descending. Stable, so fully tied records keep store order.
///
/// Time only separates two records that both carry one. Each day is first
/// ordered by `created_at`, then the timed records are reordered by time
/// among the slots they already occupy. When timed and untimed records form
/// a cycle no order can satisfy, the timed ones keep their time order.
pub(crate) fn sort_newest_first(txns: &mut [Transaction]) {
    txns.sort_by(|a, b| b.date.cmp(&a.date));
    for day in txns.chunk_by_mut(|a, b| a.date == b.date) {
        day.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let slots: Vec<usize> = (0..day.len()).filter(|&i| day[i].has_time()).collect();
        let mut timed: Vec<Transaction> = slots.iter().map(|&i| day[i].clone()).collect();
        timed.sort_by(|a, b| b.time.cmp(&a.time));
        for (slot, txn) in slots.into_iter().zip(timed) {
            day[slot] = txn;
        }
    }
}

/// Aggregated spend for one month against its budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MonthSummary {
    pub(crate) month: String,
    pub(crate) total: Decimal,
    pub(crate) debit_total: Decimal,
    pub(crate) credit_total: Decimal,
    pub(crate) count: usize,
    /// Zero when no budget is set.
    pub(crate) limit: Decimal,
}

impl MonthSummary {
    /// Budget left to spend, `None` when the month has no limit.
    pub(crate) fn remaining(&self) -> Option<Decimal> {
        (self.limit > Decimal::ZERO).then(|| self.limit - self.total)
    }

    pub(crate) fn is_over_limit(&self) -> bool {
        self.remaining().is_some_and(|left| left < Decimal::ZERO)
    }
}

pub(crate) fn month_summary(db: &Database, month: &str) -> Result<MonthSummary> {
    let txns = list_for_month(db, month)?;
    let limit = db.budgets().limit_for(month)?;

    let sum_of = |method: PaymentMethod| -> Decimal {
        txns.iter()
            .filter(|t| t.method == method)
            .map(|t| t.amount)
            .sum()
    };
    let debit_total = sum_of(PaymentMethod::Debit);
    let credit_total = sum_of(PaymentMethod::Credit);

    Ok(MonthSummary {
        month: month.to_string(),
        total: debit_total + credit_total,
        debit_total,
        credit_total,
        count: txns.len(),
        limit,
    })
}
