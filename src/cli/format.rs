use rust_decimal::Decimal;

use crate::models::Transaction;
use crate::query::MonthSummary;

const DESCRIPTION_WIDTH: usize = 28;

/// Money as shown in listings: two places, comma grouped, no currency symbol.
/// e.g. `1234567.891` → `"1,234,567.89"`
pub(crate) fn format_amount(val: Decimal) -> String {
    let cents = val.round_dp(2);
    let text = format!("{:.2}", cents.abs());
    let (whole, frac) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if cents < Decimal::ZERO { "-" } else { "" };
    format!("{sign}{grouped}.{frac}")
}

/// Flatten a description onto one line and cut it to `width` characters.
pub(crate) fn fit_description(description: &str, width: usize) -> String {
    let flat = description.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= width {
        return flat;
    }
    let mut cut: String = flat.chars().take(width.saturating_sub(1)).collect();
    if width > 0 {
        cut.push('…');
    }
    cut
}

/// One line of the month listing.
pub(crate) fn transaction_row(txn: &Transaction) -> String {
    let time = if txn.has_time() { txn.time.as_str() } else { "--:--" };
    format!(
        "{} {} {:<6} {:>12}  {:<width$} {}",
        txn.date,
        time,
        txn.method.as_str(),
        format_amount(txn.amount),
        fit_description(&txn.description, DESCRIPTION_WIDTH),
        txn.id,
        width = DESCRIPTION_WIDTH,
    )
}

/// The month summary block printed by `spendlog summary`.
pub(crate) fn summary_lines(summary: &MonthSummary) -> Vec<String> {
    let mut lines = vec![
        format!("spendlog - {}", summary.month),
        "─".repeat(40),
        format!("  Spent:      {}", format_amount(summary.total)),
        format!("  Debit:      {}", format_amount(summary.debit_total)),
        format!("  Credit:     {}", format_amount(summary.credit_total)),
        format!("  Txns:       {}", summary.count),
    ];

    let Some(remaining) = summary.remaining() else {
        lines.push("  Budget:     not set".to_string());
        return lines;
    };

    lines.push(format!("  Budget:     {}", format_amount(summary.limit)));
    if let Some(used) = percent_used(summary.total, summary.limit) {
        lines.push(format!("  Used:       {used}%"));
    }
    if summary.is_over_limit() {
        lines.push(format!("  Over by:    {}", format_amount(remaining.abs())));
    } else {
        lines.push(format!("  Remaining:  {}", format_amount(remaining)));
    }
    lines
}

/// Whole-percent share of `limit` already spent.
fn percent_used(total: Decimal, limit: Decimal) -> Option<Decimal> {
    total
        .checked_mul(Decimal::ONE_HUNDRED)?
        .checked_div(limit)
        .map(|pct| pct.round_dp(0))
}
