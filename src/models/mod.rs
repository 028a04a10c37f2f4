mod budget;
mod snapshot;
mod transaction;

pub use budget::MonthlyBudget;
pub use snapshot::{BackupSnapshot, SNAPSHOT_VERSION};
pub use transaction::{PaymentMethod, Transaction};

use chrono::{NaiveDate, NaiveTime};

/// `YYYY-MM`, zero padded, with a real month number.
pub fn is_month_token(s: &str) -> bool {
    s.len() == 7 && is_iso_date(&format!("{s}-01"))
}

/// `YYYY-MM-DD`, zero padded, naming a real calendar day.
pub fn is_iso_date(s: &str) -> bool {
    s.len() == 10
        && s.bytes()
            .enumerate()
            .all(|(i, b)| if i == 4 || i == 7 { b == b'-' } else { b.is_ascii_digit() })
        && NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

/// `HH:MM`, 24-hour, zero padded.
pub fn is_clock_time(s: &str) -> bool {
    s.len() == 5
        && s.bytes()
            .enumerate()
            .all(|(i, b)| if i == 2 { b == b':' } else { b.is_ascii_digit() })
        && NaiveTime::parse_from_str(s, "%H:%M").is_ok()
}
