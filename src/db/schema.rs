pub(crate) const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS transactions (
    id           TEXT PRIMARY KEY NOT NULL,
    description  TEXT NOT NULL,
    amount       TEXT NOT NULL,
    method       TEXT NOT NULL CHECK (method IN ('DEBIT', 'CREDIT')),
    date         TEXT NOT NULL,
    time         TEXT NOT NULL DEFAULT '',
    created_at   INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);

CREATE TABLE IF NOT EXISTS budgets (
    month         TEXT PRIMARY KEY NOT NULL,
    limit_amount  TEXT NOT NULL
);
"#;

pub(crate) const CURRENT_VERSION: i32 = 2;

/// Migrations from version N to N+1.
/// Each entry is (from_version, sql).
pub(crate) const MIGRATIONS: &[(i32, &str)] = &[(
    1,
    "ALTER TABLE transactions ADD COLUMN time TEXT NOT NULL DEFAULT '';
     CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);",
)];

/// Layout written by the first release, kept to exercise the upgrade path.
#[cfg(test)]
pub(crate) const SCHEMA_V1: &str = r#"
CREATE TABLE schema_version (
    version INTEGER NOT NULL
);

CREATE TABLE transactions (
    id           TEXT PRIMARY KEY NOT NULL,
    description  TEXT NOT NULL,
    amount       TEXT NOT NULL,
    method       TEXT NOT NULL CHECK (method IN ('DEBIT', 'CREDIT')),
    date         TEXT NOT NULL,
    created_at   INTEGER NOT NULL
);

CREATE TABLE budgets (
    month         TEXT PRIMARY KEY NOT NULL,
    limit_amount  TEXT NOT NULL
);

INSERT INTO schema_version (version) VALUES (1);
"#;
