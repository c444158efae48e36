//! SQL schema for the fintrack SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! the `PRAGMA user_version` number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// Money columns hold canonical decimal strings, dates ISO 8601 text.
/// `INTEGER PRIMARY KEY AUTOINCREMENT` keeps ids unique and monotonically
/// increasing within each collection.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS investments (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    amount      TEXT NOT NULL,
    date        TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    category    TEXT NOT NULL DEFAULT 'general',
    version     INTEGER NOT NULL DEFAULT 1,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

-- Strictly append-only. No UPDATE or DELETE is ever issued against this
-- table. investment_id carries no foreign key: history outlives the
-- investment it describes.
CREATE TABLE IF NOT EXISTS investment_history (
    id                 INTEGER PRIMARY KEY AUTOINCREMENT,
    investment_id      INTEGER NOT NULL,
    amount             TEXT NOT NULL,
    date               TEXT NOT NULL,
    description        TEXT NOT NULL,
    category           TEXT NOT NULL,
    version            INTEGER NOT NULL,
    change_type        TEXT NOT NULL,   -- discriminant of ChangeType
    change_description TEXT NOT NULL,
    changed_at         TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS monthly_contributions (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    year       INTEGER NOT NULL,
    month      INTEGER NOT NULL,
    month_name TEXT NOT NULL,
    amount     TEXT NOT NULL,
    cumulative TEXT NOT NULL,           -- derived; rewritten on recompute
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    UNIQUE (year, month)
);

CREATE TABLE IF NOT EXISTS loans (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    principal_amount TEXT NOT NULL,
    current_balance  TEXT NOT NULL,
    interest_rate    TEXT NOT NULL,
    monthly_payment  TEXT NOT NULL,
    start_date       TEXT NOT NULL,
    description      TEXT NOT NULL DEFAULT '',
    lender           TEXT NOT NULL DEFAULT '',
    loan_type        TEXT NOT NULL DEFAULT 'general',
    is_active        INTEGER NOT NULL DEFAULT 1
);

CREATE TABLE IF NOT EXISTS loan_payments (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    loan_id           INTEGER NOT NULL REFERENCES loans(id),
    payment_amount    TEXT NOT NULL,
    principal_payment TEXT NOT NULL,
    payment_date      TEXT NOT NULL,
    description       TEXT NOT NULL DEFAULT '',
    created_at        TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS goals (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    goal_name      TEXT NOT NULL,
    target_amount  TEXT NOT NULL,
    current_amount TEXT NOT NULL,
    target_date    TEXT,
    goal_type      TEXT NOT NULL DEFAULT 'savings',
    description    TEXT NOT NULL DEFAULT '',
    is_active      INTEGER NOT NULL DEFAULT 1
);

CREATE INDEX IF NOT EXISTS history_investment_idx ON investment_history(investment_id);
CREATE INDEX IF NOT EXISTS history_changed_idx    ON investment_history(changed_at);
CREATE INDEX IF NOT EXISTS contributions_month_idx ON monthly_contributions(year, month);

PRAGMA user_version = 1;
";
