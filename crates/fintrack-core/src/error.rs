//! Error types for `fintrack-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("investment not found: {0}")]
  InvestmentNotFound(i64),

  #[error("no version {version} in the history of investment {investment_id}")]
  VersionNotFound { investment_id: i64, version: i64 },

  #[error("monthly contribution not found: {0}")]
  ContributionNotFound(i64),

  #[error("a contribution for {year}-{month:02} already exists")]
  DuplicateMonth { year: i32, month: u32 },

  #[error("month must be between 1 and 12, got {0}")]
  MonthOutOfRange(u32),

  #[error("loan not found: {0}")]
  LoanNotFound(i64),

  #[error("goal not found: {0}")]
  GoalNotFound(i64),

  #[error("unknown change type: {0:?}")]
  UnknownChangeType(String),

  /// A failure inside a storage backend (I/O, SQL, decoding). Carries a
  /// rendered message so the core crate stays free of backend dependencies.
  #[error("storage error: {0}")]
  Backend(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
