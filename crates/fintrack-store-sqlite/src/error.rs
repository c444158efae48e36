//! Error type for `fintrack-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] fintrack_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("decode error: {0}")]
  Decode(String),
}

/// The API layer classifies store failures through [`fintrack_core::Error`]:
/// domain errors pass through untouched, database and decode failures
/// degrade to the opaque backend variant.
impl From<Error> for fintrack_core::Error {
  fn from(e: Error) -> Self {
    match e {
      Error::Core(e) => e,
      Error::Database(e) => Self::Backend(e.to_string()),
      Error::Decode(m) => Self::Backend(m),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
