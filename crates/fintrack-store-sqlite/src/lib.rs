//! SQLite backend for the fintrack finance store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated
//! thread without blocking the async runtime. Individual statements are
//! atomic; the multi-statement sequences behind versioned updates and
//! cumulative recomputes are not wrapped in a transaction, mirroring the
//! documented consistency model of the store trait.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
