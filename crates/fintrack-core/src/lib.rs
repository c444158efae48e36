//! Core types and trait definitions for the fintrack finance store.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod contribution;
pub mod dashboard;
pub mod error;
pub mod goal;
pub mod history;
pub mod investment;
pub mod loan;
pub mod store;

pub use error::{Error, Result};
