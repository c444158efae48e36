//! In-memory backend for the fintrack finance store.
//!
//! Whole-process state behind a `tokio::sync::RwLock`. Every instance has
//! its own independent copy of the collections — there is no cross-instance
//! consistency, which is the documented trade-off of this variant. The
//! persisted alternative lives in `fintrack-store-sqlite`.

mod store;

pub use store::MemoryStore;
