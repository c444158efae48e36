//! JSON REST API for fintrack.
//!
//! Exposes an axum [`Router`] backed by any
//! [`fintrack_core::store::FinanceStore`]. Transport concerns (listener,
//! CORS, request tracing) are the caller's responsibility.
//!
//! Every response uses the `{"success": bool, "data"?: ..., "error"?: ...}`
//! envelope; failures map to 400 (validation), 404 (missing record), or
//! 500 (anything else), successes to 200.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", fintrack_api::api_router(store.clone()))
//! ```

pub mod contributions;
pub mod dashboard;
pub mod envelope;
pub mod error;
pub mod goals;
pub mod investments;
pub mod loans;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post, put},
};
use fintrack_core::store::FinanceStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: FinanceStore + Clone + Send + Sync + 'static,
{
  Router::new()
    // Investments
    .route(
      "/investments",
      get(investments::list::<S>).post(investments::create::<S>),
    )
    .route(
      "/investments/{id}",
      put(investments::update::<S>).delete(investments::delete_one::<S>),
    )
    .route("/investments/{id}/history", get(investments::history::<S>))
    .route(
      "/investments/{id}/restore/{version}",
      post(investments::restore::<S>),
    )
    // Monthly contributions
    .route(
      "/monthly-investments",
      get(contributions::list::<S>).post(contributions::create::<S>),
    )
    .route(
      "/monthly-investments/{id}",
      put(contributions::update::<S>).delete(contributions::delete_one::<S>),
    )
    // Loans
    .route("/loans", get(loans::list::<S>).post(loans::create::<S>))
    .route("/loans/{id}/payments", post(loans::record_payment::<S>))
    // Goals
    .route("/goals", get(goals::list::<S>).post(goals::create::<S>))
    .route("/goals/{id}", put(goals::update::<S>))
    // Dashboard
    .route("/dashboard", get(dashboard::summary::<S>))
    .with_state(store)
}
