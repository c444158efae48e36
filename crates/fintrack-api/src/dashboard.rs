//! Handler for `GET /dashboard` — the aggregated metrics object.

use std::sync::Arc;

use axum::{Json, extract::State};
use serde_json::Value;

use fintrack_core::{dashboard, store::FinanceStore};

use crate::{envelope, error::ApiError};

/// `GET /dashboard`
///
/// Reads the three collections the aggregation derives from and computes
/// the metrics fresh on every request.
pub async fn summary<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Value>, ApiError>
where
  S: FinanceStore,
{
  let contributions = store
    .list_contributions()
    .await
    .map_err(ApiError::from_store)?;
  let loans = store.list_loans().await.map_err(ApiError::from_store)?;
  let goals = store.list_goals().await.map_err(ApiError::from_store)?;

  Ok(envelope::data(dashboard::compute(
    &contributions,
    &loans,
    &goals,
  )))
}
