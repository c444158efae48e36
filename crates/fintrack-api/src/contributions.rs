//! Handlers for `/monthly-investments` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/monthly-investments` | (year, month) ascending |
//! | `POST`   | `/monthly-investments` | Body: [`CreateBody`]; duplicate months are a 400 |
//! | `PUT`    | `/monthly-investments/:id` | Body: [`UpdateBody`]; recomputes cumulatives |
//! | `DELETE` | `/monthly-investments/:id` | Recomputes cumulatives |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use fintrack_core::store::FinanceStore;

use crate::{envelope, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /monthly-investments`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Value>, ApiError>
where
  S: FinanceStore,
{
  let contributions = store
    .list_contributions()
    .await
    .map_err(ApiError::from_store)?;
  Ok(envelope::data(contributions))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /monthly-investments`. The new month starts
/// with a zero amount; values arrive through `PUT`.
#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub year:  Option<i32>,
  pub month: Option<u32>,
}

/// `POST /monthly-investments`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<CreateBody>,
) -> Result<Json<Value>, ApiError>
where
  S: FinanceStore,
{
  let (Some(year), Some(month)) = (body.year, body.month) else {
    return Err(ApiError::Validation(
      "year and month are required fields".to_owned(),
    ));
  };

  let contribution = store
    .add_contribution(year, month)
    .await
    .map_err(ApiError::from_store)?;
  Ok(envelope::data(contribution))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `PUT /monthly-investments/:id`. A missing amount
/// zeroes the month out.
#[derive(Debug, Deserialize)]
pub struct UpdateBody {
  pub amount: Option<Decimal>,
}

/// `PUT /monthly-investments/:id`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  Json(body): Json<UpdateBody>,
) -> Result<Json<Value>, ApiError>
where
  S: FinanceStore,
{
  let contribution = store
    .set_contribution_amount(id, body.amount.unwrap_or(Decimal::ZERO))
    .await
    .map_err(ApiError::from_store)?;
  Ok(envelope::data(contribution))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /monthly-investments/:id`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError>
where
  S: FinanceStore,
{
  store
    .delete_contribution(id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(envelope::success())
}
