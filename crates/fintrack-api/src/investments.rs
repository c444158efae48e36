//! Handlers for `/investments` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/investments` | Newest date first |
//! | `POST`   | `/investments` | Body: [`CreateBody`]; `amount` and `date` required |
//! | `PUT`    | `/investments/:id` | Partial update; snapshots the prior state |
//! | `DELETE` | `/investments/:id` | Logs a `deleted` entry, removes from the live set |
//! | `GET`    | `/investments/:id/history` | Most recent change first |
//! | `POST`   | `/investments/:id/restore/:version` | Two history entries, version +1 |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use fintrack_core::{
  investment::{InvestmentPatch, NewInvestment},
  store::FinanceStore,
};

use crate::{envelope, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /investments`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Value>, ApiError>
where
  S: FinanceStore,
{
  let investments = store
    .list_investments()
    .await
    .map_err(ApiError::from_store)?;
  Ok(envelope::data(investments))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /investments`.
#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub amount:      Option<Decimal>,
  pub date:        Option<NaiveDate>,
  pub description: Option<String>,
  pub category:    Option<String>,
}

/// `POST /investments`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<CreateBody>,
) -> Result<Json<Value>, ApiError>
where
  S: FinanceStore,
{
  let (Some(amount), Some(date)) = (body.amount, body.date) else {
    return Err(ApiError::Validation(
      "amount and date are required fields".to_owned(),
    ));
  };

  let investment = store
    .add_investment(NewInvestment {
      amount,
      date,
      description: body.description,
      category: body.category,
    })
    .await
    .map_err(ApiError::from_store)?;
  Ok(envelope::data(investment))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `PUT /investments/:id`. Absent fields keep their
/// current values; `change_description` is recorded on the history entry.
#[derive(Debug, Deserialize)]
pub struct UpdateBody {
  pub amount:             Option<Decimal>,
  pub date:               Option<NaiveDate>,
  pub description:        Option<String>,
  pub category:           Option<String>,
  pub change_description: Option<String>,
}

/// `PUT /investments/:id`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  Json(body): Json<UpdateBody>,
) -> Result<Json<Value>, ApiError>
where
  S: FinanceStore,
{
  let investment = store
    .update_investment(id, InvestmentPatch {
      amount:             body.amount,
      date:               body.date,
      description:        body.description,
      category:           body.category,
      change_description: body.change_description,
    })
    .await
    .map_err(ApiError::from_store)?;
  Ok(envelope::data(investment))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /investments/:id`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError>
where
  S: FinanceStore,
{
  store
    .delete_investment(id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(envelope::success())
}

// ─── History ──────────────────────────────────────────────────────────────────

/// `GET /investments/:id/history`
pub async fn history<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError>
where
  S: FinanceStore,
{
  let entries = store
    .investment_history(id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(envelope::data(entries))
}

// ─── Restore ──────────────────────────────────────────────────────────────────

/// `POST /investments/:id/restore/:version`
pub async fn restore<S>(
  State(store): State<Arc<S>>,
  Path((id, version)): Path<(i64, i64)>,
) -> Result<Json<Value>, ApiError>
where
  S: FinanceStore,
{
  let investment = store
    .restore_investment(id, version)
    .await
    .map_err(ApiError::from_store)?;
  Ok(envelope::data(investment))
}
