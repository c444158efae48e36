//! Handlers for `/goals` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/goals` | Active goals only |
//! | `POST` | `/goals` | Body: [`CreateBody`]; name and target required |
//! | `PUT`  | `/goals/:id` | Body: [`UpdateBody`]; overwrites the saved amount |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use fintrack_core::{goal::NewGoal, store::FinanceStore};

use crate::{envelope, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /goals`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Value>, ApiError>
where
  S: FinanceStore,
{
  let goals = store.list_goals().await.map_err(ApiError::from_store)?;
  Ok(envelope::data(goals))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /goals`.
#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub goal_name:      Option<String>,
  pub target_amount:  Option<Decimal>,
  pub current_amount: Option<Decimal>,
  pub target_date:    Option<NaiveDate>,
  pub goal_type:      Option<String>,
  pub description:    Option<String>,
}

/// `POST /goals`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<CreateBody>,
) -> Result<Json<Value>, ApiError>
where
  S: FinanceStore,
{
  let (Some(goal_name), Some(target_amount)) =
    (body.goal_name, body.target_amount)
  else {
    return Err(ApiError::Validation(
      "goal name and target amount are required fields".to_owned(),
    ));
  };

  let goal = store
    .add_goal(NewGoal {
      goal_name,
      target_amount,
      current_amount: body.current_amount,
      target_date: body.target_date,
      goal_type: body.goal_type,
      description: body.description,
    })
    .await
    .map_err(ApiError::from_store)?;
  Ok(envelope::data(goal))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `PUT /goals/:id`.
#[derive(Debug, Deserialize)]
pub struct UpdateBody {
  pub current_amount: Option<Decimal>,
}

/// `PUT /goals/:id`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  Json(body): Json<UpdateBody>,
) -> Result<Json<Value>, ApiError>
where
  S: FinanceStore,
{
  let Some(current_amount) = body.current_amount else {
    return Err(ApiError::Validation(
      "current amount is a required field".to_owned(),
    ));
  };

  store
    .set_goal_amount(id, current_amount)
    .await
    .map_err(ApiError::from_store)?;
  Ok(envelope::success())
}
