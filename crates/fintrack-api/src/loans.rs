//! Handlers for `/loans` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/loans` | Active loans only |
//! | `POST` | `/loans` | Body: [`CreateBody`]; principal, balance, start date required |
//! | `POST` | `/loans/:id/payments` | Body: [`PaymentBody`]; balance clamps at zero |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Value, json};

use fintrack_core::{
  loan::{NewLoan, NewPayment},
  store::FinanceStore,
};

use crate::{envelope, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /loans`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Value>, ApiError>
where
  S: FinanceStore,
{
  let loans = store.list_loans().await.map_err(ApiError::from_store)?;
  Ok(envelope::data(loans))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /loans`.
#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub principal_amount: Option<Decimal>,
  pub current_balance:  Option<Decimal>,
  pub interest_rate:    Option<Decimal>,
  pub monthly_payment:  Option<Decimal>,
  pub start_date:       Option<NaiveDate>,
  pub description:      Option<String>,
  pub lender:           Option<String>,
  pub loan_type:        Option<String>,
}

/// `POST /loans`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<CreateBody>,
) -> Result<Json<Value>, ApiError>
where
  S: FinanceStore,
{
  let (Some(principal_amount), Some(current_balance), Some(start_date)) =
    (body.principal_amount, body.current_balance, body.start_date)
  else {
    return Err(ApiError::Validation(
      "principal amount, current balance, and start date are required fields"
        .to_owned(),
    ));
  };

  let loan = store
    .add_loan(NewLoan {
      principal_amount,
      current_balance,
      interest_rate: body.interest_rate,
      monthly_payment: body.monthly_payment,
      start_date,
      description: body.description,
      lender: body.lender,
      loan_type: body.loan_type,
    })
    .await
    .map_err(ApiError::from_store)?;
  Ok(envelope::data(loan))
}

// ─── Payments ─────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /loans/:id/payments`. `principal_payment`
/// defaults to the full `payment_amount`.
#[derive(Debug, Deserialize)]
pub struct PaymentBody {
  pub payment_amount:    Option<Decimal>,
  pub principal_payment: Option<Decimal>,
  pub payment_date:      Option<NaiveDate>,
  pub description:       Option<String>,
}

/// `POST /loans/:id/payments`
pub async fn record_payment<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  Json(body): Json<PaymentBody>,
) -> Result<Json<Value>, ApiError>
where
  S: FinanceStore,
{
  let (Some(payment_amount), Some(payment_date)) =
    (body.payment_amount, body.payment_date)
  else {
    return Err(ApiError::Validation(
      "payment amount and payment date are required fields".to_owned(),
    ));
  };

  let (payment, loan) = store
    .record_loan_payment(id, NewPayment {
      payment_amount,
      principal_payment: body.principal_payment,
      payment_date,
      description: body.description,
    })
    .await
    .map_err(ApiError::from_store)?;

  Ok(envelope::data(json!({
    "id": payment.id,
    "remaining_balance": loan.current_balance,
  })))
}
