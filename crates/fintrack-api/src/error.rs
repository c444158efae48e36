//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use fintrack_core::Error as CoreError;

/// An error returned by an API handler. Every variant is rendered as the
/// `{"success": false, "error": "..."}` envelope.
#[derive(Debug, Error)]
pub enum ApiError {
  /// A missing or malformed request field; 400.
  #[error("{0}")]
  Validation(String),

  /// A record or version that does not exist; 404.
  #[error("{0}")]
  NotFound(String),

  /// Anything else; 500 with a generic message. The detail is logged, not
  /// sent to the client.
  #[error("internal error")]
  Internal(String),
}

impl ApiError {
  /// Classify a store failure: missing records to 404, invariant
  /// violations to 400, backend failures to 500.
  pub fn from_store<E: Into<CoreError>>(err: E) -> Self {
    let err = err.into();
    match &err {
      CoreError::InvestmentNotFound(_)
      | CoreError::VersionNotFound { .. }
      | CoreError::ContributionNotFound(_)
      | CoreError::LoanNotFound(_)
      | CoreError::GoalNotFound(_) => Self::NotFound(err.to_string()),

      CoreError::DuplicateMonth { .. } | CoreError::MonthOutOfRange(_) => {
        Self::Validation(err.to_string())
      }

      CoreError::UnknownChangeType(_) | CoreError::Backend(_) => {
        Self::Internal(err.to_string())
      }
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match self {
      ApiError::Validation(m) => (StatusCode::BAD_REQUEST, m),
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m),
      ApiError::Internal(detail) => {
        tracing::error!(%detail, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_owned())
      }
    };
    (status, Json(json!({ "success": false, "error": message })))
      .into_response()
  }
}
