//! The `{"success": ..., "data": ...}` response envelope.

use axum::Json;
use serde::Serialize;
use serde_json::{Value, json};

/// Wrap a payload in the success envelope.
pub fn data<T: Serialize>(payload: T) -> Json<Value> {
  Json(json!({ "success": true, "data": payload }))
}

/// The bare success envelope for responses that carry no payload
/// (deletions, amount-only updates).
pub fn success() -> Json<Value> {
  Json(json!({ "success": true }))
}
