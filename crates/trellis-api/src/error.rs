//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Translates the stable core taxonomy into transport status codes while
//! preserving the distinction between "not found", "validation failure",
//! and "constraint violation".

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use trellis_core::Error as CoreError;

/// An error returned by an API handler.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] CoreError);

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match &self.0 {
      CoreError::EmptyTitle
      | CoreError::EmptyId { .. }
      | CoreError::InvalidSemester => StatusCode::BAD_REQUEST,
      CoreError::NotFound { .. } => StatusCode::NOT_FOUND,
      // Stored state contradicts the clock. Not a client mistake, not
      // retryable.
      CoreError::InvalidAdmissionDate { .. } => {
        StatusCode::UNPROCESSABLE_ENTITY
      }
      CoreError::Constraint { .. } => StatusCode::CONFLICT,
      CoreError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
      CoreError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
      tracing::error!(error = %self.0, "request failed");
    }

    (status, Json(json!({ "error": self.0.to_string() }))).into_response()
  }
}
