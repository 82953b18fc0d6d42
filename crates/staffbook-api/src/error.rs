//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use staffbook_core::ValidationError;
use thiserror::Error;

/// A rejected request payload.
#[derive(Debug, Error)]
pub enum ApiError {
  /// The payload was well-formed JSON but broke one or more field rules.
  #[error(transparent)]
  Validation(#[from] ValidationError),

  #[error("malformed body: {0}")]
  MalformedBody(String),

  #[error("malformed query string: {0}")]
  MalformedQuery(String),

  #[error("expected request with `Content-Type: application/json`")]
  UnsupportedMediaType,
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match &self {
      ApiError::Validation(e) => (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({
          "error": e.to_string(),
          "view": e.view(),
          "violations": e.violations(),
        })),
      )
        .into_response(),
      ApiError::MalformedBody(_) | ApiError::MalformedQuery(_) => {
        (StatusCode::BAD_REQUEST, Json(json!({ "error": self.to_string() })))
          .into_response()
      }
      ApiError::UnsupportedMediaType => (
        StatusCode::UNSUPPORTED_MEDIA_TYPE,
        Json(json!({ "error": self.to_string() })),
      )
        .into_response(),
    }
  }
}
