//! Validating extractors.
//!
//! [`ValidJson`] and [`ValidQuery`] run the matching validate-for-* operation
//! before a handler sees the payload, so handlers only ever receive
//! [`EmployeeDraft`], [`EmployeeChanges`] or [`EmployeeSearch`] values that
//! already satisfy every field rule.

use axum::{
  Json,
  extract::{FromRequest, FromRequestParts, Query, Request, rejection::JsonRejection},
  http::request::Parts,
};
use serde_json::{Map, Value};
use staffbook_core::{
  EmployeeChanges, EmployeeCreate, EmployeeDraft, EmployeeSearch, EmployeeUpdate,
  ValidationError,
};

use crate::error::ApiError;

// ─── Payload kinds ────────────────────────────────────────────────────────────

/// A validated value that can be produced from a JSON object body.
pub trait JsonPayload: Sized {
  fn from_object(object: &Map<String, Value>) -> Result<Self, ValidationError>;
}

impl JsonPayload for EmployeeDraft {
  fn from_object(object: &Map<String, Value>) -> Result<Self, ValidationError> {
    EmployeeCreate::from_json(object)
  }
}

impl JsonPayload for EmployeeChanges {
  fn from_object(object: &Map<String, Value>) -> Result<Self, ValidationError> {
    EmployeeUpdate::from_json(object)
  }
}

impl JsonPayload for EmployeeSearch {
  fn from_object(object: &Map<String, Value>) -> Result<Self, ValidationError> {
    EmployeeSearch::from_json(object)
  }
}

/// A validated value that can be produced from query-string pairs.
pub trait QueryPayload: Sized {
  fn from_pairs(pairs: Vec<(String, String)>) -> Result<Self, ValidationError>;
}

impl QueryPayload for EmployeeSearch {
  fn from_pairs(pairs: Vec<(String, String)>) -> Result<Self, ValidationError> {
    EmployeeSearch::from_pairs(pairs)
  }
}

fn rejected(err: ValidationError) -> ApiError {
  tracing::debug!(
    view = %err.view(),
    fields = ?err.fields(),
    "rejected payload"
  );
  ApiError::Validation(err)
}

// ─── JSON body ────────────────────────────────────────────────────────────────

/// Extracts and validates a JSON object body.
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
  S: Send + Sync,
  T: JsonPayload,
{
  type Rejection = ApiError;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    let Json(value) = Json::<Value>::from_request(req, state)
      .await
      .map_err(|rejection| match rejection {
        JsonRejection::MissingJsonContentType(_) => ApiError::UnsupportedMediaType,
        other => ApiError::MalformedBody(other.body_text()),
      })?;

    let Value::Object(object) = value else {
      return Err(ApiError::MalformedBody("expected a JSON object".to_string()));
    };

    T::from_object(&object).map(ValidJson).map_err(rejected)
  }
}

// ─── Query string ─────────────────────────────────────────────────────────────

/// Extracts and validates the request's query string.
#[derive(Debug, Clone)]
pub struct ValidQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidQuery<T>
where
  S: Send + Sync,
  T: QueryPayload,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    _state: &S,
  ) -> Result<Self, Self::Rejection> {
    let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
      .map_err(|e| ApiError::MalformedQuery(e.body_text()))?;

    T::from_pairs(pairs).map(ValidQuery).map_err(rejected)
  }
}
