//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("unauthenticated: {0}")]
  Unauthenticated(String),

  #[error("forbidden: {0}")]
  Forbidden(String),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("internal error: {0}")]
  Internal(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<taaruf_engine::Error> for ApiError {
  fn from(err: taaruf_engine::Error) -> Self {
    use taaruf_engine::Error as E;
    match err {
      E::UserNotFound(_) | E::ProgressNotFound(_) => {
        Self::NotFound(err.to_string())
      }
      E::Unauthorized | E::ChatLocked => Self::Forbidden(err.to_string()),
      E::InvalidPair | E::AlreadyRejected | E::InvalidStatus(_) => {
        Self::BadRequest(err.to_string())
      }
      E::Store(e) => Self::Internal(e),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Unauthenticated(m) => (StatusCode::UNAUTHORIZED, m.clone()),
      ApiError::Forbidden(m) => (StatusCode::FORBIDDEN, m.clone()),
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::Internal(e) => {
        // Logged in full; the client only sees a generic message so no
        // storage details leak.
        tracing::error!(error = %e, "store failure");
        (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_owned())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
