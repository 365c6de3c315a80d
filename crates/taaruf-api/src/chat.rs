//! Handlers for `/chat` — the gated message endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/chat/:progress_id` | Participants only; not match-gated |
//! | `POST` | `/chat` | Body: `{"progress_id":"...","message":"..."}`; 403 until matched |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::{HeaderMap, StatusCode},
  response::IntoResponse,
};
use serde::Deserialize;
use taaruf_engine::{ChatGate, chat::ChatEntry};
use uuid::Uuid;

use crate::{AppStore, auth::require_user, error::ApiError};

/// `GET /chat/:progress_id`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  headers: HeaderMap,
  Path(progress_id): Path<Uuid>,
) -> Result<Json<Vec<ChatEntry>>, ApiError>
where
  S: AppStore,
{
  let user = require_user(&headers, &store).await?;
  let gate = ChatGate::new(store);
  Ok(Json(gate.list_messages(&user, progress_id).await?))
}

#[derive(Debug, Deserialize)]
pub struct SendBody {
  pub progress_id: Uuid,
  pub message:     String,
}

/// `POST /chat`
pub async fn send<S>(
  State(store): State<Arc<S>>,
  headers: HeaderMap,
  Json(body): Json<SendBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: AppStore,
{
  let user = require_user(&headers, &store).await?;

  if body.message.trim().is_empty() {
    return Err(ApiError::BadRequest("message must not be empty".to_owned()));
  }

  let gate = ChatGate::new(store);
  let entry = gate.send_message(&user, body.progress_id, &body.message).await?;
  Ok((StatusCode::CREATED, Json(entry)))
}
