//! Handlers for `/progress` — the state-machine endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/progress` | Active progress for the caller |
//! | `POST` | `/progress` | Body: `{"target_email":"..."}`; 201 fresh, 200 existing |
//! | `PUT`  | `/progress/:id` | Body: `{"status":"like"\|"dislike"}` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::{HeaderMap, StatusCode},
  response::IntoResponse,
};
use serde::Deserialize;
use taaruf_core::progress::InsertOutcome;
use taaruf_engine::{
  ProgressEngine,
  progress::{ProgressSummary, StatusUpdate},
};
use uuid::Uuid;

use crate::{AppStore, auth::require_user, error::ApiError};

/// `GET /progress`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  headers: HeaderMap,
) -> Result<Json<Vec<ProgressSummary>>, ApiError>
where
  S: AppStore,
{
  let user = require_user(&headers, &store).await?;
  let engine = ProgressEngine::new(store);
  Ok(Json(engine.list_for_user(&user).await?))
}

#[derive(Debug, Deserialize)]
pub struct StartBody {
  pub target_email: String,
}

/// `POST /progress` — 201 with the record when freshly created, 200 when
/// an active record for the pair already existed.
pub async fn start<S>(
  State(store): State<Arc<S>>,
  headers: HeaderMap,
  Json(body): Json<StartBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: AppStore,
{
  let user = require_user(&headers, &store).await?;
  let engine = ProgressEngine::new(store);

  let outcome = engine.start_progress(&user, &body.target_email).await?;
  let status = match &outcome {
    InsertOutcome::Created(_) => StatusCode::CREATED,
    InsertOutcome::Existing(_) => StatusCode::OK,
  };
  Ok((status, Json(outcome.record().clone())))
}

#[derive(Debug, Deserialize)]
pub struct StatusBody {
  pub status: String,
}

/// `PUT /progress/:id`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  headers: HeaderMap,
  Path(id): Path<Uuid>,
  Json(body): Json<StatusBody>,
) -> Result<Json<StatusUpdate>, ApiError>
where
  S: AppStore,
{
  let user = require_user(&headers, &store).await?;
  let engine = ProgressEngine::new(store);
  Ok(Json(engine.set_status(&user, id, &body.status).await?))
}
