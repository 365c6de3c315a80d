//! Handlers for `/taaruf` — the discovery endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/taaruf` | Browsable candidates for the caller |
//! | `GET`  | `/taaruf/:email` | 403 for same gender, 404 if unknown |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::HeaderMap,
};
use taaruf_engine::{
  DiscoveryFilter,
  discovery::{CandidateDetail, CandidateProfile},
};

use crate::{AppStore, auth::require_user, error::ApiError};

/// `GET /taaruf`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  headers: HeaderMap,
) -> Result<Json<Vec<CandidateProfile>>, ApiError>
where
  S: AppStore,
{
  let user = require_user(&headers, &store).await?;
  let filter = DiscoveryFilter::new(store);
  Ok(Json(filter.list_candidates(&user).await?))
}

/// `GET /taaruf/:email`
pub async fn detail<S>(
  State(store): State<Arc<S>>,
  headers: HeaderMap,
  Path(email): Path<String>,
) -> Result<Json<CandidateDetail>, ApiError>
where
  S: AppStore,
{
  let user = require_user(&headers, &store).await?;
  let filter = DiscoveryFilter::new(store);
  Ok(Json(filter.candidate_detail(&user, &email).await?))
}
