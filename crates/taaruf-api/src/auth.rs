//! Bearer-token authentication for the API.
//!
//! `POST /auth/login` verifies an argon2 password hash and issues a
//! random 32-byte token, returned hex-encoded. Only the SHA-256 digest
//! of a token is stored, so a leaked database cannot replay sessions.

use std::sync::Arc;

use argon2::{Argon2, PasswordHash, PasswordVerifier as _};
use axum::{
  Json,
  extract::State,
  http::{HeaderMap, header},
};
use rand_core::{OsRng, RngCore as _};
use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};
use taaruf_core::user::User;

use crate::{AppStore, error::ApiError};

/// Hex SHA-256 of a raw bearer token — the only form that touches the
/// database.
pub fn token_digest(token: &str) -> String {
  hex::encode(Sha256::digest(token.as_bytes()))
}

/// Resolve the `Authorization: Bearer ...` header to a user, or fail
/// with 401.
pub async fn require_user<S>(
  headers: &HeaderMap,
  store: &Arc<S>,
) -> Result<User, ApiError>
where
  S: AppStore,
{
  let value = headers
    .get(header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .ok_or_else(|| {
      ApiError::Unauthenticated("missing bearer token".to_owned())
    })?;

  let token = value.strip_prefix("Bearer ").ok_or_else(|| {
    ApiError::Unauthenticated("malformed authorization header".to_owned())
  })?;

  store
    .resolve_token(&token_digest(token))
    .await
    .map_err(|e| ApiError::Internal(Box::new(e)))?
    .ok_or_else(|| ApiError::Unauthenticated("invalid bearer token".to_owned()))
}

// ─── Login ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LoginBody {
  pub email:    String,
  pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
  pub token: String,
  pub user:  User,
}

/// `POST /auth/login` — body: `{"email":"...","password":"..."}`
///
/// Unknown email and wrong password produce the same 401, so the
/// endpoint cannot be used to probe the directory.
pub async fn login<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<LoginBody>,
) -> Result<Json<LoginResponse>, ApiError>
where
  S: AppStore,
{
  let invalid =
    || ApiError::Unauthenticated("invalid credentials".to_owned());

  let hash = store
    .password_hash(&body.email)
    .await
    .map_err(|e| ApiError::Internal(Box::new(e)))?
    .ok_or_else(invalid)?;

  let parsed = PasswordHash::new(&hash).map_err(|e| {
    ApiError::Internal(format!("stored password hash is malformed: {e}").into())
  })?;
  Argon2::default()
    .verify_password(body.password.as_bytes(), &parsed)
    .map_err(|_| invalid())?;

  let user = store
    .find_user(&body.email)
    .await
    .map_err(|e| ApiError::Internal(Box::new(e)))?
    .ok_or_else(invalid)?;

  let mut bytes = [0u8; 32];
  OsRng.fill_bytes(&mut bytes);
  let token = hex::encode(bytes);

  store
    .insert_token(&user.email, &token_digest(&token))
    .await
    .map_err(|e| ApiError::Internal(Box::new(e)))?;

  Ok(Json(LoginResponse { token, user }))
}
