//! JSON REST API for the ta'aruf matching service.
//!
//! Exposes an axum [`Router`] backed by any store implementing the full
//! set of [`taaruf_core::store`] traits. TLS and deployment concerns are
//! the caller's responsibility.
//!
//! # Endpoints
//!
//! | Method | Path | Purpose |
//! |--------|------|---------|
//! | `POST` | `/auth/login` | Issue a bearer token |
//! | `GET`  | `/taaruf` | Browsable candidate list |
//! | `GET`  | `/taaruf/{email}` | Candidate detail |
//! | `GET`  | `/progress` | Active progress for the caller |
//! | `POST` | `/progress` | Start progress with a target |
//! | `PUT`  | `/progress/{id}` | Record a like/dislike decision |
//! | `GET`  | `/chat/{progress_id}` | Message history |
//! | `POST` | `/chat` | Send a message |
//!
//! Success responses are the JSON value itself; errors are
//! `{"error": "<message>"}`.

pub mod auth;
pub mod chat;
pub mod error;
pub mod progress;
pub mod taaruf;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post, put},
};
use serde::Deserialize;
use taaruf_core::store::{
  AuthStore, MessageStore, ProfileStore, ProgressStore, UserDirectory,
};

pub use error::ApiError;

/// The full set of storage capabilities the API needs from its backend.
pub trait AppStore:
  UserDirectory
  + ProfileStore
  + ProgressStore
  + MessageStore
  + AuthStore
  + Send
  + Sync
  + 'static
{
}

impl<T> AppStore for T where
  T: UserDirectory
    + ProfileStore
    + ProgressStore
    + MessageStore
    + AuthStore
    + Send
    + Sync
    + 'static
{
}

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router
/// regardless of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: AppStore,
{
  Router::new()
    // Auth
    .route("/auth/login", post(auth::login::<S>))
    // Discovery
    .route("/taaruf", get(taaruf::list::<S>))
    .route("/taaruf/{email}", get(taaruf::detail::<S>))
    // Progress
    .route("/progress", get(progress::list::<S>).post(progress::start::<S>))
    .route("/progress/{id}", put(progress::update::<S>))
    // Chat
    .route("/chat/{progress_id}", get(chat::list::<S>))
    .route("/chat", post(chat::send::<S>))
    .with_state(store)
}
