//! The business-rule error taxonomy of the matching core.
//!
//! Every variant except `Store` is a recoverable client-visible rule
//! violation; `Store` wraps an upstream data-access failure and is the
//! only variant the API layer treats as a server error.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("user not found: {0}")]
  UserNotFound(String),

  #[error("progress not found: {0}")]
  ProgressNotFound(Uuid),

  #[error("not a participant of this progress")]
  Unauthorized,

  #[error("cannot start ta'aruf with a same-gender user")]
  InvalidPair,

  #[error("this pair was rejected before; no new progress may be started")]
  AlreadyRejected,

  #[error("status must be \"like\" or \"dislike\", got {0:?}")]
  InvalidStatus(String),

  #[error("chat is locked until both parties like each other")]
  ChatLocked,

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub(crate) fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
