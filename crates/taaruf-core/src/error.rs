//! Error types for `taaruf-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown gender discriminant: {0:?}")]
  UnknownGender(String),

  #[error("unknown approval status discriminant: {0:?}")]
  UnknownApproval(String),

  #[error("unknown party status discriminant: {0:?}")]
  UnknownPartyStatus(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
