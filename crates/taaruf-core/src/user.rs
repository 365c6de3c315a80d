//! User — the directory entry the matching core reads.
//!
//! Identity is the unique email address; every relation in the system
//! (progress records, chat messages, profiles) is keyed by it. The
//! directory itself is owned elsewhere — the core only consumes it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Binary gender marker; candidate browsing is strictly opposite-gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
  Male,
  Female,
}

impl Gender {
  pub fn opposite(self) -> Self {
    match self {
      Self::Male => Self::Female,
      Self::Female => Self::Male,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Male => "male",
      Self::Female => "female",
    }
  }

  pub fn parse(s: &str) -> Result<Self> {
    match s {
      "male" => Ok(Self::Male),
      "female" => Ok(Self::Female),
      other => Err(Error::UnknownGender(other.to_owned())),
    }
  }
}

/// Admin moderation state. Only `Approved` users are browsable.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
  #[default]
  Pending,
  Approved,
  Rejected,
}

impl ApprovalStatus {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Pending => "pending",
      Self::Approved => "approved",
      Self::Rejected => "rejected",
    }
  }

  pub fn parse(s: &str) -> Result<Self> {
    match s {
      "pending" => Ok(Self::Pending),
      "approved" => Ok(Self::Approved),
      "rejected" => Ok(Self::Rejected),
      other => Err(Error::UnknownApproval(other.to_owned())),
    }
  }
}

/// A directory entry. Never carries the password hash — credential
/// material stays behind [`crate::store::AuthStore`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  pub email:       String,
  /// Employee number within the organisation.
  pub employee_id: String,
  pub name:        String,
  pub gender:      Gender,
  pub approval:    ApprovalStatus,
  /// Path to a profile photo, if one was uploaded.
  pub photo:       Option<String>,
  pub created_at:  DateTime<Utc>,
}
