//! ProgressRecord — the mutual-interest state machine between two users.
//!
//! One record per unordered pair, ever. The two participants hold fixed
//! roles (initiator = whoever started the progress) and each owns one
//! independent tri-state status field. Match and rejection are never
//! stored; they are derived from the two fields at read time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Party status ────────────────────────────────────────────────────────────

/// One participant's decision. Defaults to `Pending` at creation; the
/// update operation only ever writes `Like` or `Dislike`.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PartyStatus {
  #[default]
  Pending,
  Like,
  Dislike,
}

impl PartyStatus {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Pending => "pending",
      Self::Like => "like",
      Self::Dislike => "dislike",
    }
  }

  pub fn parse(s: &str) -> Result<Self> {
    match s {
      "pending" => Ok(Self::Pending),
      "like" => Ok(Self::Like),
      "dislike" => Ok(Self::Dislike),
      other => Err(Error::UnknownPartyStatus(other.to_owned())),
    }
  }
}

// ─── Roles ───────────────────────────────────────────────────────────────────

/// Which side of a record a participant occupies. A storage convention,
/// not a hierarchy — both roles have identical capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  Initiator,
  Target,
}

impl Role {
  pub fn other(self) -> Self {
    match self {
      Self::Initiator => Self::Target,
      Self::Target => Self::Initiator,
    }
  }
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// The central entity of the matching core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressRecord {
  pub progress_id:      Uuid,
  pub initiator_email:  String,
  pub target_email:     String,
  pub initiator_status: PartyStatus,
  pub target_status:    PartyStatus,
  pub created_at:       DateTime<Utc>,
  pub updated_at:       DateTime<Utc>,
}

impl ProgressRecord {
  /// Resolve which role `email` occupies on this record, if any.
  pub fn role_of(&self, email: &str) -> Option<Role> {
    if self.initiator_email == email {
      Some(Role::Initiator)
    } else if self.target_email == email {
      Some(Role::Target)
    } else {
      None
    }
  }

  pub fn status_of(&self, role: Role) -> PartyStatus {
    match role {
      Role::Initiator => self.initiator_status,
      Role::Target => self.target_status,
    }
  }

  /// The counterpart of the participant holding `role`.
  pub fn partner_email(&self, role: Role) -> &str {
    match role {
      Role::Initiator => &self.target_email,
      Role::Target => &self.initiator_email,
    }
  }

  /// Matched iff both sides decided `Like`.
  pub fn is_matched(&self) -> bool {
    self.initiator_status == PartyStatus::Like
      && self.target_status == PartyStatus::Like
  }

  /// Rejected iff either side decided `Dislike`. Takes precedence over
  /// match the instant it is set — LIKE/LIKE is only reachable while
  /// neither side holds DISLIKE.
  pub fn is_rejected(&self) -> bool {
    self.initiator_status == PartyStatus::Dislike
      || self.target_status == PartyStatus::Dislike
  }
}

/// Canonical key for an unordered pair of emails: lexicographic
/// (min, max). The storage layer keeps a uniqueness constraint on it so
/// two racing creations from either direction collapse to one record.
pub fn pair_key<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
  if a <= b { (a, b) } else { (b, a) }
}

/// Outcome of a progress insertion attempt. Callers distinguish a fresh
/// record from an idempotent re-call hitting the pair constraint.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", content = "record", rename_all = "lowercase")]
pub enum InsertOutcome {
  Created(ProgressRecord),
  Existing(ProgressRecord),
}

impl InsertOutcome {
  pub fn record(&self) -> &ProgressRecord {
    match self {
      Self::Created(r) | Self::Existing(r) => r,
    }
  }

  pub fn is_created(&self) -> bool { matches!(self, Self::Created(_)) }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn record(initiator: PartyStatus, target: PartyStatus) -> ProgressRecord {
    ProgressRecord {
      progress_id:      Uuid::new_v4(),
      initiator_email:  "a@x.com".into(),
      target_email:     "b@x.com".into(),
      initiator_status: initiator,
      target_status:    target,
      created_at:       Utc::now(),
      updated_at:       Utc::now(),
    }
  }

  #[test]
  fn matched_only_when_both_like() {
    use PartyStatus::*;
    assert!(record(Like, Like).is_matched());
    assert!(!record(Like, Pending).is_matched());
    assert!(!record(Pending, Like).is_matched());
    assert!(!record(Like, Dislike).is_matched());
  }

  #[test]
  fn rejected_when_either_dislikes() {
    use PartyStatus::*;
    assert!(record(Dislike, Pending).is_rejected());
    assert!(record(Pending, Dislike).is_rejected());
    assert!(record(Like, Dislike).is_rejected());
    assert!(!record(Like, Like).is_rejected());
    assert!(!record(Pending, Pending).is_rejected());
  }

  #[test]
  fn rejection_and_match_are_exclusive() {
    use PartyStatus::*;
    for a in [Pending, Like, Dislike] {
      for b in [Pending, Like, Dislike] {
        let r = record(a, b);
        assert!(!(r.is_matched() && r.is_rejected()));
      }
    }
  }

  #[test]
  fn role_resolution() {
    let r = record(PartyStatus::Pending, PartyStatus::Pending);
    assert_eq!(r.role_of("a@x.com"), Some(Role::Initiator));
    assert_eq!(r.role_of("b@x.com"), Some(Role::Target));
    assert_eq!(r.role_of("c@x.com"), None);
    assert_eq!(r.partner_email(Role::Initiator), "b@x.com");
    assert_eq!(r.partner_email(Role::Target), "a@x.com");
  }

  #[test]
  fn pair_key_is_order_independent() {
    assert_eq!(pair_key("a@x.com", "b@x.com"), ("a@x.com", "b@x.com"));
    assert_eq!(pair_key("b@x.com", "a@x.com"), ("a@x.com", "b@x.com"));
  }
}
