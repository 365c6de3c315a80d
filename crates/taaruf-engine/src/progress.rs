//! Progress engine — owner of the mutual-interest state machine.
//!
//! Per side the intended transitions are PENDING→LIKE and PENDING→DISLIKE
//! with both terminal, but the update operation deliberately stays
//! permissive: a party may overwrite an earlier decision, un-matching or
//! un-rejecting the record. See DESIGN.md before tightening this.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use taaruf_core::{
  progress::{InsertOutcome, PartyStatus, ProgressRecord, Role},
  store::{ProfileStore, ProgressStore, UserDirectory},
  user::User,
};

use crate::{
  Error, Result,
  discovery::CandidateProfile,
};

/// What a status update did to the record, computed from a fresh
/// post-write read.
#[derive(Debug, Clone, Serialize)]
pub struct StatusUpdate {
  pub progress_id: Uuid,
  pub user_status: PartyStatus,
  pub is_matched:  bool,
  pub is_rejected: bool,
}

/// One active progress record from the requester's point of view.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressSummary {
  pub progress_id:    Uuid,
  pub created_at:     DateTime<Utc>,
  pub is_initiator:   bool,
  pub user_status:    PartyStatus,
  pub partner_status: PartyStatus,
  pub is_matched:     bool,
  /// `None` if the partner has left the directory.
  pub partner:        Option<CandidateProfile>,
  pub current_user:   CandidateProfile,
}

pub struct ProgressEngine<S> {
  store: Arc<S>,
}

impl<S> ProgressEngine<S>
where
  S: UserDirectory + ProfileStore + ProgressStore,
{
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// Start (or idempotently re-fetch) the progress between `requesting`
  /// and `target_email`.
  ///
  /// A rejected pair can never be restarted. The pre-insert lookup is
  /// only an early exit; the pair uniqueness constraint in the store is
  /// what actually serialises racing creations from both directions.
  pub async fn start_progress(
    &self,
    requesting: &User,
    target_email: &str,
  ) -> Result<InsertOutcome> {
    let target = self
      .store
      .find_user(target_email)
      .await
      .map_err(Error::store)?
      .ok_or_else(|| Error::UserNotFound(target_email.to_owned()))?;

    if requesting.gender == target.gender {
      return Err(Error::InvalidPair);
    }

    if let Some(existing) = self
      .store
      .find_by_pair(&requesting.email, target_email)
      .await
      .map_err(Error::store)?
    {
      if existing.is_rejected() {
        return Err(Error::AlreadyRejected);
      }
      return Ok(InsertOutcome::Existing(existing));
    }

    let outcome = self
      .store
      .insert_progress(&requesting.email, target_email)
      .await
      .map_err(Error::store)?;

    // A racer may have created and even rejected the pair between the
    // lookup and the insert; rejection stays permanent either way.
    if let InsertOutcome::Existing(record) = &outcome
      && record.is_rejected()
    {
      return Err(Error::AlreadyRejected);
    }

    Ok(outcome)
  }

  /// Record `requesting`'s decision on one progress record.
  ///
  /// `status` must be the wire string `"like"` or `"dislike"`; writing
  /// only touches the caller's own side of the record.
  pub async fn set_status(
    &self,
    requesting: &User,
    progress_id: Uuid,
    status: &str,
  ) -> Result<StatusUpdate> {
    let status = match PartyStatus::parse(status) {
      Ok(PartyStatus::Like) => PartyStatus::Like,
      Ok(PartyStatus::Dislike) => PartyStatus::Dislike,
      _ => return Err(Error::InvalidStatus(status.to_owned())),
    };

    let record = self
      .store
      .get_progress(progress_id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::ProgressNotFound(progress_id))?;

    let role = record
      .role_of(&requesting.email)
      .ok_or(Error::Unauthorized)?;

    let updated = self
      .store
      .set_party_status(progress_id, role, status)
      .await
      .map_err(Error::store)?
      .ok_or(Error::ProgressNotFound(progress_id))?;

    Ok(StatusUpdate {
      progress_id,
      user_status: status,
      is_matched:  updated.is_matched(),
      is_rejected: updated.is_rejected(),
    })
  }

  /// All active progress for `requesting`, oldest first, with both
  /// parties' profile summaries attached. Rejected records are hidden
  /// but kept — they still feed the discovery exclusion set.
  pub async fn list_for_user(
    &self,
    requesting: &User,
  ) -> Result<Vec<ProgressSummary>> {
    let own_biodata = self
      .store
      .get_biodata(&requesting.email)
      .await
      .map_err(Error::store)?;
    let current_user = CandidateProfile {
      user:    requesting.clone(),
      biodata: own_biodata,
    };

    let records = self
      .store
      .list_active_for(&requesting.email)
      .await
      .map_err(Error::store)?;

    let mut summaries = Vec::with_capacity(records.len());
    for record in records {
      summaries
        .push(self.summarise(&record, requesting, current_user.clone()).await?);
    }

    Ok(summaries)
  }

  async fn summarise(
    &self,
    record: &ProgressRecord,
    requesting: &User,
    current_user: CandidateProfile,
  ) -> Result<ProgressSummary> {
    // The listing query only returns records the requester is on.
    let role = record
      .role_of(&requesting.email)
      .ok_or(Error::Unauthorized)?;
    let partner_email = record.partner_email(role);

    let partner = match self
      .store
      .find_user(partner_email)
      .await
      .map_err(Error::store)?
    {
      Some(user) => {
        let biodata =
          self.store.get_biodata(&user.email).await.map_err(Error::store)?;
        Some(CandidateProfile { user, biodata })
      }
      None => None,
    };

    Ok(ProgressSummary {
      progress_id:    record.progress_id,
      created_at:     record.created_at,
      is_initiator:   role == Role::Initiator,
      user_status:    record.status_of(role),
      partner_status: record.status_of(role.other()),
      is_matched:     record.is_matched(),
      partner,
      current_user,
    })
  }
}
