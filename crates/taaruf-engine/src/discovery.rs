//! Discovery filter — who may browse whom.
//!
//! The candidate list is opposite-gender, approval-gated, and excludes
//! every counterpart the requester already shares a progress record with,
//! rejected records included. The exclusion set is derived from the
//! progress table on every call; there is no separately maintained index
//! to drift out of sync.

use std::{collections::HashSet, sync::Arc};

use serde::Serialize;

use taaruf_core::{
  profile::{Biodata, PartnerCriteria},
  store::{ProfileStore, ProgressStore, UserDirectory},
  user::User,
};

use crate::{Error, Result};

/// A browsable candidate: directory entry plus biodata, if filled in.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateProfile {
  pub user:    User,
  pub biodata: Option<Biodata>,
}

/// The detail view adds partner criteria. Also used to review the partner
/// of an existing progress record, which is why it does not consult the
/// exclusion set.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateDetail {
  pub user:     User,
  pub biodata:  Option<Biodata>,
  pub criteria: Option<PartnerCriteria>,
}

pub struct DiscoveryFilter<S> {
  store: Arc<S>,
}

impl<S> DiscoveryFilter<S>
where
  S: UserDirectory + ProfileStore + ProgressStore,
{
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// Every profile `requesting` may initiate progress with, newest
  /// registration first.
  pub async fn list_candidates(
    &self,
    requesting: &User,
  ) -> Result<Vec<CandidateProfile>> {
    let excluded: HashSet<String> = self
      .store
      .list_all_for(&requesting.email)
      .await
      .map_err(Error::store)?
      .into_iter()
      .map(|record| {
        if record.initiator_email == requesting.email {
          record.target_email
        } else {
          record.initiator_email
        }
      })
      .collect();

    let candidates = self
      .store
      .list_approved_by_gender(requesting.gender.opposite())
      .await
      .map_err(Error::store)?;

    let mut profiles = Vec::with_capacity(candidates.len());
    for user in candidates {
      if excluded.contains(&user.email) {
        continue;
      }
      let biodata =
        self.store.get_biodata(&user.email).await.map_err(Error::store)?;
      profiles.push(CandidateProfile { user, biodata });
    }

    Ok(profiles)
  }

  /// Full profile of one user. Gender symmetry is enforced here
  /// independently of the listing filter; exclusion is not.
  pub async fn candidate_detail(
    &self,
    requesting: &User,
    email: &str,
  ) -> Result<CandidateDetail> {
    let user = self
      .store
      .find_user(email)
      .await
      .map_err(Error::store)?
      .ok_or_else(|| Error::UserNotFound(email.to_owned()))?;

    if user.gender == requesting.gender {
      return Err(Error::Unauthorized);
    }

    let biodata =
      self.store.get_biodata(&user.email).await.map_err(Error::store)?;
    let criteria =
      self.store.get_criteria(&user.email).await.map_err(Error::store)?;

    Ok(CandidateDetail { user, biodata, criteria })
  }
}
