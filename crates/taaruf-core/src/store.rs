//! Storage traits the matching core consumes.
//!
//! The traits are implemented by storage backends (e.g.
//! `taaruf-store-sqlite`). Higher layers (`taaruf-engine`, `taaruf-api`)
//! depend on these abstractions, not on any concrete backend.
//!
//! All methods return `Send` futures so the traits can be used in
//! multi-threaded async runtimes (e.g. tokio with `axum`).

use std::future::Future;

use uuid::Uuid;

use crate::{
  chat::ChatMessage,
  profile::{Biodata, PartnerCriteria},
  progress::{InsertOutcome, PartyStatus, ProgressRecord, Role},
  user::{Gender, User},
};

// ─── User directory ──────────────────────────────────────────────────────────

/// Read access to the user directory. Identity, gender and approval are
/// owned and mutated elsewhere; the core only checks eligibility.
pub trait UserDirectory: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Look up a user by email. Returns `None` if unknown.
  fn find_user<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + 'a;

  /// All approved users of the given gender, newest registration first.
  fn list_approved_by_gender(
    &self,
    gender: Gender,
  ) -> impl Future<Output = Result<Vec<User>, Self::Error>> + Send + '_;
}

// ─── Profile store ───────────────────────────────────────────────────────────

/// Read-only access to biodata and partner-criteria records.
pub trait ProfileStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn get_biodata<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<Option<Biodata>, Self::Error>> + Send + 'a;

  fn get_criteria<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<Option<PartnerCriteria>, Self::Error>>
  + Send
  + 'a;
}

// ─── Progress store ──────────────────────────────────────────────────────────

/// Persistence for [`ProgressRecord`] — the only concurrently-mutated
/// shared resource in the core.
pub trait ProgressStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Insert a fresh record for the pair with both statuses `Pending`.
  ///
  /// The backend must enforce a uniqueness constraint on the canonical
  /// unordered pair key ([`crate::progress::pair_key`]) and resolve a
  /// constraint violation by fetching the existing record instead of
  /// failing — two racing creations from either direction collapse to
  /// [`InsertOutcome::Existing`].
  fn insert_progress<'a>(
    &'a self,
    initiator_email: &'a str,
    target_email: &'a str,
  ) -> impl Future<Output = Result<InsertOutcome, Self::Error>> + Send + 'a;

  /// Retrieve a record by id. Returns `None` if not found.
  fn get_progress(
    &self,
    progress_id: Uuid,
  ) -> impl Future<Output = Result<Option<ProgressRecord>, Self::Error>>
  + Send
  + '_;

  /// Look up the record for an unordered pair, in either orientation.
  fn find_by_pair<'a>(
    &'a self,
    a: &'a str,
    b: &'a str,
  ) -> impl Future<Output = Result<Option<ProgressRecord>, Self::Error>>
  + Send
  + 'a;

  /// Write `status` into the single status column owned by `role`, then
  /// return the freshly re-read record.
  ///
  /// The update must target only that one column — never a blind
  /// overwrite of a previously read row — so a concurrent write to the
  /// sibling field is never lost. Returns `None` if the id is unknown.
  fn set_party_status(
    &self,
    progress_id: Uuid,
    role: Role,
    status: PartyStatus,
  ) -> impl Future<Output = Result<Option<ProgressRecord>, Self::Error>>
  + Send
  + '_;

  /// Every record involving `email` where neither side is `Dislike`,
  /// oldest first. Rejected records are hidden here but never deleted.
  fn list_active_for<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<Vec<ProgressRecord>, Self::Error>> + Send + 'a;

  /// Every record involving `email`, including rejected ones. Feeds the
  /// discovery exclusion set.
  fn list_all_for<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<Vec<ProgressRecord>, Self::Error>> + Send + 'a;
}

// ─── Message store ───────────────────────────────────────────────────────────

/// Append-only persistence for chat messages. Authorisation lives in the
/// chat gate, not here.
pub trait MessageStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a message. Timestamps and ids are store-assigned.
  fn append_message<'a>(
    &'a self,
    progress_id: Uuid,
    sender_email: &'a str,
    body: &'a str,
  ) -> impl Future<Output = Result<ChatMessage, Self::Error>> + Send + 'a;

  /// All messages for a progress record, creation-time ascending.
  fn list_messages(
    &self,
    progress_id: Uuid,
  ) -> impl Future<Output = Result<Vec<ChatMessage>, Self::Error>> + Send + '_;
}

// ─── Auth store ──────────────────────────────────────────────────────────────

/// Credential material backing the HTTP bearer boundary. Tokens are
/// stored as digests; the raw token never touches the database.
pub trait AuthStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// The argon2 PHC string for a user, if the user exists.
  fn password_hash<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send + 'a;

  /// Record an issued bearer token (digest form) for a user.
  fn insert_token<'a>(
    &'a self,
    email: &'a str,
    token_hash: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Resolve a bearer token digest back to its user.
  fn resolve_token<'a>(
    &'a self,
    token_hash: &'a str,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + 'a;
}
