//! Chat gate — authorisation in front of the message store.
//!
//! Reading requires only participancy, so history survives a later
//! rejection. Sending additionally requires the record to be matched.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use taaruf_core::{
  chat::ChatMessage,
  store::{MessageStore, ProgressStore},
  user::User,
};

use crate::{Error, Result};

/// A message annotated relative to the requesting participant.
#[derive(Debug, Clone, Serialize)]
pub struct ChatEntry {
  pub message_id:   Uuid,
  pub sender_email: String,
  pub body:         String,
  pub is_me:        bool,
  pub created_at:   DateTime<Utc>,
}

impl ChatEntry {
  fn new(message: ChatMessage, requester_email: &str) -> Self {
    let is_me = message.sender_email == requester_email;
    Self {
      message_id: message.message_id,
      sender_email: message.sender_email,
      body: message.body,
      is_me,
      created_at: message.created_at,
    }
  }
}

pub struct ChatGate<S> {
  store: Arc<S>,
}

impl<S> ChatGate<S>
where
  S: ProgressStore + MessageStore,
{
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// All messages of a progress record, creation-time ascending.
  pub async fn list_messages(
    &self,
    requesting: &User,
    progress_id: Uuid,
  ) -> Result<Vec<ChatEntry>> {
    let record = self
      .store
      .get_progress(progress_id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::ProgressNotFound(progress_id))?;

    if record.role_of(&requesting.email).is_none() {
      return Err(Error::Unauthorized);
    }

    let messages = self
      .store
      .list_messages(progress_id)
      .await
      .map_err(Error::store)?;

    Ok(
      messages
        .into_iter()
        .map(|m| ChatEntry::new(m, &requesting.email))
        .collect(),
    )
  }

  /// Persist a message from `requesting`. Fails with [`Error::ChatLocked`]
  /// unless both sides currently hold LIKE.
  pub async fn send_message(
    &self,
    requesting: &User,
    progress_id: Uuid,
    body: &str,
  ) -> Result<ChatEntry> {
    let record = self
      .store
      .get_progress(progress_id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::ProgressNotFound(progress_id))?;

    if record.role_of(&requesting.email).is_none() {
      return Err(Error::Unauthorized);
    }

    if !record.is_matched() {
      return Err(Error::ChatLocked);
    }

    let message = self
      .store
      .append_message(progress_id, &requesting.email, body)
      .await
      .map_err(Error::store)?;

    Ok(ChatEntry::new(message, &requesting.email))
  }
}
