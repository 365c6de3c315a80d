//! Chat messages, keyed by progress record.
//!
//! Owned by the message store; the core only creates them through the
//! chat gate's authorised write path.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
  pub message_id:   Uuid,
  pub progress_id:  Uuid,
  pub sender_email: String,
  pub body:         String,
  pub created_at:   DateTime<Utc>,
}
