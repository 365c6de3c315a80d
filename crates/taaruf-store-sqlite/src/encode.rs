//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings, calendar dates as
//! `YYYY-MM-DD`. UUIDs are stored as hyphenated lowercase strings. Enum
//! discriminants use the same lowercase strings as the serde form.

use chrono::{DateTime, NaiveDate, Utc};
use taaruf_core::{
  chat::ChatMessage,
  profile::{Biodata, PartnerCriteria},
  progress::{PartyStatus, ProgressRecord},
  user::{ApprovalStatus, Gender, User},
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `users` row.
pub struct RawUser {
  pub email:       String,
  pub employee_id: String,
  pub name:        String,
  pub gender:      String,
  pub approval:    String,
  pub photo:       Option<String>,
  pub created_at:  String,
}

impl RawUser {
  pub fn into_user(self) -> Result<User> {
    Ok(User {
      email:       self.email,
      employee_id: self.employee_id,
      name:        self.name,
      gender:      Gender::parse(&self.gender).map_err(Error::Core)?,
      approval:    ApprovalStatus::parse(&self.approval).map_err(Error::Core)?,
      photo:       self.photo,
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from a `progress` row.
pub struct RawProgress {
  pub progress_id:      String,
  pub initiator_email:  String,
  pub target_email:     String,
  pub initiator_status: String,
  pub target_status:    String,
  pub created_at:       String,
  pub updated_at:       String,
}

impl RawProgress {
  pub fn into_record(self) -> Result<ProgressRecord> {
    Ok(ProgressRecord {
      progress_id:      decode_uuid(&self.progress_id)?,
      initiator_email:  self.initiator_email,
      target_email:     self.target_email,
      initiator_status: PartyStatus::parse(&self.initiator_status)
        .map_err(Error::Core)?,
      target_status:    PartyStatus::parse(&self.target_status)
        .map_err(Error::Core)?,
      created_at:       decode_dt(&self.created_at)?,
      updated_at:       decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw strings read directly from a `chat_messages` row.
pub struct RawMessage {
  pub message_id:   String,
  pub progress_id:  String,
  pub sender_email: String,
  pub body:         String,
  pub created_at:   String,
}

impl RawMessage {
  pub fn into_message(self) -> Result<ChatMessage> {
    Ok(ChatMessage {
      message_id:   decode_uuid(&self.message_id)?,
      progress_id:  decode_uuid(&self.progress_id)?,
      sender_email: self.sender_email,
      body:         self.body,
      created_at:   decode_dt(&self.created_at)?,
    })
  }
}

/// Raw values read directly from a `biodata` row.
pub struct RawBiodata {
  pub email:          String,
  pub birth_place:    Option<String>,
  pub birth_date:     Option<String>,
  pub blood_type:     Option<String>,
  pub marital_status: Option<String>,
  pub occupation:     Option<String>,
  pub ethnicity:      Option<String>,
  pub education:      Option<String>,
  pub hobbies:        Option<String>,
  pub motto:          Option<String>,
  pub phone:          Option<String>,
  pub address:        Option<String>,
  pub height_cm:      Option<u16>,
  pub weight_kg:      Option<u16>,
}

impl RawBiodata {
  pub fn into_biodata(self) -> Result<Biodata> {
    Ok(Biodata {
      email:          self.email,
      birth_place:    self.birth_place,
      birth_date:     self.birth_date.as_deref().map(decode_date).transpose()?,
      blood_type:     self.blood_type,
      marital_status: self.marital_status,
      occupation:     self.occupation,
      ethnicity:      self.ethnicity,
      education:      self.education,
      hobbies:        self.hobbies,
      motto:          self.motto,
      phone:          self.phone,
      address:        self.address,
      height_cm:      self.height_cm,
      weight_kg:      self.weight_kg,
    })
  }
}

/// Raw values read directly from a `partner_criteria` row.
pub struct RawCriteria {
  pub email:          String,
  pub age_min:        Option<u8>,
  pub age_max:        Option<u8>,
  pub marital_status: Option<String>,
  pub education:      Option<String>,
  pub other:          Option<String>,
}

impl RawCriteria {
  pub fn into_criteria(self) -> PartnerCriteria {
    PartnerCriteria {
      email:          self.email,
      age_min:        self.age_min,
      age_max:        self.age_max,
      marital_status: self.marital_status,
      education:      self.education,
      other:          self.other,
    }
  }
}
