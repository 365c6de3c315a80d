//! [`SqliteStore`] — the SQLite implementation of every storage trait the
//! matching core consumes.

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use taaruf_core::{
  chat::ChatMessage,
  profile::{Biodata, PartnerCriteria},
  progress::{
    InsertOutcome, PartyStatus, ProgressRecord, Role, pair_key,
  },
  store::{AuthStore, MessageStore, ProfileStore, ProgressStore, UserDirectory},
  user::{ApprovalStatus, Gender, User},
};

use crate::{
  Error, Result,
  encode::{
    RawBiodata, RawCriteria, RawMessage, RawProgress, RawUser, encode_date,
    encode_dt, encode_uuid,
  },
  schema::SCHEMA,
};

// ─── Row mapping ─────────────────────────────────────────────────────────────

const PROGRESS_COLUMNS: &str = "progress_id, initiator_email, target_email, \
   initiator_status, target_status, created_at, updated_at";

fn progress_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawProgress> {
  Ok(RawProgress {
    progress_id:      row.get(0)?,
    initiator_email:  row.get(1)?,
    target_email:     row.get(2)?,
    initiator_status: row.get(3)?,
    target_status:    row.get(4)?,
    created_at:       row.get(5)?,
    updated_at:       row.get(6)?,
  })
}

const USER_COLUMNS: &str =
  "email, employee_id, name, gender, approval, photo, created_at";

fn user_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawUser> {
  Ok(RawUser {
    email:       row.get(0)?,
    employee_id: row.get(1)?,
    name:        row.get(2)?,
    gender:      row.get(3)?,
    approval:    row.get(4)?,
    photo:       row.get(5)?,
    created_at:  row.get(6)?,
  })
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A ta'aruf store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

/// Input for [`SqliteStore::add_user`]. Directory entries are otherwise
/// created by an external admin flow; this exists for seeding and tests.
#[derive(Debug, Clone)]
pub struct NewUser {
  pub email:         String,
  pub employee_id:   String,
  pub name:          String,
  pub gender:        Gender,
  pub approval:      ApprovalStatus,
  pub photo:         Option<String>,
  /// Argon2 PHC string.
  pub password_hash: String,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Seeding helpers (not part of the core traits) ─────────────────────

  /// Insert a directory entry. Fails on a duplicate email or employee id.
  pub async fn add_user(&self, input: NewUser) -> Result<User> {
    let user = User {
      email:       input.email,
      employee_id: input.employee_id,
      name:        input.name,
      gender:      input.gender,
      approval:    input.approval,
      photo:       input.photo,
      created_at:  Utc::now(),
    };

    let email         = user.email.clone();
    let employee_id   = user.employee_id.clone();
    let name          = user.name.clone();
    let gender_str    = user.gender.as_str().to_owned();
    let approval_str  = user.approval.as_str().to_owned();
    let photo         = user.photo.clone();
    let password_hash = input.password_hash;
    let at_str        = encode_dt(user.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO users (
             email, employee_id, name, gender, approval, photo,
             password_hash, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            email,
            employee_id,
            name,
            gender_str,
            approval_str,
            photo,
            password_hash,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(user)
  }

  /// Flip a user's approval state. Returns `false` if the email is
  /// unknown.
  pub async fn set_approval(
    &self,
    email: &str,
    approval: ApprovalStatus,
  ) -> Result<bool> {
    let email = email.to_owned();
    let approval_str = approval.as_str().to_owned();

    let n = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE users SET approval = ?2 WHERE email = ?1",
          rusqlite::params![email, approval_str],
        )?)
      })
      .await?;

    Ok(n > 0)
  }

  /// Insert or replace the biodata record for `biodata.email`.
  pub async fn upsert_biodata(&self, biodata: Biodata) -> Result<()> {
    let birth_date_str = biodata.birth_date.map(encode_date);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR REPLACE INTO biodata (
             email, birth_place, birth_date, blood_type, marital_status,
             occupation, ethnicity, education, hobbies, motto, phone,
             address, height_cm, weight_kg
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
          rusqlite::params![
            biodata.email,
            biodata.birth_place,
            birth_date_str,
            biodata.blood_type,
            biodata.marital_status,
            biodata.occupation,
            biodata.ethnicity,
            biodata.education,
            biodata.hobbies,
            biodata.motto,
            biodata.phone,
            biodata.address,
            biodata.height_cm,
            biodata.weight_kg,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Insert or replace the partner-criteria record for `criteria.email`.
  pub async fn upsert_criteria(&self, criteria: PartnerCriteria) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR REPLACE INTO partner_criteria (
             email, age_min, age_max, marital_status, education, other
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![
            criteria.email,
            criteria.age_min,
            criteria.age_max,
            criteria.marital_status,
            criteria.education,
            criteria.other,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── UserDirectory impl ──────────────────────────────────────────────────────

impl UserDirectory for SqliteStore {
  type Error = Error;

  async fn find_user(&self, email: &str) -> Result<Option<User>> {
    let email = email.to_owned();

    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1"),
              rusqlite::params![email],
              user_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }

  async fn list_approved_by_gender(&self, gender: Gender) -> Result<Vec<User>> {
    let gender_str = gender.as_str().to_owned();

    let raws: Vec<RawUser> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {USER_COLUMNS} FROM users
           WHERE gender = ?1 AND approval = 'approved'
           ORDER BY created_at DESC, email"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![gender_str], user_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawUser::into_user).collect()
  }
}

// ─── ProfileStore impl ───────────────────────────────────────────────────────

impl ProfileStore for SqliteStore {
  type Error = Error;

  async fn get_biodata(&self, email: &str) -> Result<Option<Biodata>> {
    let email = email.to_owned();

    let raw: Option<RawBiodata> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT email, birth_place, birth_date, blood_type,
                      marital_status, occupation, ethnicity, education,
                      hobbies, motto, phone, address, height_cm, weight_kg
               FROM biodata WHERE email = ?1",
              rusqlite::params![email],
              |row| {
                Ok(RawBiodata {
                  email:          row.get(0)?,
                  birth_place:    row.get(1)?,
                  birth_date:     row.get(2)?,
                  blood_type:     row.get(3)?,
                  marital_status: row.get(4)?,
                  occupation:     row.get(5)?,
                  ethnicity:      row.get(6)?,
                  education:      row.get(7)?,
                  hobbies:        row.get(8)?,
                  motto:          row.get(9)?,
                  phone:          row.get(10)?,
                  address:        row.get(11)?,
                  height_cm:      row.get(12)?,
                  weight_kg:      row.get(13)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawBiodata::into_biodata).transpose()
  }

  async fn get_criteria(&self, email: &str) -> Result<Option<PartnerCriteria>> {
    let email = email.to_owned();

    let raw: Option<RawCriteria> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT email, age_min, age_max, marital_status, education, other
               FROM partner_criteria WHERE email = ?1",
              rusqlite::params![email],
              |row| {
                Ok(RawCriteria {
                  email:          row.get(0)?,
                  age_min:        row.get(1)?,
                  age_max:        row.get(2)?,
                  marital_status: row.get(3)?,
                  education:      row.get(4)?,
                  other:          row.get(5)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    Ok(raw.map(RawCriteria::into_criteria))
  }
}

// ─── ProgressStore impl ──────────────────────────────────────────────────────

impl ProgressStore for SqliteStore {
  type Error = Error;

  async fn insert_progress(
    &self,
    initiator_email: &str,
    target_email: &str,
  ) -> Result<InsertOutcome> {
    let record = ProgressRecord {
      progress_id:      Uuid::new_v4(),
      initiator_email:  initiator_email.to_owned(),
      target_email:     target_email.to_owned(),
      initiator_status: PartyStatus::Pending,
      target_status:    PartyStatus::Pending,
      created_at:       Utc::now(),
      updated_at:       Utc::now(),
    };

    let (lo, hi) = pair_key(initiator_email, target_email);
    let id_str    = encode_uuid(record.progress_id);
    let initiator = record.initiator_email.clone();
    let target    = record.target_email.clone();
    let lo        = lo.to_owned();
    let hi        = hi.to_owned();
    let at_str    = encode_dt(record.created_at);

    // A losing racer hits the UNIQUE (pair_lo, pair_hi) constraint; the
    // insert and the fallback read run on the same serialised connection.
    let existing: Option<RawProgress> = self
      .conn
      .call(move |conn| {
        let inserted = conn.execute(
          "INSERT INTO progress (
             progress_id, initiator_email, target_email, pair_lo, pair_hi,
             initiator_status, target_status, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, 'pending', 'pending', ?6, ?6)",
          rusqlite::params![id_str, initiator, target, lo, hi, at_str],
        );

        match inserted {
          Ok(_) => Ok(None),
          Err(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
          {
            let raw = conn.query_row(
              &format!(
                "SELECT {PROGRESS_COLUMNS} FROM progress
                 WHERE pair_lo = ?1 AND pair_hi = ?2"
              ),
              rusqlite::params![lo, hi],
              progress_from_row,
            )?;
            Ok(Some(raw))
          }
          Err(e) => Err(e.into()),
        }
      })
      .await?;

    match existing {
      Some(raw) => Ok(InsertOutcome::Existing(raw.into_record()?)),
      None => Ok(InsertOutcome::Created(record)),
    }
  }

  async fn get_progress(&self, progress_id: Uuid) -> Result<Option<ProgressRecord>> {
    let id_str = encode_uuid(progress_id);

    let raw: Option<RawProgress> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {PROGRESS_COLUMNS} FROM progress WHERE progress_id = ?1"
              ),
              rusqlite::params![id_str],
              progress_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawProgress::into_record).transpose()
  }

  async fn find_by_pair(&self, a: &str, b: &str) -> Result<Option<ProgressRecord>> {
    let (lo, hi) = pair_key(a, b);
    let lo = lo.to_owned();
    let hi = hi.to_owned();

    let raw: Option<RawProgress> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {PROGRESS_COLUMNS} FROM progress
                 WHERE pair_lo = ?1 AND pair_hi = ?2"
              ),
              rusqlite::params![lo, hi],
              progress_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawProgress::into_record).transpose()
  }

  async fn set_party_status(
    &self,
    progress_id: Uuid,
    role: Role,
    status: PartyStatus,
  ) -> Result<Option<ProgressRecord>> {
    let id_str     = encode_uuid(progress_id);
    let status_str = status.as_str().to_owned();
    let now_str    = encode_dt(Utc::now());
    let column     = match role {
      Role::Initiator => "initiator_status",
      Role::Target => "target_status",
    };

    // Single-column update plus re-read in one connection call: the
    // sibling field is never clobbered and the returned record reflects
    // the committed write.
    let raw: Option<RawProgress> = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          &format!(
            "UPDATE progress SET {column} = ?2, updated_at = ?3
             WHERE progress_id = ?1"
          ),
          rusqlite::params![id_str, status_str, now_str],
        )?;

        if n == 0 {
          return Ok(None);
        }

        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {PROGRESS_COLUMNS} FROM progress WHERE progress_id = ?1"
              ),
              rusqlite::params![id_str],
              progress_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawProgress::into_record).transpose()
  }

  async fn list_active_for(&self, email: &str) -> Result<Vec<ProgressRecord>> {
    let email = email.to_owned();

    let raws: Vec<RawProgress> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {PROGRESS_COLUMNS} FROM progress
           WHERE (initiator_email = ?1 OR target_email = ?1)
             AND initiator_status != 'dislike'
             AND target_status != 'dislike'
           ORDER BY created_at, progress_id"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![email], progress_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawProgress::into_record).collect()
  }

  async fn list_all_for(&self, email: &str) -> Result<Vec<ProgressRecord>> {
    let email = email.to_owned();

    let raws: Vec<RawProgress> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {PROGRESS_COLUMNS} FROM progress
           WHERE initiator_email = ?1 OR target_email = ?1
           ORDER BY created_at, progress_id"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![email], progress_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawProgress::into_record).collect()
  }
}

// ─── MessageStore impl ───────────────────────────────────────────────────────

impl MessageStore for SqliteStore {
  type Error = Error;

  async fn append_message(
    &self,
    progress_id: Uuid,
    sender_email: &str,
    body: &str,
  ) -> Result<ChatMessage> {
    let message = ChatMessage {
      message_id:   Uuid::new_v4(),
      progress_id,
      sender_email: sender_email.to_owned(),
      body:         body.to_owned(),
      created_at:   Utc::now(),
    };

    let id_str       = encode_uuid(message.message_id);
    let progress_str = encode_uuid(progress_id);
    let sender       = message.sender_email.clone();
    let body         = message.body.clone();
    let at_str       = encode_dt(message.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO chat_messages (
             message_id, progress_id, sender_email, body, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, progress_str, sender, body, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(message)
  }

  async fn list_messages(&self, progress_id: Uuid) -> Result<Vec<ChatMessage>> {
    let progress_str = encode_uuid(progress_id);

    let raws: Vec<RawMessage> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT message_id, progress_id, sender_email, body, created_at
           FROM chat_messages
           WHERE progress_id = ?1
           ORDER BY created_at, message_id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![progress_str], |row| {
            Ok(RawMessage {
              message_id:   row.get(0)?,
              progress_id:  row.get(1)?,
              sender_email: row.get(2)?,
              body:         row.get(3)?,
              created_at:   row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawMessage::into_message).collect()
  }
}

// ─── AuthStore impl ──────────────────────────────────────────────────────────

impl AuthStore for SqliteStore {
  type Error = Error;

  async fn password_hash(&self, email: &str) -> Result<Option<String>> {
    let email = email.to_owned();

    Ok(
      self
        .conn
        .call(move |conn| {
          Ok(
            conn
              .query_row(
                "SELECT password_hash FROM users WHERE email = ?1",
                rusqlite::params![email],
                |row| row.get(0),
              )
              .optional()?,
          )
        })
        .await?,
    )
  }

  async fn insert_token(&self, email: &str, token_hash: &str) -> Result<()> {
    let email      = email.to_owned();
    let token_hash = token_hash.to_owned();
    let at_str     = encode_dt(Utc::now());

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO auth_tokens (token_hash, email, created_at)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![token_hash, email, at_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn resolve_token(&self, token_hash: &str) -> Result<Option<User>> {
    let token_hash = token_hash.to_owned();

    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT u.email, u.employee_id, u.name, u.gender, u.approval,
                      u.photo, u.created_at
               FROM auth_tokens t
               JOIN users u ON u.email = t.email
               WHERE t.token_hash = ?1",
              rusqlite::params![token_hash],
              user_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }
}
