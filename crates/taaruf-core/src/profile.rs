//! Profile records — biodata and partner criteria, keyed by email.
//!
//! Both records are owned by the profile store and consumed read-only by
//! the matching core for candidate display.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Self-description filled in by the user after approval.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Biodata {
  pub email:          String,
  pub birth_place:    Option<String>,
  pub birth_date:     Option<NaiveDate>,
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

/// What the user is looking for in a partner. Free-form apart from the
/// age range; the core displays it, it never filters on it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartnerCriteria {
  pub email:          String,
  pub age_min:        Option<u8>,
  pub age_max:        Option<u8>,
  pub marital_status: Option<String>,
  pub education:      Option<String>,
  pub other:          Option<String>,
}
