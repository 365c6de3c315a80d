//! Integration tests for `SqliteStore` against an in-memory database.

use taaruf_core::{
  profile::{Biodata, PartnerCriteria},
  progress::{PartyStatus, Role},
  store::{AuthStore, MessageStore, ProfileStore, ProgressStore, UserDirectory},
  user::{ApprovalStatus, Gender},
};
use uuid::Uuid;

use crate::{NewUser, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn new_user(email: &str, gender: Gender, approval: ApprovalStatus) -> NewUser {
  NewUser {
    email:         email.to_owned(),
    employee_id:   format!("nip-{email}"),
    name:          email.split('@').next().unwrap().to_owned(),
    gender,
    approval,
    photo:         None,
    password_hash: "$argon2id$stub".to_owned(),
  }
}

async fn seed_pair(s: &SqliteStore) -> (String, String) {
  s.add_user(new_user("adam@x.com", Gender::Male, ApprovalStatus::Approved))
    .await
    .unwrap();
  s.add_user(new_user("hawa@x.com", Gender::Female, ApprovalStatus::Approved))
    .await
    .unwrap();
  ("adam@x.com".to_owned(), "hawa@x.com".to_owned())
}

// ─── Users ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_find_user() {
  let s = store().await;
  s.add_user(new_user("adam@x.com", Gender::Male, ApprovalStatus::Pending))
    .await
    .unwrap();

  let found = s.find_user("adam@x.com").await.unwrap().unwrap();
  assert_eq!(found.email, "adam@x.com");
  assert_eq!(found.gender, Gender::Male);
  assert_eq!(found.approval, ApprovalStatus::Pending);

  assert!(s.find_user("nobody@x.com").await.unwrap().is_none());
}

#[tokio::test]
async fn list_approved_filters_gender_and_approval() {
  let s = store().await;
  s.add_user(new_user("a@x.com", Gender::Male, ApprovalStatus::Approved))
    .await
    .unwrap();
  s.add_user(new_user("b@x.com", Gender::Female, ApprovalStatus::Approved))
    .await
    .unwrap();
  s.add_user(new_user("c@x.com", Gender::Female, ApprovalStatus::Pending))
    .await
    .unwrap();

  let women = s.list_approved_by_gender(Gender::Female).await.unwrap();
  assert_eq!(women.len(), 1);
  assert_eq!(women[0].email, "b@x.com");
}

#[tokio::test]
async fn set_approval_flips_listing() {
  let s = store().await;
  s.add_user(new_user("c@x.com", Gender::Female, ApprovalStatus::Pending))
    .await
    .unwrap();

  assert!(s.set_approval("c@x.com", ApprovalStatus::Approved).await.unwrap());
  let women = s.list_approved_by_gender(Gender::Female).await.unwrap();
  assert_eq!(women.len(), 1);

  assert!(!s.set_approval("ghost@x.com", ApprovalStatus::Approved).await.unwrap());
}

// ─── Profiles ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn biodata_roundtrip() {
  let s = store().await;
  let (adam, _) = seed_pair(&s).await;

  s.upsert_biodata(Biodata {
    email: adam.clone(),
    occupation: Some("engineer".into()),
    height_cm: Some(172),
    ..Default::default()
  })
  .await
  .unwrap();

  let bio = s.get_biodata(&adam).await.unwrap().unwrap();
  assert_eq!(bio.occupation.as_deref(), Some("engineer"));
  assert_eq!(bio.height_cm, Some(172));
  assert!(bio.birth_date.is_none());

  assert!(s.get_biodata("nobody@x.com").await.unwrap().is_none());
}

#[tokio::test]
async fn criteria_roundtrip() {
  let s = store().await;
  let (_, hawa) = seed_pair(&s).await;

  s.upsert_criteria(PartnerCriteria {
    email: hawa.clone(),
    age_min: Some(25),
    age_max: Some(35),
    ..Default::default()
  })
  .await
  .unwrap();

  let crit = s.get_criteria(&hawa).await.unwrap().unwrap();
  assert_eq!(crit.age_min, Some(25));
  assert_eq!(crit.age_max, Some(35));
}

// ─── Progress ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_progress_then_duplicate_returns_existing() {
  let s = store().await;
  let (adam, hawa) = seed_pair(&s).await;

  let first = s.insert_progress(&adam, &hawa).await.unwrap();
  assert!(first.is_created());
  let record = first.record().clone();
  assert_eq!(record.initiator_status, PartyStatus::Pending);
  assert_eq!(record.target_status, PartyStatus::Pending);

  // Same orientation.
  let again = s.insert_progress(&adam, &hawa).await.unwrap();
  assert!(!again.is_created());
  assert_eq!(again.record().progress_id, record.progress_id);

  // Reversed orientation hits the same pair key.
  let reversed = s.insert_progress(&hawa, &adam).await.unwrap();
  assert!(!reversed.is_created());
  assert_eq!(reversed.record().progress_id, record.progress_id);
  assert_eq!(reversed.record().initiator_email, adam);
}

#[tokio::test]
async fn concurrent_inserts_collapse_to_one_record() {
  let s = store().await;
  let (adam, hawa) = seed_pair(&s).await;

  let (a, b) = tokio::join!(
    s.insert_progress(&adam, &hawa),
    s.insert_progress(&hawa, &adam),
  );
  let a = a.unwrap();
  let b = b.unwrap();

  assert_eq!(a.record().progress_id, b.record().progress_id);
  assert!(a.is_created() ^ b.is_created());

  let found = s.find_by_pair(&hawa, &adam).await.unwrap().unwrap();
  assert_eq!(found.progress_id, a.record().progress_id);
}

#[tokio::test]
async fn set_party_status_touches_one_side_only() {
  let s = store().await;
  let (adam, hawa) = seed_pair(&s).await;
  let record = s.insert_progress(&adam, &hawa).await.unwrap().record().clone();

  let updated = s
    .set_party_status(record.progress_id, Role::Target, PartyStatus::Like)
    .await
    .unwrap()
    .unwrap();
  assert_eq!(updated.initiator_status, PartyStatus::Pending);
  assert_eq!(updated.target_status, PartyStatus::Like);
  assert!(!updated.is_matched());

  let updated = s
    .set_party_status(record.progress_id, Role::Initiator, PartyStatus::Like)
    .await
    .unwrap()
    .unwrap();
  assert!(updated.is_matched());
}

#[tokio::test]
async fn concurrent_status_writes_both_persist() {
  let s = store().await;
  let (adam, hawa) = seed_pair(&s).await;
  let record = s.insert_progress(&adam, &hawa).await.unwrap().record().clone();

  let (a, b) = tokio::join!(
    s.set_party_status(record.progress_id, Role::Initiator, PartyStatus::Like),
    s.set_party_status(record.progress_id, Role::Target, PartyStatus::Like),
  );
  a.unwrap().unwrap();
  b.unwrap().unwrap();

  let fresh = s.get_progress(record.progress_id).await.unwrap().unwrap();
  assert_eq!(fresh.initiator_status, PartyStatus::Like);
  assert_eq!(fresh.target_status, PartyStatus::Like);
  assert!(fresh.is_matched());
}

#[tokio::test]
async fn set_party_status_unknown_id_returns_none() {
  let s = store().await;
  let result = s
    .set_party_status(Uuid::new_v4(), Role::Initiator, PartyStatus::Like)
    .await
    .unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn active_listing_hides_rejected_but_all_keeps_them() {
  let s = store().await;
  let (adam, hawa) = seed_pair(&s).await;
  s.add_user(new_user("siti@x.com", Gender::Female, ApprovalStatus::Approved))
    .await
    .unwrap();

  let first = s.insert_progress(&adam, &hawa).await.unwrap().record().clone();
  let second = s
    .insert_progress(&adam, "siti@x.com")
    .await
    .unwrap()
    .record()
    .clone();

  s.set_party_status(first.progress_id, Role::Target, PartyStatus::Dislike)
    .await
    .unwrap();

  let active = s.list_active_for(&adam).await.unwrap();
  assert_eq!(active.len(), 1);
  assert_eq!(active[0].progress_id, second.progress_id);

  let all = s.list_all_for(&adam).await.unwrap();
  assert_eq!(all.len(), 2);
}

// ─── Messages ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn append_and_list_messages_in_order() {
  let s = store().await;
  let (adam, hawa) = seed_pair(&s).await;
  let record = s.insert_progress(&adam, &hawa).await.unwrap().record().clone();

  s.append_message(record.progress_id, &adam, "assalamu'alaikum")
    .await
    .unwrap();
  s.append_message(record.progress_id, &hawa, "wa'alaikumussalam")
    .await
    .unwrap();

  let messages = s.list_messages(record.progress_id).await.unwrap();
  assert_eq!(messages.len(), 2);
  assert_eq!(messages[0].sender_email, adam);
  assert_eq!(messages[0].body, "assalamu'alaikum");
  assert_eq!(messages[1].sender_email, hawa);

  assert!(s.list_messages(Uuid::new_v4()).await.unwrap().is_empty());
}

// ─── Tokens ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn token_resolves_to_its_user() {
  let s = store().await;
  let (adam, _) = seed_pair(&s).await;

  s.insert_token(&adam, "digest-1").await.unwrap();

  let user = s.resolve_token("digest-1").await.unwrap().unwrap();
  assert_eq!(user.email, adam);

  assert!(s.resolve_token("digest-2").await.unwrap().is_none());
}

#[tokio::test]
async fn password_hash_lookup() {
  let s = store().await;
  let (adam, _) = seed_pair(&s).await;

  let hash = s.password_hash(&adam).await.unwrap().unwrap();
  assert_eq!(hash, "$argon2id$stub");
  assert!(s.password_hash("nobody@x.com").await.unwrap().is_none());
}
