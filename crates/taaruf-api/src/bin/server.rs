//! taaruf-api server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens an
//! in-process SQLite store, and serves the matching API over HTTP.
//!
//! `--seed` populates a small demo directory (approved users of both
//! genders, password `password`) so the API is explorable immediately.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use argon2::{Argon2, PasswordHasher as _, password_hash::SaltString};
use chrono::NaiveDate;
use clap::Parser;
use rand_core::OsRng;
use taaruf_api::ServerConfig;
use taaruf_core::{
  profile::{Biodata, PartnerCriteria},
  user::{ApprovalStatus, Gender},
};
use taaruf_store_sqlite::{NewUser, SqliteStore};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Ta'aruf matching API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Seed a demo user directory before serving.
  #[arg(long)]
  seed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("TAARUF"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let store = SqliteStore::open(&server_cfg.store_path)
    .await
    .with_context(|| {
      format!("failed to open store at {:?}", server_cfg.store_path)
    })?;

  if cli.seed {
    seed_demo(&store).await.context("failed to seed demo data")?;
  }

  let app = taaruf_api::api_router(Arc::new(store))
    .layer(TraceLayer::new_for_http());
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

// ─── Demo seeding ────────────────────────────────────────────────────────────

async fn seed_demo(store: &SqliteStore) -> anyhow::Result<()> {
  let password_hash = hash_password("password")?;

  let users = [
    ("ahmad@company.example", "1001", "Ahmad Fauzi", Gender::Male),
    ("budi@company.example", "1002", "Budi Santoso", Gender::Male),
    ("aisyah@company.example", "2001", "Aisyah Putri", Gender::Female),
    ("fatimah@company.example", "2002", "Fatimah Zahra", Gender::Female),
  ];

  for (email, employee_id, name, gender) in users {
    // Re-seeding an existing database is fine; skip duplicates.
    let added = store
      .add_user(NewUser {
        email:         email.to_owned(),
        employee_id:   employee_id.to_owned(),
        name:          name.to_owned(),
        gender,
        approval:      ApprovalStatus::Approved,
        photo:         None,
        password_hash: password_hash.clone(),
      })
      .await;

    match added {
      Ok(user) => {
        store
          .upsert_biodata(Biodata {
            email:       user.email.clone(),
            birth_place: Some("Jakarta".to_owned()),
            birth_date:  NaiveDate::from_ymd_opt(1995, 6, 15),
            occupation:  Some("Staff".to_owned()),
            education:   Some("S1".to_owned()),
            ..Default::default()
          })
          .await?;
        store
          .upsert_criteria(PartnerCriteria {
            email:   user.email.clone(),
            age_min: Some(23),
            age_max: Some(35),
            ..Default::default()
          })
          .await?;
        tracing::info!(email = %user.email, "seeded demo user");
      }
      Err(e) => {
        tracing::debug!(email, error = %e, "skipping existing demo user");
      }
    }
  }

  Ok(())
}

fn hash_password(password: &str) -> anyhow::Result<String> {
  let salt = SaltString::generate(&mut OsRng);
  Ok(
    Argon2::default()
      .hash_password(password.as_bytes(), &salt)
      .map_err(|e| anyhow::anyhow!("argon2 error: {e}"))?
      .to_string(),
  )
}
