//! SQLite backend for the ta'aruf matching service.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated
//! thread pool without blocking the async runtime. One database file
//! backs every storage trait the core consumes.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{NewUser, SqliteStore};

#[cfg(test)]
mod tests;
