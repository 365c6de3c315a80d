//! Core types and trait definitions for the ta'aruf matching service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod chat;
pub mod error;
pub mod profile;
pub mod progress;
pub mod store;
pub mod user;

pub use error::{Error, Result};
