//! The matching core: discovery filtering, the progress state machine,
//! and the chat gate.
//!
//! Everything here is generic over the storage traits in
//! [`taaruf_core::store`]; transport, auth, and persistence concerns live
//! in other crates.

pub mod chat;
pub mod discovery;
pub mod error;
pub mod progress;

pub use chat::ChatGate;
pub use discovery::DiscoveryFilter;
pub use error::{Error, Result};
pub use progress::ProgressEngine;
