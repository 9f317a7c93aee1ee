//! Terminal client for the Bayard research assistant.
//!
//! A [`chat::ChatController`] owns one chat session: it appends the user's
//! message, walks the loading phases, asks the Bayard proxy for an answer,
//! and reveals the answer one character at a time. Documents retrieved with
//! each answer replace the previous set and are rendered as a sidebar.

// Public modules
pub mod chat;
pub mod client;
pub mod client_logger;
pub mod error;
pub mod render;
pub mod types;
pub mod utils;

mod observability;

// Re-exports
pub use client::{Proxy, ProxyClient};
pub use client_logger::{ClientLogger, NullLogger, StderrLogger};
pub use error::{Error, Result};
pub use observability::register_biometrics;
pub use types::*;
