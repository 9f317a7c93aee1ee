//! Chat session for the Bayard research assistant.
//!
//! This module provides the session controller and the REPL plumbing built
//! on top of the proxy client. It supports:
//!
//! - A simulated three-phase loading indicator around each request
//! - A typewriter reveal of the newest answer
//! - Copy, share, and feedback actions on messages
//! - Slash commands for session control
//!
//! # Architecture
//!
//! - [`session`]: the [`ChatController`] and its submission lifecycle
//! - [`state`]: the transcript and the rest of the session state
//! - [`reveal`]: the typewriter reveal
//! - [`affordances`]: clipboard and share targets
//! - [`config`]: CLI argument parsing and configuration
//! - [`commands`]: slash command parsing

pub mod affordances;
mod commands;
mod config;
pub mod reveal;
mod session;
pub mod state;

pub use crate::render::{PlainTextRenderer, Renderer, Toast};
pub use affordances::{Clipboard, Osc52Clipboard, ShareTarget, UnsupportedShare};
pub use commands::{ChatCommand, help_text, parse_command};
pub use config::{ChatArgs, ChatConfig, Pacing};
pub use reveal::RevealAnimator;
pub use session::{ChatController, SessionStats, SubmitOutcome};
pub use state::{SessionState, Transcript};
