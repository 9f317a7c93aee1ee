//! Diagnostic logging for proxy traffic and user feedback.
//!
//! The chat never shows proxy failures in the transcript. They go to the
//! [`ClientLogger`] held by the controller instead, so an operator can see
//! why an answer did not appear.

use std::io::{self, Write};
use std::sync::Mutex;

use crate::Error;
use crate::types::{Message, ProxyRequest, ProxyResponse};

/// A trait for logging proxy interactions.
///
/// # Example
///
/// ```rust
/// use std::sync::Mutex;
/// use bayard::{ClientLogger, Error, Message, ProxyRequest, ProxyResponse};
///
/// #[derive(Default)]
/// struct CountingLogger {
///     failures: Mutex<usize>,
/// }
///
/// impl ClientLogger for CountingLogger {
///     fn log_request(&self, _: &ProxyRequest) {}
///     fn log_response(&self, _: &ProxyResponse) {}
///     fn log_failure(&self, _: &Error) {
///         *self.failures.lock().unwrap() += 1;
///     }
///     fn log_feedback(&self, _: &Message, _: &str) {}
/// }
/// ```
pub trait ClientLogger: Send + Sync {
    /// Log a request about to be sent to the proxy.
    fn log_request(&self, request: &ProxyRequest);

    /// Log a successful response.
    fn log_response(&self, response: &ProxyResponse);

    /// Log a failed submission. This is the only place failures surface.
    fn log_failure(&self, error: &Error);

    /// Log feedback the user left on an assistant message.
    fn log_feedback(&self, message: &Message, feedback: &str);
}

/// Writes one line per event to stderr.
pub struct StderrLogger {
    stderr: Mutex<io::Stderr>,
    verbose: bool,
}

impl StderrLogger {
    /// Creates a logger that records failures and feedback only.
    pub fn new() -> Self {
        Self {
            stderr: Mutex::new(io::stderr()),
            verbose: false,
        }
    }

    /// Creates a logger that also records every request and response.
    pub fn verbose() -> Self {
        Self {
            stderr: Mutex::new(io::stderr()),
            verbose: true,
        }
    }

    fn write_line(&self, line: &str) {
        if let Ok(mut stderr) = self.stderr.lock() {
            let _ = writeln!(stderr, "{line}");
        }
    }
}

impl Default for StderrLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientLogger for StderrLogger {
    fn log_request(&self, request: &ProxyRequest) {
        if self.verbose {
            self.write_line(&format!(
                "[bayard] request: {} chars",
                request.input_text.chars().count()
            ));
        }
    }

    fn log_response(&self, response: &ProxyResponse) {
        if self.verbose {
            self.write_line(&format!(
                "[bayard] response: {} chars, {} documents",
                response.model_output.chars().count(),
                response.documents.len()
            ));
        }
    }

    fn log_failure(&self, error: &Error) {
        self.write_line(&format!("[bayard] error: {error}"));
    }

    fn log_feedback(&self, message: &Message, feedback: &str) {
        self.write_line(&format!(
            "[bayard] feedback on message from {}: {feedback}",
            message.timestamp
        ));
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLogger;

impl ClientLogger for NullLogger {
    fn log_request(&self, _: &ProxyRequest) {}

    fn log_response(&self, _: &ProxyResponse) {}

    fn log_failure(&self, _: &Error) {}

    fn log_feedback(&self, _: &Message, _: &str) {}
}
