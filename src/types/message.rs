use serde::{Deserialize, Serialize};

use crate::types::Sender;
use crate::utils::time::display_timestamp;

/// A single entry in the transcript.
///
/// Messages are immutable once appended. The timestamp is meant for display
/// and is not guaranteed to sort chronologically as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Who wrote the message.
    #[serde(rename = "user")]
    pub sender: Sender,

    /// The message body.
    pub text: String,

    /// Local time the message was created, formatted for display.
    pub timestamp: String,
}

impl Message {
    /// Creates a message stamped with the current local time.
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self::with_timestamp(sender, text, display_timestamp())
    }

    /// Creates a message with an explicit display timestamp.
    pub fn with_timestamp(
        sender: Sender,
        text: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            sender,
            text: text.into(),
            timestamp: timestamp.into(),
        }
    }

    /// Creates a user message stamped now.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    /// Creates an assistant message stamped now.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Sender::Assistant, text)
    }

    /// Returns true if the assistant wrote this message.
    pub fn is_assistant(&self) -> bool {
        self.sender.is_assistant()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};

    #[test]
    fn message_wire_shape() {
        let message = Message::with_timestamp(Sender::User, "hi", "1/2/2026, 10:00:00");
        assert_eq!(
            to_value(&message).unwrap(),
            json!({
                "user": "You",
                "text": "hi",
                "timestamp": "1/2/2026, 10:00:00"
            })
        );
    }

    #[test]
    fn constructors_set_sender() {
        assert!(Message::assistant("a").is_assistant());
        assert!(!Message::user("u").is_assistant());
        assert!(!Message::user("u").timestamp.is_empty());
    }
}
