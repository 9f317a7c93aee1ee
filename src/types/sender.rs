use std::fmt;

use serde::{Deserialize, Serialize};

/// Who authored a transcript message.
///
/// The serialized form is the display name shown next to each message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sender {
    /// The person typing into the chat.
    #[serde(rename = "You")]
    User,

    /// The research assistant behind the proxy.
    #[serde(rename = "Bayard")]
    Assistant,
}

impl Sender {
    /// Returns the display name for this sender.
    pub fn display_name(&self) -> &'static str {
        match self {
            Sender::User => "You",
            Sender::Assistant => "Bayard",
        }
    }

    /// Returns true for the assistant.
    pub fn is_assistant(&self) -> bool {
        matches!(self, Sender::Assistant)
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};

    #[test]
    fn sender_serializes_as_display_name() {
        assert_eq!(to_value(Sender::User).unwrap(), json!("You"));
        assert_eq!(to_value(Sender::Assistant).unwrap(), json!("Bayard"));
    }

    #[test]
    fn sender_deserializes_from_display_name() {
        let sender: Sender = serde_json::from_value(json!("Bayard")).unwrap();
        assert_eq!(sender, Sender::Assistant);
    }
}
