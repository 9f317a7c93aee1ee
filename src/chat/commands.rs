//! Slash command parsing for the chat application.
//!
//! This module handles parsing of special commands that start with `/`,
//! allowing users to act on the session without sending anything to the
//! proxy.

/// A parsed chat command.
///
/// Message positions are 1-based; `None` means the last message.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatCommand {
    /// Re-submit the text of the most recent message.
    Regenerate,

    /// Switch between light and dark mode.
    ToggleTheme,

    /// Show the document sidebar again.
    Documents,

    /// Copy a message to the clipboard.
    Copy(Option<usize>),

    /// Share a message.
    Share(Option<usize>),

    /// Leave feedback on an assistant message.
    Feedback {
        /// Which message.
        position: Option<usize>,
        /// The feedback text.
        text: String,
    },

    /// List the transcript with positions.
    History,

    /// Display session statistics.
    Stats,

    /// Display help information.
    Help,

    /// Exit the chat application.
    Quit,

    /// Report a parsing error back to the caller.
    Invalid(String),
}

/// Parses user input for slash commands.
///
/// Returns `Some(ChatCommand)` if the input is a command, or `None` if it
/// should be submitted as a regular message.
///
/// # Examples
///
/// ```
/// # use bayard::chat::{ChatCommand, parse_command};
/// assert_eq!(parse_command("/quit"), Some(ChatCommand::Quit));
/// assert_eq!(parse_command("/copy 2"), Some(ChatCommand::Copy(Some(2))));
/// assert!(parse_command("What did Audre Lorde write about anger?").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let input = input.trim();

    if !input.starts_with('/') {
        return None;
    }

    let mut parts = input[1..].splitn(2, ' ');
    let command = parts.next()?.to_lowercase();
    let argument = parts.next().map(|s| s.trim()).filter(|s| !s.is_empty());

    let result = match command.as_str() {
        "regenerate" | "retry" => ChatCommand::Regenerate,
        "theme" | "dark" => ChatCommand::ToggleTheme,
        "docs" | "documents" => ChatCommand::Documents,
        "copy" => match parse_position(argument, "/copy") {
            Ok(position) => ChatCommand::Copy(position),
            Err(err) => ChatCommand::Invalid(err),
        },
        "share" => match parse_position(argument, "/share") {
            Ok(position) => ChatCommand::Share(position),
            Err(err) => ChatCommand::Invalid(err),
        },
        "feedback" => parse_feedback_command(argument),
        "history" => ChatCommand::History,
        "stats" | "status" => ChatCommand::Stats,
        "help" | "?" => ChatCommand::Help,
        "quit" | "exit" | "q" => ChatCommand::Quit,
        _ => ChatCommand::Invalid(format!("Unknown command: /{}", command)),
    };

    Some(result)
}

fn parse_position(argument: Option<&str>, command: &str) -> Result<Option<usize>, String> {
    match argument {
        None => Ok(None),
        Some(arg) => match arg.parse::<usize>() {
            Ok(0) | Err(_) => Err(format!("{command} expects a message number (1, 2, ...)")),
            Ok(position) => Ok(Some(position)),
        },
    }
}

fn parse_feedback_command(argument: Option<&str>) -> ChatCommand {
    let Some(arg) = argument else {
        return ChatCommand::Invalid("/feedback requires feedback text".to_string());
    };

    let mut parts = arg.splitn(2, ' ');
    let first = parts.next().unwrap_or_default();
    match first.parse::<usize>() {
        Ok(0) => ChatCommand::Invalid("/feedback expects a message number (1, 2, ...)".to_string()),
        Ok(position) => match parts.next().map(|s| s.trim()).filter(|s| !s.is_empty()) {
            Some(text) => ChatCommand::Feedback {
                position: Some(position),
                text: text.to_string(),
            },
            None => ChatCommand::Invalid("/feedback requires feedback text".to_string()),
        },
        Err(_) => ChatCommand::Feedback {
            position: None,
            text: arg.to_string(),
        },
    }
}

/// Returns help text describing available commands.
pub fn help_text() -> &'static str {
    r#"Available commands:
  /regenerate         Ask again with the most recent message (alias: /retry)
  /theme              Toggle light/dark mode
  /docs               Show the documents from the latest answer
  /copy [n]           Copy message n (default: last) to the clipboard
  /share [n]          Share message n (default: last)
  /feedback [n] TEXT  Leave feedback on assistant message n (default: last)
  /history            List the conversation with message numbers
  /stats              Show session statistics
  /help               Show this help message
  /quit               Exit the chat (aliases: /exit, /q)

Press Ctrl+C while an answer is typing out to show it in full."#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_non_command() {
        assert!(parse_command("Hello").is_none());
        assert!(parse_command("  spaced text ").is_none());
        assert!(parse_command("").is_none());
    }

    #[test]
    fn parse_simple_commands() {
        assert_eq!(parse_command("/regenerate"), Some(ChatCommand::Regenerate));
        assert_eq!(parse_command("/retry"), Some(ChatCommand::Regenerate));
        assert_eq!(parse_command("/theme"), Some(ChatCommand::ToggleTheme));
        assert_eq!(parse_command("/docs"), Some(ChatCommand::Documents));
        assert_eq!(parse_command("/history"), Some(ChatCommand::History));
        assert_eq!(parse_command("/status"), Some(ChatCommand::Stats));
        assert_eq!(parse_command("/?"), Some(ChatCommand::Help));
        assert_eq!(parse_command("/EXIT"), Some(ChatCommand::Quit));
    }

    #[test]
    fn parse_positions() {
        assert_eq!(parse_command("/copy"), Some(ChatCommand::Copy(None)));
        assert_eq!(parse_command("/copy 3"), Some(ChatCommand::Copy(Some(3))));
        assert_eq!(parse_command("/share 1"), Some(ChatCommand::Share(Some(1))));
        assert!(matches!(
            parse_command("/copy 0"),
            Some(ChatCommand::Invalid(_))
        ));
        assert!(matches!(
            parse_command("/share last"),
            Some(ChatCommand::Invalid(_))
        ));
    }

    #[test]
    fn parse_feedback() {
        assert_eq!(
            parse_command("/feedback great sources"),
            Some(ChatCommand::Feedback {
                position: None,
                text: "great sources".to_string()
            })
        );
        assert_eq!(
            parse_command("/feedback 4 missed the point"),
            Some(ChatCommand::Feedback {
                position: Some(4),
                text: "missed the point".to_string()
            })
        );
        assert!(matches!(
            parse_command("/feedback"),
            Some(ChatCommand::Invalid(_))
        ));
        assert!(matches!(
            parse_command("/feedback 2"),
            Some(ChatCommand::Invalid(_))
        ));
    }

    #[test]
    fn parse_unknown_command() {
        assert_eq!(
            parse_command("/model foo"),
            Some(ChatCommand::Invalid("Unknown command: /model".to_string()))
        );
    }

    #[test]
    fn help_lists_commands() {
        let help = help_text();
        for command in ["/regenerate", "/theme", "/copy", "/share", "/feedback", "/quit"] {
            assert!(help.contains(command), "missing {command}");
        }
    }
}
