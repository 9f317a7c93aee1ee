//! Session state owned by the chat controller.

use crate::chat::reveal::RevealAnimator;
use crate::types::{Document, Message, Phase, Theme};

/// Append-only, in-memory record of the conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// Creates an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message. Messages are never edited or removed afterwards.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// All messages in order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The most recent message of any sender.
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// The most recent assistant message.
    pub fn last_assistant(&self) -> Option<&Message> {
        self.messages.iter().rev().find(|m| m.is_assistant())
    }

    /// Message by 1-based position, as shown to the user.
    pub fn get(&self, position: usize) -> Option<&Message> {
        position
            .checked_sub(1)
            .and_then(|index| self.messages.get(index))
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// True if nothing has been said yet.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Everything the chat shows, in one place.
///
/// `documents` always belongs to the most recent completed exchange.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// The conversation so far.
    pub transcript: Transcript,
    /// Documents returned with the latest answer.
    pub documents: Vec<Document>,
    /// True while a submission is in flight.
    pub loading: bool,
    /// Loading indicator stage, present only while loading.
    pub phase: Option<Phase>,
    /// Text typed but not yet submitted.
    pub draft: String,
    /// Reveal progress of the newest assistant message.
    pub reveal: RevealAnimator,
    /// Current colour scheme.
    pub theme: Theme,
    /// Token of the submission currently in flight.
    pub(crate) in_flight: Option<u64>,
    pub(crate) next_token: u64,
}

impl SessionState {
    /// Creates an empty session with the given theme.
    pub fn with_theme(theme: Theme) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }

    /// True if a submission holds the busy token.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Claim the busy token, or `None` if a submission is already running.
    pub(crate) fn begin_submission(&mut self) -> Option<u64> {
        if self.in_flight.is_some() {
            return None;
        }
        let token = self.next_token;
        self.next_token = self.next_token.wrapping_add(1);
        self.in_flight = Some(token);
        self.loading = true;
        self.phase = Some(Phase::Thinking);
        Some(token)
    }

    /// Release the busy token and clear the loading indicator.
    ///
    /// A stale token is ignored.
    pub(crate) fn end_submission(&mut self, token: u64) {
        if self.in_flight == Some(token) {
            self.in_flight = None;
            self.loading = false;
            self.phase = None;
        }
    }

    /// Record an answer: append it, replace the documents, start the reveal.
    pub(crate) fn accept_answer(&mut self, message: Message, documents: Vec<Document>) {
        self.reveal.start(&message.text);
        self.transcript.push(message);
        self.documents = documents;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcript_positions_are_one_based() {
        let mut transcript = Transcript::new();
        transcript.push(Message::user("first"));
        transcript.push(Message::assistant("second"));
        assert_eq!(transcript.get(0), None);
        assert_eq!(transcript.get(1).map(|m| m.text.as_str()), Some("first"));
        assert_eq!(transcript.get(2).map(|m| m.text.as_str()), Some("second"));
        assert_eq!(transcript.get(3), None);
    }

    #[test]
    fn last_assistant_skips_user_messages() {
        let mut transcript = Transcript::new();
        transcript.push(Message::assistant("answer"));
        transcript.push(Message::user("follow-up"));
        assert_eq!(transcript.last().map(|m| m.text.as_str()), Some("follow-up"));
        assert_eq!(
            transcript.last_assistant().map(|m| m.text.as_str()),
            Some("answer")
        );
    }

    #[test]
    fn busy_token_is_exclusive() {
        let mut state = SessionState::default();
        let token = state.begin_submission().unwrap();
        assert!(state.is_busy());
        assert!(state.loading);
        assert_eq!(state.phase, Some(Phase::Thinking));
        assert_eq!(state.begin_submission(), None);

        state.end_submission(token);
        assert!(!state.is_busy());
        assert!(!state.loading);
        assert_eq!(state.phase, None);
        assert_eq!(state.begin_submission(), Some(token + 1));
    }

    #[test]
    fn stale_token_does_not_clear() {
        let mut state = SessionState::default();
        let token = state.begin_submission().unwrap();
        state.end_submission(token.wrapping_add(7));
        assert!(state.loading);
    }

    #[test]
    fn answer_replaces_documents() {
        let mut state = SessionState::default();
        state.accept_answer(
            Message::assistant("one"),
            vec![Document::new("a"), Document::new("b")],
        );
        state.accept_answer(Message::assistant("two"), vec![Document::new("c")]);
        assert_eq!(state.documents, vec![Document::new("c")]);
        assert_eq!(state.transcript.len(), 2);
        assert_eq!(state.reveal.target(), "two");
    }
}
