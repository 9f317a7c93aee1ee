//! Core chat session management.
//!
//! This module provides the [`ChatController`], which owns the session state
//! and runs each submission through its loading phases against a [`Proxy`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::chat::affordances::{Clipboard, ShareTarget, copy_message, share_message};
use crate::chat::config::Pacing;
use crate::chat::state::SessionState;
use crate::client::Proxy;
use crate::client_logger::ClientLogger;
use crate::error::Error;
use crate::observability::{
    SESSION_ANSWERS, SESSION_BUSY, SESSION_FAILURES, SESSION_IGNORED, SESSION_SUBMISSIONS,
};
use crate::render::{Renderer, Toast};
use crate::types::{Document, Message, Phase, ProxyRequest, ProxyResponse, Theme};

/// What became of a submission.
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// The input was blank; nothing happened.
    Ignored,
    /// Another submission was in flight; nothing happened.
    Busy,
    /// The assistant answered and the documents were replaced.
    Answered,
    /// The proxy failed. The user message stays, no answer is appended.
    Failed(Error),
}

impl SubmitOutcome {
    /// Returns true if an answer was appended.
    pub fn is_answered(&self) -> bool {
        matches!(self, SubmitOutcome::Answered)
    }
}

/// Aggregated stats for a chat session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStats {
    /// Messages in the transcript.
    pub message_count: usize,
    /// Messages typed by the user.
    pub user_messages: usize,
    /// Answers from the assistant.
    pub assistant_messages: usize,
    /// Documents from the latest answer.
    pub document_count: usize,
    /// Current colour scheme.
    pub theme: Theme,
    /// Whether a submission is in flight.
    pub loading: bool,
}

/// Owner of one chat session.
///
/// Cloning yields another handle to the same session. Every mutation goes
/// through an intent-level method; the lock is never held across an await.
pub struct ChatController<P: Proxy> {
    proxy: Arc<P>,
    state: Arc<Mutex<SessionState>>,
    pacing: Pacing,
    logger: Arc<dyn ClientLogger>,
}

impl<P: Proxy> Clone for ChatController<P> {
    fn clone(&self) -> Self {
        Self {
            proxy: Arc::clone(&self.proxy),
            state: Arc::clone(&self.state),
            pacing: self.pacing,
            logger: Arc::clone(&self.logger),
        }
    }
}

/// Clears the loading indicator when a submission ends, however it ends.
struct SubmissionGuard<'a> {
    state: &'a Mutex<SessionState>,
    token: u64,
}

impl Drop for SubmissionGuard<'_> {
    fn drop(&mut self) {
        lock_state(self.state).end_submission(self.token);
    }
}

fn lock_state(state: &Mutex<SessionState>) -> MutexGuard<'_, SessionState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl<P: Proxy> ChatController<P> {
    /// Creates a controller with an empty session.
    pub fn new(proxy: P, pacing: Pacing, logger: Arc<dyn ClientLogger>) -> Self {
        Self::with_state(proxy, pacing, logger, SessionState::default())
    }

    /// Creates a controller around existing state.
    pub fn with_state(
        proxy: P,
        pacing: Pacing,
        logger: Arc<dyn ClientLogger>,
        state: SessionState,
    ) -> Self {
        Self {
            proxy: Arc::new(proxy),
            state: Arc::new(Mutex::new(state)),
            pacing,
            logger,
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        lock_state(&self.state)
    }

    /// Submit user input and wait for the answer.
    ///
    /// The user message is appended before anything else happens. Phases
    /// advance on the configured delays; the proxy is queried once, between
    /// `Thinking...` and `Querying...`, and its reply is decoded only after
    /// the `Generating...` delay. Loading is cleared on every exit,
    /// including when this future is dropped.
    pub async fn submit(&self, text: &str, renderer: &mut dyn Renderer) -> SubmitOutcome {
        if text.trim().is_empty() {
            SESSION_IGNORED.click();
            return SubmitOutcome::Ignored;
        }

        let message = Message::user(text);
        let token = {
            let mut state = self.lock();
            let Some(token) = state.begin_submission() else {
                SESSION_BUSY.click();
                return SubmitOutcome::Busy;
            };
            state.transcript.push(message.clone());
            state.draft.clear();
            token
        };
        SESSION_SUBMISSIONS.click();
        let guard = SubmissionGuard {
            state: &self.state,
            token,
        };

        renderer.message_appended(&message);
        renderer.print_phase(Phase::Thinking);
        let outcome = self.exchange(text, token, renderer).await;

        drop(guard);
        renderer.clear_phase();
        outcome
    }

    async fn exchange(&self, text: &str, token: u64, renderer: &mut dyn Renderer) -> SubmitOutcome {
        tokio::time::sleep(self.pacing.thinking).await;
        self.advance(token, Phase::Querying, renderer);

        let request = ProxyRequest::new(text);
        self.logger.log_request(&request);
        let body = match self.proxy.query(&request).await {
            Ok(body) => body,
            Err(err) => return self.fail(err),
        };

        tokio::time::sleep(self.pacing.querying).await;
        self.advance(token, Phase::Generating, renderer);
        tokio::time::sleep(self.pacing.generating).await;

        let response = match ProxyResponse::from_slice(&body) {
            Ok(response) => response,
            Err(err) => return self.fail(err),
        };
        self.logger.log_response(&response);

        let ProxyResponse {
            model_output,
            documents,
        } = response;
        let answer = Message::assistant(model_output);
        self.lock().accept_answer(answer.clone(), documents.clone());
        renderer.message_appended(&answer);
        renderer.documents_replaced(&documents);
        SESSION_ANSWERS.click();
        SubmitOutcome::Answered
    }

    fn fail(&self, err: Error) -> SubmitOutcome {
        self.logger.log_failure(&err);
        SESSION_FAILURES.click();
        SubmitOutcome::Failed(err)
    }

    fn advance(&self, token: u64, phase: Phase, renderer: &mut dyn Renderer) {
        {
            let mut state = self.lock();
            if state.in_flight == Some(token) {
                state.phase = Some(phase);
            }
        }
        renderer.print_phase(phase);
    }

    /// Submit the text of the most recent message again.
    ///
    /// The text is appended as a new user message, duplicating whatever the
    /// last message said. An empty transcript is ignored.
    pub async fn regenerate(&self, renderer: &mut dyn Renderer) -> SubmitOutcome {
        let last = self.lock().transcript.last().map(|m| m.text.clone());
        match last {
            Some(text) => self.submit(&text, renderer).await,
            None => {
                SESSION_IGNORED.click();
                SubmitOutcome::Ignored
            }
        }
    }

    /// Switch between light and dark mode, returning the new theme.
    pub fn toggle_theme(&self) -> Theme {
        let mut state = self.lock();
        state.theme = state.theme.toggled();
        state.theme
    }

    /// Replace the unsent draft.
    pub fn set_draft(&self, draft: impl Into<String>) {
        self.lock().draft = draft.into();
    }

    /// Submit the current draft.
    pub async fn submit_draft(&self, renderer: &mut dyn Renderer) -> SubmitOutcome {
        let draft = self.lock().draft.clone();
        self.submit(&draft, renderer).await
    }

    /// Reveal the newest assistant message through `renderer`.
    ///
    /// Prints one character per reveal interval. Setting `interrupted`
    /// prints the rest at once. Stops early if a newer answer takes over.
    pub async fn play_reveal(&self, renderer: &mut dyn Renderer, interrupted: &AtomicBool) {
        let target = {
            let state = self.lock();
            if !state.reveal.is_active() {
                return;
            }
            state.reveal.target().to_string()
        };

        let mut printed = 0;
        loop {
            tokio::time::sleep(self.pacing.reveal_interval).await;
            let (chunk, done) = {
                let mut state = self.lock();
                if state.reveal.target() != target {
                    break;
                }
                if interrupted.load(Ordering::Relaxed) {
                    state.reveal.finish();
                } else {
                    state.reveal.step();
                }
                let shown = state.reveal.shown();
                let chunk = shown[printed..].to_string();
                printed = shown.len();
                (chunk, !state.reveal.is_active())
            };
            if !chunk.is_empty() {
                renderer.print_text(&chunk);
            }
            if done {
                break;
            }
        }
        renderer.finish_response();
    }

    /// Copy message `position` (1-based, default last) to the clipboard.
    pub fn copy(&self, position: Option<usize>, clipboard: &mut dyn Clipboard) -> Toast {
        match self.message(position) {
            Some(message) => copy_message(clipboard, &message.text),
            None => no_such_message(),
        }
    }

    /// Share message `position` (1-based, default last).
    pub fn share(&self, position: Option<usize>, target: &mut dyn ShareTarget) -> Toast {
        match self.message(position) {
            Some(message) => share_message(target, &message.text),
            None => no_such_message(),
        }
    }

    /// Record feedback on assistant message `position` (default last answer).
    pub fn feedback(&self, position: Option<usize>, feedback: &str) -> Toast {
        let message = match position {
            Some(_) => self.message(position),
            None => self.lock().transcript.last_assistant().cloned(),
        };
        match message {
            Some(message) if message.is_assistant() => {
                if feedback.trim().is_empty() {
                    return Toast::Notice("Feedback was empty; nothing submitted".to_string());
                }
                self.logger.log_feedback(&message, feedback);
                Toast::Success("Feedback submitted successfully".to_string())
            }
            Some(_) => Toast::Error("Feedback is only for Bayard's answers".to_string()),
            None => no_such_message(),
        }
    }

    /// Message by 1-based position, or the last message.
    pub fn message(&self, position: Option<usize>) -> Option<Message> {
        let state = self.lock();
        match position {
            Some(position) => state.transcript.get(position).cloned(),
            None => state.transcript.last().cloned(),
        }
    }

    /// All messages in order.
    pub fn messages(&self) -> Vec<Message> {
        self.lock().transcript.messages().to_vec()
    }

    /// Documents from the latest answer.
    pub fn documents(&self) -> Vec<Document> {
        self.lock().documents.clone()
    }

    /// True while a submission is in flight.
    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    /// The loading phase, if loading.
    pub fn phase(&self) -> Option<Phase> {
        self.lock().phase
    }

    /// The current theme.
    pub fn theme(&self) -> Theme {
        self.lock().theme
    }

    /// A copy of the whole session state.
    pub fn snapshot(&self) -> SessionState {
        self.lock().clone()
    }

    /// Returns the current session statistics snapshot.
    pub fn stats(&self) -> SessionStats {
        let state = self.lock();
        let messages = state.transcript.messages();
        let assistant_messages = messages.iter().filter(|m| m.is_assistant()).count();
        SessionStats {
            message_count: messages.len(),
            user_messages: messages.len() - assistant_messages,
            assistant_messages,
            document_count: state.documents.len(),
            theme: state.theme,
            loading: state.loading,
        }
    }
}

fn no_such_message() -> Toast {
    Toast::Error("No such message".to_string())
}
