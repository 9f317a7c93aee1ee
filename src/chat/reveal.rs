//! Typewriter reveal of the newest assistant message.

use std::time::Duration;

use futures::Stream;
use futures::stream;

use crate::observability::REVEAL_STEPS;

/// Default time between reveal steps.
pub const DEFAULT_REVEAL_INTERVAL: Duration = Duration::from_millis(50);

/// Progressive disclosure of one already-received text.
///
/// Each step shows one more character. Only one text is ever being
/// revealed; starting a new one replaces the old target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevealAnimator {
    target: String,
    /// Byte offset of the end of the shown prefix. Always a char boundary.
    shown: usize,
    active: bool,
}

impl RevealAnimator {
    /// Creates an idle animator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin revealing `text`.
    ///
    /// A reveal already in progress for the same text carries on from where
    /// it is; anything else restarts from the empty prefix.
    pub fn start(&mut self, text: &str) {
        if self.active && self.target == text {
            return;
        }
        self.target = text.to_string();
        self.shown = 0;
        self.active = !text.is_empty();
    }

    /// Advance one character and return the new prefix.
    ///
    /// Returns `None` once the whole text is shown.
    pub fn step(&mut self) -> Option<&str> {
        if !self.active {
            return None;
        }
        let next = self.target[self.shown..]
            .chars()
            .next()
            .map(|c| self.shown + c.len_utf8())?;
        self.shown = next;
        if self.shown == self.target.len() {
            self.active = false;
        }
        REVEAL_STEPS.click();
        Some(&self.target[..self.shown])
    }

    /// Show the whole text immediately.
    ///
    /// Returns the part that had not been shown yet.
    pub fn finish(&mut self) -> &str {
        let rest = self.shown;
        self.shown = self.target.len();
        self.active = false;
        &self.target[rest..]
    }

    /// True while there is still text to reveal.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The text being revealed.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// The prefix shown so far.
    pub fn shown(&self) -> &str {
        &self.target[..self.shown]
    }

    /// True if `text` is the message currently being revealed.
    ///
    /// Anything else renders in full.
    pub fn is_revealing(&self, text: &str) -> bool {
        self.active && self.target == text
    }

    /// Yield each successive prefix, one per `interval`, on the tokio timer.
    ///
    /// The stream ends after the full text has been yielded.
    ///
    /// ```
    /// # use std::time::Duration;
    /// # use futures::StreamExt;
    /// # use bayard::chat::RevealAnimator;
    /// # tokio_test::block_on(async {
    /// let mut animator = RevealAnimator::default();
    /// animator.start("hey");
    /// let frames: Vec<String> = animator.frames(Duration::ZERO).collect().await;
    /// assert_eq!(frames, vec!["h", "he", "hey"]);
    /// # });
    /// ```
    pub fn frames(self, interval: Duration) -> impl Stream<Item = String> {
        stream::unfold(self, move |mut animator| async move {
            if !animator.is_active() {
                return None;
            }
            tokio::time::sleep(interval).await;
            let prefix = animator.step()?.to_string();
            Some((prefix, animator))
        })
    }
}
