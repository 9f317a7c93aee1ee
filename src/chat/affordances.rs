//! Copy and share actions on transcript messages.
//!
//! Each action reports its outcome as a [`Toast`]; failures never reach the
//! transcript.

use std::io::{self, Write};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::error::{Error, Result};
use crate::render::Toast;

/// Title attached to shared messages.
pub const SHARE_TITLE: &str = "Bayard Chat Message";

/// Somewhere message text can be copied to.
pub trait Clipboard: Send {
    /// Place `text` on the clipboard.
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// Somewhere a message can be shared to.
pub trait ShareTarget: Send {
    /// Share `text` under `title`.
    ///
    /// Targets that cannot share at all return [`Error::share_unsupported`].
    fn share(&mut self, title: &str, text: &str) -> Result<()>;
}

/// Terminal clipboard using the OSC 52 escape sequence.
///
/// The terminal emulator, not this process, owns the clipboard, so success
/// only means the sequence was written.
pub struct Osc52Clipboard<W: Write + Send> {
    out: W,
}

impl Osc52Clipboard<io::Stdout> {
    /// Clipboard that writes to stdout.
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write + Send> Osc52Clipboard<W> {
    /// Clipboard that writes to any sink.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// The underlying sink.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> Clipboard for Osc52Clipboard<W> {
    fn write_text(&mut self, text: &str) -> Result<()> {
        let payload = STANDARD.encode(text.as_bytes());
        write!(self.out, "\x1b]52;c;{payload}\x07")
            .and_then(|_| self.out.flush())
            .map_err(|err| Error::clipboard(format!("failed to write OSC 52 sequence: {err}")))
    }
}

/// A share target for environments without a share mechanism.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedShare;

impl ShareTarget for UnsupportedShare {
    fn share(&mut self, _: &str, _: &str) -> Result<()> {
        Err(Error::share_unsupported())
    }
}

/// Copy message text and describe the outcome.
pub fn copy_message(clipboard: &mut dyn Clipboard, text: &str) -> Toast {
    match clipboard.write_text(text) {
        Ok(()) => Toast::Success("Message copied to clipboard".to_string()),
        Err(_) => Toast::Error("Failed to copy message".to_string()),
    }
}

/// Share message text and describe the outcome.
pub fn share_message(target: &mut dyn ShareTarget, text: &str) -> Toast {
    match target.share(SHARE_TITLE, text) {
        Ok(()) => Toast::Success("Message shared successfully".to_string()),
        Err(err) if err.is_share_unsupported() => {
            Toast::Notice("Sharing not supported".to_string())
        }
        Err(_) => Toast::Error("Failed to share message".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenClipboard;

    impl Clipboard for BrokenClipboard {
        fn write_text(&mut self, _: &str) -> Result<()> {
            Err(Error::clipboard("no terminal"))
        }
    }

    struct RecordingShare {
        shared: Vec<(String, String)>,
        fail: bool,
    }

    impl ShareTarget for RecordingShare {
        fn share(&mut self, title: &str, text: &str) -> Result<()> {
            if self.fail {
                return Err(Error::share("cancelled"));
            }
            self.shared.push((title.to_string(), text.to_string()));
            Ok(())
        }
    }

    #[test]
    fn osc52_encodes_payload() {
        let mut clipboard = Osc52Clipboard::new(Vec::new());
        clipboard.write_text("hi").unwrap();
        let written = String::from_utf8(clipboard.into_inner()).unwrap();
        assert_eq!(written, "\x1b]52;c;aGk=\x07");
    }

    #[test]
    fn copy_success_toast() {
        let mut clipboard = Osc52Clipboard::new(Vec::new());
        assert_eq!(
            copy_message(&mut clipboard, "text"),
            Toast::Success("Message copied to clipboard".to_string())
        );
    }

    #[test]
    fn copy_failure_toast() {
        assert_eq!(
            copy_message(&mut BrokenClipboard, "text"),
            Toast::Error("Failed to copy message".to_string())
        );
    }

    #[test]
    fn share_unsupported_is_a_notice() {
        assert_eq!(
            share_message(&mut UnsupportedShare, "text"),
            Toast::Notice("Sharing not supported".to_string())
        );
    }

    #[test]
    fn share_outcomes() {
        let mut target = RecordingShare {
            shared: Vec::new(),
            fail: false,
        };
        assert_eq!(
            share_message(&mut target, "body"),
            Toast::Success("Message shared successfully".to_string())
        );
        assert_eq!(
            target.shared,
            vec![(SHARE_TITLE.to_string(), "body".to_string())]
        );

        target.fail = true;
        assert_eq!(
            share_message(&mut target, "body"),
            Toast::Error("Failed to share message".to_string())
        );
    }
}
