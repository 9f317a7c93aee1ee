//! Presentation for the chat session.
//!
//! Everything here is a function of session state: the document sidebar,
//! the loading indicator, message markup, and toasts. The [`Renderer`] trait
//! is the seam between the controller and whatever displays the chat.

use std::io::{self, Stdout, Write};

use crate::types::{Document, Message, Phase, Theme};

/// Abstracts longer than this many characters are truncated in the sidebar.
pub const ABSTRACT_LIMIT: usize = 500;

/// Width of the loading bar in cells.
const LOADING_BAR_WIDTH: usize = 24;

/// ANSI escape code for dim text (used for timestamps).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code for bold text (used for titles).
const ANSI_BOLD: &str = "\x1b[1m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape code for yellow text (light theme accent).
const ANSI_YELLOW: &str = "\x1b[33m";

/// ANSI escape code for bright yellow text (dark theme accent).
const ANSI_BRIGHT_YELLOW: &str = "\x1b[93m";

/// ANSI escape code for green text (success toasts).
const ANSI_GREEN: &str = "\x1b[32m";

/// ANSI escape code for red text (error toasts).
const ANSI_RED: &str = "\x1b[31m";

/// ANSI escape code that clears the current line.
const ANSI_CLEAR_LINE: &str = "\x1b[2K";

////////////////////////////////////////// Markup //////////////////////////////////////////

/// Convert message text to HTML with paragraph breaks.
///
/// All content is escaped; the only markup produced is `<br>` for each
/// newline.
pub fn format_message_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '\n' => out.push_str("<br>"),
            c => out.push(c),
        }
    }
    out
}

/// Truncate an abstract for the sidebar.
///
/// Text over [`ABSTRACT_LIMIT`] characters keeps its first
/// [`ABSTRACT_LIMIT`] characters followed by `...`; shorter text is
/// returned unchanged.
pub fn truncate_abstract(text: &str) -> String {
    match text.char_indices().nth(ABSTRACT_LIMIT) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

///////////////////////////////////////// Sidebar /////////////////////////////////////////

/// Counts of retrieved documents with and without an abstract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentSummary {
    /// Documents with a non-empty abstract.
    pub with_abstract: usize,
    /// Documents with an empty abstract.
    pub without_abstract: usize,
}

impl DocumentSummary {
    /// Partition documents by whether they carry an abstract.
    pub fn from_documents(documents: &[Document]) -> Self {
        let with_abstract = documents.iter().filter(|doc| doc.has_abstract()).count();
        Self {
            with_abstract,
            without_abstract: documents.len() - with_abstract,
        }
    }

    /// Total number of documents.
    pub fn total(&self) -> usize {
        self.with_abstract + self.without_abstract
    }

    /// Summary line for documents with abstracts.
    pub fn with_abstract_line(&self) -> String {
        if self.with_abstract == 1 {
            "1 document with an abstract".to_string()
        } else {
            format!("{} documents with abstracts", self.with_abstract)
        }
    }

    /// Summary line for documents without abstracts, if there are any.
    pub fn without_abstract_line(&self) -> Option<String> {
        match self.without_abstract {
            0 => None,
            1 => Some("1 document without an abstract".to_string()),
            n => Some(format!("{n} documents without abstracts")),
        }
    }
}

/// Render the document sidebar as plain text.
///
/// Only documents with an abstract are listed; the others are counted in
/// the summary. Returns an empty string when there are no documents.
pub fn render_sidebar(documents: &[Document]) -> String {
    if documents.is_empty() {
        return String::new();
    }
    let summary = DocumentSummary::from_documents(documents);
    let mut out = String::new();
    out.push_str(&summary.with_abstract_line());
    out.push('\n');
    if let Some(line) = summary.without_abstract_line() {
        out.push_str(&line);
        out.push('\n');
    }
    for doc in documents.iter().filter(|doc| doc.has_abstract()) {
        out.push('\n');
        out.push_str(&doc.title);
        out.push('\n');
        out.push_str(&format!("  Authors: {}\n", doc.authors.join(", ")));
        out.push_str(&format!("  Year Published: {}\n", doc.year_published));
        out.push_str(&format!(
            "  Abstract: {}\n",
            truncate_abstract(&doc.abstract_text)
        ));
        if !doc.download_url.is_empty() {
            out.push_str(&format!("  Download: {}\n", doc.download_url));
        }
    }
    out
}

/// Render a loading bar filled in proportion to the phase.
pub fn render_loading_bar(phase: Phase) -> String {
    let filled = (phase.progress() * LOADING_BAR_WIDTH as f32).round() as usize;
    let filled = filled.min(LOADING_BAR_WIDTH);
    format!(
        "[{}{}] {}",
        "#".repeat(filled),
        "-".repeat(LOADING_BAR_WIDTH - filled),
        phase.label()
    )
}

////////////////////////////////////////// Toasts //////////////////////////////////////////

/// Transient notification shown after a copy, share, or feedback action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Toast {
    /// The action worked.
    Success(String),
    /// The action failed.
    Error(String),
    /// Neither success nor failure, e.g. an unsupported action.
    Notice(String),
}

impl Toast {
    /// The text of the toast.
    pub fn text(&self) -> &str {
        match self {
            Toast::Success(text) | Toast::Error(text) | Toast::Notice(text) => text,
        }
    }
}

///////////////////////////////////////// Renderer /////////////////////////////////////////

/// Trait for rendering chat output.
///
/// The controller calls into this as session state changes; it never reads
/// anything back.
pub trait Renderer: Send {
    /// A message was appended to the transcript.
    ///
    /// Assistant bodies are delivered separately through [`Renderer::print_text`]
    /// while they are revealed.
    fn message_appended(&mut self, message: &Message);

    /// The loading indicator moved to a new phase.
    fn print_phase(&mut self, phase: Phase);

    /// The loading indicator disappeared.
    fn clear_phase(&mut self);

    /// Print a chunk of revealed assistant text.
    fn print_text(&mut self, text: &str);

    /// Called when the reveal of a response is complete.
    fn finish_response(&mut self);

    /// The document list was replaced.
    fn documents_replaced(&mut self, documents: &[Document]);

    /// Show a transient notification.
    fn print_toast(&mut self, toast: &Toast);

    /// Print an error message.
    fn print_error(&mut self, error: &str);

    /// Print an informational message.
    fn print_info(&mut self, info: &str);

    /// The colour scheme changed.
    fn set_theme(&mut self, theme: Theme) {
        _ = theme;
    }
}

/// Plain text renderer with optional ANSI styling.
///
/// The document sidebar is held back until the answer has been revealed so
/// that it prints below the answer rather than above it.
pub struct PlainTextRenderer {
    stdout: Stdout,
    use_color: bool,
    theme: Theme,
    phase_visible: bool,
    pending_sidebar: Option<String>,
}

impl PlainTextRenderer {
    /// Creates a new PlainTextRenderer with ANSI colors enabled.
    pub fn new() -> Self {
        Self::with_color(true)
    }

    /// Creates a new PlainTextRenderer with specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self {
            stdout: io::stdout(),
            use_color,
            theme: Theme::default(),
            phase_visible: false,
            pending_sidebar: None,
        }
    }

    /// Sets the initial theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    fn accent(&self) -> &'static str {
        if self.theme.is_dark() {
            ANSI_BRIGHT_YELLOW
        } else {
            ANSI_YELLOW
        }
    }

    fn flush(&mut self) {
        let _ = self.stdout.flush();
    }

    /// Print the sidebar for `documents` now.
    pub fn print_sidebar(&mut self, documents: &[Document]) {
        let sidebar = render_sidebar(documents);
        if sidebar.is_empty() {
            println!("No documents yet.");
        } else if self.use_color {
            println!("{ANSI_DIM}{}{ANSI_RESET}", sidebar.trim_end());
        } else {
            println!("{}", sidebar.trim_end());
        }
        self.flush();
    }

    fn erase_phase(&mut self) {
        if self.phase_visible {
            if self.use_color {
                print!("\r{ANSI_CLEAR_LINE}");
            }
            self.phase_visible = false;
        }
    }
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for PlainTextRenderer {
    fn message_appended(&mut self, message: &Message) {
        if !message.is_assistant() {
            return;
        }
        self.erase_phase();
        if self.use_color {
            let accent = self.accent();
            println!(
                "{accent}{ANSI_BOLD}{}{ANSI_RESET} {ANSI_DIM}{}{ANSI_RESET}",
                message.sender, message.timestamp
            );
        } else {
            println!("{} ({})", message.sender, message.timestamp);
        }
        self.flush();
    }

    fn print_phase(&mut self, phase: Phase) {
        if self.use_color {
            let accent = self.accent();
            print!(
                "\r{ANSI_CLEAR_LINE}{accent}{}{ANSI_RESET}",
                render_loading_bar(phase)
            );
        } else {
            println!("{}", phase.label());
        }
        self.phase_visible = true;
        self.flush();
    }

    fn clear_phase(&mut self) {
        self.erase_phase();
        self.flush();
    }

    fn print_text(&mut self, text: &str) {
        print!("{text}");
        self.flush();
    }

    fn finish_response(&mut self) {
        println!("\n");
        if let Some(sidebar) = self.pending_sidebar.take() {
            if self.use_color {
                println!("{ANSI_DIM}{}{ANSI_RESET}\n", sidebar.trim_end());
            } else {
                println!("{}\n", sidebar.trim_end());
            }
        }
        self.flush();
    }

    fn documents_replaced(&mut self, documents: &[Document]) {
        let sidebar = render_sidebar(documents);
        self.pending_sidebar = (!sidebar.is_empty()).then_some(sidebar);
    }

    fn print_toast(&mut self, toast: &Toast) {
        if self.use_color {
            let color = match toast {
                Toast::Success(_) => ANSI_GREEN,
                Toast::Error(_) => ANSI_RED,
                Toast::Notice(_) => self.accent(),
            };
            println!("{color}{}{ANSI_RESET}", toast.text());
        } else {
            match toast {
                Toast::Success(text) => println!("[ok] {text}"),
                Toast::Error(text) => println!("[error] {text}"),
                Toast::Notice(text) => println!("[!] {text}"),
            }
        }
        self.flush();
    }

    fn print_error(&mut self, error: &str) {
        self.erase_phase();
        eprintln!("\nError: {error}");
    }

    fn print_info(&mut self, info: &str) {
        println!("{info}");
        self.flush();
    }

    fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }
}
