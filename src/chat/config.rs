//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg` and configuration
//! structures for controlling chat behavior.

use std::sync::Arc;
use std::time::Duration;

use arrrg_derive::CommandLine;

use crate::chat::reveal::DEFAULT_REVEAL_INTERVAL;
use crate::client_logger::{ClientLogger, NullLogger, StderrLogger};
use crate::types::Theme;

/// Default pause before each loading phase advances.
const DEFAULT_PHASE_DELAY: Duration = Duration::from_millis(1000);

/// Command-line arguments for the bayard-chat tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Base URL of the site serving the proxy route.
    #[arrrg(optional, "Proxy base URL (default: $BAYARD_PROXY_URL or http://localhost:3000)", "URL")]
    pub base_url: Option<String>,

    /// Delay before the request is sent.
    #[arrrg(optional, "Thinking delay in milliseconds (default: 1000)", "MS")]
    pub thinking_ms: Option<u64>,

    /// Delay after the response arrives.
    #[arrrg(optional, "Querying delay in milliseconds (default: 1000)", "MS")]
    pub querying_ms: Option<u64>,

    /// Delay before the answer is shown.
    #[arrrg(optional, "Generating delay in milliseconds (default: 1000)", "MS")]
    pub generating_ms: Option<u64>,

    /// Time between reveal steps.
    #[arrrg(optional, "Typewriter step in milliseconds (default: 50)", "MS")]
    pub reveal_ms: Option<u64>,

    /// Request timeout; none by default.
    #[arrrg(optional, "Request timeout in milliseconds (default: none)", "MS")]
    pub timeout_ms: Option<u64>,

    /// Start in dark mode.
    #[arrrg(flag, "Start with the dark theme")]
    pub dark: bool,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,

    /// Do not write diagnostics to stderr.
    #[arrrg(flag, "Suppress diagnostic logging")]
    pub quiet: bool,

    /// Also log every request and response.
    #[arrrg(flag, "Log every request and response to stderr")]
    pub verbose: bool,
}

/// Fixed delays that pace a submission and the typewriter reveal.
///
/// None of these track real progress; they only shape perceived latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Time spent in `Thinking...` before the request is sent.
    pub thinking: Duration,
    /// Time spent in `Querying...` after the response arrives.
    pub querying: Duration,
    /// Time spent in `Generating...` before the answer is appended.
    pub generating: Duration,
    /// Time between reveal steps.
    pub reveal_interval: Duration,
}

impl Pacing {
    /// No artificial delays at all.
    pub fn instant() -> Self {
        Self {
            thinking: Duration::ZERO,
            querying: Duration::ZERO,
            generating: Duration::ZERO,
            reveal_interval: Duration::ZERO,
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            thinking: DEFAULT_PHASE_DELAY,
            querying: DEFAULT_PHASE_DELAY,
            generating: DEFAULT_PHASE_DELAY,
            reveal_interval: DEFAULT_REVEAL_INTERVAL,
        }
    }
}

/// Configuration for a chat session.
///
/// This struct holds the resolved configuration values after processing
/// command-line arguments with appropriate defaults.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Proxy base URL; `None` defers to the environment.
    pub base_url: Option<String>,

    /// Submission and reveal pacing.
    pub pacing: Pacing,

    /// Optional request timeout.
    pub timeout: Option<Duration>,

    /// Initial colour scheme.
    pub theme: Theme,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,

    /// Whether to write diagnostics to stderr.
    pub log_diagnostics: bool,

    /// Whether diagnostics include every request and response.
    pub log_traffic: bool,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    ///
    /// Defaults:
    /// - Base URL: from the environment
    /// - Pacing: 1s per phase, 50ms reveal steps
    /// - Timeout: none
    /// - Theme: light
    /// - Color: enabled
    pub fn new() -> Self {
        Self {
            base_url: None,
            pacing: Pacing::default(),
            timeout: None,
            theme: Theme::Light,
            use_color: true,
            log_diagnostics: true,
            log_traffic: false,
        }
    }

    /// Sets the proxy base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the pacing.
    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the initial theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }

    /// Disables diagnostic logging.
    pub fn quiet(mut self) -> Self {
        self.log_diagnostics = false;
        self
    }

    /// Logs every request and response, not just failures and feedback.
    pub fn verbose(mut self) -> Self {
        self.log_traffic = true;
        self
    }

    /// The diagnostic logger this configuration asks for.
    ///
    /// `quiet` wins over `verbose`.
    pub fn logger(&self) -> Arc<dyn ClientLogger> {
        match (self.log_diagnostics, self.log_traffic) {
            (false, _) => Arc::new(NullLogger),
            (true, false) => Arc::new(StderrLogger::new()),
            (true, true) => Arc::new(StderrLogger::verbose()),
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ChatArgs> for ChatConfig {
    fn from(args: ChatArgs) -> Self {
        let defaults = Pacing::default();
        let ms = |value: Option<u64>, default: Duration| {
            value.map(Duration::from_millis).unwrap_or(default)
        };
        let pacing = Pacing {
            thinking: ms(args.thinking_ms, defaults.thinking),
            querying: ms(args.querying_ms, defaults.querying),
            generating: ms(args.generating_ms, defaults.generating),
            reveal_interval: ms(args.reveal_ms, defaults.reveal_interval),
        };

        ChatConfig {
            base_url: args.base_url,
            pacing,
            timeout: args.timeout_ms.map(Duration::from_millis),
            theme: if args.dark { Theme::Dark } else { Theme::Light },
            use_color: !args.no_color,
            log_diagnostics: !args.quiet,
            log_traffic: args.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ChatConfig::new();
        assert!(config.base_url.is_none());
        assert_eq!(config.pacing.thinking, Duration::from_secs(1));
        assert_eq!(config.pacing.querying, Duration::from_secs(1));
        assert_eq!(config.pacing.generating, Duration::from_secs(1));
        assert_eq!(config.pacing.reveal_interval, Duration::from_millis(50));
        assert!(config.timeout.is_none());
        assert_eq!(config.theme, Theme::Light);
        assert!(config.use_color);
        assert!(config.log_diagnostics);
    }

    #[test]
    fn config_from_args_defaults() {
        let config = ChatConfig::from(ChatArgs::default());
        assert_eq!(config.pacing, Pacing::default());
        assert!(config.timeout.is_none());
        assert!(config.use_color);
    }

    #[test]
    fn config_from_args_custom() {
        let args = ChatArgs {
            base_url: Some("https://bayard.example.org".to_string()),
            thinking_ms: Some(10),
            querying_ms: Some(20),
            generating_ms: Some(30),
            reveal_ms: Some(5),
            timeout_ms: Some(15_000),
            dark: true,
            no_color: true,
            quiet: true,
            verbose: false,
        };
        let config = ChatConfig::from(args);
        assert_eq!(
            config.base_url.as_deref(),
            Some("https://bayard.example.org")
        );
        assert_eq!(config.pacing.thinking, Duration::from_millis(10));
        assert_eq!(config.pacing.querying, Duration::from_millis(20));
        assert_eq!(config.pacing.generating, Duration::from_millis(30));
        assert_eq!(config.pacing.reveal_interval, Duration::from_millis(5));
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
        assert_eq!(config.theme, Theme::Dark);
        assert!(!config.use_color);
        assert!(!config.log_diagnostics);
    }

    #[test]
    fn config_builder_pattern() {
        let config = ChatConfig::new()
            .with_base_url("http://127.0.0.1:8080")
            .with_pacing(Pacing::instant())
            .with_timeout(Some(Duration::from_secs(3)))
            .with_theme(Theme::Dark)
            .without_color()
            .quiet();

        assert_eq!(config.base_url.as_deref(), Some("http://127.0.0.1:8080"));
        assert_eq!(config.pacing.thinking, Duration::ZERO);
        assert_eq!(config.timeout, Some(Duration::from_secs(3)));
        assert_eq!(config.theme, Theme::Dark);
        assert!(!config.use_color);
        assert!(!config.log_diagnostics);
    }

    #[test]
    fn verbose_flag_enables_traffic_logging() {
        let args = ChatArgs {
            verbose: true,
            ..ChatArgs::default()
        };
        let config = ChatConfig::from(args);
        assert!(config.log_diagnostics);
        assert!(config.log_traffic);
        assert!(!ChatConfig::new().log_traffic);
        assert!(ChatConfig::new().verbose().log_traffic);
    }
}
