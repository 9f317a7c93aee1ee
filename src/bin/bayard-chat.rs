//! Interactive chat with the Bayard research assistant.
//!
//! Each line typed at the prompt is sent to the Bayard proxy. While the
//! answer is prepared the prompt shows `Thinking...`, `Querying...` and
//! `Generating...`; the answer then types itself out, followed by the
//! documents it drew on.
//!
//! # Usage
//!
//! ```bash
//! # Talk to a proxy on localhost:3000
//! bayard-chat
//!
//! # Talk to a deployed proxy in dark mode
//! bayard-chat --base-url https://bayard.example.org --dark
//!
//! # Log every request and response to stderr
//! bayard-chat --verbose
//!
//! # Skip the loading delays and the typing effect
//! bayard-chat --thinking-ms 0 --querying-ms 0 --generating-ms 0 --reveal-ms 0
//! ```
//!
//! # Commands
//!
//! - `/regenerate` - Send the most recent message again
//! - `/theme` - Toggle light/dark mode
//! - `/docs` - Show the documents from the latest answer
//! - `/copy [n]`, `/share [n]` - Copy or share a message
//! - `/feedback [n] TEXT` - Leave feedback on an answer
//! - `/quit` - Exit the application

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use bayard::chat::{
    ChatArgs, ChatCommand, ChatConfig, ChatController, Osc52Clipboard, PlainTextRenderer,
    Renderer, SessionState, SubmitOutcome, UnsupportedShare, help_text, parse_command,
};
use bayard::ProxyClient;

/// Main entry point for the bayard-chat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("bayard-chat [OPTIONS]");
    let config = ChatConfig::from(args);

    let client = ProxyClient::with_options(config.base_url.clone(), config.timeout)?;
    let logger = config.logger();
    let endpoint = client.endpoint().to_string();
    let controller = ChatController::with_state(
        client,
        config.pacing,
        logger,
        SessionState::with_theme(config.theme),
    );
    let mut renderer = PlainTextRenderer::with_color(config.use_color).with_theme(config.theme);
    let mut rl = DefaultEditor::new()?;

    // Flag for skipping the rest of a reveal
    let interrupted = Arc::new(AtomicBool::new(false));

    let interrupted_clone = interrupted.clone();
    ctrlc::set_handler(move || {
        interrupted_clone.store(true, Ordering::Relaxed);
    })?;

    println!("Bayard Chat ({endpoint})");
    println!("Type /help for commands, /quit to exit\n");

    loop {
        interrupted.store(false, Ordering::Relaxed);

        let readline = rl.readline("You: ");

        match readline {
            Ok(input) => {
                let line = input.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                if let Some(cmd) = parse_command(line) {
                    match cmd {
                        ChatCommand::Quit => {
                            println!("Goodbye!");
                            break;
                        }
                        ChatCommand::Help => {
                            for line in help_text().lines() {
                                println!("    {}", line);
                            }
                        }
                        ChatCommand::Regenerate => match controller.message(None) {
                            Some(last) => {
                                renderer.print_info(&format!("You: {}", last.text));
                                let outcome = controller.regenerate(&mut renderer).await;
                                finish(&controller, outcome, &mut renderer, &interrupted).await;
                            }
                            None => renderer.print_info("Nothing to regenerate yet."),
                        },
                        ChatCommand::ToggleTheme => {
                            let theme = controller.toggle_theme();
                            renderer.set_theme(theme);
                            if theme.is_dark() {
                                renderer.print_info("Dark mode on.");
                            } else {
                                renderer.print_info("Light mode on.");
                            }
                        }
                        ChatCommand::Documents => {
                            renderer.print_sidebar(&controller.documents());
                        }
                        ChatCommand::Copy(position) => {
                            let mut clipboard = Osc52Clipboard::stdout();
                            let toast = controller.copy(position, &mut clipboard);
                            renderer.print_toast(&toast);
                        }
                        ChatCommand::Share(position) => {
                            let toast = controller.share(position, &mut UnsupportedShare);
                            renderer.print_toast(&toast);
                        }
                        ChatCommand::Feedback { position, text } => {
                            let toast = controller.feedback(position, &text);
                            renderer.print_toast(&toast);
                        }
                        ChatCommand::History => {
                            print_history(&controller);
                        }
                        ChatCommand::Stats => {
                            print_stats(&controller);
                        }
                        ChatCommand::Invalid(message) => {
                            renderer.print_error(&message);
                        }
                    }
                    continue;
                }

                // The transcript keeps the input as typed.
                let outcome = controller.submit(&input, &mut renderer).await;
                finish(&controller, outcome, &mut renderer, &interrupted).await;
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C at prompt - soft interrupt
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                renderer.print_error(&format!("Input error: {}", err));
                break;
            }
        }
    }

    Ok(())
}

/// Reveal an answer, if there is one.
///
/// Failures print nothing; the logger has already recorded them.
async fn finish(
    controller: &ChatController<ProxyClient>,
    outcome: SubmitOutcome,
    renderer: &mut PlainTextRenderer,
    interrupted: &AtomicBool,
) {
    match outcome {
        SubmitOutcome::Answered => {
            interrupted.store(false, Ordering::Relaxed);
            controller.play_reveal(renderer, interrupted).await;
        }
        SubmitOutcome::Failed(_) | SubmitOutcome::Busy | SubmitOutcome::Ignored => {}
    }
}

fn print_history(controller: &ChatController<ProxyClient>) {
    let messages = controller.messages();
    if messages.is_empty() {
        println!("    (no messages yet)");
        return;
    }
    for (idx, message) in messages.iter().enumerate() {
        println!(
            "    {:>3}. {} ({}): {}",
            idx + 1,
            message.sender,
            message.timestamp,
            first_line(&message.text)
        );
    }
}

fn print_stats(controller: &ChatController<ProxyClient>) {
    let stats = controller.stats();
    println!("    Session Statistics:");
    println!("      Messages: {}", stats.message_count);
    println!("      From you: {}", stats.user_messages);
    println!("      From Bayard: {}", stats.assistant_messages);
    println!("      Documents: {}", stats.document_count);
    println!(
        "      Theme: {}",
        if stats.theme.is_dark() { "dark" } else { "light" }
    );
}

fn first_line(text: &str) -> String {
    let mut lines = text.lines();
    let first = lines.next().unwrap_or_default();
    if lines.next().is_some() {
        format!("{first} ...")
    } else {
        first.to_string()
    }
}
