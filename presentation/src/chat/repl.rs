//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::output::console::ConsoleFormatter;
use colored::Colorize;
use indicatif::ProgressBar;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::time::Duration;
use tutor_application::{LoadOutcome, SendOutcome, SessionController, SwitchOutcome};
use tutor_domain::{Attachment, Model, ModelCatalog, media_type_for_name};

/// Interactive chat REPL
pub struct ChatRepl {
    controller: SessionController,
    catalog: ModelCatalog,
    show_progress: bool,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(controller: SessionController, catalog: ModelCatalog) -> Self {
        Self {
            controller,
            catalog,
            show_progress: true,
        }
    }

    /// Set whether to show a spinner while a send is in flight
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Run the interactive REPL
    pub async fn run(mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        // Try to load history
        let history_path = dirs::data_dir().map(|p| p.join("tutor-chat").join("history.txt"));

        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        let known = self.controller.refresh_conversations().await.len();
        self.print_welcome(known);

        loop {
            let readline = rl.readline(">>> ");

            match readline {
                Ok(line) => {
                    let line = line.trim();

                    // Skip empty lines
                    if line.is_empty() {
                        continue;
                    }

                    let _ = rl.add_history_entry(line);

                    // Handle commands
                    if line.starts_with('/') {
                        if self.handle_command(line).await {
                            break;
                        }
                        continue;
                    }

                    self.send(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        // Save history
        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self, known_conversations: usize) {
        let model = self.controller.session().selected_model();
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│         LLM Teacher Assistant - Chat        │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Model: {}", self.catalog.display_name_for(model));
        if known_conversations > 0 {
            println!("Saved conversations: {} (use /list)", known_conversations);
        }
        println!();
        println!("Commands:");
        println!("  /help       - Show all commands");
        println!("  /models     - Show available models");
        println!("  /attach <f> - Attach a file to the next message");
        println!("  /quit       - Exit chat");
        println!();
    }

    /// Send one chat line through the controller and print the reply.
    async fn send(&mut self, line: &str) {
        self.controller.set_draft(line);

        let spinner = if self.show_progress {
            let spinner = ProgressBar::new_spinner();
            spinner.set_message("Thinking...");
            spinner.enable_steady_tick(Duration::from_millis(120));
            Some(spinner)
        } else {
            None
        };

        let outcome = self.controller.send_message().await;

        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }

        match outcome {
            SendOutcome::Completed { persisted } => {
                if let Some(reply) = self.controller.session().visible_messages().last() {
                    println!();
                    println!("{}", ConsoleFormatter::format_message(reply));
                    println!();
                }
                if !persisted {
                    println!("{}", "(conversation could not be saved)".yellow());
                }
            }
            SendOutcome::RejectedBusy => {
                println!("A message is already being sent.");
            }
            SendOutcome::NothingToSend => {}
        }
    }

    /// Handle slash commands. Returns true if the REPL should exit.
    async fn handle_command(&mut self, line: &str) -> bool {
        let mut parts = line.splitn(2, char::is_whitespace);
        let command = parts.next().unwrap_or_default();
        let argument = parts.next().map(str::trim).unwrap_or_default();

        match command {
            "/quit" | "/exit" | "/q" => {
                println!("Bye!");
                return true;
            }
            "/help" | "/h" | "/?" => {
                println!();
                println!("Commands:");
                println!("  /help, /h, /?    - Show this help");
                println!("  /models          - Show available models");
                println!("  /model <id>      - Switch the active model");
                println!("  /list            - List saved conversations");
                println!("  /open <id>       - Open a saved conversation");
                println!("  /new             - Start a new conversation");
                println!("  /attach <path>   - Attach a file to the next message");
                println!("  /detach <index>  - Remove a pending attachment");
                println!("  /remove <id> <n> - Remove attachment n from a sent message");
                println!("  /quit, /exit, /q - Exit chat");
                println!();
            }
            "/models" => {
                println!();
                println!(
                    "{}",
                    ConsoleFormatter::format_models(
                        &self.catalog,
                        self.controller.session().selected_model()
                    )
                );
                println!();
            }
            "/model" => {
                if argument.is_empty() {
                    println!("Usage: /model <id>");
                } else {
                    // Model parsing is infallible; unknown ids pass through
                    let model: Model = argument.parse().unwrap();
                    if !self.catalog.contains(&model) {
                        println!("(note: '{argument}' is not in the model catalog)");
                    }
                    println!("Model set to {}", self.catalog.display_name_for(&model));
                    self.controller.set_model(model);
                }
            }
            "/list" => {
                let summaries = self.controller.refresh_conversations().await;
                println!();
                println!("{}", ConsoleFormatter::format_summaries(summaries));
                println!();
            }
            "/open" => {
                if argument.is_empty() {
                    println!("Usage: /open <id>");
                } else {
                    self.open_conversation(argument).await;
                }
            }
            "/new" => match self.controller.start_new_session() {
                SwitchOutcome::Done => println!("Started a new conversation."),
                SwitchOutcome::RejectedBusy => {
                    println!("Cannot switch while a message is being sent.");
                }
            },
            "/attach" => {
                if argument.is_empty() {
                    println!("Usage: /attach <path>");
                } else {
                    self.attach_file(argument);
                }
            }
            "/detach" => match argument.parse::<usize>() {
                Ok(index) => {
                    self.controller.discard_pending_attachment(index);
                    println!(
                        "{}",
                        ConsoleFormatter::format_pending(
                            self.controller.session().pending_attachments()
                        )
                    );
                }
                Err(_) => println!("Usage: /detach <index>"),
            },
            "/remove" => {
                let mut args = argument.split_whitespace();
                match (args.next(), args.next().and_then(|n| n.parse::<usize>().ok())) {
                    (Some(message_id), Some(index)) => {
                        let resaved =
                            self.controller.discard_sent_attachment(message_id, index).await;
                        if resaved {
                            println!("Attachment removed.");
                        } else {
                            println!("No matching attachment (or the re-save failed).");
                        }
                    }
                    _ => println!("Usage: /remove <message-id> <index>"),
                }
            }
            _ => {
                println!("Unknown command: {}", command);
                println!("Type /help for available commands");
            }
        }

        false
    }

    async fn open_conversation(&mut self, id: &str) {
        match self.controller.load_session(id).await {
            LoadOutcome::Loaded => {
                println!();
                println!(
                    "{}",
                    ConsoleFormatter::format_conversation(
                        self.controller.session().visible_messages()
                    )
                );
                println!();
            }
            LoadOutcome::RejectedBusy => {
                println!("Cannot switch while a message is being sent.");
            }
            LoadOutcome::Unavailable(err) => {
                println!("Could not open '{id}': {err}");
            }
        }
    }

    fn attach_file(&mut self, path: &str) {
        match std::fs::read(path) {
            Ok(bytes) => {
                let name = std::path::Path::new(path)
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.to_string());
                let media_type = media_type_for_name(&name);
                self.controller
                    .attach_files(vec![Attachment::new(name, media_type, bytes)]);
                println!(
                    "{}",
                    ConsoleFormatter::format_pending(
                        self.controller.session().pending_attachments()
                    )
                );
            }
            Err(err) => {
                println!("Could not read '{path}': {err}");
            }
        }
    }
}
