/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes two top-level command modules:

- `chat` - Interactive stylist session
- `ask`  - One-shot question with optional uploads

Both handlers own a `Session` for their lifetime and pass it by `&mut` to
each action, so nothing outlives the process.
*/

use crate::commands::special_commands::{parse_special_command, print_help, SpecialCommand};
use crate::config::Config;
use crate::error::Result;
use crate::providers::{create_provider, Provider};
use crate::stylist::Session;

use std::path::PathBuf;

// Special commands parser for the chat loop
pub mod special_commands;

// Tables and formatted output
pub mod listing;

// Chat command handler
pub mod chat {
    //! Interactive stylist chat.
    //!
    //! Creates the provider, uploads any images given on the command line,
    //! and runs a readline loop. Slash commands act on the session; anything
    //! else is sent to the stylist.

    use super::*;
    use colored::Colorize;
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    /// Start an interactive stylist session
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration (consumed)
    /// * `images` - Images to upload before the first prompt
    ///
    /// # Errors
    ///
    /// Returns error if the provider cannot be created or the terminal
    /// cannot be initialized. Provider failures during the session are
    /// printed and the loop continues.
    pub async fn run_chat(config: Config, images: Vec<PathBuf>) -> Result<()> {
        tracing::info!("Starting interactive stylist session");

        let provider = create_provider(&config.provider.provider_type, &config.provider)?;
        let max_bytes = config.wardrobe.max_image_bytes;
        let mut session = Session::new();

        let mut rl = DefaultEditor::new()?;

        print_welcome_banner(provider.as_ref());

        if !images.is_empty() {
            let report = session.upload_batch(&images, max_bytes).await;
            listing::print_upload_report(&session, &report);
        }

        loop {
            let prompt = format!("{} ", "stylist>".magenta().bold());
            match rl.readline(&prompt) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }

                    rl.add_history_entry(trimmed)?;

                    let command = match parse_special_command(trimmed) {
                        Ok(command) => command,
                        Err(e) => {
                            eprintln!("{}\n", e.to_string().red());
                            continue;
                        }
                    };

                    match command {
                        SpecialCommand::Upload(paths) => {
                            let paths: Vec<PathBuf> = paths.into_iter().map(PathBuf::from).collect();
                            let report = session.upload_batch(&paths, max_bytes).await;
                            listing::print_upload_report(&session, &report);
                        }
                        SpecialCommand::Items => listing::print_items(&session),
                        SpecialCommand::Basket => listing::print_basket(&session),
                        SpecialCommand::Confirm => {
                            let outcome = session.confirm_selection();
                            listing::print_confirm_outcome(&session, &outcome);
                        }
                        SpecialCommand::Clear => {
                            let released = session.clear_basket();
                            if released == 0 {
                                println!("{}\n", "The laundry basket is already empty.".yellow());
                            } else {
                                println!(
                                    "{}\n",
                                    format!("Returned {} items to your wardrobe", released).green()
                                );
                            }
                        }
                        SpecialCommand::History => listing::print_history(&session),
                        SpecialCommand::ShowStatus => {
                            print_status_display(&session, provider.as_ref());
                        }
                        SpecialCommand::Help => print_help(),
                        SpecialCommand::Exit => break,
                        SpecialCommand::None => {
                            match session.ask(provider.as_ref(), trimmed).await {
                                Ok(reply) => listing::print_reply(&session, &reply),
                                Err(e) => {
                                    tracing::error!("Stylist request failed: {:#}", e);
                                    eprintln!("{}\n", format!("Error: {}", e).red());
                                }
                            }
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {:?}", err);
                    break;
                }
            }
        }

        println!("Stay stylish! Bye!");
        Ok(())
    }

    /// Display welcome banner at the start of the session
    fn print_welcome_banner(provider: &dyn Provider) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║            Wardrobe Stylist - Welcome, bestie!               ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!(
            "Stylist: {} ({})",
            provider.name().cyan(),
            provider.model()
        );
        println!("Upload your clothes with '/upload <path>...', then ask for an outfit.");
        println!("Type '/help' for available commands, 'exit' to quit\n");
    }

    /// Display session status for '/status'
    fn print_status_display(session: &Session, provider: &dyn Provider) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                   Wardrobe Session Status                    ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!("Provider:          {}", provider.name().cyan());
        println!("Model:             {}", provider.model());
        println!("Uploaded Items:    {}", session.total_items());
        println!("Available Items:   {}", session.available().len());
        println!("Laundry Basket:    {}", session.basket_len());
        println!("Pending Selection: {}", session.pending().len());
        println!("Conversation Size: {} messages", session.history().len());
        println!();
    }
}

// One-shot question handler
pub mod ask {
    //! One-shot stylist question.
    //!
    //! Uploads the given images into a fresh session, asks a single
    //! question and prints the answer, either formatted or as JSON.

    use super::*;
    use crate::error::WardrobeError;

    /// Ask the stylist one question
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration (consumed)
    /// * `prompt` - The question
    /// * `images` - Images to upload first
    /// * `json` - Print JSON instead of formatted text
    ///
    /// # Errors
    ///
    /// Returns error if the provider cannot be created or the request fails.
    /// Rejected uploads are reported and skipped.
    pub async fn run_ask(
        config: Config,
        prompt: String,
        images: Vec<PathBuf>,
        json: bool,
    ) -> Result<()> {
        let provider = create_provider(&config.provider.provider_type, &config.provider)?;
        let mut session = Session::new();

        let report = session
            .upload_batch(&images, config.wardrobe.max_image_bytes)
            .await;
        for (path, reason) in &report.rejected {
            eprintln!("Skipped {}: {}", path, reason);
        }

        tracing::info!(
            "Asking {} with {} uploaded items",
            provider.name(),
            session.total_items()
        );
        let reply = session.ask(provider.as_ref(), &prompt).await?;

        if json {
            let output = listing::ask_output(&session, &reply)?;
            let rendered =
                serde_json::to_string_pretty(&output).map_err(WardrobeError::Serialization)?;
            println!("{}", rendered);
        } else {
            listing::print_reply(&session, &reply);
        }

        Ok(())
    }
}
