//! Special commands parser for the interactive stylist chat
//!
//! Special commands manage the wardrobe rather than talking to the stylist:
//! - Upload clothing photos
//! - List available items and the laundry basket
//! - Confirm the latest recommendation or clear the basket
//! - Show history, status and help
//! - Exit the session
//!
//! Commands are prefixed with `/` and are case-insensitive. Arguments (file
//! paths) keep their original case.

use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command was given an argument it does not take
    #[error("Unsupported argument for {command}: {arg}\n\nType '/help' to see valid usage")]
    UnsupportedArgument { command: String, arg: String },

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },

    /// A quoted argument was never closed
    #[error("Unterminated quote in: {0}")]
    UnterminatedQuote(String),
}

/// Special commands that can be executed during interactive chat
///
/// These commands act on the session directly instead of being sent to the
/// stylist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Upload one or more image files
    Upload(Vec<String>),

    /// List the available items with the numbers the stylist uses
    Items,

    /// Show the items set aside in the laundry basket
    Basket,

    /// Move the latest recommendation into the basket
    Confirm,

    /// Empty the basket
    Clear,

    /// Show the conversation so far
    History,

    /// Show provider and wardrobe counts
    ShowStatus,

    /// Display help information
    Help,

    /// Exit the interactive session
    Exit,

    /// Not a special command
    ///
    /// The input should be sent to the stylist.
    None,
}

/// Splits command arguments on whitespace, honoring double quotes
fn split_args(rest: &str) -> Result<Vec<String>, CommandError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for c in rest.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    args.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }

    if in_quotes {
        return Err(CommandError::UnterminatedQuote(rest.to_string()));
    }
    if has_token {
        args.push(current);
    }
    Ok(args)
}

/// Parse a user input string into a special command
///
/// # Returns
///
/// Returns Ok(SpecialCommand) for valid commands or SpecialCommand::None for
/// text meant for the stylist.
///
/// # Errors
///
/// Returns CommandError::UnknownCommand if input starts with "/" but is not a valid command.
/// Returns CommandError::UnsupportedArgument if a command that takes no argument receives one.
/// Returns CommandError::MissingArgument if `/upload` has no paths.
///
/// # Examples
///
/// ```
/// use wardrobe::commands::special_commands::{parse_special_command, SpecialCommand};
///
/// let cmd = parse_special_command("/upload hoodie.png \"my jeans.jpg\"").unwrap();
/// assert_eq!(
///     cmd,
///     SpecialCommand::Upload(vec!["hoodie.png".to_string(), "my jeans.jpg".to_string()])
/// );
///
/// let cmd = parse_special_command("/CONFIRM").unwrap();
/// assert_eq!(cmd, SpecialCommand::Confirm);
///
/// let cmd = parse_special_command("what should I wear to brunch?").unwrap();
/// assert_eq!(cmd, SpecialCommand::None);
///
/// assert!(parse_special_command("/foo").is_err());
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    // If input doesn't start with "/", it's not a command (except exit/quit)
    if !trimmed.starts_with('/') && lower != "exit" && lower != "quit" {
        return Ok(SpecialCommand::None);
    }

    let (command, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((command, rest)) => (command.to_lowercase(), rest.trim()),
        None => (lower.clone(), ""),
    };

    let no_args = |cmd: SpecialCommand| {
        if rest.is_empty() {
            Ok(cmd)
        } else {
            Err(CommandError::UnsupportedArgument {
                command: command.clone(),
                arg: rest.to_string(),
            })
        }
    };

    match command.as_str() {
        "/upload" => {
            let paths = split_args(rest)?;
            if paths.is_empty() {
                Err(CommandError::MissingArgument {
                    command: "/upload".to_string(),
                    usage: "/upload <path> [path ...]".to_string(),
                })
            } else {
                Ok(SpecialCommand::Upload(paths))
            }
        }

        "/items" | "/wardrobe" => no_args(SpecialCommand::Items),
        "/basket" | "/laundry" => no_args(SpecialCommand::Basket),
        "/confirm" | "/worn" => no_args(SpecialCommand::Confirm),
        "/clear" => no_args(SpecialCommand::Clear),
        "/history" => no_args(SpecialCommand::History),
        "/status" => no_args(SpecialCommand::ShowStatus),
        "/help" | "/?" => no_args(SpecialCommand::Help),

        // Exit commands
        "exit" | "quit" | "/exit" | "/quit" => no_args(SpecialCommand::Exit),

        // Unknown command starting with "/"
        _ => Err(CommandError::UnknownCommand(command.clone())),
    }
}

/// Display help text for special commands
pub fn print_help() {
    println!(
        r#"
Special Commands for the Stylist Chat
=====================================

WARDROBE:
  /upload <path>...  - Upload clothing photos (.jpg, .jpeg, .png)
  /items             - List available items with the numbers the stylist uses
  /wardrobe          - Same as /items

LAUNDRY BASKET:
  /confirm           - Mark the latest recommendation as worn
  /worn              - Same as /confirm
  /basket            - Show items in the laundry basket
  /laundry           - Same as /basket
  /clear             - Empty the basket and make everything available again

SESSION INFORMATION:
  /history           - Show the conversation so far
  /status            - Show provider, model and wardrobe counts
  /help              - Show this help message
  /?                 - Same as /help

SESSION CONTROL:
  exit               - Exit the session
  quit               - Same as exit

NOTES:
  - Commands are case-insensitive
  - Wrap paths containing spaces in double quotes
  - Regular text (not starting with /) is sent to the stylist
  - Items in the basket are hidden from the stylist until you /clear
"#
    );
}
