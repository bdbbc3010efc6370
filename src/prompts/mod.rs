//! Prompt composition for the stylist
//!
//! Every model call receives one composite text prompt: the fixed stylist
//! instructions, the serialized conversation so far, and the new user turn.

pub mod stylist_prompt;

use crate::stylist::conversation::Turn;

pub use stylist_prompt::STYLIST_INSTRUCTIONS;

/// Builds the composite prompt for a new user turn
///
/// # Arguments
///
/// * `history` - Turns completed before this one, oldest first
/// * `user_text` - The new user message
///
/// # Examples
///
/// ```
/// use wardrobe::prompts::build_prompt;
/// use wardrobe::stylist::conversation::Turn;
///
/// let history = vec![Turn::user("hi"), Turn::assistant("hey bestie")];
/// let prompt = build_prompt(&history, "what goes with jeans?");
/// assert!(prompt.contains("User: hi\nStylist: hey bestie\n"));
/// assert!(prompt.ends_with("User: what goes with jeans?\nStylist:"));
/// ```
pub fn build_prompt(history: &[Turn], user_text: &str) -> String {
    let mut prompt = String::with_capacity(STYLIST_INSTRUCTIONS.len() + 256);
    prompt.push_str(STYLIST_INSTRUCTIONS);
    prompt.push_str("\n\nConversation History:\n");

    for turn in history {
        prompt.push_str(turn.role.label());
        prompt.push_str(": ");
        prompt.push_str(&turn.text);
        prompt.push('\n');
    }

    prompt.push_str("User: ");
    prompt.push_str(user_text);
    prompt.push_str("\nStylist:");
    prompt
}
