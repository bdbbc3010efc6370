//! Conversation log for the stylist chat
//!
//! Turns are appended in strict chronological order and are never mutated or
//! removed for the lifetime of a session.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Who authored a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The person chatting
    User,
    /// The stylist model
    Assistant,
}

impl Role {
    /// Label used when the turn is serialized into a prompt
    ///
    /// # Examples
    ///
    /// ```
    /// use wardrobe::stylist::conversation::Role;
    ///
    /// assert_eq!(Role::User.label(), "User");
    /// assert_eq!(Role::Assistant.label(), "Stylist");
    /// ```
    pub fn label(&self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Assistant => "Stylist",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// One conversation turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Author of the turn
    pub role: Role,
    /// Turn text
    pub text: String,
}

impl Turn {
    /// Creates a user turn
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    /// Creates an assistant turn
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
        }
    }
}

/// Append-only conversation history
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    /// Creates an empty conversation
    ///
    /// # Examples
    ///
    /// ```
    /// use wardrobe::stylist::Conversation;
    ///
    /// let conversation = Conversation::new();
    /// assert!(conversation.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a user turn
    pub fn add_user_turn(&mut self, text: impl Into<String>) {
        self.turns.push(Turn::user(text));
    }

    /// Appends an assistant turn
    pub fn add_assistant_turn(&mut self, text: impl Into<String>) {
        self.turns.push(Turn::assistant(text));
    }

    /// All turns, oldest first
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Number of turns
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether no turns have been recorded yet
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
