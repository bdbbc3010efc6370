//! Error types for the wardrobe assistant
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for wardrobe operations
///
/// Covers configuration loading, model provider calls, image uploads,
/// and session lookups.
#[derive(Error, Debug)]
pub enum WardrobeError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider-related errors (transport failures, bad status, malformed bodies)
    #[error("Provider error: {0}")]
    Provider(String),

    /// Authentication errors (e.g., 401 Unauthorized, 403 Forbidden)
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Missing credentials for provider
    #[error("Missing credentials for provider: {0}")]
    MissingCredentials(String),

    /// An uploaded file was rejected
    #[error("Upload rejected for {name}: {reason}")]
    Upload {
        /// Display name of the rejected file
        name: String,
        /// Why the file was rejected
        reason: String,
    },

    /// An identifier that is not present in the registry
    #[error("Unknown wardrobe item: {0}")]
    UnknownItem(String),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl WardrobeError {
    /// Shorthand for building an [`WardrobeError::Upload`]
    pub fn upload(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Upload {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for wardrobe operations
///
/// Uses `anyhow::Error` so callers can attach context while still being
/// able to downcast to [`WardrobeError`].
pub type Result<T> = anyhow::Result<T>;
