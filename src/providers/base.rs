//! Base provider trait and common types
//!
//! This module defines the Provider trait that every model backend implements,
//! along with the request and response types exchanged with it.

use crate::error::Result;
use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One image sent alongside the prompt
#[derive(Debug, Clone)]
pub struct ImagePart {
    /// MIME type of the image bytes (e.g. "image/png")
    pub mime_type: String,
    /// Raw image bytes
    pub data: Arc<[u8]>,
}

impl ImagePart {
    /// Creates a new image part
    ///
    /// # Examples
    ///
    /// ```
    /// use wardrobe::providers::ImagePart;
    ///
    /// let part = ImagePart::new("image/png", vec![1u8, 2, 3]);
    /// assert_eq!(part.mime_type, "image/png");
    /// assert_eq!(part.data.len(), 3);
    /// ```
    pub fn new(mime_type: impl Into<String>, data: impl Into<Arc<[u8]>>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Standard base64 encoding of the image bytes
    pub fn base64_data(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.data)
    }
}

/// A single generation request: optional images plus one composed prompt
///
/// Images come first in the order the caller supplied them; the prompt text
/// always follows them.
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    /// Images to include, in enumeration order
    pub images: Vec<ImagePart>,
    /// Full prompt text (instructions, history and new user turn)
    pub prompt: String,
}

impl GenerateRequest {
    /// Creates a text-only request
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            images: Vec::new(),
            prompt: prompt.into(),
        }
    }

    /// Creates a request carrying images followed by the prompt
    pub fn with_images(images: Vec<ImagePart>, prompt: impl Into<String>) -> Self {
        Self {
            images,
            prompt: prompt.into(),
        }
    }

    /// Whether the request carries no images
    pub fn is_text_only(&self) -> bool {
        self.images.is_empty()
    }
}

/// Token usage information reported by a provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Number of tokens in the prompt
    pub prompt_tokens: usize,
    /// Number of tokens in the completion
    pub completion_tokens: usize,
    /// Total tokens used (prompt + completion)
    pub total_tokens: usize,
}

impl TokenUsage {
    /// Create a new TokenUsage instance
    ///
    /// # Examples
    ///
    /// ```
    /// use wardrobe::providers::TokenUsage;
    ///
    /// let usage = TokenUsage::new(100, 50);
    /// assert_eq!(usage.total_tokens, 150);
    /// ```
    pub fn new(prompt_tokens: usize, completion_tokens: usize) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}

/// Response from a provider generation call
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Raw response text
    pub text: String,
    /// Token usage, when the provider reports it
    pub usage: Option<TokenUsage>,
}

impl CompletionResponse {
    /// Creates a response without usage information
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            usage: None,
        }
    }

    /// Creates a response with usage information
    pub fn with_usage(text: impl Into<String>, usage: TokenUsage) -> Self {
        Self {
            text: text.into(),
            usage: Some(usage),
        }
    }
}

/// Provider trait for multimodal model backends
///
/// A provider performs exactly one blocking round trip per call: no retries
/// and no streaming. Transport and upstream failures are returned as errors.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Generate text from optional images plus a prompt
    ///
    /// # Errors
    ///
    /// Returns `WardrobeError::Provider` on transport or upstream failures and
    /// `WardrobeError::Authentication` when the service rejects the credential
    async fn generate(&self, request: &GenerateRequest) -> Result<CompletionResponse>;

    /// Short provider name (e.g. "gemini")
    fn name(&self) -> &'static str;

    /// Model identifier requests are sent to
    fn model(&self) -> String;
}
