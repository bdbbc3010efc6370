//! Provider module
//!
//! This module contains the model provider abstraction and implementations
//! for Google Gemini and Ollama.

pub mod base;
pub mod gemini;
pub mod ollama;

pub use base::{CompletionResponse, GenerateRequest, ImagePart, Provider, TokenUsage};
pub use gemini::GeminiProvider;
pub use ollama::OllamaProvider;

use crate::config::ProviderConfig;
use crate::error::{Result, WardrobeError};

/// Create a provider instance based on configuration
///
/// # Arguments
///
/// * `provider_type` - Type of provider ("gemini" or "ollama")
/// * `config` - Provider configuration
///
/// # Errors
///
/// Returns error if the provider type is unknown or initialization fails
/// (for Gemini, a missing API key fails here, at startup)
///
/// # Examples
///
/// ```
/// use wardrobe::config::ProviderConfig;
/// use wardrobe::providers::create_provider;
///
/// let config = ProviderConfig {
///     provider_type: "ollama".to_string(),
///     gemini: Default::default(),
///     ollama: Default::default(),
/// };
/// let provider = create_provider("ollama", &config).unwrap();
/// assert_eq!(provider.name(), "ollama");
/// ```
pub fn create_provider(provider_type: &str, config: &ProviderConfig) -> Result<Box<dyn Provider>> {
    match provider_type {
        "gemini" => Ok(Box::new(GeminiProvider::new(config.gemini.clone())?)),
        "ollama" => Ok(Box::new(OllamaProvider::new(config.ollama.clone())?)),
        _ => Err(WardrobeError::Provider(format!("Unknown provider type: {}", provider_type)).into()),
    }
}
