//! Ollama provider implementation
//!
//! Connects to a local or remote Ollama server and runs a vision-capable
//! model (e.g. llava) through the non-streaming `/api/generate` endpoint.

use crate::config::OllamaConfig;
use crate::error::{Result, WardrobeError};
use crate::providers::{CompletionResponse, GenerateRequest, Provider, TokenUsage};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Ollama API provider
///
/// # Examples
///
/// ```
/// use wardrobe::config::OllamaConfig;
/// use wardrobe::providers::OllamaProvider;
///
/// let config = OllamaConfig {
///     host: "http://localhost:11434".to_string(),
///     model: "llava:latest".to_string(),
///     timeout_seconds: 300,
/// };
/// let provider = OllamaProvider::new(config).unwrap();
/// assert_eq!(provider.host(), "http://localhost:11434");
/// ```
pub struct OllamaProvider {
    client: Client,
    config: OllamaConfig,
}

/// Request structure for `/api/generate`
#[derive(Debug, Serialize)]
struct OllamaGenerateRequest {
    model: String,
    prompt: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    images: Vec<String>,
    stream: bool,
}

/// Response structure from `/api/generate`
#[derive(Debug, Deserialize)]
struct OllamaGenerateResponse {
    #[serde(default)]
    response: String,
    #[serde(default)]
    done: bool,
    #[serde(default)]
    prompt_eval_count: usize,
    #[serde(default)]
    eval_count: usize,
}

impl OllamaProvider {
    /// Create a new Ollama provider instance
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    pub fn new(config: OllamaConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("wardrobe/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| WardrobeError::Provider(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!(
            "Initialized Ollama provider: host={}, model={}",
            config.host,
            config.model
        );

        Ok(Self { client, config })
    }

    /// Get the configured Ollama host
    pub fn host(&self) -> &str {
        &self.config.host
    }

    fn build_request(&self, request: &GenerateRequest) -> OllamaGenerateRequest {
        OllamaGenerateRequest {
            model: self.config.model.clone(),
            prompt: request.prompt.clone(),
            images: request.images.iter().map(|i| i.base64_data()).collect(),
            stream: false,
        }
    }
}

#[async_trait]
impl Provider for OllamaProvider {
    async fn generate(&self, request: &GenerateRequest) -> Result<CompletionResponse> {
        let url = format!("{}/api/generate", self.config.host.trim_end_matches('/'));
        let body = self.build_request(request);

        tracing::debug!(
            "Sending Ollama request: {} images, {} prompt chars",
            body.images.len(),
            body.prompt.len()
        );

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Ollama request failed: {}", e);
                WardrobeError::Provider(format!("Ollama request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Ollama returned error {}: {}", status, error_text);
            return Err(WardrobeError::Provider(format!(
                "Ollama returned error {}: {}",
                status, error_text
            ))
            .into());
        }

        let ollama_response: OllamaGenerateResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Ollama response: {}", e);
            WardrobeError::Provider(format!("Failed to parse Ollama response: {}", e))
        })?;

        tracing::debug!(
            "Ollama response: done={}, prompt_tokens={}, completion_tokens={}",
            ollama_response.done,
            ollama_response.prompt_eval_count,
            ollama_response.eval_count
        );

        Ok(
            if ollama_response.prompt_eval_count > 0 || ollama_response.eval_count > 0 {
                let usage =
                    TokenUsage::new(ollama_response.prompt_eval_count, ollama_response.eval_count);
                CompletionResponse::with_usage(ollama_response.response, usage)
            } else {
                CompletionResponse::new(ollama_response.response)
            },
        )
    }

    fn name(&self) -> &'static str {
        "ollama"
    }

    fn model(&self) -> String {
        self.config.model.clone()
    }
}
