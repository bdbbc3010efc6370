//! Google Gemini provider implementation
//!
//! Sends images and prompt text to the Gemini `generateContent` endpoint and
//! returns the text of the first candidate.

use crate::config::GeminiConfig;
use crate::error::{Result, WardrobeError};
use crate::providers::{CompletionResponse, GenerateRequest, Provider, TokenUsage};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Gemini API provider
///
/// # Examples
///
/// ```no_run
/// use wardrobe::config::GeminiConfig;
/// use wardrobe::providers::{GeminiProvider, GenerateRequest, Provider};
///
/// # async fn example() -> wardrobe::error::Result<()> {
/// let config = GeminiConfig {
///     api_key: Some("my-key".to_string()),
///     ..GeminiConfig::default()
/// };
/// let provider = GeminiProvider::new(config)?;
/// let response = provider.generate(&GenerateRequest::text("Hi!")).await?;
/// println!("{}", response.text);
/// # Ok(())
/// # }
/// ```
pub struct GeminiProvider {
    client: Client,
    config: GeminiConfig,
    api_key: String,
}

/// Request body for `generateContent`
#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

/// A request part: either inline image data or text
#[derive(Debug, Serialize)]
struct GeminiPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<GeminiInlineData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
struct GeminiInlineData {
    mime_type: String,
    data: String,
}

/// Response body from `generateContent`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    usage_metadata: Option<GeminiUsageMetadata>,
    #[serde(default)]
    prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiResponseContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsageMetadata {
    #[serde(default)]
    prompt_token_count: usize,
    #[serde(default)]
    candidates_token_count: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

impl GeminiProvider {
    /// Create a new Gemini provider
    ///
    /// # Errors
    ///
    /// Returns `WardrobeError::MissingCredentials` when no API key is
    /// configured, or a provider error if the HTTP client cannot be built
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| WardrobeError::MissingCredentials("gemini".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("wardrobe/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| WardrobeError::Provider(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!(
            "Initialized Gemini provider: api_base={}, model={}",
            config.api_base,
            config.model
        );

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    /// The `generateContent` endpoint for the configured model
    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Build the request body: images first, prompt text last
    fn build_request(&self, request: &GenerateRequest) -> GeminiRequest {
        let mut parts: Vec<GeminiPart> = request
            .images
            .iter()
            .map(|image| GeminiPart {
                inline_data: Some(GeminiInlineData {
                    mime_type: image.mime_type.clone(),
                    data: image.base64_data(),
                }),
                text: None,
            })
            .collect();

        parts.push(GeminiPart {
            inline_data: None,
            text: Some(request.prompt.clone()),
        });

        GeminiRequest {
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts,
            }],
        }
    }

    /// Pull the first candidate's text out of a parsed response
    fn extract_text(response: &GeminiResponse) -> Result<String> {
        let Some(candidate) = response.candidates.first() else {
            let reason = response
                .prompt_feedback
                .as_ref()
                .and_then(|f| f.block_reason.clone())
                .unwrap_or_else(|| "no candidates returned".to_string());
            return Err(WardrobeError::Provider(format!(
                "Gemini returned no answer: {}",
                reason
            ))
            .into());
        };

        let text: String = candidate
            .content
            .as_ref()
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect()
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(WardrobeError::Provider(format!(
                "Gemini candidate contained no text (finish_reason={})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            ))
            .into());
        }

        Ok(text)
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    async fn generate(&self, request: &GenerateRequest) -> Result<CompletionResponse> {
        let body = self.build_request(request);
        let url = self.endpoint();

        tracing::debug!(
            "Sending Gemini request to {}: {} images, {} prompt chars",
            url,
            request.images.len(),
            request.prompt.len()
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Gemini request failed: {}", e);
                WardrobeError::Provider(format!("Gemini request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini returned error {}: {}", status, error_text);
            if status == StatusCode::UNAUTHORIZED
                || status == StatusCode::FORBIDDEN
                || error_text.contains("API_KEY_INVALID")
            {
                return Err(WardrobeError::Authentication(format!(
                    "Gemini rejected the API key ({})",
                    status
                ))
                .into());
            }
            return Err(WardrobeError::Provider(format!(
                "Gemini returned error {}: {}",
                status, error_text
            ))
            .into());
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}", e);
            WardrobeError::Provider(format!("Failed to parse Gemini response: {}", e))
        })?;

        let text = Self::extract_text(&gemini_response)?;

        Ok(match gemini_response.usage_metadata {
            Some(usage) => {
                tracing::debug!(
                    "Gemini usage: prompt_tokens={}, completion_tokens={}",
                    usage.prompt_token_count,
                    usage.candidates_token_count
                );
                CompletionResponse::with_usage(
                    text,
                    TokenUsage::new(usage.prompt_token_count, usage.candidates_token_count),
                )
            }
            None => CompletionResponse::new(text),
        })
    }

    fn name(&self) -> &'static str {
        "gemini"
    }

    fn model(&self) -> String {
        self.config.model.clone()
    }
}
