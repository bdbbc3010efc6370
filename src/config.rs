//! Configuration management for the wardrobe assistant
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::cli::Commands;
use crate::error::{Result, WardrobeError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable holding the Gemini API key
pub const GEMINI_API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Provider configuration (Gemini, Ollama)
    pub provider: ProviderConfig,
    /// Wardrobe session settings
    #[serde(default)]
    pub wardrobe: WardrobeConfig,
}

/// Provider configuration
///
/// Specifies which model service to use and its settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Type of provider to use
    #[serde(rename = "type")]
    pub provider_type: String,

    /// Google Gemini configuration
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Ollama configuration
    #[serde(default)]
    pub ollama: OllamaConfig,
}

/// Google Gemini provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Model to use for Gemini
    #[serde(default = "default_gemini_model")]
    pub model: String,

    /// API base URL (useful for tests and local mocks)
    #[serde(default = "default_gemini_api_base")]
    pub api_base: String,

    /// API key; `GOOGLE_API_KEY` takes precedence when set
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// HTTP request timeout (seconds)
    #[serde(default = "default_gemini_timeout")]
    pub timeout_seconds: u64,
}

fn default_gemini_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_gemini_api_base() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_gemini_timeout() -> u64 {
    120
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: default_gemini_model(),
            api_base: default_gemini_api_base(),
            api_key: None,
            timeout_seconds: default_gemini_timeout(),
        }
    }
}

/// Ollama provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Ollama server host
    #[serde(default = "default_ollama_host")]
    pub host: String,

    /// Vision-capable model to use for Ollama
    #[serde(default = "default_ollama_model")]
    pub model: String,

    /// HTTP request timeout (seconds); local vision models can be slow
    #[serde(default = "default_ollama_timeout")]
    pub timeout_seconds: u64,
}

fn default_ollama_host() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_model() -> String {
    "llava:latest".to_string()
}

fn default_ollama_timeout() -> u64 {
    300
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: default_ollama_host(),
            model: default_ollama_model(),
            timeout_seconds: default_ollama_timeout(),
        }
    }
}

/// Wardrobe session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WardrobeConfig {
    /// Largest accepted image upload (bytes)
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: usize,
}

fn default_max_image_bytes() -> usize {
    10_485_760 // 10 MB
}

impl Default for WardrobeConfig {
    fn default() -> Self {
        Self {
            max_image_bytes: default_max_image_bytes(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default_config()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn default_config() -> Self {
        Self {
            provider: ProviderConfig {
                provider_type: "gemini".to_string(),
                gemini: GeminiConfig::default(),
                ollama: OllamaConfig::default(),
            },
            wardrobe: WardrobeConfig::default(),
        }
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| WardrobeError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| WardrobeError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(provider_type) = std::env::var("WARDROBE_PROVIDER") {
            self.provider.provider_type = provider_type;
        }

        if let Ok(model) = std::env::var("WARDROBE_GEMINI_MODEL") {
            self.provider.gemini.model = model;
        }

        if let Ok(api_base) = std::env::var("WARDROBE_GEMINI_API_BASE") {
            self.provider.gemini.api_base = api_base;
        }

        if let Ok(api_key) = std::env::var(GEMINI_API_KEY_ENV) {
            if !api_key.trim().is_empty() {
                self.provider.gemini.api_key = Some(api_key);
                tracing::debug!("Using Gemini API key from {}", GEMINI_API_KEY_ENV);
            }
        }

        if let Ok(host) = std::env::var("WARDROBE_OLLAMA_HOST") {
            self.provider.ollama.host = host;
        }

        if let Ok(model) = std::env::var("WARDROBE_OLLAMA_MODEL") {
            self.provider.ollama.model = model;
        }

        if let Ok(max_bytes) = std::env::var("WARDROBE_MAX_IMAGE_BYTES") {
            if let Ok(value) = max_bytes.parse() {
                self.wardrobe.max_image_bytes = value;
            } else {
                tracing::warn!("Invalid WARDROBE_MAX_IMAGE_BYTES: {}", max_bytes);
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }

        let provider = match &cli.command {
            Commands::Chat { provider, .. } | Commands::Ask { provider, .. } => provider,
        };
        if let Some(provider_type) = provider {
            tracing::debug!("Provider overridden on command line: {}", provider_type);
            self.provider.provider_type = provider_type.clone();
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        let valid_providers = ["gemini", "ollama"];
        if !valid_providers.contains(&self.provider.provider_type.as_str()) {
            return Err(WardrobeError::Config(format!(
                "Invalid provider type: {}. Must be one of: {}",
                self.provider.provider_type,
                valid_providers.join(", ")
            ))
            .into());
        }

        if self.provider.gemini.model.trim().is_empty() {
            return Err(
                WardrobeError::Config("gemini.model cannot be empty".to_string()).into(),
            );
        }

        if self.provider.ollama.model.trim().is_empty() {
            return Err(
                WardrobeError::Config("ollama.model cannot be empty".to_string()).into(),
            );
        }

        url::Url::parse(&self.provider.gemini.api_base).map_err(|e| {
            WardrobeError::Config(format!(
                "gemini.api_base is not a valid URL ({}): {}",
                self.provider.gemini.api_base, e
            ))
        })?;

        url::Url::parse(&self.provider.ollama.host).map_err(|e| {
            WardrobeError::Config(format!(
                "ollama.host is not a valid URL ({}): {}",
                self.provider.ollama.host, e
            ))
        })?;

        if self.provider.gemini.timeout_seconds == 0 {
            return Err(WardrobeError::Config(
                "gemini.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.provider.ollama.timeout_seconds == 0 {
            return Err(WardrobeError::Config(
                "ollama.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.wardrobe.max_image_bytes == 0 {
            return Err(WardrobeError::Config(
                "wardrobe.max_image_bytes must be greater than 0".to_string(),
            )
            .into());
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}
