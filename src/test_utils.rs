//! Test utilities for the wardrobe assistant
//!
//! Temporary directories, in-memory image fixtures and a scripted provider
//! that replays canned answers and records every request it receives.

use crate::error::{Result, WardrobeError};
use crate::providers::{CompletionResponse, GenerateRequest, Provider};

use async_trait::async_trait;
use std::collections::VecDeque;
use std::io::Cursor;
use std::sync::Mutex;
use tempfile::TempDir;

/// Create a temporary directory for testing
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

fn encode_solid(width: u32, height: u32, format: image::ImageFormat) -> Vec<u8> {
    let pixels = image::RgbImage::from_pixel(width, height, image::Rgb([200, 40, 90]));
    let mut cursor = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(pixels)
        .write_to(&mut cursor, format)
        .expect("Failed to encode test image");
    cursor.into_inner()
}

/// A valid PNG of the given size
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    encode_solid(width, height, image::ImageFormat::Png)
}

/// A valid JPEG of the given size
pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    encode_solid(width, height, image::ImageFormat::Jpeg)
}

/// Provider that replays canned answers in order
///
/// Once the script runs out, every call fails with a provider error.
pub struct ScriptedProvider {
    answers: Mutex<VecDeque<std::result::Result<String, String>>>,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedProvider {
    /// Provider answering each call with the next entry of `answers`
    pub fn new(answers: Vec<&str>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().map(|a| Ok(a.to_string())).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Provider whose first call fails with `message`
    pub fn failing(message: &str) -> Self {
        Self {
            answers: Mutex::new(VecDeque::from(vec![Err(message.to_string())])),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Every request received so far
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    async fn generate(&self, request: &GenerateRequest) -> Result<CompletionResponse> {
        self.requests.lock().unwrap().push(request.clone());
        match self.answers.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(CompletionResponse::new(text)),
            Some(Err(message)) => Err(WardrobeError::Provider(message).into()),
            None => Err(WardrobeError::Provider("script exhausted".to_string()).into()),
        }
    }

    fn name(&self) -> &'static str {
        "scripted"
    }

    fn model(&self) -> String {
        "scripted-1".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_carry_magic_bytes() {
        assert!(png_bytes(1, 1).starts_with(b"\x89PNG"));
        assert!(jpeg_bytes(1, 1).starts_with(b"\xff\xd8\xff"));
    }

    #[tokio::test]
    async fn test_scripted_provider_replays_and_records() {
        let provider = ScriptedProvider::new(vec!["one"]);
        let first = provider.generate(&GenerateRequest::text("q")).await.unwrap();
        assert_eq!(first.text, "one");
        assert!(provider.generate(&GenerateRequest::text("q2")).await.is_err());
        assert_eq!(provider.requests().len(), 2);
    }
}
