use std::collections::VecDeque;
use std::fs;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use tempfile::TempDir;

use wardrobe::error::{Result, WardrobeError};
use wardrobe::providers::{CompletionResponse, GenerateRequest, Provider};

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}

fn encode_solid(width: u32, height: u32, format: image::ImageFormat) -> Vec<u8> {
    let pixels = image::RgbImage::from_pixel(width, height, image::Rgb([30, 60, 200]));
    let mut cursor = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(pixels)
        .write_to(&mut cursor, format)
        .expect("failed to encode test image");
    cursor.into_inner()
}

#[allow(dead_code)]
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    encode_solid(width, height, image::ImageFormat::Png)
}

#[allow(dead_code)]
pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    encode_solid(width, height, image::ImageFormat::Jpeg)
}

/// Writes a file into `dir` and returns its path
#[allow(dead_code)]
pub fn write_file(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, bytes).expect("failed to write test file");
    path
}

/// Provider that replays canned answers and records requests
#[allow(dead_code)]
pub struct ScriptedProvider {
    answers: Mutex<VecDeque<String>>,
    requests: Mutex<Vec<GenerateRequest>>,
}

#[allow(dead_code)]
impl ScriptedProvider {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().map(|a| a.to_string()).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    async fn generate(&self, request: &GenerateRequest) -> Result<CompletionResponse> {
        self.requests.lock().unwrap().push(request.clone());
        match self.answers.lock().unwrap().pop_front() {
            Some(text) => Ok(CompletionResponse::new(text)),
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
