use serde_json::{json, Value};

use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wardrobe::config::GeminiConfig;
use wardrobe::error::WardrobeError;
use wardrobe::providers::{GeminiProvider, GenerateRequest, ImagePart, Provider};

const ENDPOINT: &str = "/models/gemini-1.5-flash:generateContent";

fn provider_for(server: &MockServer) -> GeminiProvider {
    GeminiProvider::new(GeminiConfig {
        api_base: server.uri(),
        api_key: Some("test-key".to_string()),
        ..GeminiConfig::default()
    })
    .unwrap()
}

fn answer(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }],
        "usageMetadata": { "promptTokenCount": 120, "candidatesTokenCount": 12 }
    })
}

async fn last_body(server: &MockServer) -> Value {
    let requests = server.received_requests().await.unwrap();
    serde_json::from_slice(&requests.last().unwrap().body).unwrap()
}

#[tokio::test]
async fn test_generate_sends_key_and_returns_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer("Go with 2, bestie!")))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let response = provider
        .generate(&GenerateRequest::text("what should I wear?"))
        .await
        .unwrap();

    assert_eq!(response.text, "Go with 2, bestie!");
    let usage = response.usage.unwrap();
    assert_eq!(usage.prompt_tokens, 120);
    assert_eq!(usage.completion_tokens, 12);
}

#[tokio::test]
async fn test_text_only_request_has_single_text_part() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer("hey!")))
        .mount(&server)
        .await;

    provider_for(&server)
        .generate(&GenerateRequest::text("hi"))
        .await
        .unwrap();

    let body = last_body(&server).await;
    let parts = body["contents"][0]["parts"].as_array().unwrap();
    assert_eq!(parts.len(), 1);
    assert_eq!(parts[0]["text"], "hi");
    assert!(parts[0].get("inline_data").is_none());
}

#[tokio::test]
async fn test_images_precede_text_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer("1 is cute")))
        .mount(&server)
        .await;

    let request = GenerateRequest::with_images(
        vec![
            ImagePart::new("image/png", b"first".to_vec()),
            ImagePart::new("image/jpeg", b"second".to_vec()),
        ],
        "which one?",
    );
    provider_for(&server).generate(&request).await.unwrap();

    let body = last_body(&server).await;
    let parts = body["contents"][0]["parts"].as_array().unwrap();
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[0]["inline_data"]["mime_type"], "image/png");
    assert_eq!(parts[0]["inline_data"]["data"], "Zmlyc3Q=");
    assert_eq!(parts[1]["inline_data"]["mime_type"], "image/jpeg");
    assert_eq!(parts[2]["text"], "which one?");
}

#[tokio::test]
async fn test_unauthorized_maps_to_authentication_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .generate(&GenerateRequest::text("hi"))
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<WardrobeError>(),
        Some(WardrobeError::Authentication(_))
    ));
}

#[tokio::test]
async fn test_invalid_key_body_maps_to_authentication_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "INVALID_ARGUMENT",
                "details": [{ "reason": "API_KEY_INVALID" }]
            }
        })))
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .generate(&GenerateRequest::text("hi"))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Authentication error"));
}

#[tokio::test]
async fn test_server_error_is_provider_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend exploded"))
        .expect(1)
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .generate(&GenerateRequest::text("hi"))
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<WardrobeError>(),
        Some(WardrobeError::Provider(_))
    ));
    assert!(err.to_string().contains("backend exploded"));
}

#[tokio::test]
async fn test_blocked_prompt_reports_reason() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        })))
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .generate(&GenerateRequest::text("hi"))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("SAFETY"));
}

#[tokio::test]
async fn test_unreachable_server_is_provider_error() {
    let server = MockServer::start().await;
    let provider = provider_for(&server);
    drop(server);

    let err = provider
        .generate(&GenerateRequest::text("hi"))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Gemini request failed"));
}
