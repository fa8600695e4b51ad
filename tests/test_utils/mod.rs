//! Test utilities for integration tests
use std::sync::{Arc, RwLock};

use axum::{Router, body::Body};

use parley::api::AppState;
use parley::api::app;
use parley::core::AppConfig;
use parley::prompts::PromptCatalog;

pub const TEST_CATALOG: &str = r#"{
    "Translator": "You are a translator. Translate everything to English.",
    "Coach": "You are an encouraging writing coach."
}"#;

/// Creates a test application router pointed at the given model server
/// (usually a `mockito` server URL).
pub fn test_app(ollama_host: &str) -> Router {
    let config = AppConfig {
        ollama_host: ollama_host.to_string(),
        chat_model: String::from("llama3"),
        vision_model: String::from("llava:7b-v1.6"),
        prompt_file_path: String::from("unused-in-tests"),
    };
    let catalog = PromptCatalog::from_json(TEST_CATALOG).expect("Failed to parse test catalog");
    let app_state = AppState::new(catalog, config);
    app(Arc::new(RwLock::new(app_state)))
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Failed to read response body");
    String::from_utf8(bytes.to_vec()).expect("Response body was not valid utf-8")
}
