//! Public types for the prompt-templated assistant API
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct AssistantChatRequest {
    pub assistant: String,
    pub message: String,
    // Override the configured default model
    pub model: Option<String>,
}

#[derive(Serialize)]
pub struct AssistantListResponse {
    pub assistants: Vec<String>,
}
