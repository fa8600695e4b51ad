//! Public types for the plain chat API
use serde::Deserialize;

#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: String,
    // Override the configured default model
    pub model: Option<String>,
    // Prior exchanges as (user, assistant) pairs, oldest first
    #[serde(default)]
    pub history: Vec<(String, String)>,
    #[serde(default)]
    pub include_history: bool,
}
