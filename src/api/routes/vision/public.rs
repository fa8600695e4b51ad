//! Public types for the visual chat API
use serde::{Deserialize, Serialize};

use crate::chat::Turn;

#[derive(Deserialize)]
pub struct ImageUploadRequest {
    // Server-local path of the uploaded image file
    pub path: String,
}

#[derive(Deserialize)]
pub struct UserMessageRequest {
    pub message: String,
}

#[derive(Deserialize)]
pub struct SubmitRequest {
    #[serde(default)]
    pub include_history: bool,
    #[serde(default)]
    pub force_language: bool,
    // Override the configured vision model
    pub model: Option<String>,
}

#[derive(Serialize)]
pub struct TranscriptResponse {
    pub transcript: Vec<Turn>,
}

#[derive(Serialize)]
pub struct UndoResponse {
    // Text of the rewound message so it can be re-edited; empty when
    // the undo was a no-op
    pub message: String,
    pub transcript: Vec<Turn>,
}

#[derive(Serialize)]
pub struct WarningResponse {
    pub warning: String,
}

impl WarningResponse {
    pub fn new(warning: &str) -> Self {
        Self {
            warning: warning.into(),
        }
    }
}
