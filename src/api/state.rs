use std::collections::HashMap;

use crate::chat::Transcript;
use crate::core::AppConfig;
use crate::prompts::PromptCatalog;

pub struct AppState {
    // Visual chat transcripts keyed by session id. Scoping the
    // conversation buffer to a session keeps concurrent sessions from
    // mutating each other's state.
    pub vision_sessions: HashMap<String, Transcript>,
    pub catalog: PromptCatalog,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(catalog: PromptCatalog, config: AppConfig) -> Self {
        Self {
            vision_sessions: HashMap::new(),
            catalog,
            config,
        }
    }
}
