//! API routes module

pub mod assistant;
pub mod chat;
pub mod models;
pub mod vision;

use std::sync::{Arc, RwLock};

use crate::api::state::AppState;
use axum::Router;

type SharedState = Arc<RwLock<AppState>>;

/// Create the combined API router
pub fn router() -> Router<SharedState> {
    Router::new()
        // Plain chat routes
        .nest("/chat", chat::router())
        // Prompt-templated assistant routes
        .nest("/assistant", assistant::router())
        // Visual chat session routes
        .nest("/vision", vision::router())
        // Model listing routes
        .nest("/models", models::router())
}
