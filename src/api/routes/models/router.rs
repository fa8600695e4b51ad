//! Router for the model listing API

use std::sync::{Arc, RwLock};

use axum::{Router, extract::State, response::Json, routing::get};

use super::public;
use crate::api::state::AppState;
use crate::ollama;

type SharedState = Arc<RwLock<AppState>>;

/// List the models available on the model server
async fn model_list(
    State(state): State<SharedState>,
) -> Result<Json<public::ModelListResponse>, crate::api::public::ApiError> {
    let ollama_host = {
        let shared_state = state.read().expect("Unable to read shared state");
        shared_state.config.ollama_host.clone()
    };

    let models = ollama::list_models(&ollama_host).await?;

    Ok(Json(public::ModelListResponse { models }))
}

/// Create the models router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", get(model_list))
}
