//! Router for the prompt-templated assistant API

use std::convert::Infallible;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, sse::Event, sse::KeepAlive, sse::Sse},
    routing::post,
};
use tokio::sync::mpsc;
use tokio_stream::StreamExt as _;
use tokio_stream::wrappers::UnboundedReceiverStream;

use super::public;
use crate::api::state::AppState;
use crate::chat::stream_assistant;

type SharedState = Arc<RwLock<AppState>>;

/// List the selectable assistant names from the prompt catalog
async fn assistant_list(State(state): State<SharedState>) -> impl IntoResponse {
    let names = {
        let shared_state = state.read().expect("Unable to read shared state");
        shared_state.catalog.names()
    };
    axum::Json(public::AssistantListResponse { assistants: names })
}

/// Run one turn of chat against a selected assistant's system prompt
/// and stream the response. Prior history is never replayed in this
/// mode; every turn starts from the assistant's prompt.
async fn assistant_chat_handler(
    State(state): State<SharedState>,
    axum::Json(payload): axum::Json<public::AssistantChatRequest>,
) -> Result<impl IntoResponse, crate::api::public::ApiError> {
    let (catalog, ollama_host, default_model) = {
        let shared_state = state.read().expect("Unable to read shared state");
        (
            shared_state.catalog.clone(),
            shared_state.config.ollama_host.clone(),
            shared_state.config.chat_model.clone(),
        )
    };

    // Reject unknown assistants before starting a stream so the client
    // gets a real status code instead of an error event
    if catalog.get(&payload.assistant).is_none() {
        return Ok((
            StatusCode::NOT_FOUND,
            format!("Assistant {} not found", payload.assistant),
        )
            .into_response());
    }

    let public::AssistantChatRequest {
        assistant,
        message,
        model,
    } = payload;
    let model = model.unwrap_or(default_model);
    let (tx, rx) = mpsc::unbounded_channel::<String>();

    let sse_stream = UnboundedReceiverStream::new(rx)
        .map(|chunk| Ok::<Event, Infallible>(Event::default().data(chunk)));

    tokio::spawn(async move {
        let result = stream_assistant(
            tx.clone(),
            &ollama_host,
            &model,
            &message,
            &catalog,
            &assistant,
        )
        .await;

        match result {
            Ok(_) => {
                let _ = tx.send("[DONE]".to_string());
            }
            Err(e) => {
                tracing::error!(
                    "Assistant chat handler error: {}. Root cause: {}",
                    e,
                    e.root_cause()
                );
                let _ = tx.send(format!("Something went wrong: {}", e));
            }
        }
    });

    let resp = Sse::new(sse_stream)
        .keep_alive(
            KeepAlive::default()
                .text("keep-alive")
                .interval(Duration::from_millis(100)),
        )
        .into_response();

    Ok(resp)
}

/// Create the assistant router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", post(assistant_chat_handler).get(assistant_list))
}
