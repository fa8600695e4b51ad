//! Router for the plain chat API

use std::convert::Infallible;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use axum::{
    Router,
    extract::State,
    response::{IntoResponse, sse::Event, sse::KeepAlive, sse::Sse},
    routing::post,
};
use tokio::sync::mpsc;
use tokio_stream::StreamExt as _;
use tokio_stream::wrappers::UnboundedReceiverStream;

use super::public;
use crate::api::state::AppState;
use crate::chat::stream_chat;

type SharedState = Arc<RwLock<AppState>>;

/// Run one turn of freeform chat and stream the response. Each SSE
/// event carries the full accumulated reply so far, followed by a
/// final `[DONE]` event.
async fn chat_handler(
    State(state): State<SharedState>,
    axum::Json(payload): axum::Json<public::ChatRequest>,
) -> Result<impl IntoResponse, crate::api::public::ApiError> {
    let (tx, rx) = mpsc::unbounded_channel::<String>();

    let sse_stream = UnboundedReceiverStream::new(rx)
        .map(|chunk| Ok::<Event, Infallible>(Event::default().data(chunk)));

    let (ollama_host, default_model) = {
        let shared_state = state.read().expect("Unable to read shared state");
        (
            shared_state.config.ollama_host.clone(),
            shared_state.config.chat_model.clone(),
        )
    };
    let public::ChatRequest {
        message,
        model,
        history,
        include_history,
    } = payload;
    let model = model.unwrap_or(default_model);

    // Get the next response
    tokio::spawn(async move {
        let result = stream_chat(
            tx.clone(),
            &ollama_host,
            &model,
            &message,
            &history,
            include_history,
        )
        .await;

        match result {
            Ok(_) => {
                let _ = tx.send("[DONE]".to_string());
            }
            Err(e) => {
                tracing::error!("Chat handler error: {}. Root cause: {}", e, e.root_cause());
                // Whatever was accumulated has already been forwarded;
                // surface a generic failure as the terminal event
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

/// Create the chat router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", post(chat_handler))
}
