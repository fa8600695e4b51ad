//! Router for the visual chat API
//!
//! Every route is scoped to a session id so concurrent sessions each
//! get their own transcript.

use std::sync::{Arc, RwLock};

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use super::public;
use crate::api::state::AppState;
use crate::chat::assemble;
use crate::ollama;

type SharedState = Arc<RwLock<AppState>>;

/// Get the current transcript for a session
async fn vision_transcript(
    State(state): State<SharedState>,
    Path(session): Path<String>,
) -> impl IntoResponse {
    let transcript = {
        let shared_state = state.read().expect("Unable to read shared state");
        shared_state
            .vision_sessions
            .get(&session)
            .cloned()
            .unwrap_or_default()
    };
    axum::Json(public::TranscriptResponse {
        transcript: transcript.turns().to_vec(),
    })
}

/// Record an uploaded image as the next turn
async fn vision_image(
    State(state): State<SharedState>,
    Path(session): Path<String>,
    axum::Json(payload): axum::Json<public::ImageUploadRequest>,
) -> impl IntoResponse {
    let mut shared_state = state.write().expect("Unable to write shared state");
    let transcript = shared_state.vision_sessions.entry(session).or_default();
    transcript.push_image(&payload.path);
    axum::Json(public::TranscriptResponse {
        transcript: transcript.turns().to_vec(),
    })
}

/// Record a user message as the next turn
async fn vision_message(
    State(state): State<SharedState>,
    Path(session): Path<String>,
    axum::Json(payload): axum::Json<public::UserMessageRequest>,
) -> impl IntoResponse {
    let mut shared_state = state.write().expect("Unable to write shared state");
    let transcript = shared_state.vision_sessions.entry(session).or_default();
    transcript.push_user(&payload.message);
    axum::Json(public::TranscriptResponse {
        transcript: transcript.turns().to_vec(),
    })
}

/// Submit the session's transcript for an assistant reply
async fn vision_submit(
    State(state): State<SharedState>,
    Path(session): Path<String>,
    axum::Json(payload): axum::Json<public::SubmitRequest>,
) -> Result<impl IntoResponse, crate::api::public::ApiError> {
    let (transcript, ollama_host, default_model) = {
        let shared_state = state.read().expect("Unable to read shared state");
        (
            shared_state
                .vision_sessions
                .get(&session)
                .cloned()
                .unwrap_or_default(),
            shared_state.config.ollama_host.clone(),
            shared_state.config.vision_model.clone(),
        )
    };

    // There is nothing to ask the model until the session has at least
    // an image and a message. Recoverable: warn and leave the
    // transcript untouched.
    if transcript.len() < 2 {
        return Ok((
            StatusCode::BAD_REQUEST,
            axum::Json(public::WarningResponse::new(
                "Upload an image and enter a message before submitting",
            )),
        )
            .into_response());
    }

    let model = payload.model.unwrap_or(default_model);
    let messages = assemble(&transcript, payload.include_history, payload.force_language)?;
    let reply = ollama::chat(&ollama_host, &model, &messages).await?;

    // Re-take the lock to append the reply since it can't be held
    // across the completion call
    let mut shared_state = state.write().expect("Unable to write shared state");
    let transcript = shared_state.vision_sessions.entry(session).or_default();
    transcript.push_assistant(&reply);

    Ok(axum::Json(public::TranscriptResponse {
        transcript: transcript.turns().to_vec(),
    })
    .into_response())
}

/// Drop the trailing assistant reply so it can be regenerated
async fn vision_retry(
    State(state): State<SharedState>,
    Path(session): Path<String>,
) -> impl IntoResponse {
    let mut shared_state = state.write().expect("Unable to write shared state");
    let transcript = shared_state.vision_sessions.entry(session).or_default();
    transcript.retry_last();
    axum::Json(public::TranscriptResponse {
        transcript: transcript.turns().to_vec(),
    })
}

/// Rewind the last exchange, returning the message text for re-editing
async fn vision_undo(
    State(state): State<SharedState>,
    Path(session): Path<String>,
) -> impl IntoResponse {
    let mut shared_state = state.write().expect("Unable to write shared state");
    let transcript = shared_state.vision_sessions.entry(session).or_default();
    let message = transcript.undo_last();
    axum::Json(public::UndoResponse {
        message,
        transcript: transcript.turns().to_vec(),
    })
}

/// Wipe the session's transcript
async fn vision_clear(
    State(state): State<SharedState>,
    Path(session): Path<String>,
) -> impl IntoResponse {
    let mut shared_state = state.write().expect("Unable to write shared state");
    let transcript = shared_state.vision_sessions.entry(session).or_default();
    transcript.clear();
    StatusCode::OK
}

/// Create the vision router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/{session}", get(vision_transcript))
        .route("/{session}/image", post(vision_image))
        .route("/{session}/message", post(vision_message))
        .route("/{session}/submit", post(vision_submit))
        .route("/{session}/retry", post(vision_retry))
        .route("/{session}/undo", post(vision_undo))
        .route("/{session}/clear", post(vision_clear))
}
