//! Drivers that assemble a message array for one of the chat modes and
//! run the completion against the model server.
use anyhow::{Result, anyhow};
use tokio::sync::mpsc;

use crate::chat::assemble::assemble;
use crate::chat::transcript::Transcript;
use crate::ollama;
use crate::ollama::{Message, Role};
use crate::prompts::PromptCatalog;

/// Reconstructs prior exchanges as alternating user/assistant messages.
pub fn history_messages(history: &[(String, String)]) -> Vec<Message> {
    let mut messages = Vec::with_capacity(history.len() * 2);
    for (user, assistant) in history {
        messages.push(Message::new(Role::User, user));
        messages.push(Message::new(Role::Assistant, assistant));
    }
    messages
}

/// Runs one turn of plain chat, streaming the accumulated reply text
/// via `tx`. Prior exchanges are replayed only when `include_history`
/// is set. Returns the complete reply.
pub async fn stream_chat(
    tx: mpsc::UnboundedSender<String>,
    api_hostname: &str,
    model: &str,
    message: &str,
    history: &[(String, String)],
    include_history: bool,
) -> Result<String> {
    let mut messages = if include_history {
        history_messages(history)
    } else {
        Vec::new()
    };
    messages.push(Message::new(Role::User, message));

    ollama::chat_stream(tx, api_hostname, model, &messages).await
}

/// Runs one turn of prompt-templated chat. Prior history is ignored;
/// the selected catalog entry's system prompt always comes first.
pub async fn stream_assistant(
    tx: mpsc::UnboundedSender<String>,
    api_hostname: &str,
    model: &str,
    message: &str,
    catalog: &PromptCatalog,
    assistant: &str,
) -> Result<String> {
    let system_text = catalog
        .get(assistant)
        .ok_or_else(|| anyhow!("Unknown assistant: {}", assistant))?;

    let messages = vec![
        Message::new(Role::System, system_text),
        Message::new(Role::User, message),
    ];

    ollama::chat_stream(tx, api_hostname, model, &messages).await
}

/// Runs one visual chat completion over the transcript and appends the
/// reply as an assistant turn. The caller is responsible for checking
/// the transcript has enough turns to submit.
pub async fn submit_vision(
    transcript: &mut Transcript,
    api_hostname: &str,
    model: &str,
    include_history: bool,
    force_language: bool,
) -> Result<String> {
    let messages = assemble(transcript, include_history, force_language)?;
    let reply = ollama::chat(api_hostname, model, &messages).await?;
    transcript.push_assistant(&reply);
    Ok(reply)
}
