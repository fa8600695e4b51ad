//! Client for the Ollama chat API.
use std::time::Duration;

use anyhow::{Context, Error, Result};
use futures_util::StreamExt;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::mpsc;

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub enum Role {
    #[serde(rename = "system")]
    System,
    #[serde(rename = "assistant")]
    Assistant,
    #[serde(rename = "user")]
    User,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: String,
    // Base64-encoded images for multimodal models. Omitted from the
    // payload entirely for text-only messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

impl Message {
    pub fn new(role: Role, content: &str) -> Self {
        Message {
            role,
            content: content.to_string(),
            images: None,
        }
    }

    pub fn new_with_images(role: Role, content: &str, images: Vec<String>) -> Self {
        Message {
            role,
            content: content.to_string(),
            images: Some(images),
        }
    }
}

// Shape of a single response object or streamed chunk:
// {"model":"...","message":{"role":"assistant","content":"..."},"done":false}
#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ChatResponseMessage,
    #[serde(default)]
    done: bool,
}

#[derive(Debug, Deserialize)]
struct ModelInfo {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ModelListResponse {
    models: Vec<ModelInfo>,
}

/// Requests a single, non-streaming chat completion and returns the
/// assistant's reply text.
pub async fn chat(api_hostname: &str, model: &str, messages: &Vec<Message>) -> Result<String, Error> {
    let payload = json!({
        "model": model,
        "messages": messages,
        "stream": false,
    });
    let url = format!("{}/api/chat", api_hostname.trim_end_matches("/"));
    let response = reqwest::Client::new()
        .post(url)
        .header("Content-Type", "application/json")
        .timeout(Duration::from_secs(60 * 10))
        .json(&payload)
        .send()
        .await?
        .error_for_status()?;

    let resp: ChatResponse = response
        .json()
        .await
        .context("Failed to parse chat response")?;

    Ok(resp.message.content)
}

/// Requests a streaming chat completion. Each time the model yields a
/// chunk, the full accumulated text so far (not the delta) is sent via
/// the transmitter channel `tx`. Returns the complete reply text once
/// the stream finishes.
pub async fn chat_stream(
    tx: mpsc::UnboundedSender<String>,
    api_hostname: &str,
    model: &str,
    messages: &Vec<Message>,
) -> Result<String, Error> {
    let payload = json!({
        "model": model,
        "messages": messages,
        "stream": true,
    });
    let url = format!("{}/api/chat", api_hostname.trim_end_matches("/"));
    let response = reqwest::Client::new()
        .post(url)
        .header("Content-Type", "application/json")
        .timeout(Duration::from_secs(60 * 5))
        .json(&payload)
        .send()
        .await?
        .error_for_status()?;

    let mut stream = response.bytes_stream();

    let mut partial = String::new();
    let mut buffer = String::new();

    'outer: while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        let chunk_str = std::str::from_utf8(&chunk)?;

        // Append new data to the buffer. Chunks are newline-delimited
        // JSON objects but a single network read can end mid-object so
        // only complete lines are parsed.
        buffer.push_str(chunk_str);

        while let Some(line_end) = buffer.find('\n') {
            let line = buffer[..line_end].trim().to_string();
            buffer = buffer[line_end + 1..].to_string();

            if line.is_empty() {
                continue;
            }

            let chunk = serde_json::from_str::<ChatResponse>(&line).inspect_err(|e| {
                tracing::error!("Parsing chat chunk failed for {}\nError:{}", line, e)
            })?;

            if !chunk.message.content.is_empty() {
                partial += &chunk.message.content;
                // The result is ignored here so the remainder of the
                // response is still consumed if the receiver went away
                let _ = tx.send(partial.clone());
            }

            if chunk.done {
                break 'outer;
            }
        }
    }

    Ok(partial)
}

/// Fetches the names of all models available on the server.
pub async fn list_models(api_hostname: &str) -> Result<Vec<String>, Error> {
    let url = format!("{}/api/tags", api_hostname.trim_end_matches("/"));
    let response = reqwest::Client::new()
        .get(url)
        .timeout(Duration::from_secs(30))
        .send()
        .await?
        .error_for_status()?;

    let resp: ModelListResponse = response
        .json()
        .await
        .context("Failed to parse model list response")?;

    Ok(resp.models.into_iter().map(|m| m.name).collect())
}
