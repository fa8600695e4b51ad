//! Converts a visual chat transcript into the role-tagged message
//! array expected by the chat API.
use anyhow::{Context, Result, bail};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::chat::transcript::{Transcript, Turn};
use crate::ollama::{Message, Role};

/// System prompt prepended when the user asks for replies in French.
pub const LANGUAGE_SYSTEM_PROMPT: &str =
    "You are a helpful assistant. Please answer the question in French.";

fn encode_image(path: &str) -> Result<String> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read image file {}", path))?;
    Ok(STANDARD.encode(bytes))
}

/// Builds the message array for a visual chat completion.
///
/// With `include_history` the whole transcript is walked: an image turn
/// immediately followed by a user turn collapses into a single user
/// message carrying the base64-encoded image, other user and assistant
/// turns map to their own messages, and an image with no follow-up user
/// turn is skipped. Without it, only the first turn (which must be an
/// image) and the last turn (which must be a user message) are sent.
///
/// When `force_language` is set, a fixed system message is inserted at
/// index 0.
pub fn assemble(
    transcript: &Transcript,
    include_history: bool,
    force_language: bool,
) -> Result<Vec<Message>> {
    let turns = transcript.turns();
    let mut messages = Vec::new();

    if include_history {
        let mut i = 0;
        while i < turns.len() {
            match &turns[i] {
                Turn::Image(path) => {
                    if let Some(Turn::User(text)) = turns.get(i + 1) {
                        let image = encode_image(path)?;
                        messages.push(Message::new_with_images(Role::User, text, vec![image]));
                        i += 2;
                    } else {
                        // An image with nothing asked about it carries
                        // no message
                        i += 1;
                    }
                }
                Turn::User(text) => {
                    messages.push(Message::new(Role::User, text));
                    i += 1;
                }
                Turn::Assistant(text) => {
                    messages.push(Message::new(Role::Assistant, text));
                    i += 1;
                }
            }
        }
    } else {
        // Latest-image-only mode: the first turn supplies the image and
        // the last turn supplies the question. Anything else means the
        // caller submitted a malformed transcript.
        let Some(Turn::Image(path)) = turns.first() else {
            bail!("Expected the first turn to be an image, got: {:?}", turns.first());
        };
        let Some(Turn::User(text)) = turns.last() else {
            bail!(
                "Expected the last turn to be a user message, got: {:?}",
                turns.last()
            );
        };
        let image = encode_image(path)?;
        messages.push(Message::new_with_images(Role::User, text, vec![image]));
    }

    if force_language {
        messages.insert(0, Message::new(Role::System, LANGUAGE_SYSTEM_PROMPT));
    }

    Ok(messages)
}
