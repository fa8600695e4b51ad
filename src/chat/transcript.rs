//! The core models for managing a stateful visual chat.
use serde::{Deserialize, Serialize};

/// One atomic entry in a visual chat conversation: an uploaded image
/// (stored as a file path), a user message, or an assistant reply.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "content", rename_all = "lowercase")]
pub enum Turn {
    Image(String),
    User(String),
    Assistant(String),
}

/// An ordered sequence of turns for one conversation. Held per session
/// so concurrent sessions never share a conversation buffer.
///
/// All operations are total: undo and retry degrade to no-ops on empty
/// or too-short transcripts.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript(Vec<Turn>);

impl Transcript {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push_image(&mut self, path: &str) {
        self.0.push(Turn::Image(path.to_string()))
    }

    pub fn push_user(&mut self, text: &str) {
        self.0.push(Turn::User(text.to_string()))
    }

    pub fn push_assistant(&mut self, text: &str) {
        self.0.push(Turn::Assistant(text.to_string()))
    }

    /// Removes the final turn iff it is an assistant reply so the
    /// caller can regenerate it. Returns whether a turn was removed.
    pub fn retry_last(&mut self) -> bool {
        if matches!(self.0.last(), Some(Turn::Assistant(_))) {
            self.0.pop();
            true
        } else {
            false
        }
    }

    /// Rewinds the conversation by one exchange and returns the text
    /// of the message being re-edited.
    ///
    /// If the final turn is an assistant reply, both it and the
    /// preceding turn are removed and the preceding turn's content is
    /// returned. If the final turn is a user message, only it is
    /// removed. Anything else is a no-op returning an empty string.
    pub fn undo_last(&mut self) -> String {
        match self.0.last() {
            Some(Turn::Assistant(_)) => {
                self.0.pop();
                match self.0.pop() {
                    Some(Turn::User(text)) | Some(Turn::Assistant(text)) => text,
                    Some(Turn::Image(path)) => path,
                    None => String::new(),
                }
            }
            Some(Turn::User(_)) => match self.0.pop() {
                Some(Turn::User(text)) => text,
                _ => String::new(),
            },
            _ => String::new(),
        }
    }

    pub fn clear(&mut self) {
        self.0.clear()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.0
    }
}
