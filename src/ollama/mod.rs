mod core;

pub use core::{Message, Role, chat, chat_stream, list_models};
