pub mod assemble;
pub mod drivers;
pub mod transcript;

pub use assemble::assemble;
pub use drivers::{history_messages, stream_assistant, stream_chat, submit_vision};
pub use transcript::{Transcript, Turn};
