pub mod chat;
pub mod detection;

pub use chat::{
    ChatCompletionRequest, ChatCompletionResponse, ChatContentPart, ChatMessage, ImageUrl,
    ResponseFormat,
};
pub use detection::{DetectedEntry, DetectionReply};
