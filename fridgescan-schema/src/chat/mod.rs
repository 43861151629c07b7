mod request;
mod response;

pub use request::{ChatCompletionRequest, ChatContentPart, ChatMessage, ImageUrl, ResponseFormat};
pub use response::{ChatChoice, ChatCompletionResponse, ChatReplyMessage};
