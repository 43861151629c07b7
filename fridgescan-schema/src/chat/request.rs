//! OpenAI-compatible chat completions request schema (vision subset).

use serde::{Deserialize, Serialize};

/// Request body for `POST /v1/chat/completions`.
///
/// Only the fields FridgeScan sends are modeled. Groq and other
/// OpenAI-compatible vision endpoints accept this shape verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    pub model: String,

    pub messages: Vec<ChatMessage>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Usually `"user"`.
    pub role: String,

    /// Multi-part content (text + image).
    pub content: Vec<ChatContentPart>,
}

/// One typed part of a multi-part user message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageUrl {
    /// Either a remote URL or a `data:image/...;base64,` URI.
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResponseFormat {
    /// `"json_object"` or `"text"`.
    #[serde(rename = "type")]
    pub kind: String,
}

impl ResponseFormat {
    pub fn json_object() -> Self {
        Self {
            kind: "json_object".to_string(),
        }
    }
}

impl ChatCompletionRequest {
    /// Builds the single-turn "prompt + one image" request used for photo analysis.
    pub fn vision(
        model: impl Into<String>,
        prompt: impl Into<String>,
        image_url: impl Into<String>,
        temperature: Option<f32>,
    ) -> Self {
        Self {
            model: model.into(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: vec![
                    ChatContentPart::Text {
                        text: prompt.into(),
                    },
                    ChatContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: image_url.into(),
                        },
                    },
                ],
            }],
            temperature,
            response_format: Some(ResponseFormat::json_object()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn vision_request_serializes_tagged_parts() {
        let req = ChatCompletionRequest::vision(
            "scout",
            "list the food",
            "data:image/jpeg;base64,AAAA",
            Some(0.2),
        );
        let value = serde_json::to_value(&req).expect("serialize");

        assert_eq!(value["model"], json!("scout"));
        assert_eq!(value["response_format"], json!({ "type": "json_object" }));
        assert_eq!(
            value["messages"][0]["content"],
            json!([
                { "type": "text", "text": "list the food" },
                { "type": "image_url", "image_url": { "url": "data:image/jpeg;base64,AAAA" } }
            ])
        );
    }

    #[test]
    fn temperature_is_omitted_when_unset() {
        let req = ChatCompletionRequest::vision("m", "p", "u", None);
        let value = serde_json::to_value(&req).expect("serialize");
        assert!(value.get("temperature").is_none());
    }
}
