mod api;
mod client;

pub use api::VisionApi;
pub use client::VisionClient;

use async_trait::async_trait;
use base64::Engine as _;

use crate::error::FridgeError;

/// Remote model that reads food items off a photo.
#[async_trait]
pub trait VisionService: Send + Sync {
    /// Returns the model's raw reply text (possibly fenced JSON).
    async fn analyze(&self, image: &ImagePayload) -> Result<String, FridgeError>;
}

/// A captured photo, as handed over by the capture side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImagePayload {
    /// Base64 text, either bare or already a `data:image/...` URI.
    Encoded(String),
    /// Raw image bytes with their MIME type.
    Bytes { data: Vec<u8>, mime: String },
}

impl ImagePayload {
    /// `data:` URI accepted by the vision endpoint. Bare base64 is assumed JPEG.
    pub fn to_data_uri(&self) -> String {
        match self {
            ImagePayload::Encoded(s) => {
                let s = s.trim();
                if s.starts_with("data:image") {
                    s.to_string()
                } else {
                    format!("data:image/jpeg;base64,{s}")
                }
            }
            ImagePayload::Bytes { data, mime } => {
                let encoded = base64::engine::general_purpose::STANDARD.encode(data);
                format!("data:{mime};base64,{encoded}")
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ImagePayload::Encoded(s) => s.trim().is_empty(),
            ImagePayload::Bytes { data, .. } => data.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_base64_is_prefixed_as_jpeg() {
        let payload = ImagePayload::Encoded("QUJD".to_string());
        assert_eq!(payload.to_data_uri(), "data:image/jpeg;base64,QUJD");
    }

    #[test]
    fn data_uri_is_sent_verbatim() {
        let payload = ImagePayload::Encoded("data:image/png;base64,QUJD".to_string());
        assert_eq!(payload.to_data_uri(), "data:image/png;base64,QUJD");
    }

    #[test]
    fn raw_bytes_are_encoded_with_their_mime() {
        let payload = ImagePayload::Bytes {
            data: b"ABC".to_vec(),
            mime: "image/webp".to_string(),
        };
        assert_eq!(payload.to_data_uri(), "data:image/webp;base64,QUJD");
    }
}
