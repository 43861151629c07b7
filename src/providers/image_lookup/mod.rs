mod client;

pub use client::ImageLookupClient;

use async_trait::async_trait;

use crate::error::FridgeError;

/// Resolves a display image URL for an item name.
///
/// "Nothing found" is not an error: implementations return a placeholder
/// (possibly empty). `Err` is reserved for calls that could not complete.
#[async_trait]
pub trait ImageLookup: Send + Sync {
    async fn resolve(&self, name: &str) -> Result<String, FridgeError>;
}
