mod image_lookup;
mod vision;

pub use image_lookup::{ImageLookupConfig, ImageLookupResolvedConfig};
pub use vision::{DEFAULT_VISION_PROMPT, VisionConfig, VisionResolvedConfig};

use serde::{Deserialize, Serialize};
use url::Url;

/// Global provider defaults (used when provider-level config is unset).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderDefaults {
    /// Optional upstream HTTP proxy. If set, used for reqwest clients.
    /// TOML: `providers.defaults.proxy`. Example: `http://127.0.0.1:1080`.
    #[serde(default)]
    pub proxy: Option<Url>,

    /// Allow HTTP/2 multiplexing for reqwest clients; disabled forces HTTP/1.
    /// TOML: `providers.defaults.enable_multiplexing`. Default: `false`.
    #[serde(default = "default_enable_multiplexing")]
    pub enable_multiplexing: bool,

    /// Retries for upstream calls on transport errors and 5xx.
    /// TOML: `providers.defaults.retry_max_times`. Default: `0` (single attempt).
    #[serde(default = "default_retry_max_times")]
    pub retry_max_times: usize,
}

impl Default for ProviderDefaults {
    fn default() -> Self {
        Self {
            proxy: None,
            enable_multiplexing: default_enable_multiplexing(),
            retry_max_times: default_retry_max_times(),
        }
    }
}

/// All provider configurations.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ProvidersConfig {
    /// Global defaults for providers (overridden per provider if set).
    #[serde(default)]
    pub defaults: ProviderDefaults,

    /// Vision model used to read food items off a photo.
    #[serde(default)]
    pub vision: VisionConfig,

    /// Image search used to pick a display image per item.
    #[serde(default)]
    pub image_lookup: ImageLookupConfig,
}

fn default_enable_multiplexing() -> bool {
    false
}

fn default_retry_max_times() -> usize {
    0
}

fn non_blank(value: Option<&String>) -> Option<String> {
    value
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
