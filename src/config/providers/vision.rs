use serde::{Deserialize, Serialize};
use url::Url;

use super::{ProviderDefaults, non_blank};

pub const DEFAULT_VISION_PROMPT: &str = "Analyze the food items in the image. Return a JSON array where each object has a 'name' (string) and 'quantity' (number). Example: [{\"name\": \"Apple\", \"quantity\": 3}].";

/// Vision provider configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VisionConfig {
    /// OpenAI-compatible chat completions endpoint.
    /// TOML: `providers.vision.api_url`. Default: Groq.
    #[serde(default = "default_api_url")]
    pub api_url: Url,

    /// Vision-capable model name.
    /// TOML: `providers.vision.model`.
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature; kept low for stable JSON.
    /// TOML: `providers.vision.temperature`. Default: `0.2`.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Instruction prompt sent alongside the photo.
    /// TOML: `providers.vision.prompt`.
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// Bearer credential. Usually supplied as `FRIDGESCAN_PROVIDERS__VISION__API_KEY`.
    /// Ingestion refuses to run without it.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Optional upstream HTTP proxy.
    /// Falls back to `providers.defaults.proxy` when unset.
    #[serde(default)]
    pub proxy: Option<Url>,

    /// Falls back to `providers.defaults.enable_multiplexing`.
    #[serde(default)]
    pub enable_multiplexing: Option<bool>,

    /// Falls back to `providers.defaults.retry_max_times`.
    #[serde(default)]
    pub retry_max_times: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct VisionResolvedConfig {
    pub api_url: Url,
    pub model: String,
    pub temperature: f32,
    pub prompt: String,
    pub api_key: Option<String>,
    pub proxy: Option<Url>,
    pub enable_multiplexing: bool,
    pub retry_max_times: usize,
}

impl VisionConfig {
    pub fn resolve(&self, defaults: &ProviderDefaults) -> VisionResolvedConfig {
        VisionResolvedConfig {
            api_url: self.api_url.clone(),
            model: self.model.clone(),
            temperature: self.temperature,
            prompt: self.prompt.clone(),
            api_key: non_blank(self.api_key.as_ref()),
            proxy: self.proxy.clone().or_else(|| defaults.proxy.clone()),
            enable_multiplexing: self
                .enable_multiplexing
                .unwrap_or(defaults.enable_multiplexing),
            retry_max_times: self.retry_max_times.unwrap_or(defaults.retry_max_times),
        }
    }
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            model: default_model(),
            temperature: default_temperature(),
            prompt: default_prompt(),
            api_key: None,
            proxy: None,
            enable_multiplexing: None,
            retry_max_times: None,
        }
    }
}

fn default_api_url() -> Url {
    Url::parse("https://api.groq.com/openai/v1/chat/completions")
        .expect("default vision api url is valid")
}

fn default_model() -> String {
    "meta-llama/llama-4-scout-17b-16e-instruct".to_string()
}

fn default_temperature() -> f32 {
    0.2
}

fn default_prompt() -> String {
    DEFAULT_VISION_PROMPT.to_string()
}
