use serde::{Deserialize, Serialize};
use url::Url;

use super::{ProviderDefaults, non_blank};

/// Image search provider configuration managed by Figment.
///
/// The lookup is a plain `GET <api_url>?<query_param>=<item name>`; the display
/// URL is read from the JSON response at `result_pointer`. Defaults fit the
/// Unsplash search API.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ImageLookupConfig {
    /// Search endpoint. When unset, every lookup yields `placeholder_url`.
    /// TOML: `providers.image_lookup.api_url`.
    #[serde(default)]
    pub api_url: Option<Url>,

    /// TOML: `providers.image_lookup.query_param`. Default: `query`.
    #[serde(default = "default_query_param")]
    pub query_param: String,

    /// JSON pointer (RFC 6901) to the image URL inside the response.
    /// TOML: `providers.image_lookup.result_pointer`. Default: `/results/0/urls/small`.
    #[serde(default = "default_result_pointer")]
    pub result_pointer: String,

    /// Sent as `Authorization: Client-ID <key>` when present.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Returned when the service has no usable image for a name.
    /// TOML: `providers.image_lookup.placeholder_url`. Default: empty.
    #[serde(default)]
    pub placeholder_url: String,

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
pub struct ImageLookupResolvedConfig {
    pub api_url: Option<Url>,
    pub query_param: String,
    pub result_pointer: String,
    pub api_key: Option<String>,
    pub placeholder_url: String,
    pub proxy: Option<Url>,
    pub enable_multiplexing: bool,
    pub retry_max_times: usize,
}

impl ImageLookupConfig {
    pub fn resolve(&self, defaults: &ProviderDefaults) -> ImageLookupResolvedConfig {
        ImageLookupResolvedConfig {
            api_url: self.api_url.clone(),
            query_param: self.query_param.clone(),
            result_pointer: self.result_pointer.clone(),
            api_key: non_blank(self.api_key.as_ref()),
            placeholder_url: self.placeholder_url.clone(),
            proxy: self.proxy.clone().or_else(|| defaults.proxy.clone()),
            enable_multiplexing: self
                .enable_multiplexing
                .unwrap_or(defaults.enable_multiplexing),
            retry_max_times: self.retry_max_times.unwrap_or(defaults.retry_max_times),
        }
    }
}

impl Default for ImageLookupConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            query_param: default_query_param(),
            result_pointer: default_result_pointer(),
            api_key: None,
            placeholder_url: String::new(),
            proxy: None,
            enable_multiplexing: None,
            retry_max_times: None,
        }
    }
}

fn default_query_param() -> String {
    "query".to_string()
}

fn default_result_pointer() -> String {
    "/results/0/urls/small".to_string()
}
