mod basic;
mod providers;

pub use basic::BasicConfig;
pub use providers::{
    DEFAULT_VISION_PROMPT, ImageLookupConfig, ImageLookupResolvedConfig, ProviderDefaults,
    ProvidersConfig, VisionConfig, VisionResolvedConfig,
};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, sync::LazyLock};

/// Application configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Core server and storage configuration (see `basic` table in config.toml).
    #[serde(default)]
    pub basic: BasicConfig,

    /// Remote services used by ingestion (see `providers` table in config.toml).
    #[serde(default)]
    pub providers: ProvidersConfig,
}

const DEFAULT_CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "FRIDGESCAN_";

impl Config {
    /// Builds a Figment that merges defaults, an optional config TOML file and
    /// `FRIDGESCAN_`-prefixed environment variables (`__` separates tables).
    pub fn figment() -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        if PathBuf::from(DEFAULT_CONFIG_FILE).is_file() {
            figment = figment.merge(Toml::file(DEFAULT_CONFIG_FILE));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Loads configuration from defaults, `config.toml` (if present) and the environment.
    ///
    /// The vision API key is deliberately not validated here: a missing key only
    /// fails photo ingestion, never startup.
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    pub fn vision(&self) -> VisionResolvedConfig {
        self.providers.vision.resolve(&self.providers.defaults)
    }

    pub fn image_lookup(&self) -> ImageLookupResolvedConfig {
        self.providers.image_lookup.resolve(&self.providers.defaults)
    }
}

/// Global, lazily-initialized configuration instance used by the binary.
pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Config::load().unwrap_or_else(|err| panic!("failed to extract configuration: {err}"))
});
