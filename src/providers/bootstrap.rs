use crate::config::Config;
use crate::error::FridgeError;
use crate::providers::http::build_client;
use crate::providers::{
    FRIDGESCAN_USER_AGENT, ImageLookup, ImageLookupClient, VisionClient, VisionService,
};
use std::sync::Arc;
use tracing::info;

/// The two remote collaborators ingestion depends on.
///
/// Held as trait objects so tests and embedders can swap in fakes.
#[derive(Clone)]
pub struct Providers {
    pub vision: Arc<dyn VisionService>,
    pub image_lookup: Arc<dyn ImageLookup>,
}

impl Providers {
    pub fn from_config(cfg: &Config) -> Result<Self, FridgeError> {
        let vision_cfg = Arc::new(cfg.vision());
        let image_lookup_cfg = Arc::new(cfg.image_lookup());

        // Log resolved provider configs here so `main` stays wiring-only.
        info!(
            vision_api_url = %vision_cfg.api_url,
            vision_model = %vision_cfg.model,
            vision_temperature = vision_cfg.temperature,
            vision_api_key_set = vision_cfg.api_key.is_some(),
            vision_proxy = %vision_cfg.proxy.as_ref().map(|u| u.as_str()).unwrap_or("<none>"),
            vision_enable_multiplexing = vision_cfg.enable_multiplexing,
            vision_retry_max_times = vision_cfg.retry_max_times,
            "Vision config (effective)"
        );
        info!(
            image_lookup_api_url = %image_lookup_cfg.api_url.as_ref().map(|u| u.as_str()).unwrap_or("<none>"),
            image_lookup_result_pointer = %image_lookup_cfg.result_pointer,
            image_lookup_proxy = %image_lookup_cfg.proxy.as_ref().map(|u| u.as_str()).unwrap_or("<none>"),
            image_lookup_retry_max_times = image_lookup_cfg.retry_max_times,
            "Image lookup config (effective)"
        );

        let vision_http = build_client(
            FRIDGESCAN_USER_AGENT,
            vision_cfg.proxy.as_ref(),
            vision_cfg.enable_multiplexing,
        )?;
        let image_lookup_http = build_client(
            FRIDGESCAN_USER_AGENT,
            image_lookup_cfg.proxy.as_ref(),
            image_lookup_cfg.enable_multiplexing,
        )?;

        Ok(Self {
            vision: Arc::new(VisionClient::new(vision_cfg, vision_http)),
            image_lookup: Arc::new(ImageLookupClient::new(image_lookup_cfg, image_lookup_http)),
        })
    }
}
