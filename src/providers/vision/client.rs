use crate::config::VisionResolvedConfig;
use crate::error::{FridgeError, IsRetryable};
use crate::providers::policy::{body_preview, retry_policy};
use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use fridgescan_schema::{ChatCompletionRequest, ChatCompletionResponse};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

use super::api::VisionApi;
use super::{ImagePayload, VisionService};

/// Client for an OpenAI-compatible vision endpoint (Groq by default).
pub struct VisionClient {
    client: reqwest::Client,
    cfg: Arc<VisionResolvedConfig>,
    retry_policy: ExponentialBuilder,
}

impl VisionClient {
    pub fn new(cfg: Arc<VisionResolvedConfig>, client: reqwest::Client) -> Self {
        let retry_policy = retry_policy(cfg.retry_max_times);
        Self {
            client,
            cfg,
            retry_policy,
        }
    }

    async fn post_once(
        &self,
        api_key: &str,
        body: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, FridgeError> {
        let resp = VisionApi::post(&self.client, &self.cfg.api_url, api_key, body).await?;

        let status = resp.status();
        if !status.is_success() {
            let body = body_preview(resp).await;
            warn!(%status, body = %body, "[Vision] Upstream returned non-success status");
            return Err(FridgeError::UpstreamStatus(status));
        }

        Ok(resp.json::<ChatCompletionResponse>().await?)
    }
}

#[async_trait]
impl VisionService for VisionClient {
    async fn analyze(&self, image: &ImagePayload) -> Result<String, FridgeError> {
        let api_key = self
            .cfg
            .api_key
            .as_deref()
            .ok_or(FridgeError::MissingApiKey)?;

        let body = ChatCompletionRequest::vision(
            self.cfg.model.as_str(),
            self.cfg.prompt.as_str(),
            image.to_data_uri(),
            Some(self.cfg.temperature),
        );

        let start = Instant::now();
        let reply = (|| self.post_once(api_key, &body))
            .retry(self.retry_policy)
            .when(|err: &FridgeError| err.is_retryable())
            .notify(|err, dur: Duration| {
                warn!("[Vision] retrying after error {} in {:?}", err, dur);
            })
            .await?;

        let text = reply.first_text().to_string();
        info!(
            model = %self.cfg.model,
            took_ms = start.elapsed().as_millis() as u64,
            reply_chars = text.len(),
            "[Vision] photo analyzed"
        );
        Ok(text)
    }
}
