use crate::config::ImageLookupResolvedConfig;
use crate::error::{FridgeError, IsRetryable};
use crate::providers::policy::{body_preview, retry_policy};
use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use super::ImageLookup;

/// Image search over plain `GET ?<query_param>=<name>`.
pub struct ImageLookupClient {
    client: reqwest::Client,
    cfg: Arc<ImageLookupResolvedConfig>,
    retry_policy: ExponentialBuilder,
}

impl ImageLookupClient {
    pub fn new(cfg: Arc<ImageLookupResolvedConfig>, client: reqwest::Client) -> Self {
        let retry_policy = retry_policy(cfg.retry_max_times);
        Self {
            client,
            cfg,
            retry_policy,
        }
    }

    fn placeholder(&self) -> String {
        self.cfg.placeholder_url.clone()
    }

    pub fn build_request(
        &self,
        api_url: &url::Url,
        name: &str,
    ) -> Result<reqwest::Request, reqwest::Error> {
        let mut req = self
            .client
            .get(api_url.clone())
            .query(&[(self.cfg.query_param.as_str(), name)]);
        if let Some(key) = self.cfg.api_key.as_deref() {
            req = req.header(reqwest::header::AUTHORIZATION, format!("Client-ID {key}"));
        }
        req.build()
    }

    async fn get_once(
        &self,
        api_url: &url::Url,
        name: &str,
    ) -> Result<reqwest::Response, FridgeError> {
        let req = self.build_request(api_url, name)?;
        let resp = self.client.execute(req).await?;
        if resp.status().is_server_error() {
            let status = resp.status();
            let body = body_preview(resp).await;
            debug!(%status, body = %body, "[ImageLookup] Upstream server error");
            return Err(FridgeError::UpstreamStatus(status));
        }
        Ok(resp)
    }
}

#[async_trait]
impl ImageLookup for ImageLookupClient {
    async fn resolve(&self, name: &str) -> Result<String, FridgeError> {
        let Some(api_url) = self.cfg.api_url.as_ref() else {
            return Ok(self.placeholder());
        };

        let resp = (|| self.get_once(api_url, name))
            .retry(self.retry_policy)
            .when(|err: &FridgeError| err.is_retryable())
            .notify(|err, dur: Duration| {
                warn!("[ImageLookup] retrying after error {} in {:?}", err, dur);
            })
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = body_preview(resp).await;
            warn!(item = name, %status, body = %body, "[ImageLookup] no image; using placeholder");
            return Ok(self.placeholder());
        }

        let value: Value = match resp.json().await {
            Ok(v) => v,
            Err(e) => {
                warn!(item = name, error = %e, "[ImageLookup] unreadable body; using placeholder");
                return Ok(self.placeholder());
            }
        };

        let url = value
            .pointer(&self.cfg.result_pointer)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        match url {
            Some(url) => {
                debug!(item = name, url = %url, "[ImageLookup] image resolved");
                Ok(url)
            }
            None => {
                debug!(
                    item = name,
                    pointer = %self.cfg.result_pointer,
                    "[ImageLookup] no result at pointer"
                );
                Ok(self.placeholder())
            }
        }
    }
}
