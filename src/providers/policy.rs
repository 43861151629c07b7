use backon::ExponentialBuilder;
use std::time::Duration;

pub const UPSTREAM_BODY_PREVIEW_CHARS: usize = 300;

/// Reads an upstream body for logging, truncated to [`UPSTREAM_BODY_PREVIEW_CHARS`].
pub async fn body_preview(resp: reqwest::Response) -> String {
    match resp.bytes().await {
        Ok(bytes) => {
            let raw_body = String::from_utf8_lossy(&bytes);
            format!("{:.len$}", raw_body, len = UPSTREAM_BODY_PREVIEW_CHARS)
        }
        Err(e) => format!("<failed to read body: {e}>"),
    }
}

/// Backoff for upstream calls. `max_times = 0` means a single attempt.
pub(crate) fn retry_policy(max_times: usize) -> ExponentialBuilder {
    ExponentialBuilder::default()
        .with_min_delay(Duration::from_millis(100))
        .with_max_delay(Duration::from_millis(300))
        .with_max_times(max_times)
        .with_jitter()
}
