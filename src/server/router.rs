use crate::db::{DbActorHandle, ItemRepository, RecipeRepository};
use crate::ingest::IngestionPipeline;
use crate::providers::Providers;
use crate::server::routes::{items, recipes, scan};
use crate::staging::StagingWorkflow;

use axum::{
    Router,
    extract::{DefaultBodyLimit, Request},
    http::{HeaderName, HeaderValue, StatusCode, Version, header::USER_AGENT},
    middleware::{self, Next},
    response::Response,
};
use base64::Engine as _;
use rand::RngCore;
use std::sync::Arc;
use std::time::Instant;
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{error, info, warn};

const MAX_REQUEST_ID_LEN: usize = 128;
const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

fn generate_request_id() -> String {
    // 96 bits => 16 chars base64url (no padding).
    let mut bytes = [0u8; 12];
    rand::rng().fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

fn format_http_version(version: Version) -> &'static str {
    match version {
        Version::HTTP_10 => "HTTP/1.0",
        Version::HTTP_11 => "HTTP/1.1",
        Version::HTTP_2 => "HTTP/2",
        _ => "HTTP/?",
    }
}

#[derive(Clone)]
pub struct FridgeState {
    pub items: Arc<dyn ItemRepository>,
    pub recipes: Arc<dyn RecipeRepository>,
    pub staging: Arc<StagingWorkflow>,
    pub pipeline: Arc<IngestionPipeline>,
}

impl FridgeState {
    pub fn new(db: DbActorHandle, providers: Providers) -> Self {
        let items: Arc<dyn ItemRepository> = Arc::new(db.clone());
        let recipes: Arc<dyn RecipeRepository> = Arc::new(db);
        Self::from_parts(items, recipes, providers)
    }

    /// Wires the state from arbitrary repository implementations.
    pub fn from_parts(
        items: Arc<dyn ItemRepository>,
        recipes: Arc<dyn RecipeRepository>,
        providers: Providers,
    ) -> Self {
        let pipeline = Arc::new(IngestionPipeline::new(
            items.clone(),
            providers.vision,
            providers.image_lookup,
        ));
        let staging = Arc::new(StagingWorkflow::new(items.clone(), pipeline.clone()));

        Self {
            items,
            recipes,
            staging,
            pipeline,
        }
    }
}

async fn not_found_handler() -> StatusCode {
    StatusCode::NOT_FOUND
}

async fn access_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let version = req.version();

    let request_id = req
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty() && v.len() <= MAX_REQUEST_ID_LEN)
        .map(str::to_string)
        .unwrap_or_else(generate_request_id);

    let user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let start = Instant::now();
    let mut resp = next.run(req).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        resp.headers_mut().insert(X_REQUEST_ID, value);
    }

    let status = resp.status().as_u16();
    let latency_ms = start.elapsed().as_millis() as u64;
    let protocol = format_http_version(version);
    let method = method.as_str();

    if resp.status().is_server_error() {
        error!("| {status:>3} | {request_id} | {method:^7} | {protocol:<8} | {path} | {latency_ms}ms | {user_agent}");
    } else if resp.status().is_client_error() {
        warn!("| {status:>3} | {request_id} | {method:^7} | {protocol:<8} | {path} | {latency_ms}ms | {user_agent}");
    } else {
        info!("| {status:>3} | {request_id} | {method:^7} | {protocol:<8} | {path} | {latency_ms}ms | {user_agent}");
    }

    resp
}

/// Full API router. `max_body_bytes` caps every request body, photos included.
pub fn fridgescan_router(state: FridgeState, max_body_bytes: usize) -> Router {
    Router::new()
        .merge(items::router())
        .merge(recipes::router())
        .merge(scan::router())
        .fallback(not_found_handler)
        .with_state(state)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(middleware::from_fn(access_log))
}
