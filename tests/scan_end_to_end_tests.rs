mod common;

use axum::{
    Json, Router,
    extract::Query,
    http::StatusCode,
    routing::{get, post},
};
use fridgescan::config::Config;
use fridgescan::db::{ItemRepository, ItemStatus};
use fridgescan::providers::{ImagePayload, Providers};
use fridgescan::{IngestOutcome, IngestionPipeline};
use serde_json::{Value, json};
use std::collections::HashMap;
use common::{cleanup, sqlite_url, unique_sqlite_path};
use std::sync::Arc;
use tokio::net::TcpListener;
use url::Url;

async fn spawn_test_server(app: Router) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    let base = Url::parse(&format!("http://{}", addr)).expect("valid base url");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server run");
    });

    base
}

async fn completions(Json(_body): Json<Value>) -> Json<Value> {
    let content = "```json\n{\"items\":[{\"name\":\"Apple\",\"quantity\":3},{\"name\":\"Kale\"},{\"quantity\":9}]}\n```";
    Json(json!({
        "id": "chatcmpl-e2e",
        "model": "test-model",
        "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}]
    }))
}

async fn search(Query(params): Query<HashMap<String, String>>) -> (StatusCode, Json<Value>) {
    match params.get("query").map(String::as_str) {
        Some("Apple") => (
            StatusCode::OK,
            Json(json!({"results": [{"urls": {"small": "https://img.test/apple.jpg"}}]})),
        ),
        Some("Durian") => (StatusCode::SERVICE_UNAVAILABLE, Json(json!({}))),
        _ => (StatusCode::OK, Json(json!({"results": []}))),
    }
}

async fn pipeline_against_mocks(
    prefix: &str,
) -> (IngestionPipeline, Arc<dyn ItemRepository>, std::path::PathBuf) {
    let upstream = Router::new()
        .route("/openai/v1/chat/completions", post(completions))
        .route("/search/photos", get(search));
    let base = spawn_test_server(upstream).await;

    let mut cfg = Config::default();
    cfg.providers.vision.api_url = base.join("/openai/v1/chat/completions").expect("join");
    cfg.providers.vision.api_key = Some("gsk-e2e".to_string());
    cfg.providers.image_lookup.api_url = Some(base.join("/search/photos").expect("join"));
    cfg.providers.image_lookup.placeholder_url = "https://img.test/none.png".to_string();

    let temp_path = unique_sqlite_path(prefix);
    let database_url = sqlite_url(&temp_path);
    let db = fridgescan::db::spawn(&database_url)
        .await
        .expect("db spawn");

    let providers = Providers::from_config(&cfg).expect("providers");
    let items: Arc<dyn ItemRepository> = Arc::new(db);
    let pipeline = IngestionPipeline::new(items.clone(), providers.vision, providers.image_lookup);
    (pipeline, items, temp_path)
}

#[tokio::test]
async fn photo_becomes_drafts_with_images() {
    let (pipeline, items, temp_path) = pipeline_against_mocks("e2e-scan").await;

    let outcome = pipeline
        .ingest_photo(&ImagePayload::Bytes {
            data: vec![0xFF, 0xD8, 0xFF],
            mime: "image/jpeg".to_string(),
        })
        .await;

    let IngestOutcome::Staged { ids } = outcome else {
        panic!("expected staged outcome, got {outcome:?}");
    };
    assert_eq!(ids.len(), 2, "nameless entry is skipped");

    let drafts = items.get_items(ItemStatus::Draft).await;
    assert_eq!(drafts.len(), 2);
    assert_eq!(drafts[0].name, "Apple");
    assert_eq!(drafts[0].quantity, 3);
    assert_eq!(drafts[0].image_url, "https://img.test/apple.jpg");
    assert_eq!(drafts[1].name, "Kale");
    assert_eq!(drafts[1].quantity, 1);
    assert_eq!(drafts[1].image_url, "https://img.test/none.png");
    assert!(items.get_items(ItemStatus::Confirmed).await.is_empty());

    cleanup(&temp_path).await;
}

#[tokio::test]
async fn lookup_outage_during_manual_entry_surfaces() {
    let (pipeline, items, temp_path) = pipeline_against_mocks("e2e-outage").await;

    assert!(pipeline.stage_one("Durian", 1).await.is_err());
    assert!(items.get_items(ItemStatus::Draft).await.is_empty());

    cleanup(&temp_path).await;
}
