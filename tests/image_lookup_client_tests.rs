use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};
use fridgescan::config::{ImageLookupConfig, ProviderDefaults};
use fridgescan::providers::{ImageLookup, ImageLookupClient};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use url::Url;

const PLACEHOLDER: &str = "https://img.test/placeholder.png";

#[derive(Clone, Default)]
struct SearchState {
    queries: Arc<Mutex<Vec<String>>>,
}

/// "Apple" has a hit, "Nothing" has no results, "Broken" fails upstream.
async fn search(
    State(state): State<SearchState>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let query = params.get("query").cloned().unwrap_or_default();
    state.queries.lock().unwrap().push(query.clone());
    match query.as_str() {
        "Apple" => (
            StatusCode::OK,
            Json(json!({"results": [{"urls": {"small": "https://img.test/apple-small.jpg"}}]})),
        ),
        "Broken" => (StatusCode::BAD_GATEWAY, Json(json!({"errors": ["down"]}))),
        "Forbidden" => (StatusCode::FORBIDDEN, Json(json!({"errors": ["nope"]}))),
        _ => (StatusCode::OK, Json(json!({"results": []}))),
    }
}

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

async fn lookup_client() -> (ImageLookupClient, SearchState) {
    let state = SearchState::default();
    let app = Router::new()
        .route("/search/photos", get(search))
        .with_state(state.clone());
    let base = spawn_test_server(app).await;

    let cfg = ImageLookupConfig {
        api_url: Some(base.join("/search/photos").expect("join")),
        api_key: Some("access-key".to_string()),
        placeholder_url: PLACEHOLDER.to_string(),
        ..ImageLookupConfig::default()
    };
    let resolved = Arc::new(cfg.resolve(&ProviderDefaults::default()));
    (
        ImageLookupClient::new(resolved, reqwest::Client::new()),
        state,
    )
}

#[tokio::test]
async fn first_result_is_used() {
    let (client, state) = lookup_client().await;
    let url = client.resolve("Apple").await.expect("resolve");
    assert_eq!(url, "https://img.test/apple-small.jpg");
    assert_eq!(*state.queries.lock().unwrap(), vec!["Apple".to_string()]);
}

#[tokio::test]
async fn no_results_fall_back_to_placeholder() {
    let (client, _state) = lookup_client().await;
    assert_eq!(client.resolve("Nothing").await.expect("resolve"), PLACEHOLDER);
    assert_eq!(client.resolve("Forbidden").await.expect("resolve"), PLACEHOLDER);
}

#[tokio::test]
async fn upstream_failure_is_an_error() {
    let (client, _state) = lookup_client().await;
    assert!(client.resolve("Broken").await.is_err());
}
