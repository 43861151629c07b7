use super::Created;
use crate::db::{Item, ItemStatus};
use crate::error::FridgeError;
use crate::server::router::FridgeState;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    routing::{delete, get, post, put},
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    #[serde(default = "default_status")]
    pub status: ItemStatus,
}

fn default_status() -> ItemStatus {
    ItemStatus::Draft
}

#[derive(Debug, Deserialize)]
pub struct AddItemBody {
    pub name: String,
    pub quantity: i64,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ManualItemBody {
    pub name: String,
    #[serde(default = "default_manual_quantity")]
    pub quantity: i64,
}

fn default_manual_quantity() -> i64 {
    1
}

#[derive(Debug, Deserialize)]
pub struct QuantityBody {
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct AdjustBody {
    pub delta: i64,
}

/// Drafts under review, or the confirmed inventory.
pub async fn list_items(
    State(state): State<FridgeState>,
    query: Result<Query<StatusQuery>, QueryRejection>,
) -> Result<Json<Vec<Item>>, FridgeError> {
    let Query(query) = query?;
    let items = match query.status {
        ItemStatus::Draft => state.staging.drafts().await,
        ItemStatus::Confirmed => state.staging.inventory().await,
    };
    Ok(Json(items))
}

/// Raw insert; the caller supplies the image URL.
pub async fn add_item(
    State(state): State<FridgeState>,
    payload: Result<Json<AddItemBody>, JsonRejection>,
) -> Result<Json<Created>, FridgeError> {
    let Json(body) = payload?;
    let id = state
        .items
        .add_item(&body.name, body.quantity, body.image_url.as_deref())
        .await?;
    Ok(Json(Created { id }))
}

pub async fn add_manual_item(
    State(state): State<FridgeState>,
    payload: Result<Json<ManualItemBody>, JsonRejection>,
) -> Result<Json<Created>, FridgeError> {
    let Json(body) = payload?;
    let id = state.staging.add_manual(&body.name, body.quantity).await?;
    Ok(Json(Created { id }))
}

pub async fn set_quantity(
    State(state): State<FridgeState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<QuantityBody>, JsonRejection>,
) -> Result<StatusCode, FridgeError> {
    let Path(id) = id?;
    let Json(body) = payload?;
    state.staging.set_quantity(id, body.quantity).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn adjust_quantity(
    State(state): State<FridgeState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<AdjustBody>, JsonRejection>,
) -> Result<Json<Item>, FridgeError> {
    let Path(id) = id?;
    let Json(body) = payload?;
    Ok(Json(state.staging.adjust_quantity(id, body.delta).await?))
}

pub async fn confirm_item(
    State(state): State<FridgeState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, FridgeError> {
    let Path(id) = id?;
    state.staging.confirm(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn confirm_all(State(state): State<FridgeState>) -> Result<StatusCode, FridgeError> {
    state.staging.confirm_all().await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_item(
    State(state): State<FridgeState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, FridgeError> {
    let Path(id) = id?;
    state.staging.discard(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<FridgeState> {
    Router::new()
        .route("/api/items", get(list_items).post(add_item))
        .route("/api/items/manual", post(add_manual_item))
        .route("/api/items/confirm-all", post(confirm_all))
        .route("/api/items/{id}", delete(delete_item))
        .route("/api/items/{id}/quantity", put(set_quantity))
        .route("/api/items/{id}/adjust", post(adjust_quantity))
        .route("/api/items/{id}/confirm", post(confirm_item))
}
