//! 产品处理器

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::Value;

use super::{
    model::{NewProduct, Product, ProductPatch},
    request::ProductRequest,
    service::ProductStore,
};
use crate::core::error::CoreError;

#[derive(Clone)]
pub struct AppState {
    pub store: ProductStore,
}

impl AppState {
    pub fn new(store: ProductStore) -> Self {
        Self { store }
    }
}

pub async fn list_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.store.list())
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, CoreError> {
    let product = state.store.get_by_id(&id)?;
    Ok(Json(product))
}

pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<ProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), CoreError> {
    let Json(request) = payload?;
    let input = NewProduct::try_from(request)?;
    let product = state.store.create(input)?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ProductRequest>, JsonRejection>,
) -> Result<Json<Product>, CoreError> {
    // 先确认产品存在，未知 ID 一律返回 404
    state.store.get_by_id(&id)?;
    let Json(request) = payload?;
    let patch = ProductPatch::try_from(request)?;
    let product = state.store.update(&id, patch)?;
    Ok(Json(product))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, CoreError> {
    state.store.delete(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// 健康检查
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "store": {
            "type": "in-memory",
            "products_count": state.store.len()
        }
    }))
}
