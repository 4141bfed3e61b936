//! 应用层

pub mod product;

use std::time::Duration;

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::infrastructure::config::HttpConfig;
use product::handler::{
    create_product, delete_product, get_product, health_check, list_products, update_product,
    AppState,
};

/// 产品 API 路由（不含中间件）
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/products", get(list_products).post(create_product))
        .route(
            "/api/products/:id",
            get(get_product).patch(update_product).delete(delete_product),
        )
}

/// 构建完整应用：路由 + 追踪 + 超时
pub fn build_router(state: AppState, http: &HttpConfig) -> Router {
    routes()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(Duration::from_secs(http.timeout_seconds))),
        )
        .with_state(state)
}
