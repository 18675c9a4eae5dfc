use axum::{routing::get, Router};

use crate::api::handlers;

/// Shared state of request handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// Shop analyzed when the request names none
    pub default_shop: String,
}

/// Конфигурация всех роутов приложения
pub fn configure_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // D400 Category analytics
        .route(
            "/api/d400/category_analytics",
            get(handlers::d400_category_analytics::get_category_analytics),
        )
        .route(
            "/api/d400/shops",
            get(handlers::d400_category_analytics::list_shops),
        )
        .with_state(state)
}
