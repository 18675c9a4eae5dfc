use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use contracts::dashboards::d400_category_analytics::{
    CategoryAnalyticsRequest, CategoryAnalyticsResponse,
};

use crate::dashboards::d400_category_analytics::service;
use crate::dashboards::d400_category_analytics::source::{AnalysisError, SeaOrmRecordSource};
use crate::routes::AppState;
use crate::shared::data::db::get_connection;

fn error_status(err: &AnalysisError) -> StatusCode {
    match err {
        AnalysisError::SourceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Shop named in the request, or the configured default when absent or blank
fn resolve_shop(request: CategoryAnalyticsRequest, state: &AppState) -> String {
    request
        .shop
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| state.default_shop.clone())
}

/// GET /api/d400/category_analytics?shop=Пятёрочка
pub async fn get_category_analytics(
    State(state): State<AppState>,
    Query(request): Query<CategoryAnalyticsRequest>,
) -> Result<Json<CategoryAnalyticsResponse>, StatusCode> {
    let shop_name = resolve_shop(request, &state);
    tracing::info!("D400 Dashboard: Analyzing categories of shop '{}'", shop_name);

    let source = SeaOrmRecordSource::new(get_connection());
    match service::analyze_shop(&source, &shop_name).await {
        Ok(result) => {
            match result.empty_message() {
                Some(message) => tracing::info!("D400 Dashboard: {}: {}", shop_name, message),
                None => tracing::info!(
                    "D400 Dashboard: Returning {} categories for '{}'",
                    result.rows().len(),
                    shop_name
                ),
            }
            Ok(Json(CategoryAnalyticsResponse::new(shop_name, result)))
        }
        Err(e) => {
            tracing::error!("D400 Dashboard: Failed to analyze shop '{}': {}", shop_name, e);
            Err(error_status(&e))
        }
    }
}

/// GET /api/d400/shops
pub async fn list_shops() -> Result<Json<Vec<String>>, StatusCode> {
    let source = SeaOrmRecordSource::new(get_connection());
    match service::list_shops(&source).await {
        Ok(shops) => {
            tracing::info!("D400 Dashboard: Returning {} shops", shops.len());
            Ok(Json(shops))
        }
        Err(e) => {
            tracing::error!("D400 Dashboard: Failed to list shops: {}", e);
            Err(error_status(&e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_unavailable_maps_to_503() {
        let err = AnalysisError::SourceUnavailable("pool timed out".to_string());
        assert_eq!(error_status(&err), StatusCode::SERVICE_UNAVAILABLE);
    }

    fn state() -> AppState {
        AppState {
            default_shop: "Пятёрочка".to_string(),
        }
    }

    fn request(shop: Option<&str>) -> CategoryAnalyticsRequest {
        CategoryAnalyticsRequest {
            shop: shop.map(str::to_string),
        }
    }

    #[test]
    fn test_missing_shop_uses_default() {
        assert_eq!(resolve_shop(request(None), &state()), "Пятёрочка");
    }

    #[test]
    fn test_blank_shop_uses_default() {
        assert_eq!(resolve_shop(request(Some("   ")), &state()), "Пятёрочка");
        assert_eq!(resolve_shop(request(Some("")), &state()), "Пятёрочка");
    }

    #[test]
    fn test_named_shop_is_kept() {
        assert_eq!(resolve_shop(request(Some("Магнит")), &state()), "Магнит");
    }
}
