use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::views::ChartView;

/// Request for category analytics dashboard
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryAnalyticsRequest {
    /// Shop display name; the configured default shop is used when absent
    pub shop: Option<String>,
}

/// Aggregated metrics of one category of a shop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryMetrics {
    /// Full category text (grouping key)
    pub category: String,
    /// Display label, first 50 characters of `category`
    pub category_label: String,
    pub item_count: u32,
    /// Daily revenue, sum of retail price × average sales
    pub revenue: f64,
    /// Mean of average daily sales
    pub avg_daily_sales_rate: f64,
    /// Items on hand unsold for 30 days and more
    pub stuck_count: u32,
    /// Items on hand unsold for 14..30 days
    pub stunted_count: u32,
    /// Mean margin in percent, `None` when no item has a nonzero retail price
    pub avg_margin_pct: Option<f64>,
}

impl CategoryMetrics {
    /// Margin used by filters: undefined margin counts as zero
    pub fn margin_or_zero(&self) -> f64 {
        self.avg_margin_pct.unwrap_or(0.0)
    }
}

/// Outcome of one shop analysis.
///
/// The two empty variants are terminal states, distinct from `Table` with no rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "rows", rename_all = "snake_case")]
pub enum AnalysisResult {
    EmptyNoData,
    EmptyInsufficientCategories,
    Table(Vec<CategoryMetrics>),
}

impl AnalysisResult {
    /// User-facing message for empty states
    pub fn empty_message(&self) -> Option<&'static str> {
        match self {
            AnalysisResult::EmptyNoData => Some("Нет данных для выбранного магазина"),
            AnalysisResult::EmptyInsufficientCategories => {
                Some("Данные по магазину ограничены, анализ категорий невозможен")
            }
            AnalysisResult::Table(_) => None,
        }
    }

    pub fn rows(&self) -> &[CategoryMetrics] {
        match self {
            AnalysisResult::Table(rows) => rows,
            _ => &[],
        }
    }
}

/// Response for category analytics dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryAnalyticsResponse {
    pub shop_name: String,
    pub result: AnalysisResult,
    /// Message to show instead of charts, None when there is a table
    pub message: Option<String>,
    /// Chart-ready slices of the table (empty for empty states)
    pub views: Vec<ChartView>,
    pub generated_at: DateTime<Utc>,
}

impl CategoryAnalyticsResponse {
    pub fn new(shop_name: impl Into<String>, result: AnalysisResult) -> Self {
        let views = match &result {
            AnalysisResult::Table(rows) => super::views::build_views(rows),
            _ => Vec::new(),
        };
        Self {
            shop_name: shop_name.into(),
            message: result.empty_message().map(str::to_string),
            result,
            views,
            generated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(category: &str) -> CategoryMetrics {
        CategoryMetrics {
            category: category.to_string(),
            category_label: category.to_string(),
            item_count: 12,
            revenue: 900.0,
            avg_daily_sales_rate: 1.5,
            stuck_count: 0,
            stunted_count: 2,
            avg_margin_pct: None,
        }
    }

    #[test]
    fn test_empty_states_serialize_without_rows() {
        let json = serde_json::to_value(AnalysisResult::EmptyNoData).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "empty_no_data" }));

        let json = serde_json::to_value(AnalysisResult::EmptyInsufficientCategories).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "status": "empty_insufficient_categories" })
        );
    }

    #[test]
    fn test_empty_table_is_distinct_from_empty_states() {
        let json = serde_json::to_value(AnalysisResult::Table(vec![])).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "table", "rows": [] }));
    }

    #[test]
    fn test_table_rows_keep_all_fields() {
        let json = serde_json::to_value(AnalysisResult::Table(vec![metrics("Soda")])).unwrap();
        let row = &json["rows"][0];
        assert_eq!(row["category"], "Soda");
        assert_eq!(row["item_count"], 12);
        assert_eq!(row["stunted_count"], 2);
        assert!(row["avg_margin_pct"].is_null());
        assert_eq!(row.as_object().unwrap().len(), 8);
    }

    #[test]
    fn test_response_messages() {
        let resp = CategoryAnalyticsResponse::new("Пятёрочка", AnalysisResult::EmptyNoData);
        assert_eq!(
            resp.message.as_deref(),
            Some("Нет данных для выбранного магазина")
        );
        assert!(resp.views.is_empty());

        let resp = CategoryAnalyticsResponse::new(
            "Пятёрочка",
            AnalysisResult::Table(vec![metrics("Soda"), metrics("Snacks")]),
        );
        assert!(resp.message.is_none());
        assert_eq!(resp.views.len(), 6);
    }
}
