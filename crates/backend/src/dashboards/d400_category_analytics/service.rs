use contracts::dashboards::d400_category_analytics::{AnalysisResult, CategoryMetrics};
use contracts::domain::a002_shop_remainder::aggregate::InventoryItem;

use super::aggregator::{aggregate_by_category, sort_by_priority};
use super::source::{AnalysisError, RecordSource};

// ---------------------------------------------------------------------------
// Data quality thresholds
// ---------------------------------------------------------------------------

/// Category must have more items than this
pub const MIN_ITEM_COUNT: u32 = 10;
/// Category must earn more than this per day
pub const MIN_REVENUE: f64 = 100.0;
/// Category text must be longer than this (in characters)
pub const MIN_CATEGORY_CHARS: usize = 3;
/// Marker of uncategorized items in the source data
pub const EMPTY_CATEGORY: &str = "#пусто";

fn passes_quality_filter(row: &CategoryMetrics) -> bool {
    row.item_count > MIN_ITEM_COUNT
        && row.revenue > MIN_REVENUE
        && row.category.chars().count() > MIN_CATEGORY_CHARS
        && row.category != EMPTY_CATEGORY
}

/// Analyze categories of a shop loaded from `source`
pub async fn analyze_shop<S>(source: &S, shop_name: &str) -> Result<AnalysisResult, AnalysisError>
where
    S: RecordSource + ?Sized,
{
    let items = source.fetch_items(shop_name).await.map_err(|e| {
        tracing::error!("D400: Failed to load items for shop '{}': {}", shop_name, e);
        e
    })?;
    tracing::debug!("D400: Loaded {} items for shop '{}'", items.len(), shop_name);

    Ok(analyze_items(&items))
}

/// Group, rank and clean the items of one shop.
///
/// Empty-state checks look at the unfiltered groups, so a shop whose
/// categories all fail the quality filter yields `Table([])`.
pub fn analyze_items(items: &[InventoryItem]) -> AnalysisResult {
    let mut rows = aggregate_by_category(items);
    sort_by_priority(&mut rows);

    match rows.len() {
        0 => return AnalysisResult::EmptyNoData,
        1 => return AnalysisResult::EmptyInsufficientCategories,
        _ => {}
    }

    let grouped = rows.len();
    rows.retain(passes_quality_filter);
    tracing::debug!(
        "D400: {} of {} categories passed quality filter",
        rows.len(),
        grouped
    );

    AnalysisResult::Table(rows)
}

/// Shops available for selection
pub async fn list_shops<S>(source: &S) -> Result<Vec<String>, AnalysisError>
where
    S: RecordSource + ?Sized,
{
    source.list_shops().await
}
