use contracts::dashboards::d400_category_analytics::CategoryMetrics;
use contracts::domain::a002_shop_remainder::aggregate::InventoryItem;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::shared::format::{round2, truncate_chars};

/// Unsold for this many days and more: stuck goods
pub const STUCK_DAYS: i32 = 30;
/// Unsold for this many days (up to `STUCK_DAYS`): stunted goods
pub const STUNTED_DAYS: i32 = 14;
/// Display label length in characters
pub const LABEL_MAX_CHARS: usize = 50;

/// Running totals of one category
#[derive(Debug, Default)]
struct CategoryAccumulator {
    item_count: u32,
    revenue_sum: f64,
    sales_sum: f64,
    sales_n: u32,
    margin_sum: f64,
    margin_n: u32,
    stuck_count: u32,
    stunted_count: u32,
}

impl CategoryAccumulator {
    fn push(&mut self, item: &InventoryItem) {
        self.item_count += 1;

        if let Some(revenue) = item.daily_revenue() {
            self.revenue_sum += revenue;
        }
        if item.avg_daily_sales.is_finite() {
            self.sales_sum += item.avg_daily_sales;
            self.sales_n += 1;
        }
        if let Some(margin) = item.margin_pct() {
            self.margin_sum += margin;
            self.margin_n += 1;
        }

        if item.has_stock() {
            if item.days_since_last_sale >= STUCK_DAYS {
                self.stuck_count += 1;
            } else if item.days_since_last_sale >= STUNTED_DAYS {
                self.stunted_count += 1;
            }
        }
    }

    fn finalize(self, category: String) -> CategoryMetrics {
        let avg_daily_sales_rate = if self.sales_n > 0 {
            round2(self.sales_sum / self.sales_n as f64)
        } else {
            0.0
        };
        let avg_margin_pct =
            (self.margin_n > 0).then(|| round2(self.margin_sum / self.margin_n as f64));

        CategoryMetrics {
            category_label: truncate_chars(&category, LABEL_MAX_CHARS),
            category,
            item_count: self.item_count,
            revenue: round2(self.revenue_sum),
            avg_daily_sales_rate,
            stuck_count: self.stuck_count,
            stunted_count: self.stunted_count,
            avg_margin_pct,
        }
    }
}

/// Group items by category and compute per-category metrics.
///
/// NULL and empty categories form separate groups, both reported with empty text.
pub fn aggregate_by_category(items: &[InventoryItem]) -> Vec<CategoryMetrics> {
    let mut groups: BTreeMap<Option<&str>, CategoryAccumulator> = BTreeMap::new();
    for item in items {
        groups.entry(item.category.as_deref()).or_default().push(item);
    }

    groups
        .into_iter()
        .map(|(category, acc)| acc.finalize(category.unwrap_or_default().to_string()))
        .collect()
}

/// Revenue desc, then item count desc, then category asc
pub fn priority_order(a: &CategoryMetrics, b: &CategoryMetrics) -> Ordering {
    b.revenue
        .total_cmp(&a.revenue)
        .then_with(|| b.item_count.cmp(&a.item_count))
        .then_with(|| a.category.cmp(&b.category))
}

pub fn sort_by_priority(rows: &mut [CategoryMetrics]) {
    rows.sort_by(priority_order);
}
