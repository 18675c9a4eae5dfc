use serde::{Deserialize, Serialize};

/// Остаток артикула в магазине (строка складского учёта)
///
/// Read-only snapshot of one article in one shop, as loaded from `tab_shop_rem`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Shop reference (`tab_tab.id`)
    pub shop_id: i32,
    /// Article number, unique only within a shop
    pub article_id: i32,
    /// Free-text category, may be empty or the `#пусто` sentinel.
    /// `None` (NULL in the store) is its own category, distinct from `""`.
    pub category: Option<String>,
    /// Current on-hand quantity
    pub stock_level: f64,
    /// Purchase price
    pub cost_price: f64,
    pub retail_price: f64,
    /// Average units sold per day
    pub avg_daily_sales: f64,
    pub days_since_last_sale: i32,
}

impl InventoryItem {
    /// Daily revenue contribution, `None` when either factor is not a finite number
    pub fn daily_revenue(&self) -> Option<f64> {
        let value = self.retail_price * self.avg_daily_sales;
        value.is_finite().then_some(value)
    }

    /// Margin in percent of retail price.
    ///
    /// Returns `None` for a zero or non-finite retail price so callers can
    /// exclude the item from a mean instead of propagating NaN/inf.
    pub fn margin_pct(&self) -> Option<f64> {
        if self.retail_price == 0.0 || !self.retail_price.is_finite() {
            return None;
        }
        let value = (self.retail_price - self.cost_price) / self.retail_price * 100.0;
        value.is_finite().then_some(value)
    }

    /// Stock is on hand (nonzero and a real number)
    pub fn has_stock(&self) -> bool {
        self.stock_level.is_finite() && self.stock_level != 0.0
    }
}
