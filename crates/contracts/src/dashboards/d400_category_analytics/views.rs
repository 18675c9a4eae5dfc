use serde::{Deserialize, Serialize};

use super::dto::CategoryMetrics;

// ---------------------------------------------------------------------------
// Chart view model
// ---------------------------------------------------------------------------

/// Number of leading categories shown in proportional charts
pub const TOP_CATEGORIES: usize = 20;

/// Minimum average sales for a category to appear on the sales chart
pub const MIN_AVG_SALES_RATE: f64 = 0.05;

const LABEL_CAPTION: &str = "Название категории";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Pie,
    Bar,
    Line,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartViewId {
    ItemsShare,
    RevenueShare,
    StuckGoods,
    StuntedGoods,
    AvgSales,
    AvgMargin,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// One chart-ready slice of the category table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartView {
    pub id: ChartViewId,
    pub kind: ChartKind,
    pub title: String,
    pub label_caption: String,
    pub value_caption: String,
    pub points: Vec<ChartPoint>,
}

impl ChartView {
    fn new(id: ChartViewId, kind: ChartKind, title: &str, value_caption: &str) -> Self {
        Self {
            id,
            kind,
            title: title.to_string(),
            label_caption: LABEL_CAPTION.to_string(),
            value_caption: value_caption.to_string(),
            points: Vec::new(),
        }
    }

    fn with_points(mut self, points: Vec<ChartPoint>) -> Self {
        self.points = points;
        self
    }
}

// ---------------------------------------------------------------------------
// Projections
// ---------------------------------------------------------------------------

/// Leading rows in table order
fn top_rows<F>(rows: &[CategoryMetrics], value: F) -> Vec<ChartPoint>
where
    F: Fn(&CategoryMetrics) -> f64,
{
    rows.iter()
        .take(TOP_CATEGORIES)
        .map(|row| ChartPoint {
            label: row.category_label.clone(),
            value: value(row),
        })
        .collect()
}

/// Rows whose value passes `keep`, re-sorted ascending by value.
///
/// Works on its own copy, the table order is left untouched.
fn ranked_rows<F, P>(rows: &[CategoryMetrics], value: F, keep: P) -> Vec<ChartPoint>
where
    F: Fn(&CategoryMetrics) -> f64,
    P: Fn(f64) -> bool,
{
    let mut points: Vec<ChartPoint> = rows
        .iter()
        .map(|row| ChartPoint {
            label: row.category_label.clone(),
            value: value(row),
        })
        .filter(|p| keep(p.value))
        .collect();
    // stable: equal values keep table order
    points.sort_by(|a, b| a.value.total_cmp(&b.value));
    points
}

/// Build the six dashboard charts from an ordered category table
pub fn build_views(rows: &[CategoryMetrics]) -> Vec<ChartView> {
    vec![
        ChartView::new(
            ChartViewId::ItemsShare,
            ChartKind::Pie,
            "Количество позиций в категории",
            "Количество позиций",
        )
        .with_points(top_rows(rows, |r| r.item_count as f64)),
        ChartView::new(
            ChartViewId::RevenueShare,
            ChartKind::Pie,
            "Выручка по категориям",
            "Выручка, руб.",
        )
        .with_points(top_rows(rows, |r| r.revenue)),
        ChartView::new(
            ChartViewId::StuckGoods,
            ChartKind::Bar,
            "Зависший товар",
            "Зависший товар, шт. (не продавался от 30 последних дней и более)",
        )
        .with_points(ranked_rows(rows, |r| r.stuck_count as f64, |v| v > 0.0)),
        ChartView::new(
            ChartViewId::StuntedGoods,
            ChartKind::Bar,
            "Чахлый товар",
            "Чахлый товар, шт. (не продавался от 15 до 30 последних дней)",
        )
        .with_points(ranked_rows(rows, |r| r.stunted_count as f64, |v| v > 0.0)),
        ChartView::new(
            ChartViewId::AvgSales,
            ChartKind::Line,
            "Средние продажи",
            "Ср. продажи, ед. в день",
        )
        .with_points(ranked_rows(
            rows,
            |r| r.avg_daily_sales_rate,
            |v| v > MIN_AVG_SALES_RATE,
        )),
        ChartView::new(
            ChartViewId::AvgMargin,
            ChartKind::Line,
            "Средняя прибыль",
            "Ср. прибыль, %",
        )
        .with_points(ranked_rows(rows, CategoryMetrics::margin_or_zero, |v| v > 0.0)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(label: &str, items: u32, revenue: f64, stuck: u32, rate: f64) -> CategoryMetrics {
        CategoryMetrics {
            category: label.to_string(),
            category_label: label.to_string(),
            item_count: items,
            revenue,
            avg_daily_sales_rate: rate,
            stuck_count: stuck,
            stunted_count: 0,
            avg_margin_pct: Some(10.0),
        }
    }

    fn view(views: &[ChartView], id: ChartViewId) -> &ChartView {
        views.iter().find(|v| v.id == id).unwrap()
    }

    fn labels(view: &ChartView) -> Vec<&str> {
        view.points.iter().map(|p| p.label.as_str()).collect()
    }

    #[test]
    fn test_proportional_views_take_top_20_in_table_order() {
        let rows: Vec<_> = (0..25)
            .map(|i| row(&format!("Категория {i}"), 30 - i, 1000.0 - i as f64, 0, 1.0))
            .collect();

        let views = build_views(&rows);
        let items = view(&views, ChartViewId::ItemsShare);
        assert_eq!(items.kind, ChartKind::Pie);
        assert_eq!(items.points.len(), 20);
        assert_eq!(items.points[0].label, "Категория 0");
        assert_eq!(items.points[0].value, 30.0);
        assert_eq!(items.points[19].label, "Категория 19");

        let revenue = view(&views, ChartViewId::RevenueShare);
        assert_eq!(revenue.points.len(), 20);
        assert_eq!(revenue.points[0].value, 1000.0);
    }

    #[test]
    fn test_ranked_views_filter_and_sort_ascending() {
        let rows = vec![
            row("Напитки", 50, 900.0, 7, 0.04),
            row("Снеки", 40, 800.0, 0, 2.5),
            row("Молоко", 30, 700.0, 3, 0.8),
        ];

        let views = build_views(&rows);
        let stuck = view(&views, ChartViewId::StuckGoods);
        assert_eq!(labels(stuck), vec!["Молоко", "Напитки"]);

        let sales = view(&views, ChartViewId::AvgSales);
        assert_eq!(labels(sales), vec!["Молоко", "Снеки"]);
        assert_eq!(sales.kind, ChartKind::Line);
    }

    #[test]
    fn test_margin_view_skips_undefined_and_non_positive() {
        let mut a = row("Напитки", 50, 900.0, 0, 1.0);
        a.avg_margin_pct = None;
        let mut b = row("Снеки", 40, 800.0, 0, 1.0);
        b.avg_margin_pct = Some(-5.0);
        let mut c = row("Молоко", 30, 700.0, 0, 1.0);
        c.avg_margin_pct = Some(22.5);

        let views = build_views(&[a, b, c]);
        let margin = view(&views, ChartViewId::AvgMargin);
        assert_eq!(labels(margin), vec!["Молоко"]);
        assert_eq!(margin.points[0].value, 22.5);
    }

    #[test]
    fn test_views_do_not_reorder_source_table() {
        let rows = vec![
            row("Напитки", 50, 900.0, 9, 1.0),
            row("Снеки", 40, 800.0, 1, 1.0),
        ];
        let before = rows.clone();
        let views = build_views(&rows);
        assert_eq!(rows, before);
        assert_eq!(labels(view(&views, ChartViewId::StuckGoods)), vec!["Снеки", "Напитки"]);
    }
}
