pub mod dto;
pub mod views;

pub use dto::*;
pub use views::{build_views, ChartKind, ChartPoint, ChartView, ChartViewId};
