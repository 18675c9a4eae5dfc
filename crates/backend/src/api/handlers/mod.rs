// Dashboard handlers
pub mod d400_category_analytics;
