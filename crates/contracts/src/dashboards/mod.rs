pub mod d400_category_analytics;
