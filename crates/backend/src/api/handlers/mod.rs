pub mod d400_sales_analytics;
pub mod indicators;
