// Pipeline modules organized by functionality
pub mod category_pipeline;
pub mod sentiment_analysis_pipeline;
pub mod utils;
