//! Relief-category classification by weighted keyword matching.
//!
//! Runs without any model: text is lower-cased, each category scores its
//! weight times the number of its distinct keywords found as substrings, and
//! the first best-scoring category wins. The keyword table covers English and
//! Vietnamese.
//!
//! ```rust
//! use relief_classifier::pipelines::category_pipeline::*;
//!
//! let result = CategoryScorer::default().classify("We need food and water");
//! assert_eq!(result.category, ReliefCategory::Food);
//! assert!((result.confidence - 0.667).abs() < 0.001);
//! ```

pub mod category;
pub mod keywords;
pub mod scorer;

pub use category::{display_name_for_tag, ReliefCategory, UnknownCategory};
pub use keywords::{default_table, CategoryKeywordTable, CategoryKeywords};
pub use scorer::{
    normalize_confidence, CategoryResult, CategoryScorer, CATEGORY_MODEL_NAME, KEYWORD_METHOD,
};
