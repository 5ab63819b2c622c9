//! Sentiment analysis pipeline for classifying text emotional tone.
//!
//! A pipeline pairs a sequence-classification model with its tokenizer and
//! exposes it as a [`SentimentBackend`]: one call in, one native label and
//! probability out. Mapping native labels onto the service's
//! positive/negative/neutral scale happens in [`crate::sentiment`], not here.
//!
//! ## Main Types
//!
//! - [`SentimentAnalysisPipeline`] - Model + tokenizer, ready to predict
//! - [`SentimentAnalysisPipelineBuilder`] - Builder pattern for pipeline configuration
//! - [`SentimentAnalysisModel`] - Trait for sentiment analysis model implementations
//! - [`SentimentBackend`] - The opaque `classify(text)` capability
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use relief_classifier::pipelines::sentiment_analysis_pipeline::*;
//! use relief_classifier::pipelines::utils::DeviceSelectable;
//!
//! # fn main() -> relief_classifier::core::Result<()> {
//! let pipeline = SentimentAnalysisPipelineBuilder::modernbert(ModernBertSize::Base)
//!     .cpu()
//!     .build()?;
//!
//! let result = pipeline.predict("Trợ cấp nhân đạo được phân phối tốt")?;
//! println!("Sentiment: {} (confidence: {:.2})", result.label, result.score);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod model;
pub mod pipeline;

pub use builder::SentimentAnalysisPipelineBuilder;
pub use model::SentimentAnalysisModel;
pub use pipeline::{Prediction, SentimentAnalysisPipeline, SentimentBackend};

pub use crate::models::{ModelSource, ModernBertSize};
