//! Sentiment and relief-category classification for humanitarian logistics.
//!
//! Sentiment comes from a locally loaded Hugging Face sequence classifier,
//! picked at startup from an ordered fallback chain (see [`selector`]).
//! Relief categories come from a deterministic English + Vietnamese keyword
//! scorer that needs no model at all (see
//! [`pipelines::category_pipeline`]). [`service::ReliefClassifier`] combines
//! both and [`server`] exposes it over HTTP.

pub mod core;
mod loaders;
pub mod models;
pub mod pipelines;
pub mod selector;
pub mod sentiment;
pub mod server;
pub mod service;

pub use crate::core::{ClassifierError, Result, ServiceConfig};
pub use pipelines::category_pipeline::{CategoryResult, ReliefCategory};
pub use selector::{select_backend, ModelSelection};
pub use sentiment::{Sentiment, SentimentResult};
pub use service::ReliefClassifier;
