//! The request orchestrator tying the selected sentiment backend and the
//! keyword category scorer together.

use crate::core::{ClassifierError, Result, DEFAULT_MAX_TEXT_CHARS};
use crate::pipelines::category_pipeline::{
    default_table, CategoryKeywordTable, CategoryResult, CategoryScorer, ReliefCategory,
    CATEGORY_MODEL_NAME,
};
use crate::selector::{LoadFailure, ModelSelection};
use crate::sentiment::{self, SentimentResult};
use serde::Serialize;

/// A category and its display string, as listed by [`ModelInfo`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryInfo {
    pub category: ReliefCategory,
    pub category_name: &'static str,
}

/// Introspection snapshot of the loaded models.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelInfo {
    pub sentiment_model_name: Option<String>,
    pub sentiment_model_loaded: bool,
    pub category_model_name: &'static str,
    pub categories: Vec<CategoryInfo>,
    /// Every configured sentiment candidate, in priority order.
    pub candidates: Vec<String>,
    pub load_failures: Vec<LoadFailure>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub model_loaded: bool,
    pub sentiment_model: Option<String>,
    pub category_model: &'static str,
}

/// Classifies text sentiment and relief category.
///
/// Holds no mutable state; share it as `Arc<ReliefClassifier>`.
///
/// ```rust
/// use relief_classifier::selector::ModelSelection;
/// use relief_classifier::service::ReliefClassifier;
/// use relief_classifier::pipelines::category_pipeline::ReliefCategory;
///
/// let classifier = ReliefClassifier::new(ModelSelection::unloaded(), 512);
/// let result = classifier.classify_category("Bệnh viện cần thuốc");
/// assert_eq!(result.category, ReliefCategory::Medical);
/// assert!(!classifier.health().model_loaded);
/// ```
#[derive(Debug, Clone)]
pub struct ReliefClassifier {
    selection: ModelSelection,
    table: &'static CategoryKeywordTable,
    max_text_chars: usize,
}

impl ReliefClassifier {
    pub fn new(selection: ModelSelection, max_text_chars: usize) -> Self {
        Self::with_table(selection, default_table(), max_text_chars)
    }

    /// Use a custom keyword table instead of the built-in one.
    pub fn with_table(
        selection: ModelSelection,
        table: &'static CategoryKeywordTable,
        max_text_chars: usize,
    ) -> Self {
        let max_text_chars = if max_text_chars == 0 {
            DEFAULT_MAX_TEXT_CHARS
        } else {
            max_text_chars
        };
        Self {
            selection,
            table,
            max_text_chars,
        }
    }

    pub fn selection(&self) -> &ModelSelection {
        &self.selection
    }

    /// Name of the active sentiment backend, if any.
    pub fn sentiment_model_name(&self) -> Option<&str> {
        self.selection.model_name()
    }

    pub fn classify_sentiment(&self, text: &str) -> Result<SentimentResult> {
        sentiment::decide(text, self.selection.active(), self.max_text_chars)
    }

    /// Classify each item in order. `None` items (non-text input) and blank
    /// texts become neutral placeholders.
    ///
    /// Fails as a whole when no backend is loaded, or when the backend faults
    /// on any item.
    pub fn classify_sentiment_batch<I, T>(&self, items: I) -> Result<Vec<SentimentResult>>
    where
        I: IntoIterator<Item = Option<T>>,
        T: AsRef<str>,
    {
        let backend = self
            .selection
            .active()
            .ok_or(ClassifierError::ModelUnavailable)?;

        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Some(text) => sentiment::classify_with(backend, text.as_ref(), self.max_text_chars)
                    .map_err(|e| match e {
                        ClassifierError::Internal(msg) => {
                            ClassifierError::Internal(format!("item {index}: {msg}"))
                        }
                        other => other,
                    }),
                None => Ok(SentimentResult::neutral_placeholder()),
            })
            .collect()
    }

    pub fn classify_category(&self, text: &str) -> CategoryResult {
        CategoryScorer::new(self.table).classify(text)
    }

    pub fn classify_category_batch<I, T>(&self, items: I) -> Vec<CategoryResult>
    where
        I: IntoIterator<Item = Option<T>>,
        T: AsRef<str>,
    {
        CategoryScorer::new(self.table).classify_batch(items)
    }

    pub fn active_model_info(&self) -> ModelInfo {
        ModelInfo {
            sentiment_model_name: self.sentiment_model_name().map(str::to_string),
            sentiment_model_loaded: self.selection.is_loaded(),
            category_model_name: CATEGORY_MODEL_NAME,
            categories: self
                .table
                .entries()
                .iter()
                .map(|(category, _)| CategoryInfo {
                    category: *category,
                    category_name: category.display_name(),
                })
                .collect(),
            candidates: self.selection.candidates().to_vec(),
            load_failures: self.selection.failures().to_vec(),
        }
    }

    /// Always `healthy`: the category scorer works even without a
    /// sentiment backend.
    pub fn health(&self) -> HealthStatus {
        HealthStatus {
            status: "healthy",
            model_loaded: self.selection.is_loaded(),
            sentiment_model: self.sentiment_model_name().map(str::to_string),
            category_model: CATEGORY_MODEL_NAME,
        }
    }
}
