use crate::core::{ClassifierError, Result};
use crate::pipelines::utils::{is_blank, truncate_chars};
use crate::selector::ActiveBackend;
use serde::Serialize;
use std::fmt;

/// Three-way sentiment polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Map a backend's native label. Only `positive` and `negative` are
    /// recognised (any case); every other label is neutral.
    pub fn from_label(label: &str) -> Self {
        match label.to_uppercase().as_str() {
            "POSITIVE" => Sentiment::Positive,
            "NEGATIVE" => Sentiment::Negative,
            _ => Sentiment::Neutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "POSITIVE",
            Sentiment::Negative => "NEGATIVE",
            Sentiment::Neutral => "NEUTRAL",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentResult {
    pub sentiment: Sentiment,
    /// The backend's probability for its own label, unmodified.
    pub confidence: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl SentimentResult {
    /// `{NEUTRAL, 0.0}`, returned for empty or unusable input.
    pub fn neutral_placeholder() -> Self {
        Self {
            sentiment: Sentiment::Neutral,
            confidence: 0.0,
            raw_label: None,
            model: None,
        }
    }
}

/// Decide the sentiment of `text` with the active backend.
///
/// Blank text short-circuits to [`SentimentResult::neutral_placeholder`]
/// before the backend is consulted, so it succeeds even with no backend.
/// Otherwise the backend is called exactly once on the first `max_chars`
/// characters of `text` with surrounding whitespace removed.
pub fn decide(
    text: &str,
    backend: Option<&ActiveBackend>,
    max_chars: usize,
) -> Result<SentimentResult> {
    if is_blank(text) {
        return Ok(SentimentResult::neutral_placeholder());
    }
    let backend = backend.ok_or(ClassifierError::ModelUnavailable)?;
    classify_with(backend, text, max_chars)
}

/// Like [`decide`] but for a backend known to be present.
pub(crate) fn classify_with(
    backend: &ActiveBackend,
    text: &str,
    max_chars: usize,
) -> Result<SentimentResult> {
    if is_blank(text) {
        return Ok(SentimentResult::neutral_placeholder());
    }

    let input = truncate_chars(text.trim(), max_chars);
    let prediction = backend
        .classify(input)
        .map_err(ClassifierError::into_request_error)?;
    let raw_label = prediction.label.trim().to_uppercase();
    tracing::debug!(
        "Sentiment backend {} labelled text as {} ({:.3})",
        backend.name(),
        raw_label,
        prediction.score
    );

    Ok(SentimentResult {
        sentiment: Sentiment::from_label(&raw_label),
        confidence: prediction.score,
        raw_label: Some(raw_label),
        model: Some(backend.name().to_string()),
    })
}
