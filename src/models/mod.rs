//! Sequence-classification models that can act as sentiment backends.

pub mod bert;
pub mod modernbert;

pub use bert::SentimentBertModel;
pub use modernbert::SentimentModernBertModel;

use crate::core::{ClassifierError, Result};
use std::collections::HashMap;

/// Where a model's files live on the Hugging Face Hub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSource {
    pub model_id: String,
    pub revision: String,
}

impl ModelSource {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            revision: "main".to_string(),
        }
    }

    pub fn with_revision(mut self, revision: impl Into<String>) -> Self {
        self.revision = revision.into();
        self
    }
}

/// Available ModernBERT multilingual sentiment model sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModernBertSize {
    Base,
    Large,
}

impl std::fmt::Display for ModernBertSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ModernBertSize::Base => "modernbert-base",
            ModernBertSize::Large => "modernbert-large",
        };
        write!(f, "{name}")
    }
}

impl From<ModernBertSize> for ModelSource {
    fn from(size: ModernBertSize) -> Self {
        match size {
            ModernBertSize::Base => {
                ModelSource::new("clapAI/modernBERT-base-multilingual-sentiment")
            }
            ModernBertSize::Large => {
                ModelSource::new("clapAI/modernBERT-large-multilingual-sentiment")
            }
        }
    }
}

/// Pick the most probable class and look up its label.
///
/// `probabilities` is one row of class probabilities, indexed like the
/// model's `id2label` map.
pub(crate) fn top_label(
    probabilities: &[f32],
    id2label: &HashMap<String, String>,
) -> Result<(String, f32)> {
    let (index, score) = probabilities
        .iter()
        .copied()
        .enumerate()
        .fold(None, |best: Option<(usize, f32)>, (i, p)| match best {
            Some((_, bp)) if bp >= p => best,
            _ => Some((i, p)),
        })
        .ok_or_else(|| ClassifierError::Internal("Model returned no class scores".into()))?;

    let label = id2label.get(&index.to_string()).cloned().ok_or_else(|| {
        ClassifierError::Internal(format!("Predicted ID '{index}' not found in id2label map"))
    })?;

    Ok((label, score))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels() -> HashMap<String, String> {
        [("0", "negative"), ("1", "neutral"), ("2", "positive")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn picks_highest_probability() {
        let (label, score) = top_label(&[0.1, 0.2, 0.7], &labels()).unwrap();
        assert_eq!(label, "positive");
        assert!((score - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn ties_resolve_to_lowest_index() {
        let (label, _) = top_label(&[0.4, 0.4, 0.2], &labels()).unwrap();
        assert_eq!(label, "negative");
    }

    #[test]
    fn unknown_index_is_an_error() {
        let err = top_label(&[0.1, 0.1, 0.1, 0.7], &labels()).unwrap_err();
        assert!(matches!(err, ClassifierError::Internal(_)));
        assert!(top_label(&[], &labels()).is_err());
    }
}
