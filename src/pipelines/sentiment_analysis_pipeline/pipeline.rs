use super::model::SentimentAnalysisModel;
use crate::core::Result;
use tokenizers::Tokenizer;

/// A raw backend prediction: the model's native label and its probability.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// The label as named by the model (e.g. `positive`, `LABEL_1`, `4 stars`).
    pub label: String,
    /// Probability of `label`, as reported by the model.
    pub score: f32,
}

/// An opaque sentiment capability: `classify(text) -> (label, score)`.
///
/// Implementations are expected to block until the prediction is ready and
/// must be shareable across request threads.
pub trait SentimentBackend: Send + Sync {
    fn classify(&self, text: &str) -> Result<Prediction>;
}

impl<F> SentimentBackend for F
where
    F: Fn(&str) -> Result<Prediction> + Send + Sync,
{
    fn classify(&self, text: &str) -> Result<Prediction> {
        self(text)
    }
}

/// Classifies text sentiment with a locally loaded model.
///
/// Construct with [`SentimentAnalysisPipelineBuilder`](super::SentimentAnalysisPipelineBuilder).
///
/// ```rust,no_run
/// use relief_classifier::pipelines::sentiment_analysis_pipeline::*;
///
/// # fn main() -> relief_classifier::core::Result<()> {
/// let pipeline = SentimentAnalysisPipelineBuilder::modernbert(ModernBertSize::Base).build()?;
/// let prediction = pipeline.predict("I love this product!")?;
/// println!("{} ({:.2})", prediction.label, prediction.score);
/// # Ok(())
/// # }
/// ```
pub struct SentimentAnalysisPipeline<M: SentimentAnalysisModel> {
    pub(crate) model: M,
    pub(crate) tokenizer: Tokenizer,
}

impl<M: SentimentAnalysisModel> SentimentAnalysisPipeline<M> {
    /// Predict sentiment with structured result containing label and confidence score
    pub fn predict(&self, text: &str) -> Result<Prediction> {
        self.model.predict_with_score(&self.tokenizer, text)
    }

    /// Returns the device (CPU/GPU) the model is running on.
    pub fn device(&self) -> &candle_core::Device {
        self.model.device()
    }
}

impl<M> SentimentBackend for SentimentAnalysisPipeline<M>
where
    M: SentimentAnalysisModel + Send + Sync,
{
    fn classify(&self, text: &str) -> Result<Prediction> {
        self.predict(text)
    }
}
