use super::pipeline::Prediction;
use crate::core::Result;
use tokenizers::Tokenizer;

pub trait SentimentAnalysisModel {
    type Options: std::fmt::Debug + Clone;

    fn new(options: Self::Options, device: candle_core::Device) -> Result<Self>
    where
        Self: Sized;

    /// Predict the native label of `text` and the probability of that label.
    fn predict_with_score(&self, tokenizer: &Tokenizer, text: &str) -> Result<Prediction>;

    fn get_tokenizer(options: Self::Options) -> Result<Tokenizer>;

    fn device(&self) -> &candle_core::Device;
}
