use super::{top_label, ModelSource};
use crate::core::{ClassifierError, Result};
use crate::loaders::{ClassifierConfigLoader, TokenizerLoader, WeightsLoader};
use crate::pipelines::sentiment_analysis_pipeline::{Prediction, SentimentAnalysisModel};
use candle_core::{DType, Device, IndexOp, Module, Tensor, D};
use candle_nn::ops::softmax;
use candle_nn::{linear, Linear};
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use std::collections::HashMap;
use tokenizers::{Tokenizer, TruncationParams};

/// BERT position embeddings stop at 512 tokens.
const BERT_MAX_TOKENS: usize = 512;

/// Sentiment analysis model using a BERT encoder with the standard
/// `BertForSequenceClassification` pooler and classifier head.
pub struct SentimentBertModel {
    model: BertModel,
    pooler: Linear,
    classifier: Linear,
    device: Device,
    id2label: HashMap<String, String>,
}

impl SentimentBertModel {
    pub fn new(source: ModelSource, device: Device) -> Result<Self> {
        tracing::info!("Loading BERT sentiment model {}", source.model_id);

        let config_file = ClassifierConfigLoader::new(&source.model_id, &source.revision).load()?;
        let config: BertConfig = serde_json::from_str(&config_file.content).map_err(|e| {
            ClassifierError::Config(format!("Failed to parse model config: {e}"))
        })?;
        let num_labels = config_file.id2label.len();

        let vb = WeightsLoader::new(&source.model_id, &source.revision)
            .var_builder(DType::F32, &device)?;
        let model = BertModel::load(vb.pp("bert"), &config)?;
        let pooler = linear(config.hidden_size, config.hidden_size, vb.pp("bert.pooler.dense"))?;
        let classifier = linear(config.hidden_size, num_labels, vb.pp("classifier"))?;

        tracing::debug!(
            "Initialized BERT classifier: {} labels, device={:?}",
            num_labels,
            device
        );

        Ok(Self {
            model,
            pooler,
            classifier,
            device,
            id2label: config_file.id2label,
        })
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn predict_with_score(&self, tokenizer: &Tokenizer, text: &str) -> Result<Prediction> {
        let tokens = tokenizer
            .encode(text, true)
            .map_err(|e| ClassifierError::Tokenization(format!("Tokenization error: {e}")))?;

        let input_ids = Tensor::new(tokens.get_ids(), &self.device)?.unsqueeze(0)?;
        let attention_mask = Tensor::new(tokens.get_attention_mask(), &self.device)?.unsqueeze(0)?;
        let token_type_ids = input_ids.zeros_like()?;

        // (1, seq_len, hidden)
        let hidden = self
            .model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))?;
        // Pool on [CLS]
        let cls = hidden.i((.., 0))?;
        let pooled = self.pooler.forward(&cls)?.tanh()?;
        let logits = self.classifier.forward(&pooled)?;

        let (label, score) = top_label(&class_probabilities(&logits)?, &self.id2label)?;
        Ok(Prediction { label, score })
    }
}

/// Softmax a `(1, num_labels)` logits tensor into one row of probabilities.
fn class_probabilities(logits: &Tensor) -> Result<Vec<f32>> {
    let probs = softmax(logits, D::Minus1)?;
    Ok(probs.squeeze(0)?.to_vec1::<f32>()?)
}

impl SentimentAnalysisModel for SentimentBertModel {
    type Options = ModelSource;

    fn new(options: Self::Options, device: Device) -> Result<Self> {
        SentimentBertModel::new(options, device)
    }

    fn predict_with_score(&self, tokenizer: &Tokenizer, text: &str) -> Result<Prediction> {
        self.predict_with_score(tokenizer, text)
    }

    fn get_tokenizer(options: Self::Options) -> Result<Tokenizer> {
        let mut tokenizer = TokenizerLoader::new(&options.model_id, &options.revision).load()?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: BERT_MAX_TOKENS,
                ..Default::default()
            }))
            .map_err(|e| ClassifierError::Tokenization(format!("Failed to set truncation: {e}")))?;
        Ok(tokenizer)
    }

    fn device(&self) -> &Device {
        self.device()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logits_are_always_softmaxed() {
        // A logits row that happens to look like a distribution.
        let logits = Tensor::new(&[[0.3f32, 0.7]], &Device::Cpu).unwrap();
        let probs = class_probabilities(&logits).unwrap();
        assert!((probs[1] - 0.5987).abs() < 1e-4);
        assert!((probs[0] - 0.4013).abs() < 1e-4);

        let logits = Tensor::new(&[[2.0f32, -1.0, 0.5]], &Device::Cpu).unwrap();
        let probs = class_probabilities(&logits).unwrap();
        let sum: f32 = probs.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        assert!(probs[0] > probs[2] && probs[2] > probs[1]);
    }
}
