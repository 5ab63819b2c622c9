//! ModernBERT sequence classifier used as a sentiment backend.
//!
//! The network itself comes from `candle_transformers`; this module handles
//! fetching the checkpoint, wiring the classification metadata into the
//! config, and turning one forward pass into a `(label, score)` pair.

use super::{top_label, ModelSource};
use crate::core::{ClassifierError, Result};
use crate::loaders::{ClassifierConfigLoader, TokenizerLoader, WeightsLoader};
use crate::pipelines::sentiment_analysis_pipeline::{Prediction, SentimentAnalysisModel};
use candle_core::{DType, Device, Tensor};
use candle_transformers::models::modernbert::{
    ClassifierConfig, ClassifierPooling, Config, ModernBertForSequenceClassification,
};
use std::collections::HashMap;
use tokenizers::Tokenizer;

/// Sentiment analysis model using ModernBERT
pub struct SentimentModernBertModel {
    model: ModernBertForSequenceClassification,
    device: Device,
    id2label: HashMap<String, String>,
}

impl SentimentModernBertModel {
    pub fn new(source: ModelSource, device: Device) -> Result<Self> {
        tracing::info!("Loading ModernBERT sentiment model {}", source.model_id);

        let config_file = ClassifierConfigLoader::new(&source.model_id, &source.revision).load()?;
        let id2label = config_file.id2label;

        let mut config: Config = serde_json::from_str(&config_file.content).map_err(|e| {
            ClassifierError::Config(format!("Failed to parse model config: {e}"))
        })?;

        let label2id = id2label
            .iter()
            .map(|(id, label)| (label.clone(), id.clone()))
            .collect();
        let pooling = config
            .classifier_config
            .as_ref()
            .map(|c| c.classifier_pooling)
            .unwrap_or(ClassifierPooling::MEAN);

        config.classifier_config = Some(ClassifierConfig {
            id2label: id2label.clone(),
            label2id,
            classifier_pooling: pooling,
        });

        let vb = WeightsLoader::new(&source.model_id, &source.revision)
            .var_builder(DType::F32, &device)?;
        let model = ModernBertForSequenceClassification::load(vb, &config)?;

        Ok(Self {
            model,
            device,
            id2label,
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

        // (1, num_labels), already soft-maxed by the classification head
        let probs = self.model.forward(&input_ids, &attention_mask)?;
        let row = probs.squeeze(0)?.to_dtype(DType::F32)?.to_vec1::<f32>()?;

        let (label, score) = top_label(&row, &self.id2label)?;
        Ok(Prediction { label, score })
    }
}

impl SentimentAnalysisModel for SentimentModernBertModel {
    type Options = ModelSource;

    fn new(options: Self::Options, device: Device) -> Result<Self> {
        SentimentModernBertModel::new(options, device)
    }

    fn predict_with_score(&self, tokenizer: &Tokenizer, text: &str) -> Result<Prediction> {
        self.predict_with_score(tokenizer, text)
    }

    fn get_tokenizer(options: Self::Options) -> Result<Tokenizer> {
        TokenizerLoader::new(&options.model_id, &options.revision).load()
    }

    fn device(&self) -> &Device {
        self.device()
    }
}
