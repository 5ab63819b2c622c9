use super::model::SentimentAnalysisModel;
use super::pipeline::SentimentAnalysisPipeline;
use crate::core::Result;
use crate::models::{ModelSource, ModernBertSize, SentimentBertModel, SentimentModernBertModel};
use crate::pipelines::utils::{DeviceRequest, DeviceSelectable};

pub struct SentimentAnalysisPipelineBuilder<M: SentimentAnalysisModel> {
    options: M::Options,
    device_request: DeviceRequest,
}

impl<M: SentimentAnalysisModel> SentimentAnalysisPipelineBuilder<M> {
    pub fn new(options: M::Options) -> Self {
        Self {
            options,
            device_request: DeviceRequest::Default,
        }
    }

    /// Download (if needed) and load the model and its tokenizer.
    pub fn build(self) -> Result<SentimentAnalysisPipeline<M>> {
        let device = self.device_request.resolve()?;
        tracing::debug!("building sentiment pipeline for {:?} on {:?}", self.options, device);
        let model = M::new(self.options.clone(), device)?;
        let tokenizer = M::get_tokenizer(self.options)?;
        Ok(SentimentAnalysisPipeline { model, tokenizer })
    }
}

impl<M: SentimentAnalysisModel> DeviceSelectable for SentimentAnalysisPipelineBuilder<M> {
    fn device_request_mut(&mut self) -> &mut DeviceRequest {
        &mut self.device_request
    }
}

impl SentimentAnalysisPipelineBuilder<SentimentModernBertModel> {
    pub fn modernbert(size: ModernBertSize) -> Self {
        Self::new(size.into())
    }

    /// Any ModernBERT sequence-classification checkpoint on the Hub.
    pub fn modernbert_from(source: ModelSource) -> Self {
        Self::new(source)
    }
}

impl SentimentAnalysisPipelineBuilder<SentimentBertModel> {
    /// Any BERT sequence-classification checkpoint on the Hub.
    pub fn bert(source: ModelSource) -> Self {
        Self::new(source)
    }
}
