//! Startup-time selection of the sentiment backend.
//!
//! Candidates are tried strictly in order. The first one that loads becomes
//! the active backend for the rest of the process; candidates after it are
//! never touched. Load failures are recorded and logged, never returned.

use crate::core::{BackendKind, BackendSpec, Result, ServiceConfig};
use crate::models::ModelSource;
use crate::pipelines::sentiment_analysis_pipeline::{
    Prediction, SentimentAnalysisPipelineBuilder, SentimentBackend,
};
use crate::pipelines::utils::{DeviceRequest, DeviceSelectable};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// One-shot procedure producing a ready backend.
pub type BackendLoader = Box<dyn FnOnce() -> Result<Arc<dyn SentimentBackend>> + Send>;

/// A named entry of the fallback chain.
pub struct BackendCandidate {
    name: String,
    loader: BackendLoader,
}

impl BackendCandidate {
    pub fn new<F>(name: impl Into<String>, loader: F) -> Self
    where
        F: FnOnce() -> Result<Arc<dyn SentimentBackend>> + Send + 'static,
    {
        Self {
            name: name.into(),
            loader: Box::new(loader),
        }
    }

    /// Candidate that builds a candle pipeline for `spec` on `device`.
    pub fn from_spec(spec: &BackendSpec, device: DeviceRequest) -> Self {
        let source = ModelSource::new(&spec.model_id).with_revision(&spec.revision);
        let kind = spec.kind;
        Self::new(spec.display_name(), move || -> Result<Arc<dyn SentimentBackend>> {
            match kind {
                BackendKind::Modernbert => {
                    let pipeline = SentimentAnalysisPipelineBuilder::modernbert_from(source)
                        .device_request(device)
                        .build()?;
                    Ok(Arc::new(pipeline))
                }
                BackendKind::Bert => {
                    let pipeline = SentimentAnalysisPipelineBuilder::bert(source)
                        .device_request(device)
                        .build()?;
                    Ok(Arc::new(pipeline))
                }
            }
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for BackendCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendCandidate")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Build the configured fallback chain.
pub fn candidates_from_config(config: &ServiceConfig) -> Result<Vec<BackendCandidate>> {
    let device = config.device_request()?;
    Ok(config
        .sentiment_backends
        .iter()
        .map(|spec| BackendCandidate::from_spec(spec, device.clone()))
        .collect())
}

/// The backend chosen at startup.
#[derive(Clone)]
pub struct ActiveBackend {
    name: String,
    backend: Arc<dyn SentimentBackend>,
}

impl ActiveBackend {
    pub fn new(name: impl Into<String>, backend: Arc<dyn SentimentBackend>) -> Self {
        Self {
            name: name.into(),
            backend,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn classify(&self, text: &str) -> Result<Prediction> {
        self.backend.classify(text)
    }
}

impl fmt::Debug for ActiveBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActiveBackend")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Why a candidate did not become active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadFailure {
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub enum BackendState {
    Loaded(ActiveBackend),
    Unloaded,
}

/// Outcome of running the fallback chain.
#[derive(Debug, Clone)]
pub struct ModelSelection {
    state: BackendState,
    candidates: Vec<String>,
    failures: Vec<LoadFailure>,
}

impl ModelSelection {
    /// A selection with nothing loaded and nothing attempted.
    pub fn unloaded() -> Self {
        Self {
            state: BackendState::Unloaded,
            candidates: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// A selection with a backend supplied directly.
    pub fn loaded(backend: ActiveBackend) -> Self {
        Self {
            candidates: vec![backend.name().to_string()],
            state: BackendState::Loaded(backend),
            failures: Vec::new(),
        }
    }

    pub fn state(&self) -> &BackendState {
        &self.state
    }

    pub fn active(&self) -> Option<&ActiveBackend> {
        match &self.state {
            BackendState::Loaded(backend) => Some(backend),
            BackendState::Unloaded => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.active().is_some()
    }

    pub fn model_name(&self) -> Option<&str> {
        self.active().map(ActiveBackend::name)
    }

    /// Names of every configured candidate, in priority order.
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn failures(&self) -> &[LoadFailure] {
        &self.failures
    }
}

/// Try `candidates` in order and keep the first that loads.
pub fn select_backend(candidates: Vec<BackendCandidate>) -> ModelSelection {
    let names: Vec<String> = candidates.iter().map(|c| c.name.clone()).collect();
    let mut failures = Vec::new();

    for candidate in candidates {
        tracing::info!("Loading sentiment backend candidate {}", candidate.name);
        match (candidate.loader)() {
            Ok(backend) => {
                if failures.is_empty() {
                    tracing::info!("Sentiment backend loaded: {}", candidate.name);
                } else {
                    tracing::warn!(
                        "Sentiment backend loaded after {} failed candidate(s), using fallback: {}",
                        failures.len(),
                        candidate.name
                    );
                }
                return ModelSelection {
                    state: BackendState::Loaded(ActiveBackend::new(candidate.name, backend)),
                    candidates: names,
                    failures,
                };
            }
            Err(e) => {
                tracing::warn!("Sentiment backend {} failed to load: {}", candidate.name, e);
                failures.push(LoadFailure {
                    name: candidate.name,
                    reason: e.to_string(),
                });
            }
        }
    }

    tracing::error!("Error loading sentiment models: every candidate failed");
    ModelSelection {
        state: BackendState::Unloaded,
        candidates: names,
        failures,
    }
}
