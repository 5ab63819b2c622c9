//! Model file loading utilities for Hugging Face Hub integration.
//!
//! This module provides loaders for the pieces a sequence-classification
//! backend needs:
//! - Tokenizers (`tokenizer.json`)
//! - Classifier configuration (`config.json`, including `id2label`)
//! - Model weights (`model.safetensors`, falling back to `pytorch_model.bin`)
//!
//! ## Main Types
//!
//! - [`HfLoader`] - Generic Hugging Face file loader with retry logic
//! - [`TokenizerLoader`] - Loads tokenizers from Hugging Face repositories
//! - [`ClassifierConfigLoader`] - Loads the raw config and its label map
//! - [`WeightsLoader`] - Resolves weight files into a [`VarBuilder`]
//!
//! All loaders include built-in retry logic to handle Hugging Face Hub lock
//! acquisition failures when several processes share a cache directory.

use crate::core::{ClassifierError, Result};
use candle_core::{DType, Device};
use candle_nn::VarBuilder;
use hf_hub::api::sync::ApiBuilder;
use hf_hub::{Repo, RepoType};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use tokenizers::Tokenizer;

const MAX_RETRIES: u32 = 3;

#[derive(Debug, Clone)]
pub struct HfLoader {
    pub repo: String,
    pub revision: String,
    pub filename: String,
}

impl HfLoader {
    pub fn new(repo: &str, revision: &str, filename: &str) -> Self {
        Self {
            repo: repo.into(),
            revision: revision.into(),
            filename: filename.into(),
        }
    }

    pub fn load(&self) -> Result<PathBuf> {
        let api = ApiBuilder::new().with_progress(false).build()?;
        let repo = api.repo(Repo::with_revision(
            self.repo.clone(),
            RepoType::Model,
            self.revision.clone(),
        ));

        let mut attempt = 0;
        loop {
            match repo.get(&self.filename) {
                Ok(path) => return Ok(path),
                Err(e)
                    if e.to_string().contains("Lock acquisition failed")
                        && attempt < MAX_RETRIES - 1 =>
                {
                    // Exponential backoff: 100ms, 200ms, ...
                    let wait_time = std::time::Duration::from_millis(100 * (1 << attempt));
                    tracing::debug!(
                        "lock contention fetching {}/{}, retrying in {:?}",
                        self.repo,
                        self.filename,
                        wait_time
                    );
                    std::thread::sleep(wait_time);
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct TokenizerLoader {
    pub tokenizer_file_loader: HfLoader,
}

impl TokenizerLoader {
    pub fn new(repo: &str, revision: &str) -> Self {
        Self {
            tokenizer_file_loader: HfLoader::new(repo, revision, "tokenizer.json"),
        }
    }

    pub fn load(&self) -> Result<Tokenizer> {
        let path = self.tokenizer_file_loader.load()?;
        Tokenizer::from_file(path)
            .map_err(|e| ClassifierError::Tokenization(format!("Failed to load tokenizer: {e}")))
    }
}

/// Raw `config.json` contents plus the parsed label map.
#[derive(Debug, Clone)]
pub struct ClassifierConfigFile {
    pub content: String,
    pub id2label: HashMap<String, String>,
}

#[derive(Debug, Clone)]
pub struct ClassifierConfigLoader {
    pub config_file_loader: HfLoader,
}

impl ClassifierConfigLoader {
    pub fn new(repo: &str, revision: &str) -> Self {
        Self {
            config_file_loader: HfLoader::new(repo, revision, "config.json"),
        }
    }

    pub fn load(&self) -> Result<ClassifierConfigFile> {
        #[derive(Deserialize)]
        struct ClassifierConfigRaw {
            id2label: HashMap<String, String>,
        }

        let path = self.config_file_loader.load()?;
        let content = std::fs::read_to_string(&path).map_err(|e| {
            ClassifierError::Config(format!("Failed to read config file {path:?}: {e}"))
        })?;
        let raw: ClassifierConfigRaw = serde_json::from_str(&content).map_err(|e| {
            ClassifierError::Config(format!("Failed to parse classifier config: {e}"))
        })?;
        if raw.id2label.is_empty() {
            return Err(ClassifierError::Config(
                "Classifier config has an empty id2label map".to_string(),
            ));
        }

        Ok(ClassifierConfigFile {
            content,
            id2label: raw.id2label,
        })
    }
}

#[derive(Debug, Clone)]
pub struct WeightsLoader {
    pub repo: String,
    pub revision: String,
}

impl WeightsLoader {
    pub fn new(repo: &str, revision: &str) -> Self {
        Self {
            repo: repo.into(),
            revision: revision.into(),
        }
    }

    /// Fetch `model.safetensors`, or `pytorch_model.bin` when the repo has no safetensors.
    pub fn load(&self) -> Result<PathBuf> {
        match HfLoader::new(&self.repo, &self.revision, "model.safetensors").load() {
            Ok(path) => Ok(path),
            Err(safetensors_err) => HfLoader::new(&self.repo, &self.revision, "pytorch_model.bin")
                .load()
                .map_err(|e| {
                    ClassifierError::Download(format!(
                        "Model weights not found in {}. Expected `model.safetensors` ({safetensors_err}) or `pytorch_model.bin` ({e})",
                        self.repo
                    ))
                }),
        }
    }

    pub fn var_builder(&self, dtype: DType, device: &Device) -> Result<VarBuilder<'static>> {
        let weights_filename = self.load()?;
        let vb = if weights_filename
            .extension()
            .is_some_and(|ext| ext == "safetensors")
        {
            // SAFETY: the file is owned by the hub cache and not modified while mapped.
            unsafe { VarBuilder::from_mmaped_safetensors(&[weights_filename], dtype, device)? }
        } else if weights_filename.extension().is_some_and(|ext| ext == "bin") {
            VarBuilder::from_pth(&weights_filename, dtype, device)?
        } else {
            return Err(ClassifierError::Config(format!(
                "Unsupported weight file format: {weights_filename:?}"
            )));
        };
        Ok(vb)
    }
}
