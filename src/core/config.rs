//! Service configuration.
//!
//! Configuration is read from the YAML file named by `RELIEF_CLASSIFIER_CONFIG`
//! when that variable is set, otherwise the defaults below are used. The file
//! holds a single top-level `relief_classifier` key:
//!
//! ```yaml
//! relief_classifier:
//!   port: 5001
//!   device: cpu
//!   sentiment_backends:
//!     - kind: modernbert
//!       model_id: clapAI/modernBERT-base-multilingual-sentiment
//! ```

use super::error::{ClassifierError, Result};
use crate::pipelines::utils::DeviceRequest;
use serde::Deserialize;

/// Environment variable naming the YAML configuration file.
pub const CONFIG_ENV: &str = "RELIEF_CLASSIFIER_CONFIG";
/// Environment variable overriding the listen port.
pub const PORT_ENV: &str = "RELIEF_CLASSIFIER_PORT";

/// Maximum number of characters of a text handed to a sentiment backend.
pub const DEFAULT_MAX_TEXT_CHARS: usize = 512;

/// Architecture of a sentiment backend candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// ModernBERT sequence classifier.
    Modernbert,
    /// BERT encoder with pooler and classification head.
    Bert,
}

/// One entry of the sentiment fallback chain.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BackendSpec {
    pub kind: BackendKind,
    /// Hugging Face repository id.
    pub model_id: String,
    #[serde(default = "default_revision")]
    pub revision: String,
    /// Display name reported by the introspection endpoints.
    #[serde(default)]
    pub name: Option<String>,
}

impl BackendSpec {
    pub fn new(kind: BackendKind, model_id: impl Into<String>) -> Self {
        Self {
            kind,
            model_id: model_id.into(),
            revision: default_revision(),
            name: None,
        }
    }

    /// Name under which this backend is reported once active.
    pub fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.model_id.clone())
    }
}

/// Top-level configuration of the classification service.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub max_text_chars: usize,
    /// `auto`, `cpu` or `cuda:N`.
    pub device: String,
    /// Sentiment backends in priority order.
    pub sentiment_backends: Vec<BackendSpec>,
}

fn default_revision() -> String {
    "main".to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5001,
            max_text_chars: DEFAULT_MAX_TEXT_CHARS,
            device: "auto".to_string(),
            sentiment_backends: vec![
                BackendSpec {
                    name: Some("modernBERT-large-multilingual-sentiment".to_string()),
                    ..BackendSpec::new(
                        BackendKind::Modernbert,
                        "clapAI/modernBERT-large-multilingual-sentiment",
                    )
                },
                BackendSpec {
                    name: Some("modernBERT-base-multilingual-sentiment (fallback)".to_string()),
                    ..BackendSpec::new(
                        BackendKind::Modernbert,
                        "clapAI/modernBERT-base-multilingual-sentiment",
                    )
                },
            ],
        }
    }
}

impl ServiceConfig {
    /// Parse a configuration document with a top-level `relief_classifier` key.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        #[derive(Deserialize)]
        struct ConfigWrapper {
            relief_classifier: ServiceConfig,
        }

        let wrapper: ConfigWrapper = serde_yaml::from_str(yaml)?;
        wrapper.relief_classifier.validated()
    }

    /// Load config from the file named by [`CONFIG_ENV`], or use defaults.
    /// [`PORT_ENV`] overrides the port in both cases.
    pub fn load_from_env_and_defaults() -> Result<Self> {
        let mut config = match std::env::var(CONFIG_ENV) {
            Ok(path) => {
                tracing::info!("Loading classifier config from: {}", path);
                let yaml = std::fs::read_to_string(&path).map_err(|e| {
                    ClassifierError::Config(format!("Failed to read config file {path}: {e}"))
                })?;
                Self::from_yaml_str(&yaml)?
            }
            Err(_) => {
                tracing::debug!("{} not set, using default config", CONFIG_ENV);
                Self::default()
            }
        };

        if let Ok(port) = std::env::var(PORT_ENV) {
            config.port = port.parse().map_err(|e| {
                ClassifierError::Config(format!("Invalid {PORT_ENV} value {port:?}: {e}"))
            })?;
        }

        Ok(config)
    }

    /// Resolve the `device` setting into a [`DeviceRequest`].
    pub fn device_request(&self) -> Result<DeviceRequest> {
        self.device.parse()
    }

    fn validated(self) -> Result<Self> {
        if self.max_text_chars == 0 {
            return Err(ClassifierError::Config(
                "max_text_chars must be greater than zero".to_string(),
            ));
        }
        self.device_request()?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = ServiceConfig::default();
        assert_eq!(config.port, 5001);
        assert_eq!(config.max_text_chars, 512);
        assert_eq!(config.sentiment_backends.len(), 2);
        assert!(config
            .sentiment_backends
            .iter()
            .all(|b| b.kind == BackendKind::Modernbert));
    }

    #[test]
    fn parses_backend_chain_in_order() {
        let yaml = r#"
relief_classifier:
  port: 8080
  device: cpu
  sentiment_backends:
    - kind: bert
      model_id: nlptown/bert-base-multilingual-uncased-sentiment
      name: bert-multilingual
    - kind: modernbert
      model_id: clapAI/modernBERT-base-multilingual-sentiment
"#;
        let config = ServiceConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.sentiment_backends[0].kind, BackendKind::Bert);
        assert_eq!(config.sentiment_backends[0].display_name(), "bert-multilingual");
        assert_eq!(config.sentiment_backends[1].revision, "main");
        assert_eq!(
            config.sentiment_backends[1].display_name(),
            "clapAI/modernBERT-base-multilingual-sentiment"
        );
    }

    #[test]
    fn rejects_unknown_device() {
        let yaml = "relief_classifier:\n  device: tpu\n";
        assert!(matches!(
            ServiceConfig::from_yaml_str(yaml),
            Err(ClassifierError::Config(_))
        ));
    }
}
