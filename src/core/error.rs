//! Error types for this crate.
//!
//! All fallible operations return [`Result<T>`] which uses [`ClassifierError`] as the error type.

use thiserror::Error;

/// A [`Result`](std::result::Result) alias using [`ClassifierError`] as the error type.
pub type Result<T> = std::result::Result<T, ClassifierError>;

/// The unified error type for all crate errors.
///
/// Only three conditions are ever reported to a caller of the classification
/// service: [`InvalidRequest`](ClassifierError::InvalidRequest),
/// [`ModelUnavailable`](ClassifierError::ModelUnavailable), and everything
/// else, which is surfaced as an internal error carrying its message.
///
/// ```rust
/// use relief_classifier::core::ClassifierError;
///
/// fn status_for(e: &ClassifierError) -> u16 {
///     match e {
///         ClassifierError::InvalidRequest(_) => 400,
///         _ => 500,
///     }
/// }
///
/// assert_eq!(status_for(&ClassifierError::ModelUnavailable), 500);
/// ```
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ClassifierError {
    /// Malformed or missing request fields. Caller error, not retried.
    #[error("{0}")]
    InvalidRequest(String),

    /// No sentiment backend was initialised at startup.
    #[error("Model not initialized")]
    ModelUnavailable,

    /// Unexpected failure while running a backend or scoring.
    #[error("{0}")]
    Internal(String),

    /// Network or download failure while fetching model files.
    #[error("{0}")]
    Download(String),

    /// Tokenization failure.
    #[error("{0}")]
    Tokenization(String),

    /// Device initialization failure.
    #[error("{0}")]
    Device(String),

    /// Invalid configuration or model metadata.
    #[error("{0}")]
    Config(String),
}

impl ClassifierError {
    /// Whether this error was caused by the request itself.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ClassifierError::InvalidRequest(_))
    }

    /// Collapse load-time variants into [`ClassifierError::Internal`], which is
    /// how any failure other than a bad request or a missing model is
    /// reported per request.
    pub fn into_request_error(self) -> Self {
        match self {
            ClassifierError::InvalidRequest(_)
            | ClassifierError::ModelUnavailable
            | ClassifierError::Internal(_) => self,
            other => ClassifierError::Internal(other.to_string()),
        }
    }
}

impl From<hf_hub::api::sync::ApiError> for ClassifierError {
    fn from(value: hf_hub::api::sync::ApiError) -> Self {
        ClassifierError::Download(format!("HuggingFace API error: {value}"))
    }
}

impl From<candle_core::Error> for ClassifierError {
    fn from(value: candle_core::Error) -> Self {
        ClassifierError::Internal(value.to_string())
    }
}

impl From<std::io::Error> for ClassifierError {
    fn from(value: std::io::Error) -> Self {
        ClassifierError::Internal(value.to_string())
    }
}

impl From<serde_json::Error> for ClassifierError {
    fn from(value: serde_json::Error) -> Self {
        ClassifierError::Config(value.to_string())
    }
}

impl From<serde_yaml::Error> for ClassifierError {
    fn from(value: serde_yaml::Error) -> Self {
        ClassifierError::Config(value.to_string())
    }
}
