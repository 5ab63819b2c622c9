pub mod config;
pub mod error;

pub use config::{BackendKind, BackendSpec, ServiceConfig, DEFAULT_MAX_TEXT_CHARS};
pub use error::{ClassifierError, Result};
