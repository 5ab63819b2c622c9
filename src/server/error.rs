use crate::core::ClassifierError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// A [`ClassifierError`] on its way out as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub ClassifierError);

impl ApiError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self(ClassifierError::InvalidRequest(message.into()))
    }

    pub fn status(&self) -> StatusCode {
        if self.0.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl From<ClassifierError> for ApiError {
    fn from(value: ClassifierError) -> Self {
        Self(value.into_request_error())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        Self::invalid(format!("Invalid JSON body: {}", value.body_text()))
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(value: tokio::task::JoinError) -> Self {
        Self(ClassifierError::Internal(format!(
            "classification task failed: {value}"
        )))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        } else {
            tracing::debug!("Rejected request: {}", self.0);
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(ApiError::invalid("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::from(ClassifierError::ModelUnavailable).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::from(ClassifierError::Config("bad".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn load_time_errors_are_reported_as_internal() {
        let err = ApiError::from(ClassifierError::Tokenization("oops".into()));
        assert!(matches!(err.0, ClassifierError::Internal(ref m) if m == "oops"));
    }
}
