//! HTTP binding of [`ReliefClassifier`].
//!
//! | Method | Path                       | Body               |
//! |--------|----------------------------|--------------------|
//! | POST   | `/analyze`                 | `{"text": "..."}`  |
//! | POST   | `/analyze_batch`           | `{"texts": [...]}` |
//! | POST   | `/classify_category`       | `{"text": "..."}`  |
//! | POST   | `/classify_batch_category` | `{"texts": [...]}` |
//! | GET    | `/models`                  |                    |
//! | GET    | `/health`                  |                    |
//!
//! Errors are `{"error": message}` with status 400 for malformed requests and
//! 500 otherwise. Unknown paths get 404 `{"error": "Endpoint not found"}`.

mod error;

pub use error::ApiError;

use crate::pipelines::category_pipeline::{CategoryResult, CATEGORY_MODEL_NAME};
use crate::service::{HealthStatus, ModelInfo, ReliefClassifier};
use crate::sentiment::SentimentResult;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

type AppState = Arc<ReliefClassifier>;

pub fn router(classifier: AppState) -> Router {
    Router::new()
        .route("/analyze", post(analyze))
        .route("/analyze_batch", post(analyze_batch))
        .route("/classify_category", post(classify_category))
        .route("/classify_batch_category", post(classify_batch_category))
        .route("/models", get(models))
        .route("/health", get(health))
        .fallback(not_found)
        .with_state(classifier)
}

#[derive(Debug, Serialize)]
struct BatchResponse<T> {
    results: Vec<T>,
    model: Option<String>,
}

#[derive(Debug, Serialize)]
struct ScoredCategory {
    #[serde(flatten)]
    result: CategoryResult,
    model: &'static str,
}

fn text_field(body: Result<Json<Value>, JsonRejection>) -> Result<String, ApiError> {
    let Json(body) = body?;
    match body.get("text") {
        None | Some(Value::Null) => Err(ApiError::invalid("Missing 'text' field")),
        Some(Value::String(text)) => Ok(text.clone()),
        Some(_) => Err(ApiError::invalid("'text' must be a string")),
    }
}

/// Non-string entries become `None` so they map to placeholders.
fn texts_field(body: Result<Json<Value>, JsonRejection>) -> Result<Vec<Option<String>>, ApiError> {
    let Json(body) = body?;
    match body.get("texts") {
        None | Some(Value::Null) => Err(ApiError::invalid("Missing 'texts' field")),
        Some(Value::Array(items)) => Ok(items
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect()),
        Some(_) => Err(ApiError::invalid("'texts' must be a list")),
    }
}

async fn analyze(
    State(classifier): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SentimentResult>, ApiError> {
    let text = text_field(body)?;
    tracing::debug!("POST /analyze ({} chars)", text.chars().count());
    let result =
        tokio::task::spawn_blocking(move || classifier.classify_sentiment(&text)).await??;
    Ok(Json(result))
}

async fn analyze_batch(
    State(classifier): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<BatchResponse<SentimentResult>>, ApiError> {
    let texts = texts_field(body)?;
    tracing::debug!("POST /analyze_batch ({} items)", texts.len());
    let response = tokio::task::spawn_blocking(move || {
        classifier
            .classify_sentiment_batch(texts)
            .map(|results| BatchResponse {
                results,
                model: classifier.sentiment_model_name().map(str::to_string),
            })
    })
    .await??;
    Ok(Json(response))
}

async fn classify_category(
    State(classifier): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let text = text_field(body)?;
    tracing::debug!("POST /classify_category ({} chars)", text.chars().count());
    let result = classifier.classify_category(&text);
    // Placeholders go out bare, scored results name the model.
    let body = if result.method.is_some() {
        serde_json::to_value(ScoredCategory {
            result,
            model: CATEGORY_MODEL_NAME,
        })
    } else {
        serde_json::to_value(result)
    }
    .map_err(|e| ApiError(e.into()))?;
    Ok(Json(body))
}

async fn classify_batch_category(
    State(classifier): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<BatchResponse<CategoryResult>>, ApiError> {
    let texts = texts_field(body)?;
    tracing::debug!("POST /classify_batch_category ({} items)", texts.len());
    Ok(Json(BatchResponse {
        results: classifier.classify_category_batch(texts),
        model: Some(CATEGORY_MODEL_NAME.to_string()),
    }))
}

async fn models(State(classifier): State<AppState>) -> Json<ModelInfo> {
    Json(classifier.active_model_info())
}

async fn health(State(classifier): State<AppState>) -> Json<HealthStatus> {
    Json(classifier.health())
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"error": "Endpoint not found"})),
    )
}
