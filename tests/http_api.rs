// Drives the axum router directly, without binding a socket.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use relief_classifier::core::{ClassifierError, Result};
use relief_classifier::pipelines::sentiment_analysis_pipeline::{Prediction, SentimentBackend};
use relief_classifier::selector::{ActiveBackend, ModelSelection};
use relief_classifier::{server, ReliefClassifier};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn loaded_app() -> axum::Router {
    let backend: Arc<dyn SentimentBackend> = Arc::new(|text: &str| -> Result<Prediction> {
        if text.contains("explode") {
            return Err(ClassifierError::Internal("backend fault".into()));
        }
        Ok(Prediction {
            label: "positive".to_string(),
            score: 0.88,
        })
    });
    let selection = ModelSelection::loaded(ActiveBackend::new("stub-sentiment", backend));
    server::router(Arc::new(ReliefClassifier::new(selection, 512)))
}

fn unloaded_app() -> axum::Router {
    server::router(Arc::new(ReliefClassifier::new(
        ModelSelection::unloaded(),
        512,
    )))
}

async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn post(path: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(path: &str) -> Request<Body> {
    Request::builder().uri(path).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn analyze_returns_mapped_sentiment() {
    let (status, body) = send(loaded_app(), post("/analyze", json!({"text": "Great job"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sentiment"], "POSITIVE");
    assert_eq!(body["raw_label"], "POSITIVE");
    assert_eq!(body["model"], "stub-sentiment");
    assert!((body["confidence"].as_f64().unwrap() - 0.88).abs() < 1e-6);
}

#[tokio::test]
async fn analyze_empty_text_is_neutral_even_without_model() {
    let (status, body) = send(unloaded_app(), post("/analyze", json!({"text": "  "}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"sentiment": "NEUTRAL", "confidence": 0.0}));
}

#[tokio::test]
async fn analyze_without_model_is_500() {
    let (status, body) = send(unloaded_app(), post("/analyze", json!({"text": "hi"}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Model not initialized"}));
}

#[tokio::test]
async fn malformed_requests_are_400() {
    let (status, body) = send(loaded_app(), post("/analyze", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing 'text' field");

    let (status, _) = send(loaded_app(), post("/analyze", json!({"text": 42}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        loaded_app(),
        post("/classify_batch_category", json!({"texts": "not a list"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "'texts' must be a list");

    let request = Request::builder()
        .method("POST")
        .uri("/classify_category")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(loaded_app(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn analyze_batch_keeps_order_and_reports_model() {
    let (status, body) = send(
        loaded_app(),
        post("/analyze_batch", json!({"texts": ["good", 7, "", "nice"]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["model"], "stub-sentiment");
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 4);
    assert_eq!(results[0]["sentiment"], "POSITIVE");
    assert_eq!(results[1], json!({"sentiment": "NEUTRAL", "confidence": 0.0}));
    assert_eq!(results[2], json!({"sentiment": "NEUTRAL", "confidence": 0.0}));
    assert_eq!(results[3]["sentiment"], "POSITIVE");
}

#[tokio::test]
async fn analyze_batch_backend_fault_is_500() {
    let (status, body) = send(
        loaded_app(),
        post("/analyze_batch", json!({"texts": ["fine", "explode"]})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "item 1: backend fault");
}

#[tokio::test]
async fn classify_category_includes_model_and_method() {
    let (status, body) = send(
        unloaded_app(),
        post("/classify_category", json!({"text": "We need food and water"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["category"], "FOOD");
    assert_eq!(body["category_name"], "Food assistance (cấp phát thực phẩm)");
    assert_eq!(body["method"], "keyword-based (instant Vietnamese support)");
    assert_eq!(
        body["model"],
        "Hybrid: Keyword Matching + Semantic Similarity (Instant Vietnamese)"
    );
    assert!((body["confidence"].as_f64().unwrap() - 2.0 / 3.0).abs() < 1e-6);

    let (_, body) = send(unloaded_app(), post("/classify_category", json!({"text": ""}))).await;
    assert_eq!(body, json!({"category": "FOOD", "confidence": 0.0}));
}

#[tokio::test]
async fn classify_batch_category_handles_mixed_items() {
    let (status, body) = send(
        unloaded_app(),
        post(
            "/classify_batch_category",
            json!({"texts": ["Bệnh viện cần thuốc", null, "cash grant"]}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let results = body["results"].as_array().unwrap();
    assert_eq!(results[0]["category"], "MEDICAL");
    assert_eq!(results[1], json!({"category": "FOOD", "confidence": 0.0}));
    assert_eq!(results[2]["category"], "CASH");
    assert!(body["model"].is_string());
}

#[tokio::test]
async fn models_and_health() {
    let (status, body) = send(loaded_app(), get("/models")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sentiment_model_name"], "stub-sentiment");
    assert_eq!(body["sentiment_model_loaded"], true);
    assert_eq!(body["categories"].as_array().unwrap().len(), 5);
    assert_eq!(body["categories"][0]["category"], "FOOD");

    let (status, body) = send(unloaded_app(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["model_loaded"], false);
    assert_eq!(body["sentiment_model"], Value::Null);
}

#[tokio::test]
async fn unknown_path_is_404() {
    let (status, body) = send(loaded_app(), get("/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Endpoint not found"}));
}
