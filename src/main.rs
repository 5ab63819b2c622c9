use anyhow::Context;
use relief_classifier::core::ServiceConfig;
use relief_classifier::pipelines::category_pipeline::CATEGORY_MODEL_NAME;
use relief_classifier::selector::{candidates_from_config, select_backend};
use relief_classifier::server;
use relief_classifier::service::ReliefClassifier;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("relief-classifier v{} starting", env!("CARGO_PKG_VERSION"));

    let config = ServiceConfig::load_from_env_and_defaults().context("loading configuration")?;
    let candidates = candidates_from_config(&config).context("building sentiment backends")?;

    // Downloading and loading weights blocks for a while.
    let selection = tokio::task::spawn_blocking(move || select_backend(candidates))
        .await
        .context("backend selection task panicked")?;

    match selection.model_name() {
        Some(name) => tracing::info!("Sentiment model: {}", name),
        None => tracing::warn!("No sentiment model loaded; sentiment endpoints will return errors"),
    }
    tracing::info!("Category model: {}", CATEGORY_MODEL_NAME);

    let classifier = Arc::new(ReliefClassifier::new(selection, config.max_text_chars));
    let app = server::router(classifier);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Signal received, shutting down");
        })
        .await
        .context("HTTP server error")?;

    Ok(())
}
