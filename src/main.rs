//! license-classifier - License typology classification service
//!
//! Single-tenant batch/CRUD backend: ingest license names from a tabular
//! file, classify them with a local or remote LLM backend, persist to SQLite,
//! export results, and accept human overrides over HTTP.

use anyhow::Result;
use tracing::info;

use license_classifier::config::Config;
use license_classifier::services::classifier::Classifier;
use license_classifier::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!(
        "Starting license-classifier v{}",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;
    info!("Input table: {}", config.input_csv_path.display());
    info!("Database: {}", config.sqlite_path.display());
    info!("Provider: {:?}", config.llm_provider);

    let pool = license_classifier::db::init_database(&config.sqlite_path).await?;

    let classifier = Classifier::from_config(&config)
        .map_err(|e| anyhow::anyhow!("Failed to construct classifier: {e}"))?;

    let listen_addr = config.listen_addr.clone();
    let state = AppState::new(pool, classifier, config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    info!("Listening on http://{listen_addr}");
    info!("Health check: http://{listen_addr}/health");

    axum::serve(listener, app).await?;

    Ok(())
}
