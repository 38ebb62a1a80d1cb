//! Batch classification endpoint

use axum::{extract::State, Json};
use serde::Serialize;

use crate::services::orchestrator::run_classification_cycle;
use crate::{ApiResult, AppState};

/// Cycle result returned to the caller
#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub count: usize,
    pub output_file: String,
}

/// POST /classify
///
/// Runs one full classification cycle: ingest, classify every record not
/// decided by a human, export. A provider failure aborts the cycle and
/// surfaces with a provider-specific error code.
pub async fn classify_all(State(state): State<AppState>) -> ApiResult<Json<ClassifyResponse>> {
    let summary = run_classification_cycle(&state.db, &state.classifier, &state.config).await?;

    Ok(Json(ClassifyResponse {
        count: summary.count,
        output_file: summary.output_file,
    }))
}
