//! License listing and manual-override endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::db::models::{LicenseRecord, Typology};
use crate::db::repo;
use crate::{ApiError, ApiResult, AppState};

/// Manual override request body
#[derive(Debug, Deserialize)]
pub struct ManualUpdate {
    pub typology: String,
    pub explanation: String,
}

/// GET /licenses
///
/// All records, ascending by license id.
pub async fn list_licenses(State(state): State<AppState>) -> ApiResult<Json<Vec<LicenseRecord>>> {
    let records = repo::list_all(&state.db).await?;
    Ok(Json(records))
}

/// PATCH /licenses/:license_id
///
/// Human override: sets typology and explanation unconditionally and marks
/// the record as manually decided, shielding it from future automated cycles.
/// The typology must be one of the six allowed labels.
pub async fn update_license(
    State(state): State<AppState>,
    Path(license_id): Path<i64>,
    Json(body): Json<ManualUpdate>,
) -> ApiResult<Json<LicenseRecord>> {
    let typology = Typology::parse(body.typology.trim())
        .ok_or_else(|| ApiError::InvalidTypology(body.typology.clone()))?;

    let updated =
        repo::apply_manual(&state.db, license_id, typology, body.explanation.trim()).await?;

    tracing::info!(
        license_id,
        typology = typology.as_str(),
        "Manual override applied"
    );

    Ok(Json(updated))
}
