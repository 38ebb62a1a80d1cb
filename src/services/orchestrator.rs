//! Classification cycle orchestration
//!
//! One cycle: ingest the input table, classify every record a human has not
//! already decided, export the full store. Records are processed strictly
//! sequentially in ascending id order; a provider failure for any record
//! aborts the whole cycle.

use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::Config;
use crate::db::repo::{self, RepoError};
use crate::services::classifier::{Classifier, ClassifierError};
use crate::services::spreadsheet::{self, SpreadsheetError};

/// Cycle errors, one variant per collaborating layer
#[derive(Debug, Error)]
pub enum CycleError {
    #[error(transparent)]
    Spreadsheet(#[from] SpreadsheetError),

    #[error(transparent)]
    Repo(#[from] RepoError),

    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}

/// Outcome of a successful cycle
#[derive(Debug, Clone)]
pub struct CycleSummary {
    /// Number of records exported
    pub count: usize,
    /// Path of the written output file
    pub output_file: String,
}

/// Run one full ingest → classify → export cycle
pub async fn run_classification_cycle(
    db: &SqlitePool,
    classifier: &Classifier,
    config: &Config,
) -> Result<CycleSummary, CycleError> {
    let incoming = spreadsheet::read_licenses(&config.input_csv_path)?;
    info!(
        rows = incoming.len(),
        input = %config.input_csv_path.display(),
        "Ingested input table"
    );
    repo::upsert_many(db, &incoming).await?;

    let records = repo::list_all(db).await?;
    for record in &records {
        if record.is_manual() {
            debug!(license_id = record.license_id, "Skipping manual override");
            continue;
        }

        let result = classifier.classify(&record.license_description).await?;
        repo::apply_automated(db, record.license_id, result.typology, &result.explanation).await?;

        info!(
            license_id = record.license_id,
            typology = result.typology.as_str(),
            "Classified license"
        );
    }

    let updated = repo::list_all(db).await?;
    let output_path =
        spreadsheet::export_licenses(&updated, &config.output_dir, &config.output_csv_path)?;

    info!(
        count = updated.len(),
        output = %output_path.display(),
        "Classification cycle complete"
    );

    Ok(CycleSummary {
        count: updated.len(),
        output_file: output_path.display().to_string(),
    })
}
