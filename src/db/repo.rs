//! License record store
//!
//! All mutations are single-transaction: one transaction for a whole upsert
//! batch, one implicit transaction per classification update. The manual
//! override guard lives in the SQL of `apply_automated`, so it holds no
//! matter how many cycles re-run.

use sqlx::SqlitePool;
use thiserror::Error;

use crate::db::models::{truncate_explanation, DecidedBy, LicenseRecord, Typology};

/// Record store errors
#[derive(Debug, Error)]
pub enum RepoError {
    /// No record with the requested license id
    #[error("License not found: {0}")]
    NotFound(i64),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Insert new records, refresh descriptions of existing ones
///
/// Classification fields of existing records are never touched here, so
/// re-ingesting the same input is idempotent. Commits the whole batch as one
/// transaction; an empty batch commits trivially.
pub async fn upsert_many(pool: &SqlitePool, records: &[LicenseRecord]) -> Result<(), RepoError> {
    let mut tx = pool.begin().await?;

    for record in records {
        sqlx::query(
            r#"
            INSERT INTO licenses (license_id, license_description)
            VALUES (?, ?)
            ON CONFLICT(license_id)
            DO UPDATE SET license_description = excluded.license_description
            "#,
        )
        .bind(record.license_id)
        .bind(&record.license_description)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(())
}

/// All records, ascending by license id
pub async fn list_all(pool: &SqlitePool) -> Result<Vec<LicenseRecord>, RepoError> {
    let records = sqlx::query_as::<_, LicenseRecord>(
        r#"
        SELECT license_id, license_description, typology, explanation, decided_by
        FROM licenses
        ORDER BY license_id ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(records)
}

/// Point lookup; absence is not an error
pub async fn get(pool: &SqlitePool, license_id: i64) -> Result<Option<LicenseRecord>, RepoError> {
    let record = sqlx::query_as::<_, LicenseRecord>(
        r#"
        SELECT license_id, license_description, typology, explanation, decided_by
        FROM licenses
        WHERE license_id = ?
        "#,
    )
    .bind(license_id)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}

/// Human override: set classification unconditionally, mark as manual
///
/// Fails with `NotFound` when the id does not exist. Returns the updated record.
pub async fn apply_manual(
    pool: &SqlitePool,
    license_id: i64,
    typology: Typology,
    explanation: &str,
) -> Result<LicenseRecord, RepoError> {
    let result = sqlx::query(
        r#"
        UPDATE licenses
        SET typology = ?, explanation = ?, decided_by = ?
        WHERE license_id = ?
        "#,
    )
    .bind(typology.as_str())
    .bind(truncate_explanation(explanation))
    .bind(DecidedBy::Manual.as_str())
    .bind(license_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound(license_id));
    }

    get(pool, license_id)
        .await?
        .ok_or(RepoError::NotFound(license_id))
}

/// Automated classification result: set fields unless a human got there first
///
/// No-op when the id does not exist, and no-op when `decided_by = manual`.
/// Both guards are in the WHERE clause, so this is one statement.
pub async fn apply_automated(
    pool: &SqlitePool,
    license_id: i64,
    typology: Typology,
    explanation: &str,
) -> Result<(), RepoError> {
    sqlx::query(
        r#"
        UPDATE licenses
        SET typology = ?, explanation = ?, decided_by = ?
        WHERE license_id = ?
          AND (decided_by IS NULL OR decided_by <> ?)
        "#,
    )
    .bind(typology.as_str())
    .bind(truncate_explanation(explanation))
    .bind(DecidedBy::Automated.as_str())
    .bind(license_id)
    .bind(DecidedBy::Manual.as_str())
    .execute(pool)
    .await?;

    Ok(())
}
