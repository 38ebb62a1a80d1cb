//! Tabular input/output adapter
//!
//! Reads the two-column ingest table and writes the five-column export table.
//! Header matching ignores surrounding whitespace; extra columns are ignored.

use csv::StringRecord;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::db::models::LicenseRecord;

pub const COL_LICENSE_ID: &str = "License ID";
pub const COL_LICENSE_DESCRIPTION: &str = "License Description";
pub const COL_TYPOLOGY: &str = "Typology";
pub const COL_EXPLANATION: &str = "Explanation";
pub const COL_DECIDED_BY: &str = "Decided By";

/// Spreadsheet adapter errors
///
/// Any of these aborts ingestion before the store is touched.
#[derive(Debug, Error)]
pub enum SpreadsheetError {
    /// File-level or row-level read/write failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O failure outside the CSV layer (e.g. creating the output directory)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A required header is absent from the input file
    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),

    /// A license id cell is not integer-coercible
    #[error("Row {row}: license id {value:?} is not an integer")]
    InvalidLicenseId { row: usize, value: String },
}

/// Read the input table into unclassified records
///
/// Requires the "License ID" and "License Description" columns; everything
/// else in the file is ignored.
pub fn read_licenses(path: &Path) -> Result<Vec<LicenseRecord>, SpreadsheetError> {
    let mut reader = csv::Reader::from_path(path)?;

    let headers = reader.headers()?.clone();
    let id_column = find_column(&headers, COL_LICENSE_ID)?;
    let description_column = find_column(&headers, COL_LICENSE_DESCRIPTION)?;

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = row?;

        let id_raw = row.get(id_column).unwrap_or("").trim();
        let license_id: i64 =
            id_raw
                .parse()
                .map_err(|_| SpreadsheetError::InvalidLicenseId {
                    // +2: 1-based numbering plus the header row
                    row: index + 2,
                    value: id_raw.to_string(),
                })?;

        let license_description = row.get(description_column).unwrap_or("").trim().to_string();

        records.push(LicenseRecord {
            license_id,
            license_description,
            typology: None,
            explanation: None,
            decided_by: None,
        });
    }

    Ok(records)
}

/// Write all records to the output table, overwriting any previous export
///
/// Creates the output directory first. Column order is fixed; unclassified
/// fields serialize as empty cells.
pub fn export_licenses(
    records: &[LicenseRecord],
    output_dir: &Path,
    output_path: &Path,
) -> Result<PathBuf, SpreadsheetError> {
    std::fs::create_dir_all(output_dir)?;

    let mut writer = csv::Writer::from_path(output_path)?;
    writer.write_record([
        COL_LICENSE_ID,
        COL_LICENSE_DESCRIPTION,
        COL_TYPOLOGY,
        COL_EXPLANATION,
        COL_DECIDED_BY,
    ])?;

    for record in records {
        writer.write_record([
            record.license_id.to_string().as_str(),
            record.license_description.as_str(),
            record.typology.as_deref().unwrap_or(""),
            record.explanation.as_deref().unwrap_or(""),
            record.decided_by.as_deref().unwrap_or(""),
        ])?;
    }

    writer.flush()?;
    Ok(output_path.to_path_buf())
}

fn find_column(
    headers: &StringRecord,
    name: &'static str,
) -> Result<usize, SpreadsheetError> {
    headers
        .iter()
        .position(|header| header.trim() == name)
        .ok_or(SpreadsheetError::MissingColumn(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_input(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("licenses.csv");
        std::fs::write(&path, contents).expect("Should write fixture");
        path
    }

    #[test]
    fn test_read_two_column_input() {
        let dir = TempDir::new().unwrap();
        let path = write_input(
            &dir,
            "License ID,License Description\n1,Microsoft Office 365\n2, Slack \n",
        );

        let records = read_licenses(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].license_id, 1);
        assert_eq!(records[0].license_description, "Microsoft Office 365");
        // Cell whitespace is trimmed
        assert_eq!(records[1].license_description, "Slack");
        assert!(records[0].typology.is_none());
    }

    #[test]
    fn test_read_ignores_header_whitespace_and_extra_columns() {
        let dir = TempDir::new().unwrap();
        let path = write_input(
            &dir,
            " License ID ,Vendor, License Description \n7,Adobe,Photoshop\n",
        );

        let records = read_licenses(&path).unwrap();
        assert_eq!(records[0].license_id, 7);
        assert_eq!(records[0].license_description, "Photoshop");
    }

    #[test]
    fn test_read_missing_required_column_fails() {
        let dir = TempDir::new().unwrap();
        let path = write_input(&dir, "License ID,Name\n1,Slack\n");

        let result = read_licenses(&path);
        assert!(matches!(
            result,
            Err(SpreadsheetError::MissingColumn(COL_LICENSE_DESCRIPTION))
        ));
    }

    #[test]
    fn test_read_non_integer_id_fails() {
        let dir = TempDir::new().unwrap();
        let path = write_input(
            &dir,
            "License ID,License Description\n1,Slack\nabc,Xero\n",
        );

        let result = read_licenses(&path);
        match result {
            Err(SpreadsheetError::InvalidLicenseId { row, value }) => {
                assert_eq!(row, 3);
                assert_eq!(value, "abc");
            }
            other => panic!("Expected InvalidLicenseId, got {other:?}"),
        }
    }

    #[test]
    fn test_read_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let result = read_licenses(&dir.path().join("nope.csv"));
        assert!(matches!(result, Err(SpreadsheetError::Csv(_))));
    }

    #[test]
    fn test_export_writes_five_columns_in_order() {
        let dir = TempDir::new().unwrap();
        let output_dir = dir.path().join("out");
        let output_path = output_dir.join("output.csv");

        let records = vec![
            LicenseRecord {
                license_id: 1,
                license_description: "Microsoft Office 365".to_string(),
                typology: Some("Productivity".to_string()),
                explanation: Some("Office suite".to_string()),
                decided_by: Some("automated".to_string()),
            },
            LicenseRecord {
                license_id: 2,
                license_description: "Unclassified Tool".to_string(),
                typology: None,
                explanation: None,
                decided_by: None,
            },
        ];

        let written = export_licenses(&records, &output_dir, &output_path).unwrap();
        assert_eq!(written, output_path);

        let contents = std::fs::read_to_string(&output_path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next().unwrap(),
            "License ID,License Description,Typology,Explanation,Decided By"
        );
        assert_eq!(
            lines.next().unwrap(),
            "1,Microsoft Office 365,Productivity,Office suite,automated"
        );
        assert_eq!(lines.next().unwrap(), "2,Unclassified Tool,,,");
    }

    #[test]
    fn test_export_overwrites_previous_file() {
        let dir = TempDir::new().unwrap();
        let output_dir = dir.path().to_path_buf();
        let output_path = output_dir.join("output.csv");
        std::fs::write(&output_path, "stale contents").unwrap();

        export_licenses(&[], &output_dir, &output_path).unwrap();

        let contents = std::fs::read_to_string(&output_path).unwrap();
        assert_eq!(
            contents.trim_end(),
            "License ID,License Description,Typology,Explanation,Decided By"
        );
    }
}
