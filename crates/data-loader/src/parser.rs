//! Parser for the combined soil/weather CSV.
//!
//! Expected header (extra columns are ignored, order is free):
//! `District,N,P,K,pH,temperature,rainfall[,humidity]`
//!
//! Header names are trimmed before matching. A missing `humidity` column is
//! filled with [`DEFAULT_HUMIDITY`] for every row; any other missing feature
//! column is recorded so the engine can report a schema mismatch later.
//!
//! Blank cells and fields missing from short rows load as `NaN`. Only the
//! affected district is unusable; the rest of the table still loads.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use std::io::Read;

/// Rows and schema information pulled out of one CSV source
#[derive(Debug, Default)]
pub struct ParsedDistricts {
    pub records: Vec<DistrictRecord>,
    pub missing_columns: Vec<&'static str>,
}

/// Where each feature lives in a CSV row
enum ColumnSource {
    /// Read from this field index
    Field(usize),
    /// Column absent, use this value for every row
    Default(f64),
    /// Column absent, no default
    Missing,
}

/// Parse district rows from any reader producing CSV text.
///
/// `source` is only used in error messages (usually the file name).
pub fn parse_districts<R: Read>(reader: R, source: &str) -> Result<ParsedDistricts> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let district_idx = headers
        .iter()
        .position(|h| h == DISTRICT_COLUMN)
        .ok_or_else(|| DataLoadError::MissingColumn {
            file: source.to_string(),
            column: DISTRICT_COLUMN.to_string(),
        })?;

    let mut missing_columns = Vec::new();
    let sources: Vec<ColumnSource> = FEATURE_COLUMNS
        .iter()
        .map(|&column| match headers.iter().position(|h| h == column) {
            Some(idx) => ColumnSource::Field(idx),
            None if column == HUMIDITY_COLUMN => ColumnSource::Default(DEFAULT_HUMIDITY),
            None => {
                missing_columns.push(column);
                ColumnSource::Missing
            }
        })
        .collect();

    if !missing_columns.is_empty() {
        tracing::warn!(
            "{} lacks feature columns {:?}; recommendations will fail for every district",
            source,
            missing_columns
        );
    }

    let mut records = Vec::new();
    for (row, result) in rdr.records().enumerate() {
        // Line 1 is the header
        let line_no = row + 2;
        let row = result?;

        let district = row
            .get(district_idx)
            .ok_or_else(|| DataLoadError::ParseError {
                file: source.to_string(),
                line: line_no,
                reason: "Missing district".to_string(),
            })?;

        let mut values = [None; FEATURE_COUNT];
        for (slot, (column, column_source)) in values
            .iter_mut()
            .zip(FEATURE_COLUMNS.iter().zip(&sources))
        {
            *slot = match column_source {
                ColumnSource::Field(idx) => match row.get(*idx) {
                    Some(raw) => Some(parse_feature(raw, column, source, line_no)?),
                    None => Some(f64::NAN),
                },
                ColumnSource::Default(value) => Some(*value),
                ColumnSource::Missing => None,
            };
        }

        records.push(DistrictRecord::from_columns(district, values));
    }

    Ok(ParsedDistricts {
        records,
        missing_columns,
    })
}

fn parse_feature(raw: &str, column: &str, source: &str, line: usize) -> Result<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(f64::NAN);
    }
    raw.parse::<f64>().map_err(|e| DataLoadError::ParseError {
        file: source.to_string(),
        line,
        reason: format!("Invalid {}: {}", column, e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = "\
District,N,P,K,pH,temperature,rainfall,humidity
Pune,90,42,43,6.5,20.8,202.9,82.0
Mumbai,85,58,41,7.0,26.5,2200.0,78.5
";

    #[test]
    fn test_parse_full_schema() {
        let parsed = parse_districts(FULL.as_bytes(), "test.csv").unwrap();
        assert!(parsed.missing_columns.is_empty());
        assert_eq!(parsed.records.len(), 2);

        let pune = &parsed.records[0];
        assert_eq!(pune.district, "Pune");
        assert_eq!(
            pune.feature_vector().unwrap().as_slice(),
            &[90.0, 42.0, 43.0, 6.5, 20.8, 202.9, 82.0]
        );
    }

    #[test]
    fn test_headers_are_trimmed_and_reordered() {
        let csv = " rainfall , District ,N,P,K,pH,temperature,humidity\n100,Nashik,1,2,3,4,5,6\n";
        let parsed = parse_districts(csv.as_bytes(), "test.csv").unwrap();
        let features = parsed.records[0].feature_vector().unwrap();
        assert_eq!(features.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0, 100.0, 6.0]);
    }

    #[test]
    fn test_missing_humidity_defaults() {
        let csv = "District,N,P,K,pH,temperature,rainfall\nPune,1,2,3,4,5,6\nNagpur,1,2,3,4,5,6\n";
        let parsed = parse_districts(csv.as_bytes(), "test.csv").unwrap();
        assert!(parsed.missing_columns.is_empty());
        for record in &parsed.records {
            assert_eq!(record.humidity, Some(DEFAULT_HUMIDITY));
        }
    }

    #[test]
    fn test_missing_feature_column_is_recorded() {
        let csv = "District,N,P,pH,temperature,rainfall,humidity\nPune,1,2,4,5,6,7\n";
        let parsed = parse_districts(csv.as_bytes(), "test.csv").unwrap();
        assert_eq!(parsed.missing_columns, vec!["K"]);
        assert_eq!(parsed.records[0].k, None);
        assert!(parsed.records[0].feature_vector().is_none());
    }

    #[test]
    fn test_missing_district_column() {
        let csv = "Name,N,P,K,pH,temperature,rainfall\nPune,1,2,3,4,5,6\n";
        let err = parse_districts(csv.as_bytes(), "test.csv").unwrap_err();
        assert!(matches!(err, DataLoadError::MissingColumn { ref column, .. } if column == "District"));
    }

    #[test]
    fn test_blank_cells_load_as_nan() {
        let csv = "District,N,P,K,pH,temperature,rainfall\nPune,1,2,3,4,5,6\nNagpur,1,,3,4,5,6\nSolapur,1,2,3\n";
        let parsed = parse_districts(csv.as_bytes(), "test.csv").unwrap();
        assert_eq!(parsed.records.len(), 3);

        let pune = parsed.records[0].feature_vector().unwrap();
        assert_eq!(pune.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, DEFAULT_HUMIDITY]);

        let nagpur = &parsed.records[1];
        assert!(nagpur.p.unwrap().is_nan());
        assert_eq!(nagpur.k, Some(3.0));

        let solapur = &parsed.records[2];
        assert_eq!(solapur.k, Some(3.0));
        assert!(solapur.ph.unwrap().is_nan());
        assert!(solapur.rainfall.unwrap().is_nan());
        assert_eq!(solapur.humidity, Some(DEFAULT_HUMIDITY));
    }

    #[test]
    fn test_invalid_number_reports_line() {
        let csv = "District,N,P,K,pH,temperature,rainfall\nPune,1,2,3,4,5,6\nNagpur,x,2,3,4,5,6\n";
        let err = parse_districts(csv.as_bytes(), "test.csv").unwrap_err();
        match err {
            DataLoadError::ParseError { line, reason, .. } => {
                assert_eq!(line, 3);
                assert!(reason.contains("Invalid N"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
