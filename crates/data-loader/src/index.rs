//! DistrictDataset building logic.
//!
//! Turns parsed rows into the lookup table the engine queries:
//! - rows are stored in file order
//! - the lowercase name index points at the first row for each district
//! - duplicate names are kept but reported

use crate::error::{DataLoadError, Result};
use crate::parser::{self, ParsedDistricts};
use crate::types::*;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{info, warn};

impl DistrictDataset {
    /// Load the district table from a CSV file
    ///
    /// This is the main entry point for loading data.
    pub fn load_from_csv(path: &Path) -> Result<Self> {
        info!("Loading district dataset from {:?}", path);

        let file = File::open(path).map_err(|_| DataLoadError::FileNotFound {
            path: path.display().to_string(),
        })?;
        let source = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let dataset = Self::load_from_reader(BufReader::new(file), &source)?;
        info!(
            "Loaded {} district rows ({} unique) from {}",
            dataset.len(),
            dataset.name_index.len(),
            source
        );
        Ok(dataset)
    }

    /// Load the district table from any CSV reader
    pub fn load_from_reader<R: Read>(reader: R, source: &str) -> Result<Self> {
        let parsed = parser::parse_districts(reader, source)?;
        Ok(Self::from_parsed(parsed))
    }

    /// Index already-parsed rows
    pub fn from_parsed(parsed: ParsedDistricts) -> Self {
        let ParsedDistricts {
            records,
            missing_columns,
        } = parsed;

        let mut dataset = DistrictDataset::with_missing_columns(missing_columns);
        dataset.records.reserve(records.len());

        for record in records {
            let name = record.district.clone();
            if !dataset.insert_record(record) {
                warn!(
                    "Duplicate district '{}' in dataset; lookups use the first row",
                    name
                );
            }
        }
        dataset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_duplicate_names_resolve_to_first_row() {
        let csv = "District,N,P,K,pH,temperature,rainfall\nPune,1,2,3,4,5,6\nPUNE,9,9,9,9,9,9\n";
        let dataset = DistrictDataset::load_from_reader(csv.as_bytes(), "dup.csv").unwrap();

        assert_eq!(dataset.len(), 2);
        let found = dataset.find("pune").unwrap();
        assert_eq!(found.district, "Pune");
        assert_eq!(found.n, Some(1.0));
    }

    #[test]
    fn test_load_from_csv_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "District,N,P,K,pH,temperature,rainfall,humidity").unwrap();
        writeln!(file, "Solapur,40,30,20,7.8,28.1,545.0,60.0").unwrap();

        let dataset = DistrictDataset::load_from_csv(file.path()).unwrap();
        assert_eq!(dataset.len(), 1);
        assert!(dataset.find("SOLAPUR").is_some());
    }

    #[test]
    fn test_load_missing_file() {
        let err = DistrictDataset::load_from_csv(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound { .. }));
    }

    #[test]
    fn test_schema_report_survives_indexing() {
        let csv = "District,N,P,K,temperature,rainfall\nPune,1,2,3,5,6\n";
        let dataset = DistrictDataset::load_from_reader(csv.as_bytes(), "x.csv").unwrap();
        assert_eq!(dataset.missing_columns(), &["pH"]);
        assert!(!dataset.has_column("pH"));
        assert!(dataset.has_column("humidity"));
    }
}
