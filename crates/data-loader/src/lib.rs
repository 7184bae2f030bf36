//! # Data Loader Crate
//!
//! This crate loads the district soil/weather reference table that feeds the
//! crop classifier.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (FeatureVector, DistrictRecord, DistrictDataset)
//! - **parser**: Parse the combined CSV into records
//! - **index**: Build the case-insensitive district index
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::DistrictDataset;
//! use std::path::Path;
//!
//! let dataset = DistrictDataset::load_from_csv(Path::new("data/combined_soil_weather_data.csv"))?;
//!
//! let pune = dataset.find("pune").unwrap();
//! let features = pune.feature_vector();
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use types::{
    // Column contract
    FEATURE_COUNT,
    FEATURE_COLUMNS,
    DISTRICT_COLUMN,
    HUMIDITY_COLUMN,
    DEFAULT_HUMIDITY,
    // Core types
    FeatureVector,
    DistrictRecord,
    DistrictDataset,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, base: f64) -> DistrictRecord {
        DistrictRecord::new(
            name,
            FeatureVector::new([base, base + 1.0, base + 2.0, 6.5, 25.0, 100.0, 80.0]),
        )
    }

    #[test]
    fn test_dataset_creation() {
        let dataset = DistrictDataset::new();
        assert_eq!(dataset.len(), 0);
        assert!(dataset.is_empty());
        assert!(dataset.missing_columns().is_empty());
    }

    #[test]
    fn test_insert_and_find_case_insensitive() {
        let mut dataset = DistrictDataset::new();
        assert!(dataset.insert_record(record("Mumbai", 10.0)));

        for query in ["Mumbai", "mumbai", "MUMBAI", "mUmBaI"] {
            let found = dataset.find(query).unwrap();
            assert_eq!(found.district, "Mumbai");
        }
    }

    #[test]
    fn test_insert_duplicate_keeps_first() {
        let mut dataset = DistrictDataset::new();
        assert!(dataset.insert_record(record("Pune", 1.0)));
        assert!(!dataset.insert_record(record("pune", 2.0)));

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.find("PUNE").unwrap().n, Some(1.0));
    }

    #[test]
    fn test_empty_queries() {
        let dataset = DistrictDataset::new();
        assert!(dataset.find("Atlantis").is_none());
        assert!(dataset.find("").is_none());
    }

    #[test]
    fn test_feature_vector_order() {
        let r = record("Nagpur", 1.0);
        let fv = r.feature_vector().unwrap();
        assert_eq!(fv.as_slice(), &[1.0, 2.0, 3.0, 6.5, 25.0, 100.0, 80.0]);
        assert_eq!(fv.get(3), Some(6.5));
        assert_eq!(fv.get(FEATURE_COUNT), None);
    }

    #[test]
    fn test_districts_in_source_order() {
        let mut dataset = DistrictDataset::new();
        dataset.insert_record(record("B", 1.0));
        dataset.insert_record(record("A", 1.0));
        let names: Vec<_> = dataset.districts().collect();
        assert_eq!(names, vec!["B", "A"]);
    }
}
