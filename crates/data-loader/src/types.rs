//! Core domain types for the district reference dataset.
//!
//! This module defines the fundamental data structures used throughout the system:
//! - `FeatureVector`: the fixed 7-value classifier input
//! - `DistrictRecord`: one row of the soil/weather table
//! - `DistrictDataset`: the in-memory table plus its case-insensitive name index

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Column Contract
// =============================================================================
// The classifier was trained on features in exactly this order. The order is
// a contract with the model artifact and cannot be recovered at runtime.

/// Number of features the classifier consumes
pub const FEATURE_COUNT: usize = 7;

/// Feature column names, in classifier input order
pub const FEATURE_COLUMNS: [&str; FEATURE_COUNT] =
    ["N", "P", "K", "pH", "temperature", "rainfall", "humidity"];

/// Column holding the district name
pub const DISTRICT_COLUMN: &str = "District";

/// Column that gets a dataset-wide default when the file lacks it
pub const HUMIDITY_COLUMN: &str = "humidity";

/// Humidity applied to every row when the dataset has no humidity column
pub const DEFAULT_HUMIDITY: f64 = 80.0;

// =============================================================================
// FeatureVector
// =============================================================================

/// Ordered classifier input: `[N, P, K, pH, temperature, rainfall, humidity]`
///
/// Wrapping the array in a newtype keeps callers from handing the model an
/// arbitrary slice of the wrong length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector(pub [f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    /// View the features as a slice, in classifier order
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Value of a single feature by column position
    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }
}

// =============================================================================
// DistrictRecord
// =============================================================================

/// One row of the soil/weather reference table.
///
/// Feature fields are `None` only when the whole column is absent from the
/// dataset schema; a present column always yields a value for every row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictRecord {
    pub district: String,
    pub n: Option<f64>,
    pub p: Option<f64>,
    pub k: Option<f64>,
    pub ph: Option<f64>,
    pub temperature: Option<f64>,
    pub rainfall: Option<f64>,
    pub humidity: Option<f64>,
}

impl DistrictRecord {
    /// Build a fully populated record
    pub fn new(district: impl Into<String>, features: FeatureVector) -> Self {
        let [n, p, k, ph, temperature, rainfall, humidity] = features.0;
        Self {
            district: district.into(),
            n: Some(n),
            p: Some(p),
            k: Some(k),
            ph: Some(ph),
            temperature: Some(temperature),
            rainfall: Some(rainfall),
            humidity: Some(humidity),
        }
    }

    /// Build a record from per-column values in `FEATURE_COLUMNS` order
    pub fn from_columns(district: impl Into<String>, values: [Option<f64>; FEATURE_COUNT]) -> Self {
        let [n, p, k, ph, temperature, rainfall, humidity] = values;
        Self {
            district: district.into(),
            n,
            p,
            k,
            ph,
            temperature,
            rainfall,
            humidity,
        }
    }

    /// Extract the classifier input, or `None` if any feature column is absent
    pub fn feature_vector(&self) -> Option<FeatureVector> {
        Some(FeatureVector([
            self.n?,
            self.p?,
            self.k?,
            self.ph?,
            self.temperature?,
            self.rainfall?,
            self.humidity?,
        ]))
    }
}

// =============================================================================
// DistrictDataset - The In-Memory Reference Table
// =============================================================================

/// Holds every district row in file order plus a lowercase name index.
///
/// Built once at startup and never mutated afterwards, so it can be shared
/// across request handlers behind an `Arc` without locking.
#[derive(Debug, Default)]
pub struct DistrictDataset {
    /// Rows in the order they appeared in the source
    pub(crate) records: Vec<DistrictRecord>,
    /// Lowercased district name -> position of its first row
    pub(crate) name_index: HashMap<String, usize>,
    /// Feature columns the source did not provide
    pub(crate) missing_columns: Vec<&'static str>,
}

impl DistrictDataset {
    /// Creates a new, empty dataset with a complete schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty dataset whose schema lacks the given feature columns
    pub fn with_missing_columns(missing_columns: Vec<&'static str>) -> Self {
        Self {
            missing_columns,
            ..Self::default()
        }
    }

    /// Find a district by name, ignoring letter case.
    ///
    /// When several rows share a name the first one in file order wins.
    pub fn find(&self, district: &str) -> Option<&DistrictRecord> {
        self.name_index
            .get(&district.to_lowercase())
            .and_then(|&idx| self.records.get(idx))
    }

    /// All rows, in source order
    pub fn records(&self) -> &[DistrictRecord] {
        &self.records
    }

    /// District names, in source order (duplicates included)
    pub fn districts(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.district.as_str())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Feature columns absent from the dataset schema
    pub fn missing_columns(&self) -> &[&'static str] {
        &self.missing_columns
    }

    /// Whether the schema carries the given feature column
    pub fn has_column(&self, column: &str) -> bool {
        FEATURE_COLUMNS.contains(&column) && !self.missing_columns.contains(&column)
    }

    /// Append a row and index its name.
    ///
    /// Returns `false` when the name (case-insensitively) was already
    /// present; the row is still stored but lookups keep resolving to the
    /// earlier one.
    pub fn insert_record(&mut self, record: DistrictRecord) -> bool {
        let key = record.district.to_lowercase();
        let position = self.records.len();
        self.records.push(record);

        if self.name_index.contains_key(&key) {
            return false;
        }
        self.name_index.insert(key, position);
        true
    }
}
