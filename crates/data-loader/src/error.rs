//! Error types for the data-loader crate.
//!
//! Every failure that can happen while reading the district reference
//! dataset is described by [`DataLoadError`]. Lookups against an already
//! loaded dataset never fail; they return `Option`.

use thiserror::Error;

/// Errors that can occur while loading and parsing the district dataset
///
/// The `#[derive(Error)]` macro from thiserror implements
/// `std::error::Error` and `Display` from the `#[error(...)]` attributes.
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The CSV reader rejected the file (bad quoting, ragged rows, ...)
    #[error(transparent)]
    CsvError(#[from] csv::Error),

    /// A row in the data file couldn't be parsed
    ///
    /// `line` is the 1-based line number in the file, header included.
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// A column the loader cannot do without is absent from the header
    #[error("Missing required column '{column}' in {file}")]
    MissingColumn { file: String, column: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
