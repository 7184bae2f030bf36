//! Error types for the recommendation engine.

use classifier::ModelError;
use data_loader::DataLoadError;
use thiserror::Error;

/// Why a single recommendation could not be produced.
///
/// The first two variants are caused by the caller's input or the reference
/// data and are safe to show to clients. `Model` means the classifier or
/// decoder misbehaved.
#[derive(Error, Debug)]
pub enum RecommendError {
    /// No row matches the district name; carries the name as given
    #[error("Sorry, no data available for the district: {0}")]
    DistrictNotFound(String),

    /// The dataset lacks one or more feature columns
    #[error("Error: Required columns are missing in the district dataset.")]
    SchemaMismatch,

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl RecommendError {
    /// Whether the failure should be reported as a client error
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            RecommendError::DistrictNotFound(_) | RecommendError::SchemaMismatch
        )
    }
}

/// Errors raised while assembling a `RecommendationContext` at startup
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to load district dataset: {0}")]
    Data(#[from] DataLoadError),

    #[error("Failed to load model artifact: {0}")]
    Model(#[from] ModelError),

    #[error("Classifier predicts {classifier} classes but the label decoder knows {decoder}")]
    ClassCountMismatch { classifier: usize, decoder: usize },
}

pub type Result<T> = std::result::Result<T, RecommendError>;
