use thiserror::Error;

/// Errors raised while loading or querying model artifacts
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Failed to read model artifact {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed model artifact: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid model artifact: {0}")]
    InvalidArtifact(String),

    /// A feature value the trees cannot compare against (NaN, infinite)
    #[error("Input row {row} has a non-finite value for feature {feature}")]
    InvalidInput { row: usize, feature: usize },

    #[error("Class index {index} out of range for {n_classes} classes")]
    UnknownClassIndex { index: usize, n_classes: usize },

    #[error("Classifier returned {found} probability rows for a batch of {expected}")]
    BatchMismatch { expected: usize, found: usize },
}

pub type Result<T> = std::result::Result<T, ModelError>;
