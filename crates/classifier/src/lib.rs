//! Crop classifier capabilities.
//!
//! This crate provides:
//! - `Classifier` and `LabelDecoder` traits the engine is written against
//! - `RandomForest`, a tree ensemble loaded from a JSON artifact
//! - `LabelEncoder`, the index-to-crop-name table that matches it
//!
//! Both artifacts are produced by the training side; nothing here trains or
//! mutates a model.

pub mod error;
pub mod traits;
pub mod forest;
pub mod labels;

pub use error::{ModelError, Result};
pub use traits::{Classifier, LabelDecoder, ProbabilityVector};
pub use forest::{DecisionTree, RandomForest, TreeNode};
pub use labels::LabelEncoder;
