//! Crop recommendation engine.
//!
//! This crate provides:
//! - `recommend_top_crops_by_district`, the lookup-and-rank core
//! - `top_n_indices`, the probability ranking it relies on
//! - `RecommendationContext`, the immutable startup state shared by servers
//!
//! ## Flow
//! 1. Resolve the district row (case-insensitive)
//! 2. Build the 7-value feature vector
//! 3. Score it with the classifier
//! 4. Rank the classes and decode their names
//!
//! ## Example Usage
//! ```ignore
//! use engine::{ArtifactPaths, RecommendationContext, DEFAULT_TOP_N};
//!
//! let context = RecommendationContext::load(&ArtifactPaths::default())?;
//! for crop in context.recommend("Pune", DEFAULT_TOP_N)? {
//!     println!("{}: {:.2}", crop.crop, crop.probability);
//! }
//! ```

pub mod error;
pub mod ranking;
pub mod recommend;
pub mod context;

// Re-export main types
pub use error::{LoadError, RecommendError, Result};
pub use ranking::top_n_indices;
pub use recommend::{recommend_top_crops_by_district, CropPrediction, RankedPrediction, DEFAULT_TOP_N};
pub use context::{
    ArtifactPaths, RecommendationContext, DEFAULT_DATA_PATH, DEFAULT_LABELS_PATH,
    DEFAULT_MODEL_PATH,
};
