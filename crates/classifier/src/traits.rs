//! Capability traits the recommendation engine depends on.
//!
//! The engine never sees a concrete model type. Anything that can turn a
//! batch of feature vectors into class probabilities, together with a
//! matching index-to-name decoder, can back a recommender.

use crate::error::Result;
use data_loader::FeatureVector;

/// Per-class probabilities, indexed by the classifier's class ordering
pub type ProbabilityVector = Vec<f64>;

/// A trained probabilistic classifier.
///
/// ## Design Note
/// - `Send + Sync` lets one instance serve concurrent requests
/// - Inference takes `&self`; implementations must not mutate on predict
pub trait Classifier: Send + Sync {
    /// Number of classes every probability vector has
    fn n_classes(&self) -> usize;

    /// Predict class probabilities for each row of `batch`.
    ///
    /// # Returns
    /// * `Ok(rows)` - One `ProbabilityVector` per input row, same order
    /// * `Err` - If the model cannot score the input
    fn predict_proba(&self, batch: &[FeatureVector]) -> Result<Vec<ProbabilityVector>>;
}

/// Maps a classifier class index back to a human-readable crop name.
pub trait LabelDecoder: Send + Sync {
    /// Number of labels the decoder knows
    fn n_classes(&self) -> usize;

    /// Name for class `index`
    fn decode(&self, index: usize) -> Result<&str>;
}
