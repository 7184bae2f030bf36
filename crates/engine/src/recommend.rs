//! District lookup and crop ranking.
//!
//! `recommend_top_crops_by_district` is a pure function over the state it
//! is given: it resolves the district row, builds the feature vector, asks
//! the classifier for probabilities and decodes the best classes.

use crate::error::{RecommendError, Result};
use crate::ranking::top_n_indices;
use classifier::{Classifier, LabelDecoder, ModelError};
use data_loader::DistrictDataset;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Number of crops returned when the caller does not ask for a count
pub const DEFAULT_TOP_N: usize = 3;

/// One ranked crop and its predicted probability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropPrediction {
    pub crop: String,
    pub probability: f64,
}

/// Crops sorted by probability, best first
pub type RankedPrediction = Vec<CropPrediction>;

/// Return the `top_n` most probable crops for a district.
///
/// # Arguments
/// * `district_name` - Compared case-insensitively against the dataset
/// * `dataset` - Reference table of district features
/// * `classifier` - Produces class probabilities for a feature vector
/// * `decoder` - Maps class indices to crop names
/// * `top_n` - How many crops to return; clamps to the class count
///
/// # Errors
/// * `DistrictNotFound` - no row matches; carries `district_name` unchanged
/// * `SchemaMismatch` - the dataset lacks a feature column
/// * `Model` - the classifier or decoder failed
pub fn recommend_top_crops_by_district(
    district_name: &str,
    dataset: &DistrictDataset,
    classifier: &dyn Classifier,
    decoder: &dyn LabelDecoder,
    top_n: usize,
) -> Result<RankedPrediction> {
    let record = dataset
        .find(district_name)
        .ok_or_else(|| RecommendError::DistrictNotFound(district_name.to_string()))?;

    let features = record
        .feature_vector()
        .ok_or(RecommendError::SchemaMismatch)?;
    debug!("Features for {}: {:?}", record.district, features.as_slice());

    let rows = classifier.predict_proba(std::slice::from_ref(&features))?;
    if rows.len() != 1 {
        return Err(ModelError::BatchMismatch {
            expected: 1,
            found: rows.len(),
        }
        .into());
    }
    let probabilities = &rows[0];

    let ranked = top_n_indices(probabilities, top_n)
        .into_iter()
        .map(|idx| -> Result<CropPrediction> {
            Ok(CropPrediction {
                crop: decoder.decode(idx)?.to_string(),
                probability: probabilities[idx],
            })
        })
        .collect::<Result<RankedPrediction>>()?;

    debug!(
        "Ranked {} of {} classes for {}",
        ranked.len(),
        probabilities.len(),
        district_name
    );
    Ok(ranked)
}
