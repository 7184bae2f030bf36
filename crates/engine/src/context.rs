//! Process-wide recommendation state.
//!
//! The dataset, classifier and label decoder are loaded once at startup
//! into a `RecommendationContext` and never mutated afterwards. Servers
//! share it behind an `Arc`; every request only reads from it.

use crate::error::{LoadError, Result};
use crate::recommend::{recommend_top_crops_by_district, RankedPrediction};
use classifier::{Classifier, LabelDecoder, LabelEncoder, RandomForest};
use data_loader::DistrictDataset;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};

pub const DEFAULT_DATA_PATH: &str = "data/combined_soil_weather_data.csv";
pub const DEFAULT_MODEL_PATH: &str = "models/crop_prediction_model.json";
pub const DEFAULT_LABELS_PATH: &str = "models/label_encoder.json";

/// Locations of the three startup artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub data: PathBuf,
    pub model: PathBuf,
    pub labels: PathBuf,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            data: PathBuf::from(DEFAULT_DATA_PATH),
            model: PathBuf::from(DEFAULT_MODEL_PATH),
            labels: PathBuf::from(DEFAULT_LABELS_PATH),
        }
    }
}

/// Immutable state every recommendation reads from
pub struct RecommendationContext {
    dataset: DistrictDataset,
    classifier: Box<dyn Classifier>,
    decoder: Box<dyn LabelDecoder>,
}

impl RecommendationContext {
    /// Assemble a context from already loaded parts.
    ///
    /// Fails when the classifier and decoder disagree on the class count,
    /// since every decoded name would then be shifted or missing.
    pub fn new(
        dataset: DistrictDataset,
        classifier: impl Classifier + 'static,
        decoder: impl LabelDecoder + 'static,
    ) -> std::result::Result<Self, LoadError> {
        if classifier.n_classes() != decoder.n_classes() {
            return Err(LoadError::ClassCountMismatch {
                classifier: classifier.n_classes(),
                decoder: decoder.n_classes(),
            });
        }
        Ok(Self {
            dataset,
            classifier: Box::new(classifier),
            decoder: Box::new(decoder),
        })
    }

    /// Load dataset, random forest and label encoder from disk
    pub fn load(paths: &ArtifactPaths) -> std::result::Result<Self, LoadError> {
        let start = Instant::now();

        let dataset = DistrictDataset::load_from_csv(&paths.data)?;
        let classifier = RandomForest::load(&paths.model)?;
        let decoder = LabelEncoder::load(&paths.labels)?;
        let context = Self::new(dataset, classifier, decoder)?;

        info!(
            "Recommendation context ready in {:.2?}: {} districts, {} crops",
            start.elapsed(),
            context.dataset.len(),
            context.decoder.n_classes()
        );
        Ok(context)
    }

    /// Top `top_n` crops for a district
    pub fn recommend(&self, district: &str, top_n: usize) -> Result<RankedPrediction> {
        let start = Instant::now();
        let ranked = recommend_top_crops_by_district(
            district,
            &self.dataset,
            self.classifier.as_ref(),
            self.decoder.as_ref(),
            top_n,
        )?;
        debug!("Recommended for {} in {:.2?}", district, start.elapsed());
        Ok(ranked)
    }

    pub fn dataset(&self) -> &DistrictDataset {
        &self.dataset
    }

    pub fn n_classes(&self) -> usize {
        self.decoder.n_classes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecommendError;
    use std::io::Write;
    use tempfile::TempDir;

    const MODEL: &str = r#"{ "n_features": 7, "n_classes": 2, "trees": [ { "nodes": [
        { "feature": 5, "threshold": 1000.0, "left": 1, "right": 2 },
        { "value": [3.0, 1.0] },
        { "value": [1.0, 4.0] } ] } ] }"#;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    fn artifacts(dir: &TempDir, labels: &str) -> ArtifactPaths {
        ArtifactPaths {
            data: write(
                dir,
                "districts.csv",
                "District ,N,P,K,pH,temperature,rainfall\nKolhapur,60,40,40,6.4,24.0,1800.0\nLatur,30,20,25,7.6,29.0,700.0\n",
            ),
            model: write(dir, "model.json", MODEL),
            labels: write(dir, "labels.json", labels),
        }
    }

    #[test]
    fn test_load_and_recommend() {
        let dir = tempfile::tempdir().unwrap();
        let paths = artifacts(&dir, r#"{"classes": ["millet", "rice"]}"#);

        let context = RecommendationContext::load(&paths).unwrap();
        assert_eq!(context.dataset().len(), 2);
        assert_eq!(context.n_classes(), 2);

        let wet = context.recommend("kolhapur", 3).unwrap();
        assert_eq!(wet.len(), 2);
        assert_eq!(wet[0].crop, "rice");
        assert!((wet[0].probability - 0.8).abs() < 1e-9);

        let dry = context.recommend("LATUR", 1).unwrap();
        assert_eq!(dry.len(), 1);
        assert_eq!(dry[0].crop, "millet");
    }

    #[test]
    fn test_class_count_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let paths = artifacts(&dir, r#"{"classes": ["millet", "rice", "wheat"]}"#);

        let err = RecommendationContext::load(&paths).err().unwrap();
        assert!(matches!(
            err,
            LoadError::ClassCountMismatch { classifier: 2, decoder: 3 }
        ));
    }

    #[test]
    fn test_missing_dataset_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut paths = artifacts(&dir, r#"{"classes": ["millet", "rice"]}"#);
        paths.data = dir.path().join("nope.csv");

        let err = RecommendationContext::load(&paths).err().unwrap();
        assert!(matches!(err, LoadError::Data(_)));
    }

    #[test]
    fn test_unknown_district_through_context() {
        let dir = tempfile::tempdir().unwrap();
        let paths = artifacts(&dir, r#"{"classes": ["millet", "rice"]}"#);
        let context = RecommendationContext::load(&paths).unwrap();

        let err = context.recommend("Atlantis", 3).unwrap_err();
        assert!(matches!(err, RecommendError::DistrictNotFound(_)));
    }
}
