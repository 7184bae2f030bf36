//! Label decoder backed by the list of class names seen at training time.
//!
//! Artifact format: `{"classes": ["apple", "banana", ...]}`, where position
//! `i` is the name of classifier class `i`.

use crate::error::{ModelError, Result};
use crate::traits::LabelDecoder;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn new(classes: Vec<String>) -> Self {
        Self { classes }
    }

    /// Load class names from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading label encoder from {:?}", path);
        let raw = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let encoder: LabelEncoder = serde_json::from_str(raw)?;
        if encoder.classes.is_empty() {
            return Err(ModelError::InvalidArtifact(
                "label encoder has no classes".to_string(),
            ));
        }
        Ok(encoder)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }
}

impl LabelDecoder for LabelEncoder {
    fn n_classes(&self) -> usize {
        self.classes.len()
    }

    fn decode(&self, index: usize) -> Result<&str> {
        self.classes
            .get(index)
            .map(String::as_str)
            .ok_or(ModelError::UnknownClassIndex {
                index,
                n_classes: self.classes.len(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode() {
        let encoder = LabelEncoder::from_json_str(r#"{"classes": ["maize", "rice", "wheat"]}"#).unwrap();
        assert_eq!(encoder.n_classes(), 3);
        assert_eq!(encoder.decode(0).unwrap(), "maize");
        assert_eq!(encoder.decode(2).unwrap(), "wheat");
    }

    #[test]
    fn test_decode_out_of_range() {
        let encoder = LabelEncoder::new(vec!["rice".to_string()]);
        let err = encoder.decode(1).unwrap_err();
        assert!(matches!(err, ModelError::UnknownClassIndex { index: 1, n_classes: 1 }));
    }

    #[test]
    fn test_rejects_empty_classes() {
        let err = LabelEncoder::from_json_str(r#"{"classes": []}"#).unwrap_err();
        assert!(matches!(err, ModelError::InvalidArtifact(_)));
    }
}
