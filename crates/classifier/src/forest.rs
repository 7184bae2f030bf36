//! Random forest classifier loaded from a JSON artifact.
//!
//! The artifact mirrors how tree ensembles are usually exported: each tree is
//! a flat node array, node 0 is the root, and children always sit at higher
//! indices than their parent.
//!
//! ```json
//! { "n_features": 7, "n_classes": 3,
//!   "trees": [ { "nodes": [
//!       { "feature": 0, "threshold": 50.0, "left": 1, "right": 2 },
//!       { "value": [8.0, 2.0, 0.0] },
//!       { "value": [0.0, 1.0, 9.0] } ] } ] }
//! ```
//!
//! Class probabilities are the mean, over trees, of the reached leaf's class
//! distribution normalized to sum to one.

use crate::error::{ModelError, Result};
use crate::traits::{Classifier, ProbabilityVector};
use data_loader::{FeatureVector, FEATURE_COUNT};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// One node of a decision tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    /// Go `left` when `x[feature] <= threshold`, else `right`
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Per-class sample counts (or weights) that reached this leaf
    Leaf { value: Vec<f64> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Walk from the root to a leaf and return its normalized distribution
    fn leaf_distribution(&self, features: &[f64]) -> Vec<f64> {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
                TreeNode::Leaf { value } => {
                    let total: f64 = value.iter().sum();
                    return value.iter().map(|v| v / total).collect();
                }
            }
        }
    }

    fn validate(&self, tree_no: usize, n_features: usize, n_classes: usize) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(ModelError::InvalidArtifact(format!("tree {} has no nodes", tree_no)));
        }

        for (idx, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= n_features {
                        return Err(ModelError::InvalidArtifact(format!(
                            "tree {} node {} splits on feature {} (model has {})",
                            tree_no, idx, feature, n_features
                        )));
                    }
                    if !threshold.is_finite() {
                        return Err(ModelError::InvalidArtifact(format!(
                            "tree {} node {} has non-finite threshold",
                            tree_no, idx
                        )));
                    }
                    // Children after the parent rules out cycles
                    for child in [*left, *right] {
                        if child <= idx || child >= self.nodes.len() {
                            return Err(ModelError::InvalidArtifact(format!(
                                "tree {} node {} has invalid child {}",
                                tree_no, idx, child
                            )));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if value.len() != n_classes {
                        return Err(ModelError::InvalidArtifact(format!(
                            "tree {} leaf {} has {} classes, expected {}",
                            tree_no,
                            idx,
                            value.len(),
                            n_classes
                        )));
                    }
                    let total: f64 = value.iter().sum();
                    if value.iter().any(|v| !v.is_finite() || *v < 0.0) || total <= 0.0 {
                        return Err(ModelError::InvalidArtifact(format!(
                            "tree {} leaf {} has an invalid class distribution",
                            tree_no, idx
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Averaging ensemble of decision trees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    pub n_features: usize,
    pub n_classes: usize,
    pub trees: Vec<DecisionTree>,
}

impl RandomForest {
    /// Load and validate a forest from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading classifier from {:?}", path);
        let raw = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let forest = Self::from_json_str(&raw)?;
        info!(
            "Classifier ready: {} trees, {} classes",
            forest.trees.len(),
            forest.n_classes
        );
        Ok(forest)
    }

    /// Parse and validate a forest from JSON text
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let forest: RandomForest = serde_json::from_str(raw)?;
        forest.validate()?;
        Ok(forest)
    }

    /// Check the artifact is consistent with the 7-feature input contract
    pub fn validate(&self) -> Result<()> {
        if self.n_features != FEATURE_COUNT {
            return Err(ModelError::InvalidArtifact(format!(
                "model expects {} features, dataset provides {}",
                self.n_features, FEATURE_COUNT
            )));
        }
        if self.n_classes == 0 {
            return Err(ModelError::InvalidArtifact("model has no classes".to_string()));
        }
        if self.trees.is_empty() {
            return Err(ModelError::InvalidArtifact("model has no trees".to_string()));
        }
        for (tree_no, tree) in self.trees.iter().enumerate() {
            tree.validate(tree_no, self.n_features, self.n_classes)?;
        }
        Ok(())
    }

    fn predict_one(&self, features: &FeatureVector) -> ProbabilityVector {
        // Collect per-tree votes in tree order, then sum sequentially so the
        // result does not depend on how rayon split the work.
        let votes: Vec<Vec<f64>> = self
            .trees
            .par_iter()
            .map(|tree| tree.leaf_distribution(features.as_slice()))
            .collect();

        let mut proba = vec![0.0; self.n_classes];
        for vote in &votes {
            for (acc, v) in proba.iter_mut().zip(vote) {
                *acc += v;
            }
        }
        let n_trees = self.trees.len() as f64;
        proba.iter_mut().for_each(|p| *p /= n_trees);
        proba
    }
}

impl Classifier for RandomForest {
    fn n_classes(&self) -> usize {
        self.n_classes
    }

    fn predict_proba(&self, batch: &[FeatureVector]) -> Result<Vec<ProbabilityVector>> {
        for (row, features) in batch.iter().enumerate() {
            if let Some(feature) = features.as_slice().iter().position(|v| !v.is_finite()) {
                return Err(ModelError::InvalidInput { row, feature });
            }
        }
        Ok(batch.iter().map(|row| self.predict_one(row)).collect())
    }
}
