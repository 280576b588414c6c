use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur loading or invoking a model artifact
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Failed to read model file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON model artifact: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid TOML model artifact: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unsupported model file extension: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid model artifact: {0}")]
    InvalidArtifact(String),

    #[error("Feature vector has {actual} values, model expects {expected}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("Model produced a non-finite output: {0}")]
    NonFiniteOutput(f64),
}

/// A loaded regression model, immutable after construction
pub trait Regressor: Send + Sync + fmt::Debug {
    /// Number of input columns the model was trained on
    fn n_features(&self) -> usize;

    /// Short name of the model family, e.g. `linear`
    fn kind(&self) -> &'static str;

    fn predict(&self, features: &[f64]) -> Result<f64, ModelError>;
}

fn check_shape(expected: usize, features: &[f64]) -> Result<(), ModelError> {
    if features.len() != expected {
        return Err(ModelError::ShapeMismatch {
            expected,
            actual: features.len(),
        });
    }
    Ok(())
}

fn check_output(value: f64) -> Result<f64, ModelError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ModelError::NonFiniteOutput(value))
    }
}

/// Ordinary least squares style model: `intercept + coefficients · x`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    #[serde(default)]
    pub feature_names: Vec<String>,
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl LinearModel {
    pub fn new(intercept: f64, coefficients: Vec<f64>) -> Self {
        Self {
            feature_names: Vec::new(),
            intercept,
            coefficients,
        }
    }

    fn validate(&self) -> Result<(), ModelError> {
        if self.coefficients.is_empty() {
            return Err(ModelError::InvalidArtifact("linear model has no coefficients".to_string()));
        }
        if !self.feature_names.is_empty() && self.feature_names.len() != self.coefficients.len() {
            return Err(ModelError::InvalidArtifact(format!(
                "{} feature names for {} coefficients",
                self.feature_names.len(),
                self.coefficients.len()
            )));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ModelError::InvalidArtifact("linear model has non-finite weights".to_string()));
        }
        Ok(())
    }
}

impl Regressor for LinearModel {
    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn kind(&self) -> &'static str {
        "linear"
    }

    fn predict(&self, features: &[f64]) -> Result<f64, ModelError> {
        check_shape(self.coefficients.len(), features)?;
        let dot: f64 = self
            .coefficients
            .iter()
            .zip(features)
            .map(|(w, x)| w * x)
            .sum();
        check_output(self.intercept + dot)
    }
}

/// A node of a flattened regression tree; node 0 is the root
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TreeNode {
    /// `features[feature] <= threshold` continues at `left`, otherwise `right`
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf { value: f64 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionTree {
    pub nodes: Vec<TreeNode>,
}

impl RegressionTree {
    // Validated trees only point forward, so a walk visits each node at most once.
    fn evaluate(&self, features: &[f64]) -> Result<f64, ModelError> {
        let mut idx = 0;
        for _ in 0..self.nodes.len() {
            match self.nodes.get(idx) {
                Some(TreeNode::Leaf { value }) => return Ok(*value),
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let x = features.get(*feature).ok_or(ModelError::ShapeMismatch {
                        expected: feature + 1,
                        actual: features.len(),
                    })?;
                    idx = if *x <= *threshold { *left } else { *right };
                }
                None => break,
            }
        }
        Err(ModelError::InvalidArtifact("tree walk did not reach a leaf".to_string()))
    }

    fn validate(&self, tree: usize, n_features: usize) -> Result<(), ModelError> {
        if self.nodes.is_empty() {
            return Err(ModelError::InvalidArtifact(format!("tree {} has no nodes", tree)));
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
                            "tree {} node {} splits on feature {} of {}",
                            tree, idx, feature, n_features
                        )));
                    }
                    if !threshold.is_finite() {
                        return Err(ModelError::InvalidArtifact(format!(
                            "tree {} node {} has a non-finite threshold",
                            tree, idx
                        )));
                    }
                    for child in [*left, *right] {
                        if child <= idx || child >= self.nodes.len() {
                            return Err(ModelError::InvalidArtifact(format!(
                                "tree {} node {} has invalid child {}",
                                tree, idx, child
                            )));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(ModelError::InvalidArtifact(format!(
                            "tree {} node {} has a non-finite leaf",
                            tree, idx
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

/// How tree outputs combine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    /// Random forest
    #[default]
    Mean,
    /// Gradient boosting
    Sum,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeEnsemble {
    pub n_features: usize,
    #[serde(default)]
    pub base_score: f64,
    #[serde(default)]
    pub aggregation: Aggregation,
    pub trees: Vec<RegressionTree>,
}

impl TreeEnsemble {
    fn validate(&self) -> Result<(), ModelError> {
        if self.n_features == 0 {
            return Err(ModelError::InvalidArtifact("ensemble declares zero features".to_string()));
        }
        if self.trees.is_empty() {
            return Err(ModelError::InvalidArtifact("ensemble has no trees".to_string()));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(i, self.n_features)?;
        }
        Ok(())
    }
}

impl Regressor for TreeEnsemble {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn kind(&self) -> &'static str {
        "tree_ensemble"
    }

    fn predict(&self, features: &[f64]) -> Result<f64, ModelError> {
        check_shape(self.n_features, features)?;
        let mut total = 0.0;
        for tree in &self.trees {
            total += tree.evaluate(features)?;
        }
        let combined = match self.aggregation {
            Aggregation::Mean => total / self.trees.len() as f64,
            Aggregation::Sum => total,
        };
        check_output(self.base_score + combined)
    }
}

/// On-disk model artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Linear(LinearModel),
    TreeEnsemble(TreeEnsemble),
}

impl ModelArtifact {
    /// Parse an artifact, choosing JSON or TOML from the file extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "json" => Ok(serde_json::from_str(&contents)?),
            "toml" => Ok(toml::from_str(&contents)?),
            _ => Err(ModelError::UnsupportedFormat(path.display().to_string())),
        }
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        match self {
            ModelArtifact::Linear(model) => model.validate(),
            ModelArtifact::TreeEnsemble(model) => model.validate(),
        }
    }

    pub fn into_regressor(self) -> Result<Arc<dyn Regressor>, ModelError> {
        self.validate()?;
        Ok(match self {
            ModelArtifact::Linear(model) => Arc::new(model),
            ModelArtifact::TreeEnsemble(model) => Arc::new(model),
        })
    }
}

/// Load and validate a model artifact from disk
pub fn load_model<P: AsRef<Path>>(path: P) -> Result<Arc<dyn Regressor>, ModelError> {
    let path = path.as_ref();
    let model = ModelArtifact::from_path(path)?.into_regressor()?;
    tracing::debug!(
        "Loaded {} model with {} features from {}",
        model.kind(),
        model.n_features(),
        path.display()
    );
    Ok(model)
}
