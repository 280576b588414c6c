// Service exports
pub mod model;
pub mod predictor;

pub use model::{load_model, Aggregation, LinearModel, ModelArtifact, ModelError, RegressionTree, Regressor, TreeEnsemble, TreeNode};
pub use predictor::{Prediction, PredictionError, Predictor, Predictors};
