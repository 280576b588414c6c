use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use crate::core::{encode, format_prediction, AppKind, EncodeError, FeatureVector, FormattedPrice, MODEL_FAILURE_MESSAGE};
use crate::services::model::{load_model, ModelError, Regressor};

/// Errors a single prediction request can end in
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] EncodeError),

    #[error("Model invocation failed: {0}")]
    ModelInvocation(#[from] ModelError),
}

impl PredictionError {
    /// True when the user can fix the request by editing the form
    pub fn is_user_error(&self) -> bool {
        matches!(self, PredictionError::InvalidInput(_))
    }

    /// Fixed message shown to the user for this failure
    pub fn user_message(&self, app: AppKind) -> &'static str {
        match self {
            PredictionError::InvalidInput(_) => app.spec().invalid_input_message,
            PredictionError::ModelInvocation(_) => MODEL_FAILURE_MESSAGE,
        }
    }
}

/// Outcome of one successful encode -> predict -> format run
#[derive(Debug, Clone)]
pub struct Prediction {
    pub features: FeatureVector,
    pub price: FormattedPrice,
}

/// Binds a loaded model to the app whose form feeds it
#[derive(Debug, Clone)]
pub struct Predictor {
    app: AppKind,
    model: Arc<dyn Regressor>,
    source: String,
}

impl Predictor {
    /// Wrap a model, refusing one whose input width differs from the app's form
    pub fn new(app: AppKind, model: Arc<dyn Regressor>, source: impl Into<String>) -> Result<Self, ModelError> {
        let expected = app.spec().feature_count;
        if model.n_features() != expected {
            return Err(ModelError::ShapeMismatch {
                expected,
                actual: model.n_features(),
            });
        }

        Ok(Self {
            app,
            model,
            source: source.into(),
        })
    }

    pub fn load<P: AsRef<Path>>(app: AppKind, path: P) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let model = load_model(path)?;
        Self::new(app, model, path.display().to_string())
    }

    pub fn app(&self) -> AppKind {
        self.app
    }

    pub fn model_kind(&self) -> &'static str {
        self.model.kind()
    }

    /// Where the model was loaded from
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        self.model.predict(features)
    }

    /// Run the full pipeline for one form submission
    ///
    /// The model is not consulted when encoding fails.
    pub fn run(&self, raw: &HashMap<String, String>) -> Result<Prediction, PredictionError> {
        let spec = self.app.spec();
        let features = encode(spec.fields, raw)?;
        let value = self.predict(&features)?;
        let price = format_prediction(&spec.format, value);

        Ok(Prediction { features, price })
    }
}

/// The predictors for every app, loaded once at startup
#[derive(Debug, Clone)]
pub struct Predictors {
    pub house: Predictor,
    pub car: Predictor,
}

impl Predictors {
    pub fn get(&self, app: AppKind) -> &Predictor {
        match app {
            AppKind::House => &self.house,
            AppKind::Car => &self.car,
        }
    }
}
