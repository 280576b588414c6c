// Core form encoding and formatting exports
pub mod app;
pub mod car;
pub mod encoder;
pub mod formatter;
pub mod house;

pub use app::{AppKind, AppSpec, UnknownApp};
pub use encoder::{encode, vector_width, Choice, EncodeError, FeatureVector, FieldKind, FieldSpec, Widget};
pub use formatter::{format_amount, format_prediction, FormatRule, FormattedPrice, MODEL_FAILURE_MESSAGE};
