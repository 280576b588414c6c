use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A submitted field value; numbers are accepted as well as text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

impl FieldValue {
    pub fn into_text(self) -> String {
        match self {
            FieldValue::Text(text) => text,
            FieldValue::Number(n) => n.to_string(),
        }
    }
}

/// Request to predict a price, keyed by form field name
///
/// ```json
/// { "CRIM": "0.1", "CHAS": "No", "RM": 6.0 }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredictRequest {
    pub fields: HashMap<String, FieldValue>,
}

impl PredictRequest {
    /// Raw string values as a form submission would carry them
    pub fn into_raw(self) -> HashMap<String, String> {
        self.fields
            .into_iter()
            .map(|(name, value)| (name, value.into_text()))
            .collect()
    }
}
