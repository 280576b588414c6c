use serde::{Deserialize, Serialize};

use crate::core::{AppKind, AppSpec, FieldKind, FieldSpec, Widget};

/// Public description of one form field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSchema {
    pub name: String,
    pub label: String,
    /// `numeric` or `choice`
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub widget: Option<String>,
    pub default: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl From<&FieldSpec> for FieldSchema {
    fn from(field: &FieldSpec) -> Self {
        let default = field.default_value().to_string();
        match field.kind {
            FieldKind::Numeric {
                widget,
                min,
                max,
                step,
                ..
            } => Self {
                name: field.name.to_string(),
                label: field.label.to_string(),
                kind: "numeric".to_string(),
                widget: Some(
                    match widget {
                        Widget::Text => "text",
                        Widget::Number => "number",
                        Widget::Slider => "slider",
                    }
                    .to_string(),
                ),
                default,
                min,
                max,
                step,
                options: Vec::new(),
            },
            FieldKind::Choice { options } => Self {
                name: field.name.to_string(),
                label: field.label.to_string(),
                kind: "choice".to_string(),
                widget: None,
                default,
                min: None,
                max: None,
                step: None,
                options: options.iter().map(|c| c.label.to_string()).collect(),
            },
        }
    }
}

/// Public description of one app's form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSchema {
    pub app: AppKind,
    pub title: String,
    pub intro: String,
    #[serde(rename = "submitLabel")]
    pub submit_label: String,
    #[serde(rename = "featureCount")]
    pub feature_count: usize,
    pub fields: Vec<FieldSchema>,
}

impl From<&AppSpec> for AppSchema {
    fn from(spec: &AppSpec) -> Self {
        Self {
            app: spec.kind,
            title: spec.title.to_string(),
            intro: spec.intro.to_string(),
            submit_label: spec.submit_label.to_string(),
            feature_count: spec.feature_count,
            fields: spec.fields.iter().map(FieldSchema::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_car_schema() {
        let schema = AppSchema::from(AppKind::Car.spec());
        assert_eq!(schema.fields.len(), 7);
        assert_eq!(schema.feature_count, 8);

        let fuel = schema.fields.iter().find(|f| f.name == "fuel_type").unwrap();
        assert_eq!(fuel.kind, "choice");
        assert_eq!(fuel.options, vec!["Petrol", "Diesel", "CNG"]);

        let age = schema.fields.iter().find(|f| f.name == "car_age").unwrap();
        assert_eq!(age.widget.as_deref(), Some("slider"));
        assert_eq!(age.max, Some(30.0));
    }

    #[test]
    fn test_house_schema_serializes_without_bounds() {
        let schema = AppSchema::from(AppKind::House.spec());
        let json = serde_json::to_value(&schema).unwrap();
        assert_eq!(json["app"], "house");
        assert_eq!(json["fields"][0]["name"], "CRIM");
        assert_eq!(json["fields"][0]["default"], "0.1");
        assert!(json["fields"][0].get("min").is_none());
        assert_eq!(json["fields"][3]["options"][1], "Yes");
    }
}
