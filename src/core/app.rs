use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::encoder::FieldSpec;
use crate::core::formatter::FormatRule;
use crate::core::{car, house};

/// The prediction apps served by this process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppKind {
    House,
    Car,
}

impl AppKind {
    pub const ALL: [AppKind; 2] = [AppKind::House, AppKind::Car];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppKind::House => "house",
            AppKind::Car => "car",
        }
    }

    pub fn spec(&self) -> &'static AppSpec {
        match self {
            AppKind::House => &house::SPEC,
            AppKind::Car => &car::SPEC,
        }
    }
}

impl fmt::Display for AppKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownApp(pub String);

impl fmt::Display for UnknownApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown app: {}", self.0)
    }
}

impl std::error::Error for UnknownApp {}

impl FromStr for AppKind {
    type Err = UnknownApp;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "house" => Ok(AppKind::House),
            "car" => Ok(AppKind::Car),
            _ => Err(UnknownApp(s.to_string())),
        }
    }
}

/// Static description of one form app
#[derive(Debug)]
pub struct AppSpec {
    pub kind: AppKind,
    pub title: &'static str,
    pub intro: &'static str,
    pub submit_label: &'static str,
    /// Ordered to match the trained model's columns
    pub fields: &'static [FieldSpec],
    pub feature_count: usize,
    pub format: FormatRule,
    pub invalid_input_message: &'static str,
    pub footer: Option<&'static str>,
    pub default_model_path: &'static str,
}

impl AppSpec {
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_app_kind() {
        assert_eq!("house".parse::<AppKind>(), Ok(AppKind::House));
        assert_eq!("Car".parse::<AppKind>(), Ok(AppKind::Car));
        assert!("boat".parse::<AppKind>().is_err());
    }

    #[test]
    fn test_specs_match_kind() {
        for kind in AppKind::ALL {
            assert_eq!(kind.spec().kind, kind);
            assert_eq!(kind.as_str().parse::<AppKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_feature_counts() {
        assert_eq!(AppKind::House.spec().feature_count, 13);
        assert_eq!(AppKind::Car.spec().feature_count, 8);
    }

    #[test]
    fn test_field_lookup() {
        let spec = AppKind::House.spec();
        assert_eq!(spec.field("LSTAT").map(|f| f.default_value()), Some("12.0"));
        assert!(spec.field("lstat").is_none());
    }
}
