//! Boston house price form
//!
//! Field order matches the column order the house model was trained on.

use crate::core::app::{AppKind, AppSpec};
use crate::core::encoder::{choices_consistent, vector_width, Choice, FieldSpec};
use crate::core::formatter::FormatRule;

pub const FEATURE_COUNT: usize = 13;

const CHAS_OPTIONS: &[Choice] = &[
    Choice { label: "No", indicators: &[0.0] },
    Choice { label: "Yes", indicators: &[1.0] },
];

pub const FIELDS: &[FieldSpec] = &[
    FieldSpec::text("CRIM", "Crime Rate (CRIM)", "0.1"),
    FieldSpec::text("ZN", "Residential Land Zoned (ZN)", "0.0"),
    FieldSpec::text("INDUS", "Non-Retail Business Acres (INDUS)", "7.0"),
    FieldSpec::choice("CHAS", "Charles River Bounds (CHAS)", CHAS_OPTIONS),
    FieldSpec::text("NOX", "Nitric Oxide Concentration (NOX)", "0.5"),
    FieldSpec::text("RM", "Average Number of Rooms (RM)", "6.0"),
    FieldSpec::text("AGE", "Proportion of Older Buildings (AGE)", "60"),
    FieldSpec::text("DIS", "Distance to Employment Centers (DIS)", "4.0"),
    FieldSpec::text("RAD", "Accessibility to Highways (RAD)", "1"),
    FieldSpec::text("TAX", "Property Tax Rate (TAX)", "300"),
    FieldSpec::text("PTRATIO", "Pupil-Teacher Ratio (PTRATIO)", "18.0"),
    FieldSpec::text("B", "Proportion of Black Population (B)", "390.0"),
    FieldSpec::text("LSTAT", "Lower Status Population (%) (LSTAT)", "12.0"),
];

const _: () = assert!(vector_width(FIELDS) == FEATURE_COUNT);
const _: () = assert!(choices_consistent(FIELDS));

/// Model output is in $1000s
pub const FORMAT: FormatRule = FormatRule {
    multiplier: 1000.0,
    prefix: "$",
    suffix: "",
    decimals: 2,
    group_thousands: true,
    headline: "🏡 Estimated House Price: ",
};

pub static SPEC: AppSpec = AppSpec {
    kind: AppKind::House,
    title: "🏠 Boston House Price Predictor",
    intro: "Fill in the house features below to estimate its price (in $1000s):",
    submit_label: "Predict House Price",
    fields: FIELDS,
    feature_count: FEATURE_COUNT,
    format: FORMAT,
    invalid_input_message: "❌ Please enter valid numeric values for all fields.",
    footer: None,
    default_model_path: "models/house_model.json",
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::encoder::{encode, EncodeError};
    use std::collections::HashMap;

    fn defaults() -> HashMap<String, String> {
        FIELDS
            .iter()
            .map(|f| (f.name.to_string(), f.default_value().to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_encode_to_reference_vector() {
        let vector = encode(FIELDS, &defaults()).unwrap();
        assert_eq!(
            vector,
            vec![0.1, 0.0, 7.0, 0.0, 0.5, 6.0, 60.0, 4.0, 1.0, 300.0, 18.0, 390.0, 12.0]
        );
    }

    #[test]
    fn test_chas_yes_sets_indicator() {
        let mut raw = defaults();
        raw.insert("CHAS".to_string(), "Yes".to_string());
        let vector = encode(FIELDS, &raw).unwrap();
        assert_eq!(vector[3], 1.0);
    }

    #[test]
    fn test_every_numeric_field_rejects_letters() {
        for field in FIELDS.iter().filter(|f| f.name != "CHAS") {
            let mut raw = defaults();
            raw.insert(field.name.to_string(), "abc".to_string());
            let err = encode(FIELDS, &raw).unwrap_err();
            assert!(matches!(err, EncodeError::InvalidNumber { .. }));
            assert_eq!(err.field(), field.name);
        }
    }

    #[test]
    fn test_out_of_range_values_pass_through() {
        let mut raw = defaults();
        raw.insert("CRIM".to_string(), "-5".to_string());
        raw.insert("RM".to_string(), "0".to_string());
        let vector = encode(FIELDS, &raw).unwrap();
        assert_eq!(vector[0], -5.0);
        assert_eq!(vector[5], 0.0);
    }
}
