//! Used car price form
//!
//! Vector order: present_price, kms_driven, owner, car_age, fuel_diesel,
//! fuel_petrol, seller_individual, trans_manual. The form shows the selectors
//! in a different order than the vector; only the table order matters here.

use crate::core::app::{AppKind, AppSpec};
use crate::core::encoder::{choices_consistent, vector_width, Choice, FieldKind, FieldSpec, Widget};
use crate::core::formatter::FormatRule;

pub const FEATURE_COUNT: usize = 8;

pub const MAX_CAR_AGE: f64 = 30.0;

const OWNER_OPTIONS: &[Choice] = &[
    Choice { label: "0", indicators: &[0.0] },
    Choice { label: "1", indicators: &[1.0] },
    Choice { label: "2", indicators: &[2.0] },
    Choice { label: "3", indicators: &[3.0] },
];

/// (diesel, petrol); CNG is the dropped baseline
const FUEL_OPTIONS: &[Choice] = &[
    Choice { label: "Petrol", indicators: &[0.0, 1.0] },
    Choice { label: "Diesel", indicators: &[1.0, 0.0] },
    Choice { label: "CNG", indicators: &[0.0, 0.0] },
];

const SELLER_OPTIONS: &[Choice] = &[
    Choice { label: "Dealer", indicators: &[0.0] },
    Choice { label: "Individual", indicators: &[1.0] },
];

const TRANSMISSION_OPTIONS: &[Choice] = &[
    Choice { label: "Manual", indicators: &[1.0] },
    Choice { label: "Automatic", indicators: &[0.0] },
];

pub const FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "present_price",
        label: "Present Price (in Lakhs)",
        kind: FieldKind::Numeric {
            default: "0.0",
            widget: Widget::Number,
            min: Some(0.0),
            max: None,
            step: Some(0.1),
        },
    },
    FieldSpec {
        name: "kms_driven",
        label: "Kilometers Driven",
        kind: FieldKind::Numeric {
            default: "0",
            widget: Widget::Number,
            min: Some(0.0),
            max: None,
            step: Some(1.0),
        },
    },
    FieldSpec::choice("owner", "Number of Previous Owners", OWNER_OPTIONS),
    FieldSpec {
        name: "car_age",
        label: "Car Age (Years)",
        kind: FieldKind::Numeric {
            default: "0",
            widget: Widget::Slider,
            min: Some(0.0),
            max: Some(MAX_CAR_AGE),
            step: Some(1.0),
        },
    },
    FieldSpec::choice("fuel_type", "Fuel Type", FUEL_OPTIONS),
    FieldSpec::choice("seller_type", "Seller Type", SELLER_OPTIONS),
    FieldSpec::choice("transmission", "Transmission Type", TRANSMISSION_OPTIONS),
];

const _: () = assert!(vector_width(FIELDS) == FEATURE_COUNT);
const _: () = assert!(choices_consistent(FIELDS));

pub const FORMAT: FormatRule = FormatRule {
    multiplier: 1.0,
    prefix: "₹ ",
    suffix: " Lakhs",
    decimals: 2,
    group_thousands: false,
    headline: "Estimated Selling Price: ",
};

pub static SPEC: AppSpec = AppSpec {
    kind: AppKind::Car,
    title: "🚗 Car Price Prediction App",
    intro: "Enter Car Details:",
    submit_label: "Predict Price",
    fields: FIELDS,
    feature_count: FEATURE_COUNT,
    format: FORMAT,
    invalid_input_message: "❌ Please enter valid values for all car details.",
    footer: Some("Thank you..!!"),
    default_model_path: "models/car_model.json",
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::encoder::{encode, EncodeError};
    use std::collections::HashMap;

    fn raw(fuel: &str, seller: &str, transmission: &str) -> HashMap<String, String> {
        [
            ("present_price", "5.0"),
            ("kms_driven", "20000"),
            ("owner", "0"),
            ("car_age", "5"),
            ("fuel_type", fuel),
            ("seller_type", seller),
            ("transmission", transmission),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn test_reference_vector() {
        let vector = encode(FIELDS, &raw("Diesel", "Individual", "Manual")).unwrap();
        assert_eq!(vector, vec![5.0, 20000.0, 0.0, 5.0, 1.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_fuel_one_hot() {
        let cases = [("Petrol", [0.0, 1.0]), ("Diesel", [1.0, 0.0]), ("CNG", [0.0, 0.0])];
        for (fuel, expected) in cases {
            let vector = encode(FIELDS, &raw(fuel, "Dealer", "Automatic")).unwrap();
            assert_eq!(&vector[4..6], &expected, "fuel {}", fuel);
            assert_eq!(vector[6], 0.0);
            assert_eq!(vector[7], 0.0);
        }
    }

    #[test]
    fn test_owner_count_passes_as_value() {
        let mut values = raw("Petrol", "Dealer", "Manual");
        values.insert("owner".to_string(), "3".to_string());
        let vector = encode(FIELDS, &values).unwrap();
        assert_eq!(vector[2], 3.0);

        values.insert("owner".to_string(), "4".to_string());
        let err = encode(FIELDS, &values).unwrap_err();
        assert!(matches!(err, EncodeError::UnknownChoice { field: "owner", .. }));
    }

    #[test]
    fn test_widget_bounds() {
        let mut values = raw("Petrol", "Dealer", "Manual");
        values.insert("car_age".to_string(), "31".to_string());
        assert!(matches!(
            encode(FIELDS, &values),
            Err(EncodeError::OutOfRange { field: "car_age", .. })
        ));

        let mut values = raw("Petrol", "Dealer", "Manual");
        values.insert("kms_driven".to_string(), "-10".to_string());
        assert!(matches!(
            encode(FIELDS, &values),
            Err(EncodeError::OutOfRange { field: "kms_driven", .. })
        ));

        let mut values = raw("Petrol", "Dealer", "Manual");
        values.insert("present_price".to_string(), "-0.1".to_string());
        assert!(matches!(
            encode(FIELDS, &values),
            Err(EncodeError::OutOfRange { field: "present_price", .. })
        ));
    }

    #[test]
    fn test_integer_fields_reject_fractions() {
        let mut values = raw("Diesel", "Dealer", "Manual");
        values.insert("kms_driven".to_string(), "1234.5".to_string());
        assert!(matches!(
            encode(FIELDS, &values),
            Err(EncodeError::NotInteger { field: "kms_driven", .. })
        ));

        let mut values = raw("Diesel", "Dealer", "Manual");
        values.insert("car_age".to_string(), "2.7".to_string());
        assert!(matches!(
            encode(FIELDS, &values),
            Err(EncodeError::NotInteger { field: "car_age", .. })
        ));

        let mut values = raw("Diesel", "Dealer", "Manual");
        values.insert("present_price".to_string(), "5.25".to_string());
        assert_eq!(encode(FIELDS, &values).unwrap()[0], 5.25);
    }

    #[test]
    fn test_selector_defaults() {
        let defaults: Vec<&str> = FIELDS.iter().map(|f| f.default_value()).collect();
        assert_eq!(defaults, vec!["0.0", "0", "0", "0", "Petrol", "Dealer", "Manual"]);
    }
}
