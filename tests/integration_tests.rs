// Integration tests for the shipped model artifacts

use price_predictor::core::{encode, AppKind};
use price_predictor::services::{ModelError, PredictionError, Predictor, Regressor, LinearModel};
use std::collections::HashMap;
use std::sync::Arc;

fn raw(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

fn house_example() -> HashMap<String, String> {
    raw(&[
        ("CRIM", "0.1"),
        ("ZN", "0.0"),
        ("INDUS", "7.0"),
        ("CHAS", "No"),
        ("NOX", "0.5"),
        ("RM", "6.0"),
        ("AGE", "60"),
        ("DIS", "4.0"),
        ("RAD", "1"),
        ("TAX", "300"),
        ("PTRATIO", "18.0"),
        ("B", "390.0"),
        ("LSTAT", "12.0"),
    ])
}

fn car_example() -> HashMap<String, String> {
    raw(&[
        ("present_price", "5.0"),
        ("kms_driven", "20000"),
        ("owner", "0"),
        ("car_age", "5"),
        ("fuel_type", "Diesel"),
        ("seller_type", "Individual"),
        ("transmission", "Manual"),
    ])
}

#[test]
fn test_house_end_to_end() {
    let predictor = Predictor::load(AppKind::House, "models/house_model.json").unwrap();
    let prediction = predictor.run(&house_example()).unwrap();

    assert_eq!(
        prediction.features,
        vec![0.1, 0.0, 7.0, 0.0, 0.5, 6.0, 60.0, 4.0, 1.0, 300.0, 18.0, 390.0, 12.0]
    );
    assert!((prediction.price.value - prediction.price.raw * 1000.0).abs() < 1e-9);
    assert_eq!(prediction.price.display, "$21,498.44");
    assert!(prediction.price.message.starts_with("🏡 Estimated House Price: $"));
}

#[test]
fn test_car_end_to_end() {
    let predictor = Predictor::load(AppKind::Car, "models/car_model.json").unwrap();
    let prediction = predictor.run(&car_example()).unwrap();

    assert_eq!(prediction.features, vec![5.0, 20000.0, 0.0, 5.0, 1.0, 0.0, 1.0, 1.0]);
    assert_eq!(prediction.price.value, prediction.price.raw);
    assert_eq!(prediction.price.display, "₹ 3.57 Lakhs");
    assert_eq!(prediction.price.message, "Estimated Selling Price: ₹ 3.57 Lakhs");
}

#[test]
fn test_vector_lengths_for_all_apps() {
    let house = encode(AppKind::House.spec().fields, &house_example()).unwrap();
    let car = encode(AppKind::Car.spec().fields, &car_example()).unwrap();
    assert_eq!(house.len(), 13);
    assert_eq!(car.len(), 8);
}

#[test]
fn test_house_invalid_input() {
    let predictor = Predictor::load(AppKind::House, "models/house_model.json").unwrap();
    let mut values = house_example();
    values.insert("RM".to_string(), "".to_string());

    let err = predictor.run(&values).unwrap_err();
    assert!(matches!(err, PredictionError::InvalidInput(_)));
    assert_eq!(
        err.user_message(AppKind::House),
        "❌ Please enter valid numeric values for all fields."
    );
}

#[test]
fn test_car_model_rejected_for_house_app() {
    let err = Predictor::load(AppKind::House, "models/car_model.json").unwrap_err();
    assert!(matches!(err, ModelError::ShapeMismatch { expected: 13, actual: 8 }));
}

#[test]
fn test_shape_mismatch_is_model_invocation_error() {
    let model = LinearModel::new(0.0, vec![1.0; 13]);
    let car_vector = encode(AppKind::Car.spec().fields, &car_example()).unwrap();
    let err = PredictionError::from(model.predict(&car_vector).unwrap_err());
    assert!(!err.is_user_error());
}

#[test]
fn test_predictor_shares_model() {
    let model: Arc<dyn Regressor> = Arc::new(LinearModel::new(1.0, vec![0.0; 8]));
    let predictor = Predictor::new(AppKind::Car, model.clone(), "memory").unwrap();
    let copy = predictor.clone();

    assert_eq!(predictor.run(&car_example()).unwrap().price.display, "₹ 1.00 Lakhs");
    assert_eq!(copy.run(&car_example()).unwrap().price.display, "₹ 1.00 Lakhs");
    assert_eq!(Arc::strong_count(&model), 3);
}
