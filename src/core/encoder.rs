use std::collections::HashMap;
use thiserror::Error;

/// Ordered model input, one slot per trained column
pub type FeatureVector = Vec<f64>;

/// Errors raised while turning raw form values into a feature vector
///
/// Every variant is a user input problem; none of them reach the model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    #[error("field {field} is not a valid number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("field {field} value {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("field {field} has no option {value:?}")]
    UnknownChoice { field: &'static str, value: String },

    #[error("field {field} must be a whole number, got {value}")]
    NotInteger { field: &'static str, value: f64 },
}

impl EncodeError {
    /// Name of the field that failed to encode
    pub fn field(&self) -> &'static str {
        match self {
            EncodeError::InvalidNumber { field, .. }
            | EncodeError::OutOfRange { field, .. }
            | EncodeError::UnknownChoice { field, .. }
            | EncodeError::NotInteger { field, .. } => field,
        }
    }
}

/// How a numeric field is presented in the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Widget {
    Text,
    Number,
    Slider,
}

/// One selector option and the indicator values it expands to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Choice {
    pub label: &'static str,
    pub indicators: &'static [f64],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Numeric {
        default: &'static str,
        widget: Widget,
        min: Option<f64>,
        max: Option<f64>,
        step: Option<f64>,
    },
    /// The first option is the selector default
    Choice { options: &'static [Choice] },
}

/// A named form field and its position-preserving encoding
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    /// Plain text input without bounds
    pub const fn text(name: &'static str, label: &'static str, default: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Numeric {
                default,
                widget: Widget::Text,
                min: None,
                max: None,
                step: None,
            },
        }
    }

    pub const fn choice(name: &'static str, label: &'static str, options: &'static [Choice]) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Choice { options },
        }
    }

    /// Number of feature slots this field occupies
    pub const fn width(&self) -> usize {
        match self.kind {
            FieldKind::Numeric { .. } => 1,
            FieldKind::Choice { options } => {
                if options.is_empty() {
                    0
                } else {
                    options[0].indicators.len()
                }
            }
        }
    }

    /// Value shown in the form before the user edits it
    pub fn default_value(&self) -> &'static str {
        match self.kind {
            FieldKind::Numeric { default, .. } => default,
            FieldKind::Choice { options } => options.first().map(|c| c.label).unwrap_or(""),
        }
    }
}

/// Total feature vector length produced by a field table
pub const fn vector_width(fields: &[FieldSpec]) -> usize {
    let mut total = 0;
    let mut i = 0;
    while i < fields.len() {
        total += fields[i].width();
        i += 1;
    }
    total
}

/// True when every choice field is non-empty and all its options share one width
pub const fn choices_consistent(fields: &[FieldSpec]) -> bool {
    let mut i = 0;
    while i < fields.len() {
        if let FieldKind::Choice { options } = fields[i].kind {
            if options.is_empty() {
                return false;
            }
            let width = options[0].indicators.len();
            let mut j = 1;
            while j < options.len() {
                if options[j].indicators.len() != width {
                    return false;
                }
                j += 1;
            }
        }
        i += 1;
    }
    true
}

/// Encode raw form values into a feature vector in field table order
///
/// Missing numeric fields are treated as empty input. A missing choice falls
/// back to the field's first option, the same as an untouched selector.
pub fn encode(fields: &[FieldSpec], raw: &HashMap<String, String>) -> Result<FeatureVector, EncodeError> {
    let mut vector = Vec::with_capacity(vector_width(fields));

    for field in fields {
        let submitted = raw.get(field.name).map(String::as_str);

        match field.kind {
            FieldKind::Numeric { min, max, step, .. } => {
                let value = parse_numeric(field.name, submitted.unwrap_or(""))?;
                check_bounds(field.name, value, min, max)?;
                check_step(field.name, value, step)?;
                vector.push(value);
            }
            FieldKind::Choice { options } => {
                let choice = match submitted {
                    None => options.first(),
                    Some(label) => {
                        let label = label.trim();
                        options.iter().find(|c| c.label == label)
                    }
                };
                let choice = choice.ok_or_else(|| EncodeError::UnknownChoice {
                    field: field.name,
                    value: submitted.unwrap_or_default().to_string(),
                })?;
                vector.extend_from_slice(choice.indicators);
            }
        }
    }

    Ok(vector)
}

fn parse_numeric(field: &'static str, text: &str) -> Result<f64, EncodeError> {
    let parsed = strip_digit_separators(text.trim()).and_then(|digits| digits.parse::<f64>().ok());
    match parsed {
        Some(value) if value.is_finite() => Ok(value),
        _ => Err(EncodeError::InvalidNumber {
            field,
            value: text.to_string(),
        }),
    }
}

/// Drop `_` digit separators, as in `1_000`
///
/// A separator must sit between two digits; anything else is not a number.
fn strip_digit_separators(text: &str) -> Option<String> {
    if !text.contains('_') {
        return Some(text.to_string());
    }

    let bytes = text.as_bytes();
    let mut digits = String::with_capacity(text.len());
    for (i, ch) in text.char_indices() {
        if ch != '_' {
            digits.push(ch);
            continue;
        }
        let before = i.checked_sub(1).and_then(|j| bytes.get(j));
        let after = bytes.get(i + 1);
        match (before, after) {
            (Some(b), Some(a)) if b.is_ascii_digit() && a.is_ascii_digit() => {}
            _ => return None,
        }
    }
    Some(digits)
}

fn check_bounds(field: &'static str, value: f64, min: Option<f64>, max: Option<f64>) -> Result<(), EncodeError> {
    let lo = min.unwrap_or(f64::NEG_INFINITY);
    let hi = max.unwrap_or(f64::INFINITY);
    if value < lo || value > hi {
        return Err(EncodeError::OutOfRange {
            field,
            value,
            min: lo,
            max: hi,
        });
    }
    Ok(())
}

/// Whole-number steps only admit whole numbers; fractional steps are a UI hint
fn check_step(field: &'static str, value: f64, step: Option<f64>) -> Result<(), EncodeError> {
    match step {
        Some(step) if step.fract() == 0.0 && value.fract() != 0.0 => {
            Err(EncodeError::NotInteger { field, value })
        }
        _ => Ok(()),
    }
}
