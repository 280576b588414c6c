use serde::Serialize;

/// Message shown when the model itself fails to evaluate a request
pub const MODEL_FAILURE_MESSAGE: &str = "Prediction failed: the model could not evaluate these inputs.";

/// Display rule for one app's predicted price
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormatRule {
    /// Applied to the raw model output before display
    pub multiplier: f64,
    pub prefix: &'static str,
    pub suffix: &'static str,
    pub decimals: usize,
    pub group_thousands: bool,
    /// Text placed before the formatted value in the success message
    pub headline: &'static str,
}

/// A model output ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattedPrice {
    pub raw: f64,
    pub value: f64,
    pub display: String,
    pub message: String,
}

/// Scale and render a raw prediction according to `rule`
pub fn format_prediction(rule: &FormatRule, raw: f64) -> FormattedPrice {
    let value = raw * rule.multiplier;
    let display = format_amount(rule, value);
    let message = format!("{}{}", rule.headline, display);

    FormattedPrice {
        raw,
        value,
        display,
        message,
    }
}

/// Render an amount with the rule's currency affixes, e.g. `$-1,250.00`
///
/// The sign stays with the digits, after the currency prefix.
pub fn format_amount(rule: &FormatRule, value: f64) -> String {
    let digits = format!("{:.*}", rule.decimals, value.abs());
    let digits = if rule.group_thousands {
        group_thousands(&digits)
    } else {
        digits
    };
    let sign = if value.is_sign_negative() { "-" } else { "" };

    format!("{}{}{}{}", rule.prefix, sign, digits, rule.suffix)
}

/// Insert `,` between groups of three integer digits
fn group_thousands(digits: &str) -> String {
    let (int_part, frac_part) = match digits.find('.') {
        Some(idx) => digits.split_at(idx),
        None => (digits, ""),
    };

    let mut grouped = String::with_capacity(digits.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped.push_str(frac_part);
    grouped
}
