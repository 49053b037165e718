use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which of the two initial parameters a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parameter {
    BaseThickness,
    SideLength,
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parameter::BaseThickness => f.write_str("base thickness (mm)"),
            Parameter::SideLength => f.write_str("side length (cm)"),
        }
    }
}

/// Raised before any derived value is computed. Never fatal: the simulator keeps its
/// fold count and recovers as soon as valid parameters are supplied.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ParameterError {
    #[error("{parameter} must be a finite number greater than zero, got {value}")]
    InvalidParameters { parameter: Parameter, value: f64 },
}

/// Initial sheet: thickness in millimetres, side of the starting square in centimetres.
///
/// Values are stored as supplied, including NaN for non-numeric input, and checked by
/// [`SimulationParameters::validate`] on every computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    pub base_thickness_mm: f64,
    pub initial_side_length_cm: f64,
}

impl SimulationParameters {
    pub fn new(base_thickness_mm: f64, initial_side_length_cm: f64) -> Self {
        Self {
            base_thickness_mm,
            initial_side_length_cm,
        }
    }

    /// Base thickness is checked first, matching the order the fields are presented.
    pub fn validate(&self) -> Result<(), ParameterError> {
        check(Parameter::BaseThickness, self.base_thickness_mm)?;
        check(Parameter::SideLength, self.initial_side_length_cm)?;
        Ok(())
    }
}

fn check(parameter: Parameter, value: f64) -> Result<(), ParameterError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ParameterError::InvalidParameters { parameter, value })
    }
}

/// A parameter as it arrives from a client: either a JSON number or the raw text of
/// an input field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
}

impl NumericInput {
    /// Resolves to a number; text with no leading number becomes NaN, which
    /// validation then rejects.
    pub fn value(&self) -> f64 {
        match self {
            NumericInput::Number(n) => *n,
            NumericInput::Text(s) => parse_leading_number(s).unwrap_or(f64::NAN),
        }
    }
}

/// Reads the longest leading decimal literal of `text`, the way a browser's
/// `parseFloat` reads an input field: `" 0.1mm"` is `0.1`, `"abc"` is `None`.
pub fn parse_leading_number(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        return s[..end + "Infinity".len()].parse::<f64>().ok();
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it.
    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end.min(bytes.len())..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse::<f64>().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_parameters() {
        assert!(SimulationParameters::new(0.1, 21.0).validate().is_ok());
    }

    #[test]
    fn test_zero_thickness_rejected() {
        let err = SimulationParameters::new(0.0, 21.0).validate().unwrap_err();
        assert_eq!(
            err,
            ParameterError::InvalidParameters {
                parameter: Parameter::BaseThickness,
                value: 0.0
            }
        );
    }

    #[test]
    fn test_negative_side_rejected() {
        let err = SimulationParameters::new(0.1, -5.0).validate().unwrap_err();
        assert!(matches!(
            err,
            ParameterError::InvalidParameters {
                parameter: Parameter::SideLength,
                ..
            }
        ));
    }

    #[test]
    fn test_non_numeric_and_non_finite_rejected() {
        assert!(SimulationParameters::new(f64::NAN, 21.0).validate().is_err());
        assert!(SimulationParameters::new(0.1, f64::INFINITY).validate().is_err());
    }

    #[test]
    fn test_parse_leading_number() {
        assert_eq!(parse_leading_number("0.1"), Some(0.1));
        assert_eq!(parse_leading_number("  21cm"), Some(21.0));
        assert_eq!(parse_leading_number(".5"), Some(0.5));
        assert_eq!(parse_leading_number("5."), Some(5.0));
        assert_eq!(parse_leading_number("-3"), Some(-3.0));
        assert_eq!(parse_leading_number("1e3x"), Some(1000.0));
        assert_eq!(parse_leading_number("2e"), Some(2.0));
        assert_eq!(parse_leading_number("Infinity"), Some(f64::INFINITY));
        assert_eq!(parse_leading_number("abc"), None);
        assert_eq!(parse_leading_number(""), None);
        assert_eq!(parse_leading_number("."), None);
    }

    #[test]
    fn test_numeric_input_text_becomes_nan() {
        assert!(NumericInput::Text("paper".into()).value().is_nan());
        assert_eq!(NumericInput::Text("0.08".into()).value(), 0.08);
        assert_eq!(NumericInput::Number(3.0).value(), 3.0);
    }

    #[test]
    fn test_numeric_input_deserializes_number_or_string() {
        let n: NumericInput = serde_json::from_str("0.1").unwrap();
        assert_eq!(n, NumericInput::Number(0.1));
        let s: NumericInput = serde_json::from_str("\"21\"").unwrap();
        assert_eq!(s, NumericInput::Text("21".into()));
    }
}
