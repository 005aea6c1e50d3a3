//! # Parameter Validation
//!
//! Client-side checks applied by every generated method before anything is sent.
//!
//! Parameters are checked left to right in declaration order and the first failure aborts
//! the call. Numeric parameters are coerced the way the service's reference client coerces
//! them (`parseFloat` / `parseInt` semantics), so `"42.9"` is a valid `int` (forwarded as
//! `42`) and `"3.50 EUR"` is a valid `double` (forwarded as `3.5`).
use crate::description::{ParamType, ParameterDescriptor};
use serde_json::{Number, Value};
use std::fmt;

/// What went wrong with a single parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// No argument was supplied at this position.
    Missing,
    /// An `array` parameter received something that is not a sequence.
    NotAnArray,
    /// A `double` parameter received something that does not parse as a number.
    NotAFloat,
    /// An `int` parameter received something that does not parse as an integer.
    NotAnInteger,
    /// The runtime type of the argument differs from the declared type.
    TypeMismatch,
}

/// A local validation failure. The remote service is never contacted when one occurs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub parameter: String,
    pub expected: ParamType,
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    fn new(parameter: &ParameterDescriptor, kind: ValidationErrorKind) -> Self {
        Self {
            parameter: parameter.name.clone(),
            expected: parameter.kind.clone(),
            kind,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = &self.parameter;
        match self.kind {
            ValidationErrorKind::Missing => {
                write!(f, "Missing parameter '{name}' of type '{}'", self.expected)
            }
            ValidationErrorKind::NotAnArray => write!(f, "Parameter '{name}' is not an array"),
            ValidationErrorKind::NotAFloat => write!(f, "Parameter '{name}' is not a float"),
            ValidationErrorKind::NotAnInteger => {
                write!(f, "Parameter '{name}' is not an integer")
            }
            ValidationErrorKind::TypeMismatch => {
                write!(f, "Parameter '{name}' must be {}", self.expected)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validates `args` against `parameters` and returns the coerced argument list.
///
/// Arguments beyond the declared parameters are returned untouched.
pub fn validate_arguments(
    parameters: &[ParameterDescriptor],
    mut args: Vec<Value>,
) -> Result<Vec<Value>, ValidationError> {
    for (index, parameter) in parameters.iter().enumerate() {
        let Some(arg) = args.get_mut(index) else {
            return Err(ValidationError::new(parameter, ValidationErrorKind::Missing));
        };

        match &parameter.kind {
            ParamType::Array => {
                if !arg.is_array() {
                    return Err(ValidationError::new(
                        parameter,
                        ValidationErrorKind::NotAnArray,
                    ));
                }
            }
            ParamType::Double => {
                let value = parse_float(arg).filter(|v| v.is_finite()).ok_or_else(|| {
                    ValidationError::new(parameter, ValidationErrorKind::NotAFloat)
                })?;
                *arg = Value::from(round_to_cents(value));
            }
            ParamType::Int => {
                let value = parse_int(arg).ok_or_else(|| {
                    ValidationError::new(parameter, ValidationErrorKind::NotAnInteger)
                })?;
                *arg = Value::from(value);
            }
            declared => {
                if runtime_type_name(arg) != declared.as_str() {
                    return Err(ValidationError::new(
                        parameter,
                        ValidationErrorKind::TypeMismatch,
                    ));
                }
            }
        }
    }

    Ok(args)
}

/// The `typeof` name of a value: `string`, `number`, `boolean` or `object`.
fn runtime_type_name(value: &Value) -> &'static str {
    match value {
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Null | Value::Array(_) | Value::Object(_) => "object",
    }
}

fn parse_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        other => parse_float_prefix(&to_js_string(other)),
    }
}

fn parse_int(value: &Value) -> Option<i64> {
    parse_int_prefix(&to_js_string(value))
}

/// String conversion of a value, as used by `parseFloat` and `parseInt`.
fn to_js_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_to_js_string(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => to_js_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn number_to_js_string(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }

    let f = n.as_f64().unwrap_or(f64::NAN);
    let magnitude = f.abs();
    if f == 0.0 {
        "0".to_string()
    } else if magnitude >= 1e21 || magnitude < 1e-6 {
        format!("{f:e}")
    } else {
        f.to_string()
    }
}

/// Strips the leading characters `parseFloat` and `parseInt` skip. NEL (U+0085) is not one of
/// them, even though Rust counts it as whitespace.
fn trim_js_whitespace(s: &str) -> &str {
    s.trim_start_matches(|c: char| (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}')
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Parses the longest decimal literal at the start of `input`.
fn parse_float_prefix(input: &str) -> Option<f64> {
    let s = trim_js_whitespace(input);
    let bytes = s.as_bytes();

    let (negative, mut pos) = match bytes.first() {
        Some(b'-') => (true, 1),
        Some(b'+') => (false, 1),
        _ => (false, 0),
    };

    if s[pos..].starts_with("Infinity") {
        return Some(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_digits = count_digits(&bytes[pos..]);
    let int_part = &s[pos..pos + int_digits];
    pos += int_digits;

    let mut frac_part = "";
    if bytes.get(pos) == Some(&b'.') {
        let frac_digits = count_digits(&bytes[pos + 1..]);
        frac_part = &s[pos + 1..pos + 1 + frac_digits];
        pos += 1 + frac_digits;
    }

    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    let mut exponent = "";
    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut end = pos + 1;
        if matches!(bytes.get(end), Some(b'+' | b'-')) {
            end += 1;
        }
        let exp_digits = count_digits(&bytes[end..]);
        if exp_digits > 0 {
            exponent = &s[pos..end + exp_digits];
        }
    }

    let literal = format!(
        "{}{}.{}{}",
        if negative { "-" } else { "" },
        if int_part.is_empty() { "0" } else { int_part },
        if frac_part.is_empty() { "0" } else { frac_part },
        exponent
    );
    literal.parse().ok()
}

/// Parses the leading base-10 integer of `input`.
fn parse_int_prefix(input: &str) -> Option<i64> {
    let s = trim_js_whitespace(input);
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let len = count_digits(digits.as_bytes());
    if len == 0 {
        return None;
    }

    let magnitude: i128 = digits[..len].parse().ok()?;
    i64::try_from(if negative { -magnitude } else { magnitude }).ok()
}

/// Rounds to two decimals like `Number.prototype.toFixed(2)`.
///
/// Rounding works on the exact binary value, so `1.005` (stored as `1.00499...`) becomes
/// `1.0`. Exact ties, which only happen for multiples of `1/8`, round away from zero.
fn round_to_cents(value: f64) -> f64 {
    let scaled = value * 100.0;
    let exact_tie = (value * 8.0).fract() == 0.0 && scaled.fract().abs() == 0.5;

    if exact_tie {
        scaled.round() / 100.0
    } else {
        format!("{value:.2}").parse().unwrap_or(value)
    }
}
