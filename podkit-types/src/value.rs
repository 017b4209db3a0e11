//! Loose interpretation of argument values.
//!
//! Argument bags hold arbitrary JSON. Filtering and identifier derivation need
//! one consistent string form and one notion of "empty", which these helpers
//! provide.

use serde_json::Value;

/// Stringifies an argument value.
///
/// Missing and null values become `""`, booleans become `"1"`/`""`, numbers use
/// their decimal form and arrays/objects are rendered as compact JSON.
pub fn arg_to_string(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::Bool(true)) => "1".to_string(),
        Some(Value::Bool(false)) => String::new(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other @ (Value::Array(_) | Value::Object(_))) => other.to_string(),
    }
}

/// Whether a value counts as empty for a reserved argument: null, integer
/// zero, `""` or `"0"`. A float `0.0` is not empty.
pub fn is_empty_like(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Number(n) => n.as_i64() == Some(0) || n.as_u64() == Some(0),
        Value::String(s) => s.is_empty() || s == "0",
        _ => false,
    }
}

/// Boolean interpretation of an optional value.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(other) => !is_empty_like(other),
    }
}

/// Coerces a value to a non-negative integer, taking the absolute value of
/// negative numbers. Unparseable values become `0`.
pub fn to_positive_int(value: &Value) -> u64 {
    match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                u
            } else if let Some(i) = n.as_i64() {
                i.unsigned_abs()
            } else {
                n.as_f64().map(|f| f.abs().trunc() as u64).unwrap_or(0)
            }
        }
        Value::String(s) => leading_int(s.trim()),
        Value::Bool(true) => 1,
        _ => 0,
    }
}

// Integer prefix of a string, sign dropped ("-12abc" -> 12).
fn leading_int(s: &str) -> u64 {
    let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn leading_int_parses_prefix() {
        assert_eq!(leading_int("42"), 42);
        assert_eq!(leading_int("-7"), 7);
        assert_eq!(leading_int("12abc"), 12);
        assert_eq!(leading_int("abc"), 0);
        assert_eq!(leading_int(""), 0);
    }

    #[test]
    fn float_truncates() {
        assert_eq!(to_positive_int(&json!(-3.9)), 3);
    }
}
