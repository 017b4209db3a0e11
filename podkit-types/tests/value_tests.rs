use podkit_types::{arg_to_string, is_empty_like, is_truthy, to_positive_int};
use serde_json::json;

// ── arg_to_string ────────────────────────────────────────────────

#[test]
fn missing_and_null_are_empty_strings() {
    assert_eq!(arg_to_string(None), "");
    assert_eq!(arg_to_string(Some(&json!(null))), "");
}

#[test]
fn booleans_stringify_loosely() {
    assert_eq!(arg_to_string(Some(&json!(true))), "1");
    assert_eq!(arg_to_string(Some(&json!(false))), "");
}

#[test]
fn numbers_and_strings() {
    assert_eq!(arg_to_string(Some(&json!(12))), "12");
    assert_eq!(arg_to_string(Some(&json!(-3))), "-3");
    assert_eq!(arg_to_string(Some(&json!("abc"))), "abc");
}

#[test]
fn compound_values_render_as_json() {
    assert_eq!(arg_to_string(Some(&json!(["a", 1]))), r#"["a",1]"#);
    assert_eq!(arg_to_string(Some(&json!({"k": "v"}))), r#"{"k":"v"}"#);
}

// ── is_empty_like ────────────────────────────────────────────────

#[test]
fn empty_like_values() {
    assert!(is_empty_like(&json!(null)));
    assert!(is_empty_like(&json!(0)));
    assert!(is_empty_like(&json!("0")));
    assert!(is_empty_like(&json!("")));
}

#[test]
fn non_empty_values() {
    assert!(!is_empty_like(&json!(1)));
    assert!(!is_empty_like(&json!("00")));
    assert!(!is_empty_like(&json!(false)));
    assert!(!is_empty_like(&json!([])));
}

#[test]
fn float_zero_is_not_empty_like() {
    assert!(!is_empty_like(&json!(0.0)));
    assert!(!is_empty_like(&json!(-0.0)));
    assert!(is_empty_like(&json!(0u64)));
}

// ── is_truthy ────────────────────────────────────────────────────

#[test]
fn truthiness() {
    assert!(!is_truthy(None));
    assert!(!is_truthy(Some(&json!(false))));
    assert!(!is_truthy(Some(&json!("0"))));
    assert!(!is_truthy(Some(&json!([]))));
    assert!(is_truthy(Some(&json!(true))));
    assert!(is_truthy(Some(&json!("yes"))));
    assert!(is_truthy(Some(&json!(1))));
    assert!(is_truthy(Some(&json!({"a": 1}))));
    assert!(!is_truthy(Some(&json!(0.0))));
    assert!(is_truthy(Some(&json!(0.5))));
}

// ── to_positive_int ──────────────────────────────────────────────

#[test]
fn positive_int_coercion() {
    assert_eq!(to_positive_int(&json!(5)), 5);
    assert_eq!(to_positive_int(&json!(-5)), 5);
    assert_eq!(to_positive_int(&json!("17")), 17);
    assert_eq!(to_positive_int(&json!(" 9 ")), 9);
    assert_eq!(to_positive_int(&json!("x")), 0);
    assert_eq!(to_positive_int(&json!(null)), 0);
    assert_eq!(to_positive_int(&json!([1])), 0);
}
