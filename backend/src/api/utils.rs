//! API utility functions
//!
//! Shared router state, extractors that report failures as [`AppError`],
//! and helpers for reading loosely typed request bodies.

use crate::camp::CampDb;
use crate::error::AppError;
use axum::extract::{FromRequest, FromRequestParts};
use serde_json::{Map, Value};
use std::sync::Arc;

/// State shared by every handler
pub type RouterState = Arc<CampDb>;

/// Request body as a JSON object
pub type JsonObject = Map<String, Value>;

/// `axum::Json` that rejects with a 400 `{"errors": [...]}` body
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// `axum::extract::Path` that rejects with a 404, like an unmatched route
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct PathId<T>(pub T);

/// Read an integer the way a lenient form would
///
/// Accepts JSON integers, floats (truncated toward zero) and strings holding
/// an integer. Anything else, including booleans, is rejected.
pub fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                .map(|f| f.trunc() as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Read a string field, rejecting every other JSON type
pub fn string_value(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_int_accepts_numbers_and_numeric_strings() {
        assert_eq!(coerce_int(&json!(12)), Some(12));
        assert_eq!(coerce_int(&json!(-1)), Some(-1));
        assert_eq!(coerce_int(&json!(12.9)), Some(12));
        assert_eq!(coerce_int(&json!(-0.5)), Some(0));
        assert_eq!(coerce_int(&json!("17")), Some(17));
        assert_eq!(coerce_int(&json!(" 9 ")), Some(9));
    }

    #[test]
    fn test_coerce_int_rejects_other_values() {
        assert_eq!(coerce_int(&json!("twelve")), None);
        assert_eq!(coerce_int(&json!("12.5")), None);
        assert_eq!(coerce_int(&json!(true)), None);
        assert_eq!(coerce_int(&json!(null)), None);
        assert_eq!(coerce_int(&json!([12])), None);
        assert_eq!(coerce_int(&json!(1e300)), None);
    }

    #[test]
    fn test_string_value() {
        assert_eq!(string_value(&json!("Ada")), Some("Ada".to_string()));
        assert_eq!(string_value(&json!(5)), None);
        assert_eq!(string_value(&json!(null)), None);
    }
}
