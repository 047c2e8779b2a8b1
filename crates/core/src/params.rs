//! Pure helpers for extracting typed parameters from a `serde_json::Value`.
//!
//! Each helper takes a JSON object, a key, and a default. Missing keys and
//! wrong types fall back to the default; generators validate the resulting
//! values at construction instead.

use serde_json::Value;

/// Extracts an `f64` from `params[name]`, returning `default` if missing or
/// the wrong type. Accepts both floats and integers.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts a `usize` from `params[name]`, returning `default` if missing or
/// not a non-negative integer.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .map(|v| v as usize)
        .unwrap_or(default)
}

/// Extracts a `u32` from `params[name]`, returning `default` if missing, not
/// an integer, or out of `u32` range.
pub fn param_u32(params: &Value, name: &str, default: u32) -> u32 {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(default)
}
