//! Decoding of raw stored values.
//!
//! Values are normally stored as JSON, even plain strings. Older write paths
//! stored some values as bare text, and some double-encoded empty strings, so
//! every reader goes through [`decode`] and [`is_unfilled`] instead of
//! parsing on its own.

use serde_json::Value;

/// A raw stored value after one decoding pass.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded<'a> {
  Json(Value),
  /// Not valid JSON; handed on verbatim.
  Opaque(&'a str),
}

pub fn decode(raw: &str) -> Decoded<'_> {
  match serde_json::from_str(raw) {
    Ok(value) => Decoded::Json(value),
    Err(_) => Decoded::Opaque(raw),
  }
}

/// Decoded text that counts as "no value": the empty string, a
/// double-encoded empty string, and the literal `null`.
const EMPTY_TOKENS: [&str; 3] = ["", "\"\"", "null"];

/// Whether a stored value (or its absence) counts as unfilled.
pub fn is_unfilled(raw: Option<&str>) -> bool {
  let Some(raw) = raw else { return true };
  match decode(raw) {
    Decoded::Json(Value::Null) => true,
    Decoded::Json(Value::String(s)) => EMPTY_TOKENS.contains(&s.as_str()),
    Decoded::Json(_) => false,
    Decoded::Opaque(s) => EMPTY_TOKENS.contains(&s),
  }
}

/// The text shown to an editor for a stored value.
///
/// JSON strings are unwrapped, other JSON is rendered compactly, and anything
/// that fails to parse is passed through unchanged.
pub fn display_value(raw: &str) -> String {
  if is_unfilled(Some(raw)) {
    return String::new();
  }
  match decode(raw) {
    Decoded::Json(Value::String(s)) => s,
    Decoded::Json(Value::Null) => String::new(),
    Decoded::Json(other) => other.to_string(),
    Decoded::Opaque(s) => {
      tracing::debug!(raw = s, "stored value is not JSON; passing through");
      s.to_owned()
    }
  }
}

/// Parse the textual boolean spellings an HTML form or a JSON client sends.
pub fn parse_bool(text: &str) -> Option<bool> {
  match text.trim().to_ascii_lowercase().as_str() {
    "true" | "on" | "1" | "yes" => Some(true),
    "false" | "off" | "0" | "no" | "" => Some(false),
    _ => None,
  }
}

/// Parse a numeric string, preferring an integer representation.
pub fn parse_number(text: &str) -> Option<serde_json::Number> {
  let text = text.trim();
  if let Ok(i) = text.parse::<i64>() {
    return Some(i.into());
  }
  text
    .parse::<f64>()
    .ok()
    .and_then(serde_json::Number::from_f64)
}
