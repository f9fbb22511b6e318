//! Typed access to dynamically typed filter and meta values.

use serde_json::Value as JsonValue;

use crate::{Error, Result};

/// Borrowed view over an optional JSON value with typed conversions.
///
/// The `as_*` methods fail with [`Error::InvalidCast`] on a mismatch; the
/// `*_or` methods return the caller's default instead.
///
/// Conversions are lenient where the intent is unambiguous: numbers and
/// booleans cast to strings, numeric strings cast to numbers, and `"true"`,
/// `"false"`, `"1"`, `"0"` cast to booleans.
#[derive(Debug, Clone, Copy)]
pub struct Cast<'a> {
   value: Option<&'a JsonValue>,
}

impl<'a> Cast<'a> {
   pub fn new(value: Option<&'a JsonValue>) -> Self {
      Self { value }
   }

   /// The raw value, if the key was present.
   pub fn value(&self) -> Option<&'a JsonValue> {
      self.value
   }

   /// Returns true if the key was absent.
   pub fn is_missing(&self) -> bool {
      self.value.is_none()
   }

   /// Returns true if the key was absent or explicitly null.
   pub fn is_null(&self) -> bool {
      matches!(self.value, None | Some(JsonValue::Null))
   }

   pub fn as_string(&self) -> Result<String> {
      match self.value {
         Some(JsonValue::String(s)) => Ok(s.clone()),
         Some(JsonValue::Number(n)) => Ok(n.to_string()),
         Some(JsonValue::Bool(b)) => Ok(b.to_string()),
         other => Err(mismatch("string", other)),
      }
   }

   pub fn as_i64(&self) -> Result<i64> {
      match self.value {
         Some(JsonValue::Number(n)) => n.as_i64().ok_or_else(|| mismatch("i64", self.value)),
         Some(JsonValue::String(s)) => s.trim().parse().map_err(|_| mismatch("i64", self.value)),
         other => Err(mismatch("i64", other)),
      }
   }

   pub fn as_u64(&self) -> Result<u64> {
      match self.value {
         Some(JsonValue::Number(n)) => n.as_u64().ok_or_else(|| mismatch("u64", self.value)),
         Some(JsonValue::String(s)) => s.trim().parse().map_err(|_| mismatch("u64", self.value)),
         other => Err(mismatch("u64", other)),
      }
   }

   pub fn as_f64(&self) -> Result<f64> {
      match self.value {
         Some(JsonValue::Number(n)) => n.as_f64().ok_or_else(|| mismatch("f64", self.value)),
         Some(JsonValue::String(s)) => s.trim().parse().map_err(|_| mismatch("f64", self.value)),
         other => Err(mismatch("f64", other)),
      }
   }

   pub fn as_bool(&self) -> Result<bool> {
      match self.value {
         Some(JsonValue::Bool(b)) => Ok(*b),
         Some(JsonValue::String(s)) => match s.trim() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(mismatch("bool", self.value)),
         },
         Some(JsonValue::Number(n)) => match n.as_u64() {
            Some(1) => Ok(true),
            Some(0) => Ok(false),
            _ => Err(mismatch("bool", self.value)),
         },
         other => Err(mismatch("bool", other)),
      }
   }

   /// Cast an array whose every element is string-castable.
   pub fn as_string_vec(&self) -> Result<Vec<String>> {
      match self.value {
         Some(JsonValue::Array(items)) => items
            .iter()
            .map(|item| Cast::new(Some(item)).as_string())
            .collect::<Result<Vec<_>>>()
            .map_err(|_| mismatch("string array", self.value)),
         other => Err(mismatch("string array", other)),
      }
   }

   pub fn string_or(&self, default: impl Into<String>) -> String {
      self.as_string().unwrap_or_else(|_| default.into())
   }

   pub fn i64_or(&self, default: i64) -> i64 {
      self.as_i64().unwrap_or(default)
   }

   pub fn u64_or(&self, default: u64) -> u64 {
      self.as_u64().unwrap_or(default)
   }

   pub fn f64_or(&self, default: f64) -> f64 {
      self.as_f64().unwrap_or(default)
   }

   pub fn bool_or(&self, default: bool) -> bool {
      self.as_bool().unwrap_or(default)
   }

   pub fn string_vec_or(&self, default: Vec<String>) -> Vec<String> {
      self.as_string_vec().unwrap_or(default)
   }
}

fn mismatch(expected: &'static str, found: Option<&JsonValue>) -> Error {
   Error::InvalidCast {
      expected,
      found: type_name(found),
   }
}

fn type_name(value: Option<&JsonValue>) -> &'static str {
   match value {
      None => "missing",
      Some(JsonValue::Null) => "null",
      Some(JsonValue::Bool(_)) => "bool",
      Some(JsonValue::Number(_)) => "number",
      Some(JsonValue::String(_)) => "string",
      Some(JsonValue::Array(_)) => "array",
      Some(JsonValue::Object(_)) => "object",
   }
}
