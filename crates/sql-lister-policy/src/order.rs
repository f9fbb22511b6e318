//! Sort direction and sort key types.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

/// Sort direction for a sort key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Order {
   /// Ascending order (smallest first)
   #[default]
   Asc,
   /// Descending order (largest first)
   Desc,
}

impl Order {
   /// Parse a loosely typed value into an order.
   ///
   /// The value is stringified; `"-1"` and `"desc"` (exact, case-sensitive)
   /// yield [`Order::Desc`], anything else yields [`Order::Asc`]. Never fails.
   pub fn parse(value: impl fmt::Display) -> Self {
      match value.to_string().as_str() {
         "-1" | "desc" => Order::Desc,
         _ => Order::Asc,
      }
   }

   /// Parse a JSON scalar into an order.
   ///
   /// Strings are matched by content, numbers by their numeric text, and
   /// every other value by its JSON text.
   pub fn parse_value(value: &JsonValue) -> Self {
      match value {
         JsonValue::String(s) => Self::parse(s),
         JsonValue::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => Self::parse(i),
            (None, Some(f)) => Self::parse(f),
            (None, None) => Self::parse(n),
         },
         other => Self::parse(other),
      }
   }

   /// SQL keyword for this direction.
   pub fn as_sql(self) -> &'static str {
      match self {
         Order::Asc => "ASC",
         Order::Desc => "DESC",
      }
   }

   /// Lowercase wire name, as used in parameters and responses.
   pub fn as_str(self) -> &'static str {
      match self {
         Order::Asc => "asc",
         Order::Desc => "desc",
      }
   }

   /// `1` for ascending, `-1` for descending.
   pub fn numeric(self) -> i8 {
      match self {
         Order::Asc => 1,
         Order::Desc => -1,
      }
   }
}

impl fmt::Display for Order {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.write_str(self.as_sql())
   }
}

impl FromStr for Order {
   type Err = Infallible;

   fn from_str(s: &str) -> Result<Self, Self::Err> {
      Ok(Self::parse(s))
   }
}

impl<'de> Deserialize<'de> for Order {
   fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
   where
      D: Deserializer<'de>,
   {
      let value = JsonValue::deserialize(deserializer)?;
      Ok(Self::parse_value(&value))
   }
}

/// A single sort key: a field and the direction to sort it in.
///
/// The position of a `Sort` in a sequence decides its precedence
/// (primary, secondary, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sort {
   /// Field name as it appears in the query
   pub field: String,
   /// Direction for this field
   #[serde(default)]
   pub order: Order,
}

impl Sort {
   pub fn new(field: impl Into<String>, order: Order) -> Self {
      Self {
         field: field.into(),
         order,
      }
   }

   /// Create a sort key with ascending direction.
   pub fn asc(field: impl Into<String>) -> Self {
      Self::new(field, Order::Asc)
   }

   /// Create a sort key with descending direction.
   pub fn desc(field: impl Into<String>) -> Self {
      Self::new(field, Order::Desc)
   }
}
