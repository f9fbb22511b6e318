//! SQL dialect renderers for the `ORDER BY ... LIMIT ...` tail of a listing query.
//!
//! A renderer receives the ordered sort keys, a zero-based row offset and a
//! row limit, and returns a fragment that is appended verbatim to a base
//! query. Every fragment starts with a space so it can be concatenated
//! directly:
//!
//! ```
//! use sql_lister_policy::{MySqlRenderer, PostgresRenderer, Sort, SortRenderer};
//!
//! let sorts = vec![Sort::asc("name"), Sort::desc("id")];
//!
//! assert_eq!(
//!    PostgresRenderer.render(&sorts, 100, 50),
//!    r#" ORDER BY "name" ASC, "id" DESC LIMIT 50 OFFSET 100"#
//! );
//! assert_eq!(
//!    MySqlRenderer.render(&sorts, 100, 50),
//!    " ORDER BY `name` ASC, `id` DESC LIMIT 100, 50"
//! );
//! ```
//!
//! New dialects are added by implementing [`SortRenderer`].

use std::fmt;

use crate::order::Sort;

/// Strategy for rendering sort keys and a page window as SQL.
pub trait SortRenderer: fmt::Debug + Send + Sync {
   /// Render the ORDER BY and LIMIT clauses for the given window.
   fn render(&self, sorts: &[Sort], offset: u64, limit: u32) -> String;
}

/// PostgreSQL style: `LIMIT <limit> OFFSET <offset>`, double-quoted identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresRenderer;

impl SortRenderer for PostgresRenderer {
   fn render(&self, sorts: &[Sort], offset: u64, limit: u32) -> String {
      format!(
         "{} LIMIT {} OFFSET {}",
         build_order_by(sorts, '"'),
         limit,
         offset
      )
   }
}

/// MySQL style: `LIMIT <offset>, <limit>`, backtick-quoted identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlRenderer;

impl SortRenderer for MySqlRenderer {
   fn render(&self, sorts: &[Sort], offset: u64, limit: u32) -> String {
      format!("{} LIMIT {}, {}", build_order_by(sorts, '`'), offset, limit)
   }
}

/// Wrap an identifier in the dialect's quote character.
///
/// Embedded quote characters are not escaped; field names reaching a renderer
/// are expected to have passed the policy's allowed sort list. Implement a
/// custom [`SortRenderer`] for stricter quoting.
pub(crate) fn quote_identifier(name: &str, quote: char) -> String {
   format!("{quote}{name}{quote}")
}

/// Build the ` ORDER BY ...` clause, or nothing when there are no sort keys.
fn build_order_by(sorts: &[Sort], quote: char) -> String {
   if sorts.is_empty() {
      return String::new();
   }

   let parts: Vec<String> = sorts
      .iter()
      .map(|s| format!("{} {}", quote_identifier(&s.field, quote), s.order))
      .collect();

   format!(" ORDER BY {}", parts.join(", "))
}
