//! Serializable configuration for building a [`Policy`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::policy::{DEFAULT_LIMIT, DEFAULT_LIMITS, DEFAULT_SORT, Policy};

/// SQL dialect used to render the sort clause.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
   /// `LIMIT <limit> OFFSET <offset>` with `"quoted"` identifiers
   #[default]
   Postgres,
   /// `LIMIT <offset>, <limit>` with `` `quoted` `` identifiers
   Mysql,
}

/// Configuration for a listing [`Policy`], suitable for loading from a
/// settings file.
///
/// # Examples
///
/// ```
/// use sql_lister_policy::{Dialect, PolicyConfig};
///
/// // Use defaults
/// let config = PolicyConfig::default();
///
/// // Override just a few fields
/// let config = PolicyConfig {
///     limits: vec![10, 20, 30],
///     default_limit: 20,
///     dialect: Dialect::Mysql,
///     ..Default::default()
/// };
///
/// let policy = config.into_policy();
/// assert_eq!(policy.validate_limit(15), 20);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PolicyConfig {
   /// Page size used when none, zero, or a disallowed one is requested
   ///
   /// Default: 25
   pub default_limit: u32,

   /// Allowed page sizes. Zeros are ignored; if nothing positive remains the
   /// built-in set is kept.
   ///
   /// Default: `[25, 50, 100, 250]`
   pub limits: Vec<u32>,

   /// Sort field used when no valid sort is requested
   ///
   /// Default: `"id"`
   pub default_sort: String,

   /// Allowed sort fields. Empty means any non-blank field is accepted.
   ///
   /// Default: empty
   pub sorts: Vec<String>,

   /// Dialect for the rendered clause
   ///
   /// Default: postgres
   pub dialect: Dialect,
}

impl Default for PolicyConfig {
   fn default() -> Self {
      Self {
         default_limit: DEFAULT_LIMIT,
         limits: DEFAULT_LIMITS.to_vec(),
         default_sort: DEFAULT_SORT.to_string(),
         sorts: Vec::new(),
         dialect: Dialect::Postgres,
      }
   }
}

impl PolicyConfig {
   /// Build the policy, applying the same filtering rules as the builder.
   pub fn into_policy(self) -> Arc<Policy> {
      let builder = Policy::builder()
         .with_limits(self.default_limit, self.limits)
         .with_sorts(self.default_sort, self.sorts);

      let builder = match self.dialect {
         Dialect::Postgres => builder.with_postgres_renderer(),
         Dialect::Mysql => builder.with_mysql_renderer(),
      };

      builder.build()
   }
}

impl From<PolicyConfig> for Arc<Policy> {
   fn from(config: PolicyConfig) -> Self {
      config.into_policy()
   }
}
