//! Validation policy for listing limits and sort fields.

use std::sync::Arc;

use tracing::debug;

use crate::render::{MySqlRenderer, PostgresRenderer, SortRenderer};

/// Default page size when none (or an invalid one) is requested.
pub const DEFAULT_LIMIT: u32 = 25;

/// Default sort field when none (or an invalid one) is requested.
pub const DEFAULT_SORT: &str = "id";

/// Page sizes accepted by the default policy.
pub const DEFAULT_LIMITS: [u32; 4] = [25, 50, 100, 250];

/// Rules constraining page sizes and sort fields, plus the SQL dialect used
/// to render the final clause.
///
/// A policy is immutable once built and is meant to be shared between
/// listers through an [`Arc`].
///
/// Validation is fail-soft: invalid candidates are replaced by the defaults,
/// never reported as errors.
#[derive(Debug, Clone)]
pub struct Policy {
   default_limit: u32,
   default_sort: String,
   /// Allowed page sizes; empty means any positive size is accepted
   limits: Vec<u32>,
   /// Allowed sort fields; empty means any non-blank field is accepted
   sorts: Vec<String>,
   renderer: Arc<dyn SortRenderer>,
}

impl Default for Policy {
   fn default() -> Self {
      Self {
         default_limit: DEFAULT_LIMIT,
         default_sort: DEFAULT_SORT.to_string(),
         limits: DEFAULT_LIMITS.to_vec(),
         sorts: Vec::new(),
         renderer: Arc::new(PostgresRenderer),
      }
   }
}

impl Policy {
   /// Start building a policy from the defaults.
   pub fn builder() -> PolicyBuilder {
      PolicyBuilder::default()
   }

   pub fn default_limit(&self) -> u32 {
      self.default_limit
   }

   pub fn default_sort(&self) -> &str {
      &self.default_sort
   }

   pub fn limits(&self) -> &[u32] {
      &self.limits
   }

   pub fn sorts(&self) -> &[String] {
      &self.sorts
   }

   pub fn renderer(&self) -> &dyn SortRenderer {
      self.renderer.as_ref()
   }

   /// Return `candidate` if it is a positive, allowed page size, otherwise
   /// the default limit.
   pub fn validate_limit(&self, candidate: u32) -> u32 {
      if candidate > 0 && (self.limits.is_empty() || self.limits.contains(&candidate)) {
         return candidate;
      }

      debug!(
         candidate,
         default = self.default_limit,
         "limit not allowed, using default"
      );
      self.default_limit
   }

   /// Return the trimmed `candidate` if it is a non-blank, allowed sort
   /// field, otherwise the default sort field.
   pub fn validate_sort<'a>(&'a self, candidate: &'a str) -> &'a str {
      let trimmed = candidate.trim();
      if !trimmed.is_empty() && (self.sorts.is_empty() || self.sorts.iter().any(|s| s == trimmed))
      {
         return trimmed;
      }

      debug!(
         candidate,
         default = %self.default_sort,
         "sort field not allowed, using default"
      );
      &self.default_sort
   }
}

/// Builder for [`Policy`].
///
/// Options apply in call order; a later option overrides an earlier one on
/// the same setting.
///
/// # Example
///
/// ```
/// use sql_lister_policy::Policy;
///
/// let policy = Policy::builder()
///    .with_limits(20, [10, 20, 30])
///    .with_sorts("id", ["id", "name", "mobile"])
///    .with_mysql_renderer()
///    .build();
///
/// assert_eq!(policy.validate_limit(100), 20);
/// assert_eq!(policy.validate_sort(" name "), "name");
/// assert_eq!(policy.validate_sort("password"), "id");
/// ```
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct PolicyBuilder {
   policy: Policy,
}

impl PolicyBuilder {
   /// Set the default page size. Zero is ignored.
   pub fn with_default_limit(mut self, default: u32) -> Self {
      if default > 0 {
         self.policy.default_limit = default;
      }
      self
   }

   /// Set the default page size and the allowed page sizes.
   ///
   /// Zero entries are dropped. The allowed set is only replaced when at
   /// least one positive size remains.
   pub fn with_limits(mut self, default: u32, valid: impl IntoIterator<Item = u32>) -> Self {
      let valid: Vec<u32> = valid.into_iter().filter(|v| *v > 0).collect();

      self = self.with_default_limit(default);
      if !valid.is_empty() {
         self.policy.limits = valid;
      }
      self
   }

   /// Set the default sort field. Blank values are ignored.
   pub fn with_default_sort(mut self, default: impl AsRef<str>) -> Self {
      let default = default.as_ref().trim();
      if !default.is_empty() {
         self.policy.default_sort = default.to_string();
      }
      self
   }

   /// Set the default sort field and the allowed sort fields.
   ///
   /// Blank entries are dropped and the rest trimmed. The allowed set is
   /// always replaced, so an empty list lifts the restriction.
   pub fn with_sorts<I, S>(mut self, default: impl AsRef<str>, valid: I) -> Self
   where
      I: IntoIterator<Item = S>,
      S: AsRef<str>,
   {
      self = self.with_default_sort(default);
      self.policy.sorts = valid
         .into_iter()
         .map(|s| s.as_ref().trim().to_string())
         .filter(|s| !s.is_empty())
         .collect();
      self
   }

   /// Use a custom SQL renderer.
   pub fn with_renderer(mut self, renderer: impl SortRenderer + 'static) -> Self {
      self.policy.renderer = Arc::new(renderer);
      self
   }

   /// Render `LIMIT n OFFSET m` with double-quoted identifiers.
   pub fn with_postgres_renderer(self) -> Self {
      self.with_renderer(PostgresRenderer)
   }

   /// Render `LIMIT m, n` with backtick-quoted identifiers.
   pub fn with_mysql_renderer(self) -> Self {
      self.with_renderer(MySqlRenderer)
   }

   /// Finish the policy, ready to be shared between listers.
   pub fn build(self) -> Arc<Policy> {
      Arc::new(self.policy)
   }
}
