use std::sync::Arc;

mod listers;

pub use listers::Listers;
pub use sql_lister_policy::{
   DEFAULT_LIMIT, DEFAULT_LIMITS, DEFAULT_SORT, Dialect, MySqlRenderer, Order, Policy,
   PolicyBuilder, PolicyConfig, PostgresRenderer, Sort, SortRenderer,
};
pub use sql_lister_toolkit::{Cast, DecodeFailure, Error, Lister, ListerParams, Result};

/// Builder for a [`Listers`] factory.
///
/// Use this to configure the listing policy once at startup.
///
/// # Example
///
/// ```
/// use sql_lister::{Builder, Order, Policy};
///
/// let listers = Builder::new()
///     .policy(
///         Policy::builder()
///             .with_limits(20, [10, 20, 30])
///             .with_sorts("id", ["id", "name"])
///             .build(),
///     )
///     .build();
///
/// // Per request:
/// let mut lister = listers.lister();
/// lister.add_sort("name", Order::Desc).set_page(2).set_total(45);
///
/// assert_eq!(
///     lister.sql_sort_order(),
///     r#" ORDER BY "name" DESC LIMIT 20 OFFSET 20"#
/// );
/// ```
#[derive(Debug, Default)]
pub struct Builder {
   policy: Option<Arc<Policy>>,
}

impl Builder {
   /// Create a new builder instance.
   pub fn new() -> Self {
      Self::default()
   }

   /// Use an already built policy.
   pub fn policy(mut self, policy: Arc<Policy>) -> Self {
      self.policy = Some(policy);
      self
   }

   /// Build the policy from configuration settings.
   pub fn config(self, config: PolicyConfig) -> Self {
      self.policy(config.into_policy())
   }

   /// Build the factory, falling back to the default policy.
   pub fn build(self) -> Listers {
      Listers::new(self.policy.unwrap_or_else(|| Arc::new(Policy::default())))
   }
}

/// Initializes a factory with the default policy.
pub fn init() -> Listers {
   Builder::new().build()
}
