use std::sync::Arc;

use sql_lister_toolkit::{DecodeFailure, Lister, ListerParams, Policy};
use tracing::debug;

/// Factory for per-request listers sharing one policy.
///
/// Cloning is cheap; the policy is shared read-only, so a `Listers` can be
/// stored in application state and used from any thread. Each [`Lister`] it
/// creates belongs to a single request.
#[derive(Debug, Clone)]
pub struct Listers {
   policy: Arc<Policy>,
}

impl Listers {
   pub fn new(policy: Arc<Policy>) -> Self {
      debug!(
         default_limit = policy.default_limit(),
         default_sort = policy.default_sort(),
         "listing policy installed"
      );
      Self { policy }
   }

   pub fn policy(&self) -> &Arc<Policy> {
      &self.policy
   }

   /// An empty lister holding the default limit and sort.
   pub fn lister(&self) -> Lister {
      Lister::new(Arc::clone(&self.policy))
   }

   pub fn from_params(&self, params: ListerParams) -> Lister {
      Lister::from_params(params, Arc::clone(&self.policy))
   }

   /// Decode JSON parameters. See [`Lister::from_json`].
   pub fn from_json(&self, data: &str) -> Result<Lister, DecodeFailure> {
      Lister::from_json(data, Arc::clone(&self.policy))
   }

   /// Decode URL-safe Base64 JSON parameters. See [`Lister::from_base64_json`].
   pub fn from_base64_json(&self, data: &str) -> Result<Lister, DecodeFailure> {
      Lister::from_base64_json(data, Arc::clone(&self.policy))
   }
}

impl Default for Listers {
   fn default() -> Self {
      Self::new(Arc::new(Policy::default()))
   }
}
