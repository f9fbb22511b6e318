//! Building a [`Lister`] from request parameters.
//!
//! Parameters arrive as a structured [`ListerParams`], as a JSON string, or
//! as URL-safe Base64 of that JSON:
//!
//! ```json
//! {
//!    "page": 2,
//!    "limit": 100,
//!    "search": "Jack",
//!    "filters": { "author": "asc7DsX" },
//!    "sorts": [
//!       { "field": "name", "order": "desc" },
//!       { "field": "id", "order": "asc" }
//!    ]
//! }
//! ```
//!
//! Every field is optional. Values pass through the same validation as the
//! fluent setters, so a disallowed limit or sort never reaches the lister.

use std::sync::Arc;

use base64::Engine;
use base64::alphabet;
use base64::engine::DecodePaddingMode;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, URL_SAFE};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sql_lister_policy::{Policy, Sort};
use tracing::warn;

use crate::Result;
use crate::error::DecodeFailure;
use crate::lister::Lister;

/// URL-safe alphabet that accepts input with or without `=` padding.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
   &alphabet::URL_SAFE,
   GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Request parameters for a listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListerParams {
   pub page: u64,
   /// Requested page size; values outside the policy (including ones too
   /// large for a page size) fall back to the default limit
   pub limit: u64,
   pub sorts: Vec<Sort>,
   pub search: String,
   /// Opaque filters; `None` and `null` both mean no filters
   pub filters: Option<IndexMap<String, JsonValue>>,
}

impl ListerParams {
   /// Parse parameters from JSON.
   pub fn from_json(data: &str) -> Result<Self> {
      Ok(serde_json::from_str(data)?)
   }

   /// Parse parameters from URL-safe Base64 encoded JSON.
   pub fn from_base64_json(data: &str) -> Result<Self> {
      let bytes = URL_SAFE_LENIENT.decode(data.trim())?;
      let json = String::from_utf8(bytes)?;
      Self::from_json(&json)
   }

   pub fn to_json(&self) -> Result<String> {
      Ok(serde_json::to_string(self)?)
   }

   /// Encode as padded URL-safe Base64 JSON.
   pub fn to_base64_json(&self) -> Result<String> {
      Ok(URL_SAFE.encode(self.to_json()?))
   }
}

impl Lister {
   /// Build a lister by feeding each parameter through the fluent setters.
   pub fn from_params(params: ListerParams, policy: Arc<Policy>) -> Self {
      let mut lister = Lister::new(policy);
      // An oversized limit can never be allowed; 0 yields the default
      let limit = u32::try_from(params.limit).unwrap_or(0);
      lister.set_page(params.page).set_limit(limit);
      for sort in &params.sorts {
         lister.add_sort(&sort.field, sort.order);
      }
      lister
         .set_search(params.search)
         .set_filters(params.filters.unwrap_or_default());
      lister
   }

   /// Build a lister from JSON parameters.
   ///
   /// On failure the returned [`DecodeFailure`] holds the error and a
   /// default lister for the same policy.
   pub fn from_json(data: &str, policy: Arc<Policy>) -> std::result::Result<Self, DecodeFailure> {
      decoded(ListerParams::from_json(data), policy)
   }

   /// Build a lister from URL-safe Base64 encoded JSON parameters.
   ///
   /// On failure the returned [`DecodeFailure`] holds the error and a
   /// default lister for the same policy.
   pub fn from_base64_json(
      data: &str,
      policy: Arc<Policy>,
   ) -> std::result::Result<Self, DecodeFailure> {
      decoded(ListerParams::from_base64_json(data), policy)
   }

   /// Snapshot the request-side state (page, limit, added sorts, search,
   /// filters) as parameters.
   pub fn to_params(&self) -> ListerParams {
      ListerParams {
         page: self.page(),
         limit: u64::from(self.limit()),
         sorts: self.added_sorts().to_vec(),
         search: self.search().to_string(),
         filters: Some(self.filters().clone()),
      }
   }
}

fn decoded(
   params: Result<ListerParams>,
   policy: Arc<Policy>,
) -> std::result::Result<Lister, DecodeFailure> {
   match params {
      Ok(params) => Ok(Lister::from_params(params, policy)),
      Err(error) => {
         warn!(code = %error.error_code(), %error, "failed to decode lister parameters");
         Err(DecodeFailure::new(error, Lister::new(policy)))
      }
   }
}
