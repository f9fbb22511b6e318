//! # sql-lister-toolkit
//!
//! Per-request listing state built on [`sql_lister_policy`].
//!
//! ## Core Types
//!
//! - **[`Lister`]**: Page, limit, sorts, search, filters and meta for one request,
//!   with the computed page window, SQL sort clause and response map
//! - **[`ListerParams`]**: Request parameters, decodable from JSON or URL-safe Base64 JSON
//! - **[`Cast`]**: Typed access to opaque filter and meta values
//! - **[`Error`]** / **[`DecodeFailure`]**: Decoding and casting errors
//!
//! ## Lifecycle
//!
//! ```text
//! 1. Build a Policy once and share it (Arc<Policy>)
//! 2. Per request: Lister::new / from_params / from_json / from_base64_json
//! 3. Adjust with the fluent setters
//! 4. Run the count query, then set_total(count)
//! 5. Append sql_sort_order() to the listing query
//! 6. Return response_with_data(rows)
//! ```

mod cast;
mod error;
mod lister;
mod params;

pub use cast::Cast;
pub use error::{DecodeFailure, Error, Result};
pub use lister::Lister;
pub use params::ListerParams;

// Policy types used throughout the lister API
pub use sql_lister_policy::{
   Dialect, MySqlRenderer, Order, Policy, PolicyBuilder, PolicyConfig, PostgresRenderer, Sort,
   SortRenderer,
};
