//! # sql-lister-policy
//!
//! Validation rules and SQL rendering for paginated listings.
//!
//! ## Core Types
//!
//! - **[`Policy`]**: Immutable limit and sort-field rules plus the active SQL renderer
//! - **[`PolicyBuilder`]**: Applies policy options in order
//! - **[`PolicyConfig`]**: Serde-loadable settings that build a [`Policy`]
//! - **[`Order`]** / **[`Sort`]**: Sort direction and sort key
//! - **[`SortRenderer`]**: Strategy producing the `ORDER BY ... LIMIT ...` fragment,
//!   with [`PostgresRenderer`] and [`MySqlRenderer`] built in
//!
//! ## Validation
//!
//! Validation never fails. A disallowed page size becomes the default limit
//! and a disallowed sort field becomes the default sort field.

mod config;
mod order;
mod policy;
mod render;

pub use config::{Dialect, PolicyConfig};
pub use order::{Order, Sort};
pub use policy::{DEFAULT_LIMIT, DEFAULT_LIMITS, DEFAULT_SORT, Policy, PolicyBuilder};
pub use render::{MySqlRenderer, PostgresRenderer, SortRenderer};
