//! Per-request listing state: page, limit, sorts, search, filters and meta.
//!
//! A [`Lister`] is filled through fluent setters, finalized with
//! [`Lister::set_total`], and then asked for the SQL tail of the listing
//! query and for the response metadata.
//!
//! # Example
//!
//! ```
//! use sql_lister_policy::{Order, Policy};
//! use sql_lister_toolkit::Lister;
//!
//! let policy = Policy::builder()
//!    .with_limits(20, [10, 20, 30])
//!    .with_sorts("id", ["id", "name", "mobile"])
//!    .build();
//!
//! let mut lister = Lister::new(policy);
//! lister
//!    .add_sort("name", Order::Desc)
//!    .add_sort("password", Order::Asc) // not allowed, dropped
//!    .set_limit(100) // not allowed, becomes 20
//!    .set_page(100)
//!    .set_total(101);
//!
//! assert_eq!(lister.page(), 6);
//! assert_eq!(
//!    lister.sql_sort_order(),
//!    r#" ORDER BY "name" DESC LIMIT 20 OFFSET 100"#
//! );
//! ```

use std::borrow::Cow;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Value as JsonValue, json};
use sql_lister_policy::{Order, Policy, Sort};
use tracing::debug;

use crate::Result;
use crate::cast::Cast;

/// Mutable pagination, sort, search, filter and meta state for one listing
/// request.
///
/// Limits and sort fields are validated against the shared [`Policy`] as
/// they are set. `pages`, `from` and `to` stay zero until
/// [`set_total`](Lister::set_total) is called.
#[derive(Debug, Clone)]
pub struct Lister {
   policy: Arc<Policy>,

   // Inputs
   page: u64,
   limit: u32,
   search: String,
   sorts: Vec<Sort>,
   filters: IndexMap<String, JsonValue>,

   // Pagination results
   total: u64,
   from: u64,
   to: u64,
   pages: u64,
   meta: IndexMap<String, JsonValue>,
}

impl Lister {
   /// Create an empty lister holding the policy's default limit.
   pub fn new(policy: Arc<Policy>) -> Self {
      let limit = policy.default_limit();
      Self {
         policy,
         page: 0,
         limit,
         search: String::new(),
         sorts: Vec::new(),
         filters: IndexMap::new(),
         total: 0,
         from: 0,
         to: 0,
         pages: 0,
         meta: IndexMap::new(),
      }
   }

   pub fn policy(&self) -> &Arc<Policy> {
      &self.policy
   }

   /// Set the requested page. `0` and `1` both mean the first page.
   pub fn set_page(&mut self, page: u64) -> &mut Self {
      self.page = page;
      self
   }

   pub fn page(&self) -> u64 {
      self.page
   }

   /// Total number of pages, as computed by [`set_total`](Lister::set_total).
   pub fn pages(&self) -> u64 {
      self.pages
   }

   /// Set the page size; disallowed sizes fall back to the default limit.
   pub fn set_limit(&mut self, limit: u32) -> &mut Self {
      self.limit = self.policy.validate_limit(limit);
      self
   }

   pub fn limit(&self) -> u32 {
      self.limit
   }

   /// Append a sort key.
   ///
   /// The key is kept only when `field` is already valid as given: a field
   /// that the policy would trim or replace is dropped, not substituted.
   pub fn add_sort(&mut self, field: &str, order: Order) -> &mut Self {
      if self.policy.validate_sort(field) == field {
         self.sorts.push(Sort::new(field, order));
      } else {
         debug!(field, "dropping sort field rejected by policy");
      }
      self
   }

   /// Active sort keys, or the policy's default sort ascending when none
   /// were added. Never empty.
   pub fn sort(&self) -> Cow<'_, [Sort]> {
      if self.sorts.is_empty() {
         Cow::Owned(vec![Sort::asc(self.policy.default_sort())])
      } else {
         Cow::Borrowed(&self.sorts)
      }
   }

   /// Sort keys added so far, without the default fallback.
   pub fn added_sorts(&self) -> &[Sort] {
      &self.sorts
   }

   pub fn set_search(&mut self, search: impl Into<String>) -> &mut Self {
      self.search = search.into();
      self
   }

   pub fn search(&self) -> &str {
      &self.search
   }

   /// Replace all filters.
   pub fn set_filters<I, K>(&mut self, filters: I) -> &mut Self
   where
      I: IntoIterator<Item = (K, JsonValue)>,
      K: Into<String>,
   {
      self.filters = filters.into_iter().map(|(k, v)| (k.into(), v)).collect();
      self
   }

   /// Insert or replace a single filter.
   pub fn set_filter(&mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> &mut Self {
      self.filters.insert(key.into(), value.into());
      self
   }

   pub fn filters(&self) -> &IndexMap<String, JsonValue> {
      &self.filters
   }

   pub fn filter(&self, key: &str) -> Option<&JsonValue> {
      self.filters.get(key)
   }

   pub fn has_filter(&self, key: &str) -> bool {
      self.filters.contains_key(key)
   }

   /// Typed access to a filter value.
   pub fn cast_filter(&self, key: &str) -> Cast<'_> {
      Cast::new(self.filters.get(key))
   }

   /// Insert or replace a meta entry returned alongside the response.
   pub fn set_meta(&mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> &mut Self {
      self.meta.insert(key.into(), value.into());
      self
   }

   pub fn meta_data(&self) -> &IndexMap<String, JsonValue> {
      &self.meta
   }

   pub fn meta(&self, key: &str) -> Option<&JsonValue> {
      self.meta.get(key)
   }

   pub fn has_meta(&self, key: &str) -> bool {
      self.meta.contains_key(key)
   }

   /// Typed access to a meta value.
   pub fn cast_meta(&self, key: &str) -> Cast<'_> {
      Cast::new(self.meta.get(key))
   }

   /// Set the total record count and compute the page window.
   ///
   /// `pages = ceil(total / limit)`, the page is clamped to `pages`,
   /// `from = (max(page, 1) - 1) * limit` and `to = min(from + limit, total)`.
   pub fn set_total(&mut self, total: u64) -> &mut Self {
      // Always > 0: the policy never hands out a zero limit
      let limit = u64::from(self.limit);

      self.total = total;
      self.pages = total.div_ceil(limit);
      self.page = self.page.min(self.pages);
      self.from = (self.page.max(1) - 1) * limit;
      self.to = self.from.saturating_add(limit).min(total);

      debug!(
         total,
         pages = self.pages,
         page = self.page,
         from = self.from,
         to = self.to,
         "computed pagination window"
      );
      self
   }

   pub fn total(&self) -> u64 {
      self.total
   }

   /// Zero-based offset of the first record on the current page.
   pub fn from(&self) -> u64 {
      self.from
   }

   /// Offset one past the last record on the current page, clamped to the total.
   pub fn to(&self) -> u64 {
      self.to
   }

   /// Render the `ORDER BY ... LIMIT ...` tail with the policy's renderer.
   ///
   /// The offset is [`from`](Lister::from), so call
   /// [`set_total`](Lister::set_total) first; before that the offset is 0.
   pub fn sql_sort_order(&self) -> String {
      self
         .policy
         .renderer()
         .render(&self.sort(), self.from, self.limit)
   }

   /// Response metadata: every meta entry, then the pagination keys
   /// `page`, `limit`, `sorts`, `search`, `total`, `from`, `to`, `pages`.
   ///
   /// Pagination keys win over meta entries with the same name.
   pub fn response(&self) -> IndexMap<String, JsonValue> {
      let mut res = self.meta.clone();
      res.insert("page".into(), json!(self.page));
      res.insert("limit".into(), json!(self.limit));
      res.insert("sorts".into(), json!(self.sort()));
      res.insert("search".into(), json!(self.search));
      res.insert("total".into(), json!(self.total));
      res.insert("from".into(), json!(self.from));
      res.insert("to".into(), json!(self.to));
      res.insert("pages".into(), json!(self.pages));
      res
   }

   /// [`response`](Lister::response) plus a `data` entry.
   pub fn response_with_data(&self, data: impl Into<JsonValue>) -> IndexMap<String, JsonValue> {
      let mut res = self.response();
      res.insert("data".into(), data.into());
      res
   }

   /// [`response`](Lister::response) plus a `data` entry serialized from `data`.
   pub fn response_with_serialized<T>(&self, data: &T) -> Result<IndexMap<String, JsonValue>>
   where
      T: Serialize + ?Sized,
   {
      let data = serde_json::to_value(data)?;
      Ok(self.response_with_data(data))
   }
}

#[cfg(test)]
mod tests {
   use super::*;

   fn restricted() -> Arc<Policy> {
      Policy::builder()
         .with_limits(20, [10, 20, 30])
         .with_sorts("id", ["id", "name", "mobile"])
         .build()
   }

   // ─── construction ───

   #[test]
   fn new_lister_uses_default_limit() {
      let lister = Lister::new(restricted());
      assert_eq!(lister.limit(), 20);
      assert_eq!(lister.page(), 0);
      assert_eq!(lister.pages(), 0);
      assert_eq!(lister.from(), 0);
      assert_eq!(lister.to(), 0);
      assert!(lister.filters().is_empty());
      assert!(lister.meta_data().is_empty());
   }

   // ─── set_limit ───

   #[test]
   fn set_limit_validates() {
      let mut lister = Lister::new(restricted());
      assert_eq!(lister.set_limit(30).limit(), 30);
      assert_eq!(lister.set_limit(0).limit(), 20);
      assert_eq!(lister.set_limit(31).limit(), 20);
   }

   // ─── add_sort / sort ───

   #[test]
   fn add_sort_keeps_order_of_calls() {
      let mut lister = Lister::new(restricted());
      lister
         .add_sort("mobile", Order::Desc)
         .add_sort("name", Order::Asc);
      assert_eq!(
         lister.sort().as_ref(),
         &[Sort::desc("mobile"), Sort::asc("name")]
      );
   }

   #[test]
   fn add_sort_drops_invalid_fields() {
      let mut lister = Lister::new(restricted());
      lister
         .add_sort("password", Order::Asc)
         .add_sort(" name", Order::Asc)
         .add_sort("", Order::Desc);
      assert_eq!(lister.sort().as_ref(), &[Sort::asc("id")]);
      assert!(matches!(lister.sort(), Cow::Owned(_)));
   }

   #[test]
   fn add_sort_accepts_default_field_even_when_not_listed() {
      let policy = Policy::builder().with_sorts("id", ["name"]).build();
      let mut lister = Lister::new(policy);
      lister.add_sort("id", Order::Desc);
      assert_eq!(lister.sort().as_ref(), &[Sort::desc("id")]);
   }

   #[test]
   fn sort_falls_back_to_default() {
      let lister = Lister::new(Arc::new(Policy::default()));
      assert_eq!(lister.sort().as_ref(), &[Sort::asc("id")]);
   }

   // ─── filters / meta ───

   #[test]
   fn filters_upsert_and_replace() {
      let mut lister = Lister::new(restricted());
      lister.set_filter("author", "a1").set_filter("author", "a2");
      assert_eq!(lister.filter("author"), Some(&json!("a2")));
      assert!(lister.has_filter("author"));

      lister.set_filters([("status", json!("open"))]);
      assert!(!lister.has_filter("author"));
      assert_eq!(lister.cast_filter("status").string_or(""), "open");

      lister.set_filters(Vec::<(String, JsonValue)>::new());
      assert!(lister.filters().is_empty());
      assert!(lister.cast_filter("status").is_missing());
   }

   #[test]
   fn meta_upsert() {
      let mut lister = Lister::new(restricted());
      lister.set_meta("tenant", 7).set_meta("tenant", 8);
      assert_eq!(lister.meta("tenant"), Some(&json!(8)));
      assert!(lister.has_meta("tenant"));
      assert!(!lister.has_meta("other"));
      assert_eq!(lister.cast_meta("tenant").u64_or(0), 8);
   }

   // ─── set_total ───

   #[test]
   fn set_total_zero() {
      let mut lister = Lister::new(Arc::new(Policy::default()));
      lister.set_page(3).set_total(0);
      assert_eq!(lister.page(), 0);
      assert_eq!(lister.pages(), 0);
      assert_eq!(lister.from(), 0);
      assert_eq!(lister.to(), 0);
   }

   #[test]
   fn set_total_page_zero_is_first_page() {
      let mut lister = Lister::new(restricted());
      lister.set_total(45);
      assert_eq!(lister.page(), 0);
      assert_eq!(lister.pages(), 3);
      assert_eq!(lister.from(), 0);
      assert_eq!(lister.to(), 20);
   }

   #[test]
   fn set_total_middle_page() {
      let mut lister = Lister::new(restricted());
      lister.set_page(2).set_total(45);
      assert_eq!(lister.page(), 2);
      assert_eq!(lister.from(), 20);
      assert_eq!(lister.to(), 40);
   }

   #[test]
   fn set_total_last_partial_page() {
      let mut lister = Lister::new(restricted());
      lister.set_page(3).set_total(45);
      assert_eq!(lister.from(), 40);
      assert_eq!(lister.to(), 45);
   }

   #[test]
   fn set_total_recomputes_on_each_call() {
      let mut lister = Lister::new(restricted());
      lister.set_page(5).set_total(100);
      assert_eq!(lister.page(), 5);
      lister.set_total(30);
      assert_eq!(lister.page(), 2);
      assert_eq!(lister.pages(), 2);
      assert_eq!(lister.from(), 20);
      assert_eq!(lister.to(), 30);
   }

   #[test]
   fn set_total_near_u64_max_does_not_overflow() {
      let mut lister = Lister::new(restricted());
      lister.set_page(u64::MAX).set_total(u64::MAX);
      assert_eq!(lister.pages(), u64::MAX.div_ceil(20));
      assert_eq!(lister.page(), lister.pages());
      assert!(lister.to() <= lister.total());
      assert!(lister.to() - lister.from() <= 20);
   }

   // ─── sql_sort_order ───

   #[test]
   fn sql_before_set_total_uses_zero_offset() {
      let mut lister = Lister::new(Arc::new(Policy::default()));
      lister.set_page(4).set_limit(50);
      assert_eq!(
         lister.sql_sort_order(),
         r#" ORDER BY "id" ASC LIMIT 50 OFFSET 0"#
      );
   }

   #[test]
   fn sql_offset_equals_from() {
      let mut lister = Lister::new(restricted());
      lister.set_page(2).set_total(45);
      assert_eq!(
         lister.sql_sort_order(),
         r#" ORDER BY "id" ASC LIMIT 20 OFFSET 20"#
      );
   }

   #[test]
   fn sql_uses_policy_dialect() {
      let policy = Policy::builder().with_mysql_renderer().build();
      let mut lister = Lister::new(policy);
      lister
         .add_sort("name", Order::Desc)
         .set_limit(50)
         .set_page(3)
         .set_total(500);
      assert_eq!(
         lister.sql_sort_order(),
         " ORDER BY `name` DESC LIMIT 100, 50"
      );
   }

   // ─── response ───

   #[test]
   fn response_contains_pagination_keys() {
      let mut lister = Lister::new(restricted());
      lister
         .add_sort("name", Order::Desc)
         .set_search("jo")
         .set_page(2)
         .set_total(45);

      let res = lister.response();
      assert_eq!(res["page"], json!(2));
      assert_eq!(res["limit"], json!(20));
      assert_eq!(res["sorts"], json!([{ "field": "name", "order": "desc" }]));
      assert_eq!(res["search"], json!("jo"));
      assert_eq!(res["total"], json!(45));
      assert_eq!(res["from"], json!(20));
      assert_eq!(res["to"], json!(40));
      assert_eq!(res["pages"], json!(3));
      assert!(!res.contains_key("data"));
   }

   #[test]
   fn response_pagination_keys_override_meta() {
      let mut lister = Lister::new(restricted());
      lister
         .set_meta("page", "shadowed")
         .set_meta("tenant", "acme")
         .set_page(1)
         .set_total(5);

      let res = lister.response();
      assert_eq!(res["page"], json!(1));
      assert_eq!(res["tenant"], json!("acme"));
      // Meta is left untouched
      assert_eq!(lister.meta("page"), Some(&json!("shadowed")));
   }

   #[test]
   fn response_is_idempotent() {
      let mut lister = Lister::new(restricted());
      lister.set_meta("k", 1).set_total(10);
      assert_eq!(lister.response(), lister.response());
   }

   #[test]
   fn response_with_data() {
      let mut lister = Lister::new(restricted());
      lister.set_total(2);

      let res = lister.response_with_data(json!([{ "id": 1 }, { "id": 2 }]));
      assert_eq!(res["data"], json!([{ "id": 1 }, { "id": 2 }]));
      assert_eq!(res["total"], json!(2));
   }

   #[test]
   fn response_with_serialized() {
      #[derive(Serialize)]
      struct Row {
         id: u32,
      }

      let lister = Lister::new(restricted());
      let res = lister
         .response_with_serialized(&[Row { id: 1 }, Row { id: 2 }])
         .unwrap();
      assert_eq!(res["data"], json!([{ "id": 1 }, { "id": 2 }]));
   }
}
