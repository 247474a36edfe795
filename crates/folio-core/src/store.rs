//! The `ConfigStore` trait and the rows it reads and writes.
//!
//! The trait is implemented by storage backends (e.g. `folio-store-sqlite`).
//! Projection, statistics and edits all depend on this
//! abstraction only.

use std::{collections::BTreeMap, future::Future};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::{keys::KeySet, value};

// ─── Rows ────────────────────────────────────────────────────────────────────

/// One persisted key/value row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigEntry {
  pub key:        String,
  /// Raw stored text; normally JSON, but readers must tolerate bare text.
  pub value:      String,
  /// Set by the store on every write.
  pub updated_at: DateTime<Utc>,
}

impl ConfigEntry {
  pub fn is_unfilled(&self) -> bool { value::is_unfilled(Some(&self.value)) }
}

/// Rows keyed by config key. Keys without a row are simply absent.
pub type Rows = BTreeMap<String, ConfigEntry>;

/// A single upsert requested through [`ConfigStore::set_many`].
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigWrite {
  pub key:   String,
  pub value: Value,
}

impl ConfigWrite {
  pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
    Self { key: key.into(), value: value.into() }
  }

  /// The stored text. Values are JSON-encoded exactly once.
  pub fn encoded(&self) -> String { self.value.to_string() }
}

/// A bulk write stopped at `index`.
///
/// Entries before `index` were applied and are listed in `applied`; entries
/// after it were never attempted.
#[derive(Debug, Error)]
#[error("write failed at entry {index} ({key:?}): {source}")]
pub struct WriteFailure<E> {
  pub index:   usize,
  pub key:     String,
  pub applied: Vec<ConfigEntry>,
  #[source]
  pub source:  E,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the flat key/value table holding page content.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait ConfigStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Fetch the rows that exist for `keys`. An empty key set resolves to an
  /// empty map.
  fn get_many<'a>(
    &'a self,
    keys: &'a KeySet,
  ) -> impl Future<Output = Result<Rows, Self::Error>> + Send + 'a;

  /// Upsert `entries` one by one, in order, stopping at the first failure.
  ///
  /// There is no transaction around the batch: on failure the entries before
  /// the failing index stay written. Returns the stored rows in input order.
  fn set_many(
    &self,
    entries: Vec<ConfigWrite>,
  ) -> impl Future<Output = Result<Vec<ConfigEntry>, WriteFailure<Self::Error>>>
  + Send
  + '_;
}
