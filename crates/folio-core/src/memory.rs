//! In-memory [`ConfigStore`] with failure injection, for unit tests.

use std::{
  collections::HashSet,
  sync::{Mutex, MutexGuard},
};

use chrono::Utc;
use thiserror::Error;

use crate::{
  keys::KeySet,
  store::{ConfigEntry, ConfigStore, ConfigWrite, Rows, WriteFailure},
};

#[derive(Debug, Error)]
pub enum MemoryError {
  #[error("injected write failure for {0:?}")]
  Rejected(String),
  #[error("store offline")]
  Offline,
}

#[derive(Default)]
pub struct MemoryStore {
  rows:       Mutex<Rows>,
  /// Writes to these keys fail.
  rejecting:  HashSet<String>,
  offline:    bool,
  /// Reads return every stored row, not just the requested keys.
  unfiltered: bool,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  pub fn rejecting(keys: &[&str]) -> Self {
    Self {
      rejecting: keys.iter().map(|k| k.to_string()).collect(),
      ..Self::default()
    }
  }

  pub fn offline() -> Self { Self { offline: true, ..Self::default() } }

  pub fn unfiltered() -> Self { Self { unfiltered: true, ..Self::default() } }

  /// Store `raw` verbatim, bypassing JSON encoding.
  pub fn put_raw(&self, key: &str, raw: &str) {
    self.rows().insert(key.to_owned(), ConfigEntry {
      key:        key.to_owned(),
      value:      raw.to_owned(),
      updated_at: Utc::now(),
    });
  }

  pub fn raw(&self, key: &str) -> Option<String> {
    self.rows().get(key).map(|e| e.value.clone())
  }

  fn rows(&self) -> MutexGuard<'_, Rows> {
    self.rows.lock().expect("memory store poisoned")
  }
}

impl ConfigStore for MemoryStore {
  type Error = MemoryError;

  async fn get_many(&self, keys: &KeySet) -> Result<Rows, MemoryError> {
    if self.offline {
      return Err(MemoryError::Offline);
    }
    let rows = self.rows();
    if self.unfiltered {
      return Ok(rows.clone());
    }
    Ok(
      keys
        .iter()
        .filter_map(|k| rows.get(k).map(|e| (k.clone(), e.clone())))
        .collect(),
    )
  }

  async fn set_many(
    &self,
    entries: Vec<ConfigWrite>,
  ) -> Result<Vec<ConfigEntry>, WriteFailure<MemoryError>> {
    let mut rows = self.rows();
    let mut applied = Vec::with_capacity(entries.len());
    for (index, write) in entries.into_iter().enumerate() {
      if self.offline || self.rejecting.contains(&write.key) {
        let source = if self.offline {
          MemoryError::Offline
        } else {
          MemoryError::Rejected(write.key.clone())
        };
        return Err(WriteFailure { index, key: write.key, applied, source });
      }
      let entry = ConfigEntry {
        value:      write.encoded(),
        key:        write.key,
        updated_at: Utc::now(),
      };
      rows.insert(entry.key.clone(), entry.clone());
      applied.push(entry);
    }
    Ok(applied)
  }
}
