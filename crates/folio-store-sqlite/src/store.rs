//! [`SqliteStore`], the SQLite implementation of [`ConfigStore`].

use std::path::Path;

use chrono::{SubsecRound as _, Utc};
use folio_core::{
  keys::KeySet,
  store::{ConfigEntry, ConfigStore, ConfigWrite, Rows, WriteFailure},
};

use crate::{
  Error, Result,
  encode::{RawEntry, encode_dt},
  schema::SCHEMA,
};

/// Upper bound on bound parameters per `IN (...)` lookup.
const LOOKUP_CHUNK: usize = 500;

const UPSERT: &str = "
INSERT INTO site_config (key, value, updated_at) VALUES (?1, ?2, ?3)
ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Folio config store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

/// What a batch upsert managed before stopping.
struct BatchOutcome {
  applied: Vec<ConfigEntry>,
  failed:  Option<(usize, String, rusqlite::Error)>,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, used by tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Write `raw` verbatim, bypassing JSON encoding, as another writer might.
  #[cfg(test)]
  pub(crate) async fn put_raw(&self, key: &str, raw: &str) -> Result<()> {
    let key = key.to_owned();
    let raw = raw.to_owned();
    let at = encode_dt(Utc::now());
    self
      .conn
      .call(move |conn| {
        conn.execute(UPSERT, rusqlite::params![key, raw, at])?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── ConfigStore impl ────────────────────────────────────────────────────────

impl ConfigStore for SqliteStore {
  type Error = Error;

  async fn get_many(&self, keys: &KeySet) -> Result<Rows> {
    if keys.is_empty() {
      return Ok(Rows::new());
    }
    let keys: Vec<String> = keys.iter().cloned().collect();

    let raws: Vec<RawEntry> = self
      .conn
      .call(move |conn| {
        let mut raws = Vec::with_capacity(keys.len());
        for chunk in keys.chunks(LOOKUP_CHUNK) {
          let placeholders = (1..=chunk.len())
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(", ");
          let sql = format!(
            "SELECT key, value, updated_at FROM site_config WHERE key IN ({placeholders})"
          );
          let mut stmt = conn.prepare(&sql)?;
          let rows = stmt
            .query_map(rusqlite::params_from_iter(chunk), RawEntry::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          raws.extend(rows);
        }
        Ok(raws)
      })
      .await?;

    raws
      .into_iter()
      .map(|raw| raw.into_entry().map(|entry| (entry.key.clone(), entry)))
      .collect()
  }

  async fn set_many(
    &self,
    entries: Vec<ConfigWrite>,
  ) -> Result<Vec<ConfigEntry>, WriteFailure<Error>> {
    let Some(first_key) = entries.first().map(|w| w.key.clone()) else {
      return Ok(Vec::new());
    };
    let pairs: Vec<(String, String)> = entries
      .into_iter()
      .map(|w| {
        let value = w.encoded();
        (w.key, value)
      })
      .collect();

    // Each upsert commits on its own; a failure leaves earlier rows in place.
    let outcome = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(UPSERT)?;
        let mut applied = Vec::with_capacity(pairs.len());
        for (index, (key, value)) in pairs.into_iter().enumerate() {
          let updated_at = Utc::now().trunc_subsecs(6);
          match stmt.execute(rusqlite::params![key, value, encode_dt(updated_at)]) {
            Ok(_) => applied.push(ConfigEntry { key, value, updated_at }),
            Err(e) => {
              return Ok(BatchOutcome { applied, failed: Some((index, key, e)) });
            }
          }
        }
        Ok(BatchOutcome { applied, failed: None })
      })
      .await;

    match outcome {
      Ok(BatchOutcome { applied, failed: None }) => Ok(applied),
      Ok(BatchOutcome { applied, failed: Some((index, key, e)) }) => Err(WriteFailure {
        index,
        key,
        applied,
        source: Error::Sqlite(e),
      }),
      Err(e) => Err(WriteFailure {
        index:   0,
        key:     first_key,
        applied: Vec::new(),
        source:  Error::Database(e),
      }),
    }
  }
}
