//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings.

use chrono::{DateTime, SecondsFormat, Utc};
use folio_core::store::ConfigEntry;

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

/// Fixed-width so that lexical order in SQL matches chronological order.
pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `site_config` row.
pub struct RawEntry {
  pub key:        String,
  pub value:      String,
  pub updated_at: String,
}

impl RawEntry {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      key:        row.get(0)?,
      value:      row.get(1)?,
      updated_at: row.get(2)?,
    })
  }

  pub fn into_entry(self) -> Result<ConfigEntry> {
    Ok(ConfigEntry {
      updated_at: decode_dt(&self.updated_at)?,
      key:        self.key,
      value:      self.value,
    })
  }
}
