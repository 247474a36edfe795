//! Applying an editor's submission to the store.
//!
//! A submission is a flat `key → value` list for one page. It is validated
//! and coerced as a whole before anything is written; the write itself is
//! entry by entry and reported entry by entry.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
  Error, Result,
  schema::{Field, FieldKind, PageSchema},
  store::{ConfigStore, ConfigWrite, WriteFailure},
  value::{parse_bool, parse_number},
};

// ─── Types ───────────────────────────────────────────────────────────────────

/// An authenticated editor. Holding one is the precondition for writing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
  pub username: String,
}

/// What happened to one submitted entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EntryStatus {
  Written { updated_at: DateTime<Utc> },
  Failed { reason: String },
  /// An earlier entry failed, so this one was never sent to the store.
  NotAttempted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryOutcome {
  pub index:  usize,
  pub key:    String,
  #[serde(flatten)]
  pub status: EntryStatus,
}

/// Per-entry result of [`apply_edits`], in submission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditReport {
  pub slug:     String,
  pub editor:   String,
  pub outcomes: Vec<EntryOutcome>,
}

impl EditReport {
  /// `true` when every entry was written.
  pub fn is_complete(&self) -> bool {
    self
      .outcomes
      .iter()
      .all(|o| matches!(o.status, EntryStatus::Written { .. }))
  }

  pub fn failure(&self) -> Option<&EntryOutcome> {
    self
      .outcomes
      .iter()
      .find(|o| matches!(o.status, EntryStatus::Failed { .. }))
  }
}

// ─── Coercion ────────────────────────────────────────────────────────────────

/// Convert a submitted value into the stored JSON form for `field`.
pub fn coerce(field: &Field, value: Value) -> Result<Value> {
  let invalid = |reason: &str| Error::InvalidValue {
    key:    field.key.clone(),
    kind:   field.kind,
    reason: reason.to_owned(),
  };

  match (field.kind, value) {
    (_, Value::Null) => Ok(Value::String(String::new())),
    (_, Value::Array(_) | Value::Object(_)) => Err(invalid("expected a scalar")),

    (kind, Value::String(s)) if kind.is_textual() => Ok(Value::String(s)),
    (kind, other) if kind.is_textual() => Ok(Value::String(other.to_string())),

    (FieldKind::Boolean, Value::Bool(b)) => Ok(Value::Bool(b)),
    (FieldKind::Boolean, Value::String(s)) => parse_bool(&s)
      .map(Value::Bool)
      .ok_or_else(|| invalid("expected true or false")),
    (FieldKind::Boolean, Value::Number(n)) => match n.as_i64() {
      Some(0) => Ok(Value::Bool(false)),
      Some(1) => Ok(Value::Bool(true)),
      _ => Err(invalid("expected true or false")),
    },

    (FieldKind::Number, Value::Number(n)) => Ok(Value::Number(n)),
    (FieldKind::Number, Value::String(s)) if s.trim().is_empty() => {
      Ok(Value::String(String::new()))
    }
    (FieldKind::Number, Value::String(s)) => parse_number(&s)
      .map(Value::Number)
      .ok_or_else(|| invalid("expected a number")),
    (FieldKind::Number, Value::Bool(_)) => Err(invalid("expected a number")),

    // Textual kinds were handled above.
    (_, other) => Ok(other),
  }
}

// ─── Apply ───────────────────────────────────────────────────────────────────

/// Validate `submitted` against `schema`, then write it in order.
///
/// Unknown keys and uncoercible values are rejected before the store is
/// touched. A store failure does not make this an `Err`: it is recorded in
/// the report at the failing index, earlier entries stay written, and later
/// entries are marked as not attempted.
pub async fn apply_edits<S>(
  store: &S,
  schema: &PageSchema,
  editor: &Identity,
  submitted: Vec<(String, Value)>,
) -> Result<EditReport>
where
  S: ConfigStore,
{
  let fields: HashMap<&str, &Field> = schema
    .fields()
    .into_iter()
    .map(|f| (f.key.as_str(), f))
    .collect();

  let writes = submitted
    .into_iter()
    .map(|(key, value)| -> Result<ConfigWrite> {
      let field = fields.get(key.as_str()).ok_or_else(|| Error::UnknownKey {
        slug: schema.slug.clone(),
        key:  key.clone(),
      })?;
      Ok(ConfigWrite::new(key, coerce(field, value)?))
    })
    .collect::<Result<Vec<_>>>()?;

  let keys: Vec<String> = writes.iter().map(|w| w.key.clone()).collect();
  let mut report = EditReport {
    slug:     schema.slug.clone(),
    editor:   editor.username.clone(),
    outcomes: Vec::with_capacity(keys.len()),
  };
  if writes.is_empty() {
    return Ok(report);
  }

  let (applied, failure) = match store.set_many(writes).await {
    Ok(applied) => (applied, None),
    Err(WriteFailure { index, key, applied, source }) => {
      tracing::warn!(
        slug = %schema.slug,
        editor = %editor.username,
        index,
        key = %key,
        error = %source,
        "page save stopped at failing entry"
      );
      (applied, Some((index, source.to_string())))
    }
  };

  let written = applied.len();
  report.outcomes = keys
    .into_iter()
    .enumerate()
    .map(|(index, key)| {
      let status = if let Some(entry) = applied.get(index) {
        EntryStatus::Written { updated_at: entry.updated_at }
      } else {
        match &failure {
          Some((failed_at, reason)) if *failed_at == index => {
            EntryStatus::Failed { reason: reason.clone() }
          }
          _ => EntryStatus::NotAttempted,
        }
      };
      EntryOutcome { index, key, status }
    })
    .collect();

  if failure.is_none() {
    tracing::info!(
      slug = %schema.slug,
      editor = %editor.username,
      written,
      "page saved"
    );
  }

  Ok(report)
}
