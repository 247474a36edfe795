//! Projection of stored rows into flat, display-ready editor values.

use std::collections::BTreeMap;

use crate::{
  keys::KeySet,
  schema::{FieldKind, PageSchema},
  store::Rows,
  value::{display_value, parse_bool},
};

/// Display values keyed by config key.
pub type Projection = BTreeMap<String, String>;

/// Map every key in `keys` to its display value.
///
/// The result is total over `keys`: a key with no row maps to `""`. Rows for
/// keys outside `keys` are ignored.
pub fn project(keys: &KeySet, rows: &Rows) -> Projection {
  keys
    .iter()
    .map(|key| {
      let shown = rows
        .get(key)
        .map(|entry| display_value(&entry.value))
        .unwrap_or_default();
      (key.clone(), shown)
    })
    .collect()
}

/// Like [`project`] over the schema's keys, but aware of each field's kind
/// and declared default.
///
/// A key with no row takes the field default. A row that exists but is
/// unfilled stays empty: the editor cleared it on purpose.
pub fn project_schema(schema: &PageSchema, rows: &Rows) -> Projection {
  let mut out = Projection::new();
  for field in schema.fields() {
    if out.contains_key(&field.key) {
      continue;
    }
    let shown = match rows.get(&field.key) {
      Some(entry) => normalize(field.kind, display_value(&entry.value)),
      None => field.default.clone().unwrap_or_default(),
    };
    out.insert(field.key.clone(), shown);
  }
  out
}

/// Canonical display text for a kind; booleans collapse to `true`/`false`.
fn normalize(kind: FieldKind, shown: String) -> String {
  match kind {
    FieldKind::Boolean if !shown.is_empty() => match parse_bool(&shown) {
      Some(b) => b.to_string(),
      None => shown,
    },
    _ => shown,
  }
}
