//! Reassembly of flat projected values into a nested page document.
//!
//! The document mirrors the schema tree: each group becomes an object keyed
//! by field and sub-group name, and repeatable groups become arrays of their
//! non-empty items.

use serde_json::{Map, Value};

use crate::{
  project::Projection,
  schema::{Field, FieldGroup, FieldKind, PageSchema},
  value::{parse_bool, parse_number},
};

pub fn assemble(schema: &PageSchema, values: &Projection) -> Value {
  let page = schema
    .groups
    .iter()
    .map(|group| (group.name.clone(), assemble_group(group, values)))
    .collect::<Map<_, _>>();
  Value::Object(page)
}

fn assemble_group(group: &FieldGroup, values: &Projection) -> Value {
  if group.repeatable {
    let items = group
      .groups
      .iter()
      .filter(|item| has_content(item, values))
      .map(|item| assemble_group(item, values))
      .collect();
    return Value::Array(items);
  }

  let mut object = Map::new();
  for field in &group.fields {
    object.insert(field.name.clone(), field_value(field, values));
  }
  for sub in &group.groups {
    object.insert(sub.name.clone(), assemble_group(sub, values));
  }
  Value::Object(object)
}

fn has_content(group: &FieldGroup, values: &Projection) -> bool {
  group
    .fields
    .iter()
    .any(|f| values.get(&f.key).is_some_and(|v| !v.is_empty()))
    || group.groups.iter().any(|g| has_content(g, values))
}

fn field_value(field: &Field, values: &Projection) -> Value {
  let text = values.get(&field.key).map(String::as_str).unwrap_or_default();
  match field.kind {
    FieldKind::Boolean => parse_bool(text).map_or_else(|| text.into(), Value::Bool),
    FieldKind::Number if text.is_empty() => Value::Null,
    FieldKind::Number => parse_number(text).map_or_else(|| text.into(), Value::Number),
    _ => text.into(),
  }
}
