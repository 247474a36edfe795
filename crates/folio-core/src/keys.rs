//! Flattening a schema into the set of config keys it references.

use std::collections::BTreeSet;

use crate::schema::PageSchema;

/// A deduplicated set of config keys.
pub type KeySet = BTreeSet<String>;

/// Every config key referenced by `schema`, each once.
///
/// Membership does not depend on traversal order; a schema without fields
/// yields an empty set.
pub fn extract_keys(schema: &PageSchema) -> KeySet {
  schema.fields().into_iter().map(|f| f.key.clone()).collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::schema::{Field, FieldGroup, FieldKind};

  fn group(name: &str, keys: &[&str]) -> FieldGroup {
    let mut g = FieldGroup::new(name, name);
    g.fields = keys
      .iter()
      .map(|k| Field::new(*k, FieldKind::Text, *k))
      .collect();
    g
  }

  #[test]
  fn empty_schema_has_no_keys() {
    let schema = PageSchema::new("blank", "Blank");
    assert!(extract_keys(&schema).is_empty());

    let mut with_empty_groups = PageSchema::new("hollow", "Hollow");
    with_empty_groups.groups.push(group("hero", &[]));
    assert!(extract_keys(&with_empty_groups).is_empty());
  }

  #[test]
  fn nested_keys_are_collected_once() {
    let mut outer = group("hero", &["p.hero.title", "p.hero.subtitle"]);
    outer.groups.push(group("cta", &["p.hero.cta.label", "p.hero.title"]));

    let mut schema = PageSchema::new("p", "P");
    schema.groups.push(outer);
    schema.groups.push(group("footer", &["p.footer.note"]));

    let keys = extract_keys(&schema);
    assert_eq!(keys.len(), 4);
    assert!(keys.contains("p.hero.cta.label"));
    assert!(keys.contains("p.footer.note"));
  }

  #[test]
  fn key_set_ignores_declaration_order() {
    let mut a = PageSchema::new("p", "P");
    a.groups.push(group("g", &["x", "y", "z"]));

    let mut b = PageSchema::new("p", "P");
    b.groups.push(group("h", &["z"]));
    b.groups.push(group("g", &["y", "x"]));

    assert_eq!(extract_keys(&a), extract_keys(&b));
  }

  // ─── Properties ────────────────────────────────────────────────────────────

  use std::collections::HashSet;

  use proptest::prelude::*;

  /// Schemas whose groups may redeclare each other's keys.
  fn arb_schema() -> impl Strategy<Value = PageSchema> {
    let names = || prop::collection::vec("[a-d]", 0..4);
    prop::collection::vec((names(), names()), 0..4).prop_map(|groups| {
      let mut schema = PageSchema::new("p", "P");
      for (i, (names, nested)) in groups.into_iter().enumerate() {
        let prefix = format!("p.g{}", i % 2);
        let keys: Vec<String> = names.iter().map(|n| format!("{prefix}.{n}")).collect();
        let inner: Vec<String> = nested.iter().map(|n| format!("{prefix}.inner.{n}")).collect();

        let mut outer = group(&prefix, &keys.iter().map(String::as_str).collect::<Vec<_>>());
        outer.groups.push(group("inner", &inner.iter().map(String::as_str).collect::<Vec<_>>()));
        schema.groups.push(outer);
      }
      schema
    })
  }

  proptest! {
    #[test]
    fn key_set_holds_each_declared_key_once(schema in arb_schema()) {
      let keys = extract_keys(&schema);
      let fields = schema.fields();

      prop_assert_eq!(keys.is_empty(), fields.is_empty());
      for field in &fields {
        prop_assert!(keys.contains(&field.key));
      }
      let distinct: HashSet<&str> = fields.iter().map(|f| f.key.as_str()).collect();
      prop_assert_eq!(keys.len(), distinct.len());
    }
  }
}
