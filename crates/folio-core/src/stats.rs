//! Per-page completion statistics for the admin dashboard.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  keys::extract_keys,
  registry::SchemaRegistry,
  schema::PageSchema,
  store::ConfigStore,
};

/// How much of a page has been filled in. Always computed fresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionStat {
  pub slug:          String,
  pub filled_fields: usize,
  pub total_fields:  usize,
  /// Latest `updated_at` among the page's rows; `None` if none exist.
  pub last_modified: Option<DateTime<Utc>>,
}

/// Completion of a single page.
pub async fn page_stat<S>(
  schema: &PageSchema,
  store: &S,
) -> Result<CompletionStat, S::Error>
where
  S: ConfigStore,
{
  let keys = extract_keys(schema);
  if keys.is_empty() {
    return Ok(CompletionStat {
      slug:          schema.slug.clone(),
      filled_fields: 0,
      total_fields:  0,
      last_modified: None,
    });
  }

  let rows = store.get_many(&keys).await?;
  let relevant = rows.values().filter(|e| keys.contains(&e.key));

  let mut filled = 0;
  let mut last_modified: Option<DateTime<Utc>> = None;
  for entry in relevant {
    if !entry.is_unfilled() {
      filled += 1;
    }
    last_modified = last_modified.max(Some(entry.updated_at));
  }

  Ok(CompletionStat {
    slug: schema.slug.clone(),
    filled_fields: filled,
    total_fields: keys.len(),
    last_modified,
  })
}

/// One [`CompletionStat`] per registered page, in registry order.
///
/// The first store error aborts the computation.
pub async fn compute_stats<S>(
  registry: &SchemaRegistry,
  store: &S,
) -> Result<Vec<CompletionStat>, S::Error>
where
  S: ConfigStore,
{
  let mut stats = Vec::with_capacity(registry.len());
  for schema in registry.schemas() {
    stats.push(page_stat(schema, store).await?);
  }
  Ok(stats)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    keys::KeySet,
    memory::MemoryStore,
    schema::{Field, FieldGroup, FieldKind},
  };

  fn flat(slug: &str, keys: &[&str]) -> PageSchema {
    let mut group = FieldGroup::new("main", "Main");
    group.fields = keys
      .iter()
      .map(|k| Field::new(*k, FieldKind::Text, *k))
      .collect();
    let mut schema = PageSchema::new(slug, slug);
    schema.groups.push(group);
    schema
  }

  #[tokio::test]
  async fn counts_only_filled_rows() {
    let store = MemoryStore::new();
    store.put_raw("a", r#""""#);
    store.put_raw("b", r#""Open""#);

    let stat = page_stat(&flat("hours", &["a", "b"]), &store).await.unwrap();
    assert_eq!(stat.filled_fields, 1);
    assert_eq!(stat.total_fields, 2);
    assert!(stat.last_modified.is_some());
  }

  #[tokio::test]
  async fn zero_field_page_reports_zero_totals() {
    let store = MemoryStore::offline();
    let stat = page_stat(&PageSchema::new("blank", "Blank"), &store)
      .await
      .unwrap();
    assert_eq!(stat, CompletionStat {
      slug:          "blank".into(),
      filled_fields: 0,
      total_fields:  0,
      last_modified: None,
    });
  }

  #[tokio::test]
  async fn literal_null_string_is_unfilled() {
    let store = MemoryStore::new();
    store.put_raw("a", r#""null""#);
    store.put_raw("b", "null");
    store.put_raw("c", r#""\"\"""#);

    let stat = page_stat(&flat("p", &["a", "b", "c"]), &store).await.unwrap();
    assert_eq!(stat.filled_fields, 0);
    assert_eq!(stat.total_fields, 3);
  }

  #[tokio::test]
  async fn page_without_rows_has_no_last_modified() {
    let store = MemoryStore::new();
    let stat = page_stat(&flat("p", &["a"]), &store).await.unwrap();
    assert_eq!(stat.filled_fields, 0);
    assert_eq!(stat.last_modified, None);
  }

  #[tokio::test]
  async fn last_modified_is_the_latest_write() {
    let store = MemoryStore::new();
    store.put_raw("a", r#""x""#);
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    store.put_raw("b", r#""y""#);

    let keys: KeySet = ["b".to_string()].into();
    let rows = store.get_many(&keys).await.unwrap();
    let stat = page_stat(&flat("p", &["a", "b"]), &store).await.unwrap();
    assert_eq!(stat.last_modified, Some(rows["b"].updated_at));
  }

  #[tokio::test]
  async fn stats_follow_registry_order() {
    let registry = SchemaRegistry::new(vec![
      flat("zeta", &["z1"]),
      flat("alpha", &["a1", "a2"]),
      PageSchema::new("empty", "Empty"),
    ])
    .unwrap();
    let store = MemoryStore::new();
    store.put_raw("a1", r#""x""#);
    store.put_raw("z1", r#""y""#);

    let stats = compute_stats(&registry, &store).await.unwrap();
    let slugs: Vec<&str> = stats.iter().map(|s| s.slug.as_str()).collect();
    assert_eq!(slugs, ["zeta", "alpha", "empty"]);
    assert!(stats.iter().all(|s| s.filled_fields <= s.total_fields));
    assert_eq!(stats[1].filled_fields, 1);
  }

  #[tokio::test]
  async fn rows_outside_the_page_are_ignored() {
    let store = MemoryStore::unfiltered();
    store.put_raw("a", r#""kept""#);
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    store.put_raw("other.hero.title", r#""Elsewhere""#);
    store.put_raw("other.hero.subtitle", r#""Also elsewhere""#);

    let keys: KeySet = ["a".to_string()].into();
    let rows = store.get_many(&keys).await.unwrap();
    assert_eq!(rows.len(), 3);

    let stat = page_stat(&flat("p", &["a", "b"]), &store).await.unwrap();
    assert_eq!(stat.filled_fields, 1);
    assert_eq!(stat.total_fields, 2);
    assert_eq!(stat.last_modified, Some(rows["a"].updated_at));
  }

  #[tokio::test]
  async fn store_errors_surface() {
    let registry = SchemaRegistry::new(vec![flat("p", &["a"])]).unwrap();
    let result = compute_stats(&registry, &MemoryStore::offline()).await;
    assert!(result.is_err());
  }

  // ─── Properties ────────────────────────────────────────────────────────────

  use proptest::prelude::*;

  fn arb_raw() -> impl Strategy<Value = String> {
    prop_oneof![
      Just(String::new()),
      Just(r#""""#.to_string()),
      Just("null".to_string()),
      Just(r#""null""#.to_string()),
      "[a-z]{1,4}".prop_map(|s| format!("{s:?}")),
      "[a-z]{1,4}",
    ]
  }

  proptest! {
    #[test]
    fn filled_never_exceeds_total(
      page_keys in prop::collection::btree_set("[a-f]", 0..6),
      stored in prop::collection::btree_map("[a-h]", arb_raw(), 0..8),
    ) {
      let names: Vec<&str> = page_keys.iter().map(String::as_str).collect();
      let schema = flat("p", &names);
      // Extra rows for keys outside the page must not count.
      let store = MemoryStore::unfiltered();
      for (key, raw) in &stored {
        store.put_raw(key, raw);
      }

      let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
      let stat = runtime.block_on(page_stat(&schema, &store)).unwrap();

      let expected = page_keys
        .iter()
        .filter(|k| !crate::value::is_unfilled(stored.get(*k).map(String::as_str)))
        .count();
      prop_assert_eq!(stat.total_fields, page_keys.len());
      prop_assert_eq!(stat.filled_fields, expected);
      prop_assert!(stat.filled_fields <= stat.total_fields);
    }
  }
}
