//! The process-wide, read-only table of page schemas.

use std::collections::HashMap;

use crate::{Error, Result, schema::PageSchema};

/// Page schemas in registration order, looked up by slug.
///
/// Built once at startup and shared behind an `Arc`; there is no runtime
/// mutation.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
  schemas: Vec<PageSchema>,
  by_slug: HashMap<String, usize>,
}

impl SchemaRegistry {
  /// Register `schemas`, rejecting duplicate slugs and any config key that is
  /// declared more than once across the whole registry.
  pub fn new(schemas: Vec<PageSchema>) -> Result<Self> {
    let mut by_slug = HashMap::with_capacity(schemas.len());
    let mut seen_keys: HashMap<&str, &str> = HashMap::new();

    for (index, schema) in schemas.iter().enumerate() {
      if by_slug.insert(schema.slug.clone(), index).is_some() {
        return Err(Error::DuplicateSlug(schema.slug.clone()));
      }
      for field in schema.fields() {
        if seen_keys.insert(&field.key, &schema.slug).is_some() {
          return Err(Error::DuplicateKey {
            key:  field.key.clone(),
            slug: schema.slug.clone(),
          });
        }
      }
    }

    Ok(Self { schemas, by_slug })
  }

  pub fn get(&self, slug: &str) -> Result<&PageSchema> {
    self
      .by_slug
      .get(slug)
      .map(|&i| &self.schemas[i])
      .ok_or_else(|| Error::PageNotFound(slug.to_owned()))
  }

  /// Slugs in registration order.
  pub fn slugs(&self) -> impl Iterator<Item = &str> {
    self.schemas.iter().map(|s| s.slug.as_str())
  }

  pub fn schemas(&self) -> &[PageSchema] { &self.schemas }

  pub fn len(&self) -> usize { self.schemas.len() }

  pub fn is_empty(&self) -> bool { self.schemas.is_empty() }
}
