//! Page schemas: the compiled-in shape of every editable page.
//!
//! A [`PageSchema`] is an ordered tree of [`FieldGroup`]s. Each [`Field`] owns
//! exactly one config key in the flat store namespace. Schemas are built once
//! at startup and never persisted.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

// ─── Field kinds ─────────────────────────────────────────────────────────────

/// The value type of a field; drives coercion on write and display on read.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FieldKind {
  Text,
  LongText,
  Url,
  /// A reference (path or URL) to an image asset; never the bytes.
  Image,
  Boolean,
  Number,
}

impl FieldKind {
  /// Kinds whose stored form is a JSON string.
  pub fn is_textual(self) -> bool {
    matches!(self, Self::Text | Self::LongText | Self::Url | Self::Image)
  }
}

// ─── Fields and groups ───────────────────────────────────────────────────────

/// The leaf unit of a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
  /// Globally unique dotted key, e.g. `contact.hero.title`.
  pub key:     String,
  /// Last segment of `key`; the property name in assembled page content.
  pub name:    String,
  pub label:   String,
  pub kind:    FieldKind,
  /// Display value used when the store holds no row for `key`.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub default: Option<String>,
}

impl Field {
  pub fn new(
    key: impl Into<String>,
    kind: FieldKind,
    label: impl Into<String>,
  ) -> Self {
    let key = key.into();
    let name = key
      .rsplit_once('.')
      .map_or(key.as_str(), |(_, last)| last)
      .to_owned();
    Self { key, name, label: label.into(), kind, default: None }
  }

  pub fn with_default(mut self, default: impl Into<String>) -> Self {
    self.default = Some(default.into());
    self
  }

  /// In-place variant of [`Field::with_default`] for use inside builders.
  pub fn default_to(&mut self, default: impl Into<String>) -> &mut Self {
    self.default = Some(default.into());
    self
  }
}

/// A named cluster of fields, possibly with nested sub-groups.
///
/// A `repeatable` group holds list-like content: each sub-group is one item
/// (an FAQ entry, a testimonial) and the group renders as an array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldGroup {
  pub name:       String,
  pub label:      String,
  #[serde(default)]
  pub repeatable: bool,
  #[serde(default)]
  pub fields:     Vec<Field>,
  #[serde(default)]
  pub groups:     Vec<FieldGroup>,
}

impl FieldGroup {
  pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
    Self {
      name:       name.into(),
      label:      label.into(),
      repeatable: false,
      fields:     Vec::new(),
      groups:     Vec::new(),
    }
  }

  /// Push this group's fields, then each sub-group's, in display order.
  fn collect_fields<'a>(&'a self, out: &mut Vec<&'a Field>) {
    out.extend(self.fields.iter());
    for group in &self.groups {
      group.collect_fields(out);
    }
  }
}

/// One editable page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSchema {
  pub slug:   String,
  pub title:  String,
  pub groups: Vec<FieldGroup>,
}

impl PageSchema {
  pub fn new(slug: impl Into<String>, title: impl Into<String>) -> Self {
    Self { slug: slug.into(), title: title.into(), groups: Vec::new() }
  }

  /// Build a schema whose field keys are derived from the group path:
  /// `<slug>.<group>[.<sub-group>…].<field>`.
  pub fn build(
    slug: impl Into<String>,
    title: impl Into<String>,
    build: impl FnOnce(&mut PageBuilder),
  ) -> Self {
    let mut builder = PageBuilder { schema: Self::new(slug, title) };
    build(&mut builder);
    builder.schema
  }

  /// Every field in depth-first display order. Duplicated keys appear once
  /// per declaration.
  pub fn fields(&self) -> Vec<&Field> {
    let mut out = Vec::new();
    for group in &self.groups {
      group.collect_fields(&mut out);
    }
    out
  }
}

// ─── Builders ────────────────────────────────────────────────────────────────

/// Top-level builder handed to [`PageSchema::build`].
pub struct PageBuilder {
  schema: PageSchema,
}

impl PageBuilder {
  pub fn group(
    &mut self,
    name: &str,
    label: &str,
    build: impl FnOnce(&mut GroupBuilder),
  ) -> &mut Self {
    let group = GroupBuilder::finish(&self.schema.slug, name, label, build);
    self.schema.groups.push(group);
    self
  }

  pub fn repeated(
    &mut self,
    name: &str,
    label: &str,
    count: usize,
    build: impl Fn(&mut GroupBuilder),
  ) -> &mut Self {
    let group = GroupBuilder::finish_repeated(&self.schema.slug, name, label, count, build);
    self.schema.groups.push(group);
    self
  }
}

/// Builder for one [`FieldGroup`]; keys are prefixed with the group path.
pub struct GroupBuilder {
  prefix: String,
  group:  FieldGroup,
}

impl GroupBuilder {
  fn finish(
    parent: &str,
    name: &str,
    label: &str,
    build: impl FnOnce(&mut GroupBuilder),
  ) -> FieldGroup {
    let mut builder = GroupBuilder {
      prefix: format!("{parent}.{name}"),
      group:  FieldGroup::new(name, label),
    };
    build(&mut builder);
    builder.group
  }

  fn finish_repeated(
    parent: &str,
    name: &str,
    label: &str,
    count: usize,
    build: impl Fn(&mut GroupBuilder),
  ) -> FieldGroup {
    let prefix = format!("{parent}.{name}");
    let mut group = FieldGroup::new(name, label);
    group.repeatable = true;
    group.groups = (0..count)
      .map(|i| {
        let item_label = format!("{label} {}", i + 1);
        Self::finish(&prefix, &i.to_string(), &item_label, &build)
      })
      .collect();
    group
  }

  pub fn field(&mut self, name: &str, kind: FieldKind, label: &str) -> &mut Field {
    let key = format!("{}.{name}", self.prefix);
    self.group.fields.push(Field::new(key, kind, label));
    let last = self.group.fields.len() - 1;
    &mut self.group.fields[last]
  }

  pub fn text(&mut self, name: &str, label: &str) -> &mut Field {
    self.field(name, FieldKind::Text, label)
  }

  pub fn long_text(&mut self, name: &str, label: &str) -> &mut Field {
    self.field(name, FieldKind::LongText, label)
  }

  pub fn url(&mut self, name: &str, label: &str) -> &mut Field {
    self.field(name, FieldKind::Url, label)
  }

  pub fn image(&mut self, name: &str, label: &str) -> &mut Field {
    self.field(name, FieldKind::Image, label)
  }

  pub fn boolean(&mut self, name: &str, label: &str) -> &mut Field {
    self.field(name, FieldKind::Boolean, label)
  }

  pub fn number(&mut self, name: &str, label: &str) -> &mut Field {
    self.field(name, FieldKind::Number, label)
  }

  pub fn group(
    &mut self,
    name: &str,
    label: &str,
    build: impl FnOnce(&mut GroupBuilder),
  ) -> &mut Self {
    let group = Self::finish(&self.prefix, name, label, build);
    self.group.groups.push(group);
    self
  }

  pub fn repeated(
    &mut self,
    name: &str,
    label: &str,
    count: usize,
    build: impl Fn(&mut GroupBuilder),
  ) -> &mut Self {
    let group = Self::finish_repeated(&self.prefix, name, label, count, build);
    self.group.groups.push(group);
    self
  }
}
