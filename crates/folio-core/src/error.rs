//! Error types for `folio-core`.

use thiserror::Error;

use crate::schema::FieldKind;

#[derive(Debug, Error)]
pub enum Error {
  #[error("page not found: {0}")]
  PageNotFound(String),

  #[error("page slug registered twice: {0}")]
  DuplicateSlug(String),

  #[error("config key {key:?} declared twice (second time by page {slug:?})")]
  DuplicateKey { key: String, slug: String },

  #[error("key {key:?} is not part of page {slug:?}")]
  UnknownKey { slug: String, key: String },

  #[error("invalid {kind} value for {key:?}: {reason}")]
  InvalidValue {
    key:    String,
    kind:   FieldKind,
    reason: String,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
