//! Public, read-only page content.

use axum::{
  Json,
  extract::{Path, State},
};
use folio_core::{
  content::assemble,
  keys::extract_keys,
  project::project_schema,
  store::ConfigStore,
};
use serde_json::Value;

use crate::{AppState, error::Error};

/// `GET /pages/{slug}`
pub async fn content<S>(
  State(state): State<AppState<S>>,
  Path(slug): Path<String>,
) -> Result<Json<Value>, Error>
where
  S: ConfigStore + Clone + Send + Sync + 'static,
{
  let schema = state.registry.get(&slug)?;
  let keys = extract_keys(schema);
  let rows = state.store.get_many(&keys).await.map_err(Error::store)?;
  let values = project_schema(schema, &rows);
  Ok(Json(assemble(schema, &values)))
}
