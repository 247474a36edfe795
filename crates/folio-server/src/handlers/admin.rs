//! Authenticated editing endpoints.

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use folio_core::{
  edit::apply_edits,
  keys::extract_keys,
  project::{Projection, project_schema},
  schema::PageSchema,
  stats::{CompletionStat, compute_stats},
  store::ConfigStore,
};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{AppState, auth::Authenticated, error::Error};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct PageSummary {
  pub slug:         String,
  pub title:        String,
  pub total_fields: usize,
}

/// `GET /admin/pages`
pub async fn list<S>(
  Authenticated(_): Authenticated,
  State(state): State<AppState<S>>,
) -> Json<Vec<PageSummary>>
where
  S: ConfigStore + Clone + Send + Sync + 'static,
{
  let pages = state
    .registry
    .schemas()
    .iter()
    .map(|schema| PageSummary {
      slug:         schema.slug.clone(),
      title:        schema.title.clone(),
      total_fields: extract_keys(schema).len(),
    })
    .collect();
  Json(pages)
}

// ─── Editor ───────────────────────────────────────────────────────────────────

/// Everything an editing surface needs to render its form.
#[derive(Debug, Serialize)]
pub struct EditorPayload {
  pub schema: PageSchema,
  pub values: Projection,
}

/// `GET /admin/pages/{slug}`
pub async fn editor<S>(
  Authenticated(_): Authenticated,
  State(state): State<AppState<S>>,
  Path(slug): Path<String>,
) -> Result<Json<EditorPayload>, Error>
where
  S: ConfigStore + Clone + Send + Sync + 'static,
{
  let schema = state.registry.get(&slug)?;
  let keys = extract_keys(schema);
  let rows = state.store.get_many(&keys).await.map_err(Error::store)?;
  Ok(Json(EditorPayload {
    values: project_schema(schema, &rows),
    schema: schema.clone(),
  }))
}

// ─── Save ─────────────────────────────────────────────────────────────────────

/// `PUT /admin/pages/{slug}`, body: `{"<key>": <value>, ...}`.
///
/// Entries are written in document order. Responds `200` when every entry
/// was written and `207 Multi-Status` when the batch stopped part-way; the
/// body lists the outcome of each entry either way.
pub async fn save<S>(
  Authenticated(editor): Authenticated,
  State(state): State<AppState<S>>,
  Path(slug): Path<String>,
  Json(body): Json<Map<String, Value>>,
) -> Result<Response, Error>
where
  S: ConfigStore + Clone + Send + Sync + 'static,
{
  let schema = state.registry.get(&slug)?;
  let report = apply_edits(
    state.store.as_ref(),
    schema,
    &editor,
    body.into_iter().collect(),
  )
  .await?;

  let status = if report.is_complete() {
    StatusCode::OK
  } else {
    StatusCode::MULTI_STATUS
  };
  Ok((status, Json(report)).into_response())
}

// ─── Stats ────────────────────────────────────────────────────────────────────

/// `GET /admin/stats`
pub async fn stats<S>(
  Authenticated(_): Authenticated,
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<CompletionStat>>, Error>
where
  S: ConfigStore + Clone + Send + Sync + 'static,
{
  let stats = compute_stats(&state.registry, state.store.as_ref())
    .await
    .map_err(Error::store)?;
  Ok(Json(stats))
}
