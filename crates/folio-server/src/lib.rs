//! HTTP layer for Folio.
//!
//! Exposes an axum [`Router`] serving public page documents and the
//! authenticated admin API, backed by any [`ConfigStore`].

pub mod auth;
pub mod error;
pub mod handlers;

pub use error::Error;

use std::sync::Arc;

use axum::{Router, routing::get};
use folio_core::{registry::SchemaRegistry, store::ConfigStore};
use tower_http::trace::TraceLayer;

use auth::AuthConfig;
use handlers::{admin, pages};

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: ConfigStore> {
  pub store:    Arc<S>,
  pub registry: Arc<SchemaRegistry>,
  pub auth:     Arc<AuthConfig>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the axum [`Router`] for the site and admin API.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: ConfigStore + Clone + Send + Sync + 'static,
{
  Router::new()
    .route("/pages/{slug}",       get(pages::content::<S>))
    .route("/admin/pages",        get(admin::list::<S>))
    .route("/admin/pages/{slug}", get(admin::editor::<S>).put(admin::save::<S>))
    .route("/admin/stats",        get(admin::stats::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
