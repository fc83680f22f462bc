//! JSON REST API for Nota.
//!
//! Exposes an axum [`Router`] backed by any [`nota_core::store::NoteStore`].
//! CORS, tracing, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = nota_api::api_router(Arc::new(store));
//! ```

pub mod categories;
pub mod error;
pub mod notes;

use std::sync::Arc;

use axum::{
  Json, Router,
  routing::{get, put},
};
use nota_core::store::NoteStore;
use serde_json::{Value, json};

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: NoteStore + 'static,
{
  Router::new()
    .route("/", get(health))
    // Notes
    .route(
      "/notes",
      get(notes::list::<S>)
        .post(notes::create::<S>)
        .put(notes::missing_id)
        .delete(notes::missing_id),
    )
    .route(
      "/notes/{id}",
      get(notes::get_one::<S>)
        .put(notes::update::<S>)
        .delete(notes::delete::<S>),
    )
    .route("/notes/", put(notes::missing_id).delete(notes::missing_id))
    // Categories
    .route(
      "/categories",
      get(categories::list::<S>)
        .post(categories::create::<S>)
        .put(categories::missing_id)
        .delete(categories::missing_id),
    )
    .route(
      "/categories/{id}",
      get(categories::get_one::<S>)
        .put(categories::update::<S>)
        .delete(categories::delete::<S>),
    )
    .route(
      "/categories/",
      put(categories::missing_id).delete(categories::missing_id),
    )
    .with_state(store)
}

/// `GET /`: liveness probe.
async fn health() -> Json<Value> {
  Json(json!({ "status": "ok", "message": "Nota API is running" }))
}
