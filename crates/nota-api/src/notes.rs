//! Handlers for `/notes` endpoints.
//!
//! | Method   | Path         | Notes |
//! |----------|--------------|-------|
//! | `GET`    | `/notes`     | `?status=ACTIVE\|INACTIVE`, defaults to `ACTIVE` |
//! | `POST`   | `/notes`     | Body: [`NewNote`]; returns 201 + joined note |
//! | `GET`    | `/notes/:id` | 404 if not found |
//! | `PUT`    | `/notes/:id` | Body: [`NotePatch`]; archiving is a `status` change |
//! | `DELETE` | `/notes/:id` | Returns the deleted note |

use std::sync::Arc;

use axum::{
  Json,
  extract::{
    Path, Query, State,
    rejection::{JsonRejection, PathRejection, QueryRejection},
  },
  http::StatusCode,
  response::IntoResponse,
};
use nota_core::{
  note::{NewNote, NotePatch, NoteStatus, NoteWithCategory},
  service,
  store::NoteStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{ApiError, ResultExt as _};

const NOT_FOUND: &str = "Note not found";

fn parse_id(path: Result<Path<String>, PathRejection>) -> Result<Uuid, ApiError> {
  let Path(raw) = path.map_err(|source| ApiError::InvalidPath { message: NOT_FOUND, source })?;
  Uuid::parse_str(&raw).map_err(|_| ApiError::NotFound(NOT_FOUND))
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  /// `ACTIVE` or `INACTIVE`, case-insensitive.
  pub status: Option<String>,
}

impl ListParams {
  fn status(&self) -> Result<NoteStatus, ApiError> {
    self
      .status
      .as_deref()
      .map(str::parse::<NoteStatus>)
      .transpose()
      .map(Option::unwrap_or_default)
      .map_err(|_| ApiError::BadRequest("Invalid note status"))
  }
}

/// `GET /notes[?status=<status>]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<NoteWithCategory>>, ApiError>
where
  S: NoteStore,
{
  let Query(params) = params?;
  let status = params.status()?;
  let notes = service::list_notes(&*store, status)
    .await
    .context("Error listing notes")?;
  Ok(Json(notes))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /notes/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  id: Result<Path<String>, PathRejection>,
) -> Result<Json<NoteWithCategory>, ApiError>
where
  S: NoteStore,
{
  let id = parse_id(id)?;
  let note = service::get_note(&*store, id)
    .await
    .context("Error fetching note")?;
  Ok(Json(note))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /notes`: body: `{"title": "...", "content"?: "...", "categoryId"?: "..."}`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<NewNote>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: NoteStore,
{
  let Json(input) = body?;
  let note = service::create_note(&*store, input)
    .await
    .context("Error creating note")?;
  Ok((StatusCode::CREATED, Json(note)))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /notes/:id`: any subset of `title`, `content`, `categoryId`, `status`.
pub async fn update<S>(
  State(store): State<Arc<S>>,
  id: Result<Path<String>, PathRejection>,
  body: Result<Json<NotePatch>, JsonRejection>,
) -> Result<Json<NoteWithCategory>, ApiError>
where
  S: NoteStore,
{
  let id = parse_id(id)?;
  let Json(patch) = body?;
  let note = service::update_note(&*store, id, patch)
    .await
    .context("Error updating note")?;
  Ok(Json(note))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /notes/:id`
pub async fn delete<S>(
  State(store): State<Arc<S>>,
  id: Result<Path<String>, PathRejection>,
) -> Result<Json<NoteWithCategory>, ApiError>
where
  S: NoteStore,
{
  let id = parse_id(id)?;
  let note = service::delete_note(&*store, id)
    .await
    .context("Error deleting note")?;
  Ok(Json(note))
}

/// `PUT /notes` and `DELETE /notes`: the id segment is missing.
pub async fn missing_id() -> ApiError { ApiError::MissingId("Missing note id") }
