//! Handlers for `/categories` endpoints.
//!
//! | Method   | Path              | Notes |
//! |----------|-------------------|-------|
//! | `GET`    | `/categories`     | Insertion order |
//! | `POST`   | `/categories`     | Body: `{"name": "...", "color": "..."}` |
//! | `GET`    | `/categories/:id` | 404 if not found |
//! | `PUT`    | `/categories/:id` | Body: [`CategoryPatch`] |
//! | `DELETE` | `/categories/:id` | Notes in the category become uncategorised |

use std::sync::Arc;

use axum::{
  Json,
  extract::{
    Path, State,
    rejection::{JsonRejection, PathRejection},
  },
  http::StatusCode,
  response::IntoResponse,
};
use nota_core::{
  category::{Category, CategoryPatch, NewCategory},
  service,
  store::NoteStore,
};
use uuid::Uuid;

use crate::error::{ApiError, ResultExt as _};

const NOT_FOUND: &str = "Category not found";

fn parse_id(path: Result<Path<String>, PathRejection>) -> Result<Uuid, ApiError> {
  let Path(raw) = path.map_err(|source| ApiError::InvalidPath { message: NOT_FOUND, source })?;
  Uuid::parse_str(&raw).map_err(|_| ApiError::NotFound(NOT_FOUND))
}

/// `GET /categories`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<Category>>, ApiError>
where
  S: NoteStore,
{
  let categories = service::list_categories(&*store)
    .await
    .context("Error listing categories")?;
  Ok(Json(categories))
}

/// `GET /categories/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  id: Result<Path<String>, PathRejection>,
) -> Result<Json<Category>, ApiError>
where
  S: NoteStore,
{
  let id = parse_id(id)?;
  let category = service::get_category(&*store, id)
    .await
    .context("Error fetching category")?;
  Ok(Json(category))
}

/// `POST /categories`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<NewCategory>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: NoteStore,
{
  let Json(input) = body?;
  let category = service::create_category(&*store, input)
    .await
    .context("Error creating category")?;
  Ok((StatusCode::CREATED, Json(category)))
}

/// `PUT /categories/:id`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  id: Result<Path<String>, PathRejection>,
  body: Result<Json<CategoryPatch>, JsonRejection>,
) -> Result<Json<Category>, ApiError>
where
  S: NoteStore,
{
  let id = parse_id(id)?;
  let Json(patch) = body?;
  let category = service::update_category(&*store, id, patch)
    .await
    .context("Error updating category")?;
  Ok(Json(category))
}

/// `DELETE /categories/:id`
pub async fn delete<S>(
  State(store): State<Arc<S>>,
  id: Result<Path<String>, PathRejection>,
) -> Result<Json<Category>, ApiError>
where
  S: NoteStore,
{
  let id = parse_id(id)?;
  let category = service::delete_category(&*store, id)
    .await
    .context("Error deleting category")?;
  Ok(Json(category))
}

pub async fn missing_id() -> ApiError { ApiError::MissingId("Missing category id") }
