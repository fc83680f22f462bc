//! Error types for `nota-core`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  /// A required field was missing, empty, or whitespace-only.
  #[error("validation failed: {0}")]
  Validation(&'static str),

  #[error("note not found: {0}")]
  NoteNotFound(Uuid),

  #[error("category not found: {0}")]
  CategoryNotFound(Uuid),

  /// A note referenced a category that does not exist.
  #[error("note references unknown category: {0}")]
  UnknownCategory(Uuid),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
