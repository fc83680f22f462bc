//! Error type for `nota-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("unknown note status in database: {0:?}")]
  Status(String),

  #[error("note not found: {0}")]
  NoteNotFound(uuid::Uuid),

  #[error("category not found: {0}")]
  CategoryNotFound(uuid::Uuid),

  /// A note write referenced a category that does not exist.
  #[error("unknown category: {0}")]
  UnknownCategory(uuid::Uuid),
}

impl From<Error> for nota_core::Error {
  fn from(e: Error) -> Self {
    match e {
      Error::NoteNotFound(id) => Self::NoteNotFound(id),
      Error::CategoryNotFound(id) => Self::CategoryNotFound(id),
      Error::UnknownCategory(id) => Self::UnknownCategory(id),
      other => Self::Store(Box::new(other)),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
