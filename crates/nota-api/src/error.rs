//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every error body has the shape `{"message": "<static string>"}`. The
//! underlying cause is logged here and never sent to the client.

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection, QueryRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// A mutating route was called without the path id, e.g. `PUT /notes`.
  #[error("{0}")]
  MissingId(&'static str),

  #[error("{0}")]
  BadRequest(&'static str),

  #[error("{0}")]
  NotFound(&'static str),

  #[error("malformed request body: {0}")]
  MalformedBody(#[from] JsonRejection),

  /// The list filter could not be read, e.g. a repeated `status` key.
  #[error("invalid query string: {0}")]
  InvalidQuery(#[from] QueryRejection),

  /// The path id could not be extracted at all. Answered like an unknown id.
  #[error("invalid path: {source}")]
  InvalidPath {
    message: &'static str,
    #[source]
    source:  PathRejection,
  },

  /// A service call failed. `context` is the static message used when the
  /// cause is a backend failure.
  #[error("{context}: {source}")]
  Service {
    context: &'static str,
    #[source]
    source:  nota_core::Error,
  },
}

impl ApiError {
  fn status_and_message(&self) -> (StatusCode, &'static str) {
    use nota_core::Error as E;

    match self {
      ApiError::MissingId(m) | ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, *m),
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, *m),
      ApiError::MalformedBody(_) => (StatusCode::BAD_REQUEST, "Malformed request body"),
      ApiError::InvalidQuery(_) => (StatusCode::BAD_REQUEST, "Invalid note status"),
      ApiError::InvalidPath { message, .. } => (StatusCode::NOT_FOUND, *message),
      ApiError::Service { context, source } => match source {
        E::Validation(m) => (StatusCode::BAD_REQUEST, *m),
        E::NoteNotFound(_) => (StatusCode::NOT_FOUND, "Note not found"),
        E::CategoryNotFound(_) => (StatusCode::NOT_FOUND, "Category not found"),
        E::UnknownCategory(_) => (StatusCode::BAD_REQUEST, "Category does not exist"),
        E::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, *context),
      },
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = self.status_and_message();
    if status.is_server_error() {
      tracing::error!(error = %self, "request failed");
    } else {
      tracing::warn!(error = %self, "request rejected");
    }
    (status, Json(json!({ "message": message }))).into_response()
  }
}

/// Attach the static failure message of an operation to a service result.
pub trait ResultExt<T> {
  fn context(self, context: &'static str) -> Result<T, ApiError>;
}

impl<T> ResultExt<T> for nota_core::Result<T> {
  fn context(self, context: &'static str) -> Result<T, ApiError> {
    self.map_err(|source| ApiError::Service { context, source })
  }
}
