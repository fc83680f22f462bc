//! Category: a named, coloured tag attachable to notes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
  pub id:    Uuid,
  pub name:  String,
  /// Display colour token, e.g. `#ff0000`.
  pub color: String,
}

/// Input to category creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
  #[serde(default)]
  pub name:  String,
  #[serde(default)]
  pub color: String,
}

impl NewCategory {
  pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
    Self { name: name.into(), color: color.into() }
  }
}

/// A partial update; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPatch {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name:  Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub color: Option<String>,
}
