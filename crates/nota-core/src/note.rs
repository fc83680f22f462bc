//! Note types.
//!
//! A note is a user-authored item with a title, optional content, an optional
//! category, and a two-state archival status. Archiving is not a separate
//! operation: it is an ordinary update that flips [`NoteStatus`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use uuid::Uuid;

use crate::category::Category;

// ─── Status ──────────────────────────────────────────────────────────────────

/// Archival status of a note. `Active` notes are shown on the main board,
/// `Inactive` ones are archived.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  AsRefStr,
  Display,
  EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum NoteStatus {
  #[default]
  Active,
  Inactive,
}

impl NoteStatus {
  /// The opposite status; archiving and unarchiving are both a toggle.
  pub fn toggled(self) -> Self {
    match self {
      Self::Active => Self::Inactive,
      Self::Inactive => Self::Active,
    }
  }

  pub fn is_archived(self) -> bool { self == Self::Inactive }
}

// ─── Note ────────────────────────────────────────────────────────────────────

/// A persisted note row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
  pub id:          Uuid,
  pub title:       String,
  pub content:     Option<String>,
  pub status:      NoteStatus,
  pub category_id: Option<Uuid>,
  /// Server-assigned; never changes after creation.
  pub created_at:  DateTime<Utc>,
  pub updated_at:  DateTime<Utc>,
}

/// A note joined with the category it references, if any. This is the shape
/// every note read and write returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteWithCategory {
  #[serde(flatten)]
  pub note:     Note,
  pub category: Option<Category>,
}

// ─── Inputs ──────────────────────────────────────────────────────────────────

/// Input to note creation. `status` is not accepted; new notes are always
/// [`NoteStatus::Active`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNote {
  #[serde(default)]
  pub title:       String,
  #[serde(default)]
  pub content:     Option<String>,
  #[serde(default)]
  pub category_id: Option<Uuid>,
}

impl NewNote {
  pub fn new(title: impl Into<String>) -> Self {
    Self { title: title.into(), ..Self::default() }
  }
}

/// A partial update. `None` leaves a field untouched; for the nullable fields
/// `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotePatch {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub title:       Option<String>,
  #[serde(
    default,
    deserialize_with = "crate::nullable::deserialize",
    skip_serializing_if = "Option::is_none"
  )]
  pub content:     Option<Option<String>>,
  #[serde(
    default,
    deserialize_with = "crate::nullable::deserialize",
    skip_serializing_if = "Option::is_none"
  )]
  pub category_id: Option<Option<Uuid>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub status:      Option<NoteStatus>,
}

impl NotePatch {
  /// Only change the status.
  pub fn status(status: NoteStatus) -> Self {
    Self { status: Some(status), ..Self::default() }
  }

  /// A full update that restates every field of `note` and flips its
  /// status.
  pub fn toggle_status(note: &Note) -> Self {
    Self {
      title:       Some(note.title.clone()),
      content:     Some(note.content.clone()),
      category_id: Some(note.category_id),
      status:      Some(note.status.toggled()),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn status_wire_format_is_screaming_case() {
    assert_eq!(serde_json::to_string(&NoteStatus::Active).unwrap(), "\"ACTIVE\"");
    assert_eq!(NoteStatus::Inactive.as_ref(), "INACTIVE");
    assert_eq!("inactive".parse::<NoteStatus>().unwrap(), NoteStatus::Inactive);
    assert!("ARCHIVED".parse::<NoteStatus>().is_err());
  }

  #[test]
  fn toggle_twice_is_identity() {
    for s in [NoteStatus::Active, NoteStatus::Inactive] {
      assert_eq!(s.toggled().toggled(), s);
      assert_ne!(s.toggled(), s);
    }
  }

  #[test]
  fn patch_distinguishes_absent_from_null() {
    let absent: NotePatch = serde_json::from_str(r#"{"title":"x"}"#).unwrap();
    assert_eq!(absent.content, None);
    assert_eq!(absent.category_id, None);

    let cleared: NotePatch =
      serde_json::from_str(r#"{"content":null,"categoryId":null}"#).unwrap();
    assert_eq!(cleared.content, Some(None));
    assert_eq!(cleared.category_id, Some(None));
  }

  #[test]
  fn toggle_patch_restates_every_field() {
    let note = Note {
      id:          Uuid::new_v4(),
      title:       "Buy milk".into(),
      content:     None,
      status:      NoteStatus::Active,
      category_id: Some(Uuid::new_v4()),
      created_at:  Utc::now(),
      updated_at:  Utc::now(),
    };
    let patch = NotePatch::toggle_status(&note);
    let json = serde_json::to_value(&patch).unwrap();
    assert_eq!(json["title"], "Buy milk");
    assert!(json["content"].is_null());
    assert_eq!(json["categoryId"], note.category_id.unwrap().to_string());
    assert_eq!(json["status"], "INACTIVE");
  }

  #[test]
  fn joined_note_serialises_flat_with_nested_category() {
    let note = NoteWithCategory {
      note:     Note {
        id:          Uuid::nil(),
        title:       "t".into(),
        content:     None,
        status:      NoteStatus::Active,
        category_id: None,
        created_at:  Utc::now(),
        updated_at:  Utc::now(),
      },
      category: None,
    };
    let json = serde_json::to_value(&note).unwrap();
    assert_eq!(json["title"], "t");
    assert_eq!(json["status"], "ACTIVE");
    assert!(json["categoryId"].is_null());
    assert!(json.get("category").is_some_and(|c| c.is_null()));
  }
}
