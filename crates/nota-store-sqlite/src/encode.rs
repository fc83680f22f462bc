//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 strings (microsecond
//! precision, `Z` suffix) so that lexical order is chronological order. UUIDs
//! are stored as hyphenated lowercase strings.

use chrono::{DateTime, SecondsFormat, Utc};
use nota_core::{
  category::Category,
  note::{Note, NoteStatus, NoteWithCategory},
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NoteStatus ───────────────────────────────────────────────────────────────

pub fn encode_status(s: NoteStatus) -> &'static str {
  match s {
    NoteStatus::Active => "ACTIVE",
    NoteStatus::Inactive => "INACTIVE",
  }
}

pub fn decode_status(s: &str) -> Result<NoteStatus> {
  match s {
    "ACTIVE" => Ok(NoteStatus::Active),
    "INACTIVE" => Ok(NoteStatus::Inactive),
    other => Err(Error::Status(other.to_owned())),
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching [`RawNote::from_row`]; notes are always read joined
/// with their category.
pub const NOTE_COLUMNS: &str = "
  n.note_id, n.title, n.content, n.status, n.category_id,
  n.created_at, n.updated_at,
  c.category_id, c.name, c.color";

/// Raw strings read directly from a `notes` row left-joined with `categories`.
pub struct RawNote {
  // notes columns
  pub note_id:     String,
  pub title:       String,
  pub content:     Option<String>,
  pub status:      String,
  pub category_id: Option<String>,
  pub created_at:  String,
  pub updated_at:  String,
  // categories join
  pub category:    Option<RawCategory>,
}

impl RawNote {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    let joined_id: Option<String> = row.get(7)?;
    let category = match joined_id {
      Some(category_id) => Some(RawCategory {
        category_id,
        name:  row.get(8)?,
        color: row.get(9)?,
      }),
      None => None,
    };

    Ok(Self {
      note_id: row.get(0)?,
      title: row.get(1)?,
      content: row.get(2)?,
      status: row.get(3)?,
      category_id: row.get(4)?,
      created_at: row.get(5)?,
      updated_at: row.get(6)?,
      category,
    })
  }

  pub fn into_note(self) -> Result<NoteWithCategory> {
    let note = Note {
      id:          decode_uuid(&self.note_id)?,
      title:       self.title,
      content:     self.content,
      status:      decode_status(&self.status)?,
      category_id: self.category_id.as_deref().map(decode_uuid).transpose()?,
      created_at:  decode_dt(&self.created_at)?,
      updated_at:  decode_dt(&self.updated_at)?,
    };
    let category = self.category.map(RawCategory::into_category).transpose()?;

    Ok(NoteWithCategory { note, category })
  }
}

/// Raw strings read directly from a `categories` row.
pub struct RawCategory {
  pub category_id: String,
  pub name:        String,
  pub color:       String,
}

impl RawCategory {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      category_id: row.get(0)?,
      name:        row.get(1)?,
      color:       row.get(2)?,
    })
  }

  pub fn into_category(self) -> Result<Category> {
    Ok(Category {
      id:    decode_uuid(&self.category_id)?,
      name:  self.name,
      color: self.color,
    })
  }
}
