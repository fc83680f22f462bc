//! The service layer: validation and normalisation in front of a
//! [`NoteStore`].
//!
//! Rules enforced here rather than in the store:
//!
//! - `title`, `name`, and `color` must be non-empty after trimming and are
//!   stored trimmed.
//! - note `content` that is empty or whitespace-only is stored as `null`.
//! - a missing row is an error ([`Error::NoteNotFound`],
//!   [`Error::CategoryNotFound`]), never an empty success.

use uuid::Uuid;

use crate::{
  Error, Result,
  category::{Category, CategoryPatch, NewCategory},
  note::{NewNote, NotePatch, NoteStatus, NoteWithCategory},
  store::NoteStore,
};

const TITLE_REQUIRED: &str = "Title is required.";
const CATEGORY_FIELDS_REQUIRED: &str = "Name and Color are required.";

fn required(value: String, message: &'static str) -> Result<String> {
  let trimmed = value.trim();
  if trimmed.is_empty() {
    return Err(Error::Validation(message));
  }
  Ok(trimmed.to_owned())
}

fn optional_text(value: Option<String>) -> Option<String> {
  value.filter(|v| !v.trim().is_empty())
}

// ─── Notes ───────────────────────────────────────────────────────────────────

pub async fn list_notes<S: NoteStore>(
  store: &S,
  status: NoteStatus,
) -> Result<Vec<NoteWithCategory>> {
  store.list_notes(status).await.map_err(Into::into)
}

pub async fn get_note<S: NoteStore>(store: &S, id: Uuid) -> Result<NoteWithCategory> {
  store
    .get_note(id)
    .await
    .map_err(Into::<Error>::into)?
    .ok_or(Error::NoteNotFound(id))
}

pub async fn create_note<S: NoteStore>(
  store: &S,
  input: NewNote,
) -> Result<NoteWithCategory> {
  let input = NewNote {
    title:       required(input.title, TITLE_REQUIRED)?,
    content:     optional_text(input.content),
    category_id: input.category_id,
  };
  store.insert_note(input).await.map_err(Into::into)
}

pub async fn update_note<S: NoteStore>(
  store: &S,
  id: Uuid,
  patch: NotePatch,
) -> Result<NoteWithCategory> {
  let patch = NotePatch {
    title:       patch
      .title
      .map(|t| required(t, TITLE_REQUIRED))
      .transpose()?,
    content:     patch.content.map(optional_text),
    category_id: patch.category_id,
    status:      patch.status,
  };
  store.update_note(id, patch).await.map_err(Into::into)
}

pub async fn delete_note<S: NoteStore>(store: &S, id: Uuid) -> Result<NoteWithCategory> {
  store.delete_note(id).await.map_err(Into::into)
}

// ─── Categories ──────────────────────────────────────────────────────────────

pub async fn list_categories<S: NoteStore>(store: &S) -> Result<Vec<Category>> {
  store.list_categories().await.map_err(Into::into)
}

pub async fn get_category<S: NoteStore>(store: &S, id: Uuid) -> Result<Category> {
  store
    .get_category(id)
    .await
    .map_err(Into::<Error>::into)?
    .ok_or(Error::CategoryNotFound(id))
}

pub async fn create_category<S: NoteStore>(
  store: &S,
  input: NewCategory,
) -> Result<Category> {
  let input = NewCategory {
    name:  required(input.name, CATEGORY_FIELDS_REQUIRED)?,
    color: required(input.color, CATEGORY_FIELDS_REQUIRED)?,
  };
  store.insert_category(input).await.map_err(Into::into)
}

pub async fn update_category<S: NoteStore>(
  store: &S,
  id: Uuid,
  patch: CategoryPatch,
) -> Result<Category> {
  let patch = CategoryPatch {
    name:  patch
      .name
      .map(|n| required(n, CATEGORY_FIELDS_REQUIRED))
      .transpose()?,
    color: patch
      .color
      .map(|c| required(c, CATEGORY_FIELDS_REQUIRED))
      .transpose()?,
  };
  store.update_category(id, patch).await.map_err(Into::into)
}

pub async fn delete_category<S: NoteStore>(store: &S, id: Uuid) -> Result<Category> {
  store.delete_category(id).await.map_err(Into::into)
}

#[cfg(test)]
mod tests {
  use std::sync::Mutex;

  use chrono::Utc;

  use super::*;
  use crate::note::Note;

  /// Records what reached the store so tests can assert on normalisation.
  #[derive(Default)]
  struct RecordingStore {
    notes:      Mutex<Vec<Note>>,
    categories: Mutex<Vec<Category>>,
  }

  impl RecordingStore {
    fn joined(&self, note: Note) -> NoteWithCategory {
      let category = note.category_id.and_then(|cid| {
        self.categories.lock().unwrap().iter().find(|c| c.id == cid).cloned()
      });
      NoteWithCategory { note, category }
    }
  }

  impl NoteStore for RecordingStore {
    type Error = Error;

    async fn list_notes(&self, status: NoteStatus) -> Result<Vec<NoteWithCategory>> {
      let notes: Vec<Note> = self
        .notes
        .lock()
        .unwrap()
        .iter()
        .filter(|n| n.status == status)
        .cloned()
        .collect();
      Ok(notes.into_iter().map(|n| self.joined(n)).collect())
    }

    async fn get_note(&self, id: Uuid) -> Result<Option<NoteWithCategory>> {
      let note = self.notes.lock().unwrap().iter().find(|n| n.id == id).cloned();
      Ok(note.map(|n| self.joined(n)))
    }

    async fn insert_note(&self, input: NewNote) -> Result<NoteWithCategory> {
      let now = Utc::now();
      let note = Note {
        id:          Uuid::new_v4(),
        title:       input.title,
        content:     input.content,
        status:      NoteStatus::Active,
        category_id: input.category_id,
        created_at:  now,
        updated_at:  now,
      };
      self.notes.lock().unwrap().push(note.clone());
      Ok(self.joined(note))
    }

    async fn update_note(&self, id: Uuid, patch: NotePatch) -> Result<NoteWithCategory> {
      let note = {
        let mut notes = self.notes.lock().unwrap();
        let note = notes
          .iter_mut()
          .find(|n| n.id == id)
          .ok_or(Error::NoteNotFound(id))?;
        if let Some(title) = patch.title {
          note.title = title;
        }
        if let Some(content) = patch.content {
          note.content = content;
        }
        if let Some(category_id) = patch.category_id {
          note.category_id = category_id;
        }
        if let Some(status) = patch.status {
          note.status = status;
        }
        note.clone()
      };
      Ok(self.joined(note))
    }

    async fn delete_note(&self, id: Uuid) -> Result<NoteWithCategory> {
      let note = {
        let mut notes = self.notes.lock().unwrap();
        let pos = notes
          .iter()
          .position(|n| n.id == id)
          .ok_or(Error::NoteNotFound(id))?;
        notes.remove(pos)
      };
      Ok(self.joined(note))
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
      Ok(self.categories.lock().unwrap().clone())
    }

    async fn get_category(&self, id: Uuid) -> Result<Option<Category>> {
      Ok(self.categories.lock().unwrap().iter().find(|c| c.id == id).cloned())
    }

    async fn insert_category(&self, input: NewCategory) -> Result<Category> {
      let category = Category { id: Uuid::new_v4(), name: input.name, color: input.color };
      self.categories.lock().unwrap().push(category.clone());
      Ok(category)
    }

    async fn update_category(&self, id: Uuid, patch: CategoryPatch) -> Result<Category> {
      let mut categories = self.categories.lock().unwrap();
      let category = categories
        .iter_mut()
        .find(|c| c.id == id)
        .ok_or(Error::CategoryNotFound(id))?;
      if let Some(name) = patch.name {
        category.name = name;
      }
      if let Some(color) = patch.color {
        category.color = color;
      }
      Ok(category.clone())
    }

    async fn delete_category(&self, id: Uuid) -> Result<Category> {
      let mut categories = self.categories.lock().unwrap();
      let pos = categories
        .iter()
        .position(|c| c.id == id)
        .ok_or(Error::CategoryNotFound(id))?;
      Ok(categories.remove(pos))
    }
  }

  #[tokio::test]
  async fn create_note_rejects_blank_title() {
    let store = RecordingStore::default();
    for title in ["", "   ", "\t\n"] {
      let err = create_note(&store, NewNote::new(title)).await.unwrap_err();
      assert!(matches!(err, Error::Validation(TITLE_REQUIRED)));
    }
    assert!(store.notes.lock().unwrap().is_empty());
  }

  #[tokio::test]
  async fn create_note_defaults_optional_fields() {
    let store = RecordingStore::default();
    let input = NewNote {
      title:       "  Buy milk ".into(),
      content:     Some("   ".into()),
      category_id: None,
    };
    let created = create_note(&store, input).await.unwrap();
    assert_eq!(created.note.title, "Buy milk");
    assert_eq!(created.note.content, None);
    assert_eq!(created.note.category_id, None);
    assert_eq!(created.note.status, NoteStatus::Active);
    assert!(created.category.is_none());
  }

  #[tokio::test]
  async fn update_note_rejects_blank_title_but_allows_omitting_it() {
    let store = RecordingStore::default();
    let created = create_note(&store, NewNote::new("a")).await.unwrap();
    let id = created.note.id;

    let blank = NotePatch { title: Some(" ".into()), ..NotePatch::default() };
    assert!(matches!(
      update_note(&store, id, blank).await,
      Err(Error::Validation(_))
    ));

    let status_only = NotePatch::status(NoteStatus::Inactive);
    let updated = update_note(&store, id, status_only).await.unwrap();
    assert_eq!(updated.note.title, "a");
    assert_eq!(updated.note.status, NoteStatus::Inactive);
  }

  #[tokio::test]
  async fn update_note_normalises_empty_content_to_null() {
    let store = RecordingStore::default();
    let mut input = NewNote::new("a");
    input.content = Some("body".into());
    let created = create_note(&store, input).await.unwrap();

    let patch = NotePatch { content: Some(Some(String::new())), ..NotePatch::default() };
    let updated = update_note(&store, created.note.id, patch).await.unwrap();
    assert_eq!(updated.note.content, None);
  }

  #[tokio::test]
  async fn get_missing_note_is_not_found() {
    let store = RecordingStore::default();
    let id = Uuid::new_v4();
    assert!(matches!(get_note(&store, id).await, Err(Error::NoteNotFound(x)) if x == id));
  }

  #[tokio::test]
  async fn create_category_requires_name_and_color() {
    let store = RecordingStore::default();
    for (name, color) in [("", "#fff"), ("Work", ""), (" ", " ")] {
      let err = create_category(&store, NewCategory::new(name, color))
        .await
        .unwrap_err();
      assert!(matches!(err, Error::Validation(CATEGORY_FIELDS_REQUIRED)));
    }

    let created = create_category(&store, NewCategory::new("Work", "#ff0000"))
      .await
      .unwrap();
    assert_eq!(created.name, "Work");
    assert_eq!(created.color, "#ff0000");
    assert_eq!(store.categories.lock().unwrap().len(), 1);
  }

  #[tokio::test]
  async fn update_category_rejects_blank_fields() {
    let store = RecordingStore::default();
    let created = create_category(&store, NewCategory::new("Work", "#ff0000"))
      .await
      .unwrap();
    let patch = CategoryPatch { color: Some(String::new()), ..CategoryPatch::default() };
    assert!(matches!(
      update_category(&store, created.id, patch).await,
      Err(Error::Validation(_))
    ));

    let rename = CategoryPatch { name: Some("Home".into()), ..CategoryPatch::default() };
    let renamed = update_category(&store, created.id, rename).await.unwrap();
    assert_eq!(renamed.name, "Home");
    assert_eq!(renamed.color, "#ff0000");
  }
}
