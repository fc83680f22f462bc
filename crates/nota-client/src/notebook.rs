//! [`Notebook`]: the client data layer.
//!
//! Reads go through the [`QueryCache`]; writes go straight to the API and, on
//! success only, invalidate the cache tags they affect. A failed mutation
//! leaves the cache untouched.

use nota_core::{
  category::{Category, CategoryPatch, NewCategory},
  note::{NewNote, Note, NotePatch, NoteStatus, NoteWithCategory},
};
use uuid::Uuid;

use crate::{
  cache::{Cached, Entity, QueryCache, QueryKey, Tag},
  client::{ApiClient, Result},
};

// ─── View state ───────────────────────────────────────────────────────────────

/// What the user is currently looking at: the active or archived board, and
/// optionally a single category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
  pub notes_status:    NoteStatus,
  pub category_filter: Option<Uuid>,
}

impl ViewState {
  pub fn toggle_notes_status(&mut self) { self.notes_status = self.notes_status.toggled(); }

  /// The subset of `notes` that passes the category filter.
  pub fn visible(&self, notes: Vec<NoteWithCategory>) -> Vec<NoteWithCategory> {
    match self.category_filter {
      None => notes,
      Some(category_id) => notes
        .into_iter()
        .filter(|n| n.note.category_id == Some(category_id))
        .collect(),
    }
  }
}

// ─── Notebook ─────────────────────────────────────────────────────────────────

pub struct Notebook {
  client:   ApiClient,
  cache:    QueryCache,
  pub view: ViewState,
}

/// Note rows embed their category, so category writes stale note queries too.
const CATEGORY_WRITE_TAGS: [Tag; 2] = [
  Tag { entity: Entity::Categories, id: None },
  Tag { entity: Entity::Notes, id: None },
];

const NOTE_WRITE_TAGS: [Tag; 1] = [Tag { entity: Entity::Notes, id: None }];

impl Notebook {
  pub fn new(client: ApiClient) -> Self {
    Self { client, cache: QueryCache::new(), view: ViewState::default() }
  }

  pub fn cache(&self) -> &QueryCache { &self.cache }

  fn settle<T>(&mut self, result: Result<T>, tags: &[Tag]) -> Result<T> {
    if result.is_ok() {
      let stale = self.cache.invalidate(tags);
      tracing::debug!(?stale, "invalidated cached queries");
    }
    result
  }

  // ── Queries ───────────────────────────────────────────────────────────────

  /// Notes with `status`, newest first.
  pub async fn notes(&mut self, status: NoteStatus) -> Result<Vec<NoteWithCategory>> {
    let key = QueryKey::NotesByStatus(status);
    if let Some(Cached::Notes(notes)) = self.cache.get(&key) {
      return Ok(notes.clone());
    }
    let notes = self.client.list_notes(status).await?;
    self.cache.insert(key, Cached::Notes(notes.clone()));
    Ok(notes)
  }

  /// Notes for the current [`ViewState`].
  pub async fn visible_notes(&mut self) -> Result<Vec<NoteWithCategory>> {
    let notes = self.notes(self.view.notes_status).await?;
    Ok(self.view.visible(notes))
  }

  pub async fn note(&mut self, id: Uuid) -> Result<NoteWithCategory> {
    let key = QueryKey::Note(id);
    if let Some(Cached::Note(note)) = self.cache.get(&key) {
      return Ok(note.clone());
    }
    let note = self.client.get_note(id).await?;
    self.cache.insert(key, Cached::Note(note.clone()));
    Ok(note)
  }

  pub async fn categories(&mut self) -> Result<Vec<Category>> {
    let key = QueryKey::Categories;
    if let Some(Cached::Categories(categories)) = self.cache.get(&key) {
      return Ok(categories.clone());
    }
    let categories = self.client.list_categories().await?;
    self.cache.insert(key, Cached::Categories(categories.clone()));
    Ok(categories)
  }

  pub async fn category(&mut self, id: Uuid) -> Result<Category> {
    let key = QueryKey::Category(id);
    if let Some(Cached::Category(category)) = self.cache.get(&key) {
      return Ok(category.clone());
    }
    let category = self.client.get_category(id).await?;
    self.cache.insert(key, Cached::Category(category.clone()));
    Ok(category)
  }

  // ── Note mutations ────────────────────────────────────────────────────────

  pub async fn create_note(&mut self, input: &NewNote) -> Result<NoteWithCategory> {
    let result = self.client.create_note(input).await;
    self.settle(result, &NOTE_WRITE_TAGS)
  }

  pub async fn update_note(&mut self, id: Uuid, patch: &NotePatch) -> Result<NoteWithCategory> {
    let result = self.client.update_note(id, patch).await;
    self.settle(result, &NOTE_WRITE_TAGS)
  }

  /// Archive an active note or unarchive an archived one. This is a full
  /// update restating every other field of `note`.
  pub async fn toggle_archived(&mut self, note: &Note) -> Result<NoteWithCategory> {
    self.update_note(note.id, &NotePatch::toggle_status(note)).await
  }

  /// Bring a note to the requested archival state; a no-op if it is already
  /// there.
  pub async fn set_archived(&mut self, id: Uuid, archived: bool) -> Result<NoteWithCategory> {
    let current = self.note(id).await?;
    if current.note.status.is_archived() == archived {
      return Ok(current);
    }
    self.toggle_archived(&current.note).await
  }

  pub async fn delete_note(&mut self, id: Uuid) -> Result<NoteWithCategory> {
    let result = self.client.delete_note(id).await;
    self.settle(result, &NOTE_WRITE_TAGS)
  }

  // ── Category mutations ────────────────────────────────────────────────────

  pub async fn create_category(&mut self, input: &NewCategory) -> Result<Category> {
    let result = self.client.create_category(input).await;
    self.settle(result, &CATEGORY_WRITE_TAGS)
  }

  pub async fn update_category(&mut self, id: Uuid, patch: &CategoryPatch) -> Result<Category> {
    let result = self.client.update_category(id, patch).await;
    self.settle(result, &CATEGORY_WRITE_TAGS)
  }

  pub async fn delete_category(&mut self, id: Uuid) -> Result<Category> {
    let result = self.client.delete_category(id).await;
    self.settle(result, &CATEGORY_WRITE_TAGS)
  }
}
