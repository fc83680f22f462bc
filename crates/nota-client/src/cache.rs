//! Client-side query cache with tag-based invalidation.
//!
//! Every cached query *provides* a set of [`Tag`]s derived from its key and
//! its rows. A mutation *invalidates* tags; each cached query providing a
//! matching tag is evicted so the next read refetches it.
//!
//! Matching rules:
//!
//! - a bare entity tag (`Notes`) matches every tag of that entity;
//! - an id tag (`Notes/LIST-ACTIVE`, `Notes/<uuid>`) matches only itself.

use std::{collections::HashMap, fmt};

use nota_core::{
  category::Category,
  note::{NoteStatus, NoteWithCategory},
};
use uuid::Uuid;

// ─── Tags ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
  Notes,
  Categories,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagId {
  /// The unfiltered list of an entity.
  List,
  /// A note list filtered by status.
  StatusList(NoteStatus),
  Item(Uuid),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag {
  pub entity: Entity,
  /// `None` for a bare entity tag.
  pub id:     Option<TagId>,
}

impl Tag {
  pub fn all(entity: Entity) -> Self { Self { entity, id: None } }

  pub fn id(entity: Entity, id: TagId) -> Self { Self { entity, id: Some(id) } }

  /// Whether invalidating `self` invalidates a query that provided `provided`.
  pub fn matches(&self, provided: &Tag) -> bool {
    self.entity == provided.entity && (self.id.is_none() || self.id == provided.id)
  }
}

impl fmt::Display for Tag {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let entity = match self.entity {
      Entity::Notes => "Notes",
      Entity::Categories => "Categories",
    };
    match self.id {
      None => write!(f, "{entity}"),
      Some(TagId::List) => write!(f, "{entity}/LIST"),
      Some(TagId::StatusList(status)) => write!(f, "{entity}/LIST-{status}"),
      Some(TagId::Item(id)) => write!(f, "{entity}/{id}"),
    }
  }
}

// ─── Queries ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
  NotesByStatus(NoteStatus),
  Note(Uuid),
  Categories,
  Category(Uuid),
}

/// A cached query result.
#[derive(Debug, Clone, PartialEq)]
pub enum Cached {
  Notes(Vec<NoteWithCategory>),
  Note(NoteWithCategory),
  Categories(Vec<Category>),
  Category(Category),
}

/// The tags a query result provides.
fn provided_tags(key: QueryKey, value: &Cached) -> Vec<Tag> {
  use Entity::{Categories, Notes};

  let mut tags = match key {
    QueryKey::NotesByStatus(status) => vec![Tag::id(Notes, TagId::StatusList(status))],
    QueryKey::Note(id) => vec![Tag::id(Notes, TagId::Item(id))],
    QueryKey::Categories => vec![Tag::id(Categories, TagId::List)],
    QueryKey::Category(id) => vec![Tag::id(Categories, TagId::Item(id))],
  };
  match value {
    Cached::Notes(notes) => tags.extend(
      notes
        .iter()
        .map(|n| Tag::id(Notes, TagId::Item(n.note.id))),
    ),
    Cached::Categories(categories) => tags.extend(
      categories
        .iter()
        .map(|c| Tag::id(Categories, TagId::Item(c.id))),
    ),
    Cached::Note(_) | Cached::Category(_) => {}
  }
  tags
}

struct Entry {
  value: Cached,
  tags:  Vec<Tag>,
}

/// An explicit cache of query results keyed by [`QueryKey`].
#[derive(Default)]
pub struct QueryCache {
  entries: HashMap<QueryKey, Entry>,
}

impl QueryCache {
  pub fn new() -> Self { Self::default() }

  pub fn get(&self, key: &QueryKey) -> Option<&Cached> {
    self.entries.get(key).map(|e| &e.value)
  }

  /// Store a query result, replacing any previous one for `key`.
  pub fn insert(&mut self, key: QueryKey, value: Cached) {
    let tags = provided_tags(key, &value);
    self.entries.insert(key, Entry { value, tags });
  }

  /// Evict every query that provided a tag matched by one of `tags`.
  /// Returns the evicted keys so a caller can refetch them.
  pub fn invalidate(&mut self, tags: &[Tag]) -> Vec<QueryKey> {
    let stale: Vec<QueryKey> = self
      .entries
      .iter()
      .filter(|(_, entry)| {
        entry
          .tags
          .iter()
          .any(|provided| tags.iter().any(|t| t.matches(provided)))
      })
      .map(|(key, _)| *key)
      .collect();

    for key in &stale {
      self.entries.remove(key);
    }
    stale
  }

  pub fn len(&self) -> usize { self.entries.len() }

  pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

#[cfg(test)]
mod tests {
  use chrono::Utc;
  use nota_core::note::Note;

  use super::*;

  fn note(id: Uuid, status: NoteStatus) -> NoteWithCategory {
    NoteWithCategory {
      note:     Note {
        id,
        title: "n".into(),
        content: None,
        status,
        category_id: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
      },
      category: None,
    }
  }

  fn category(id: Uuid) -> Category {
    Category { id, name: "Work".into(), color: "#ff0000".into() }
  }

  fn populated() -> (QueryCache, Uuid, Uuid) {
    let note_id = Uuid::new_v4();
    let category_id = Uuid::new_v4();
    let mut cache = QueryCache::new();
    cache.insert(
      QueryKey::NotesByStatus(NoteStatus::Active),
      Cached::Notes(vec![note(note_id, NoteStatus::Active)]),
    );
    cache.insert(
      QueryKey::NotesByStatus(NoteStatus::Inactive),
      Cached::Notes(vec![]),
    );
    cache.insert(
      QueryKey::Note(note_id),
      Cached::Note(note(note_id, NoteStatus::Active)),
    );
    cache.insert(
      QueryKey::Categories,
      Cached::Categories(vec![category(category_id)]),
    );
    (cache, note_id, category_id)
  }

  #[test]
  fn bare_entity_tag_evicts_all_of_that_entity() {
    let (mut cache, note_id, _) = populated();
    let stale = cache.invalidate(&[Tag::all(Entity::Notes)]);

    assert_eq!(stale.len(), 3);
    assert!(stale.contains(&QueryKey::Note(note_id)));
    assert_eq!(cache.len(), 1);
    assert!(cache.get(&QueryKey::Categories).is_some());
  }

  #[test]
  fn status_list_tag_evicts_only_that_list() {
    let (mut cache, _, _) = populated();
    let stale = cache.invalidate(&[Tag::id(
      Entity::Notes,
      TagId::StatusList(NoteStatus::Inactive),
    )]);
    assert_eq!(stale, vec![QueryKey::NotesByStatus(NoteStatus::Inactive)]);
    assert!(cache.get(&QueryKey::NotesByStatus(NoteStatus::Active)).is_some());
  }

  #[test]
  fn item_tag_evicts_lists_containing_the_item() {
    let (mut cache, note_id, _) = populated();
    let stale = cache.invalidate(&[Tag::id(Entity::Notes, TagId::Item(note_id))]);

    assert_eq!(stale.len(), 2);
    assert!(stale.contains(&QueryKey::NotesByStatus(NoteStatus::Active)));
    assert!(stale.contains(&QueryKey::Note(note_id)));
    assert!(cache.get(&QueryKey::NotesByStatus(NoteStatus::Inactive)).is_some());
  }

  #[test]
  fn unrelated_tags_evict_nothing() {
    let (mut cache, _, _) = populated();
    let stale = cache.invalidate(&[Tag::id(Entity::Categories, TagId::Item(Uuid::new_v4()))]);
    assert!(stale.is_empty());
    assert_eq!(cache.len(), 4);
  }

  #[test]
  fn category_row_tag_evicts_category_list() {
    let (mut cache, _, category_id) = populated();
    let stale = cache.invalidate(&[Tag::id(Entity::Categories, TagId::Item(category_id))]);
    assert_eq!(stale, vec![QueryKey::Categories]);
  }

  #[test]
  fn tags_render_like_cache_keys() {
    assert_eq!(Tag::all(Entity::Notes).to_string(), "Notes");
    assert_eq!(Tag::id(Entity::Categories, TagId::List).to_string(), "Categories/LIST");
    assert_eq!(
      Tag::id(Entity::Notes, TagId::StatusList(NoteStatus::Active)).to_string(),
      "Notes/LIST-ACTIVE"
    );
  }
}
