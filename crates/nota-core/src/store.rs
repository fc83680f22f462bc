//! The `NoteStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `nota-store-sqlite`) and
//! is the repository layer: it shapes queries (filter, join, order) and owns
//! referential integrity, but performs no validation. Callers go through
//! [`crate::service`], which validates before delegating here.

use std::future::Future;

use uuid::Uuid;

use crate::{
  category::{Category, CategoryPatch, NewCategory},
  note::{NewNote, NotePatch, NoteStatus, NoteWithCategory},
};

/// Abstraction over a Nota storage backend.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait NoteStore: Send + Sync {
  type Error: std::error::Error + Into<crate::Error> + Send + Sync + 'static;

  // ── Notes ─────────────────────────────────────────────────────────────

  /// All notes with the given status, each joined with its category, newest
  /// `created_at` first.
  fn list_notes(
    &self,
    status: NoteStatus,
  ) -> impl Future<Output = Result<Vec<NoteWithCategory>, Self::Error>> + Send + '_;

  /// Retrieve a note by id. Returns `None` if not found.
  fn get_note(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<NoteWithCategory>, Self::Error>> + Send + '_;

  /// Persist a new note. The store assigns `id`, timestamps, and the
  /// [`NoteStatus::Active`] status. Fails if `category_id` names a category
  /// that does not exist.
  fn insert_note(
    &self,
    input: NewNote,
  ) -> impl Future<Output = Result<NoteWithCategory, Self::Error>> + Send + '_;

  /// Apply a partial update and bump `updated_at`. Fails if the note or a
  /// newly referenced category does not exist.
  fn update_note(
    &self,
    id: Uuid,
    patch: NotePatch,
  ) -> impl Future<Output = Result<NoteWithCategory, Self::Error>> + Send + '_;

  /// Hard-delete a note, returning its state prior to deletion.
  fn delete_note(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<NoteWithCategory, Self::Error>> + Send + '_;

  // ── Categories ────────────────────────────────────────────────────────

  /// All categories in insertion order.
  fn list_categories(
    &self,
  ) -> impl Future<Output = Result<Vec<Category>, Self::Error>> + Send + '_;

  fn get_category(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Category>, Self::Error>> + Send + '_;

  fn insert_category(
    &self,
    input: NewCategory,
  ) -> impl Future<Output = Result<Category, Self::Error>> + Send + '_;

  fn update_category(
    &self,
    id: Uuid,
    patch: CategoryPatch,
  ) -> impl Future<Output = Result<Category, Self::Error>> + Send + '_;

  /// Hard-delete a category. Notes that referenced it become uncategorised.
  fn delete_category(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Category, Self::Error>> + Send + '_;
}
