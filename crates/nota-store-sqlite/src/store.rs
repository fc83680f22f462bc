//! [`SqliteStore`]: the SQLite implementation of [`NoteStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use nota_core::{
  category::{Category, CategoryPatch, NewCategory},
  note::{NewNote, NotePatch, NoteStatus, NoteWithCategory},
  store::NoteStore,
};

use crate::{
  encode::{NOTE_COLUMNS, RawCategory, RawNote, encode_dt, encode_status, encode_uuid},
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Nota store backed by a single SQLite file.
///
/// Cloning is cheap: the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

/// Result of a write performed inside a single connection call. Domain
/// failures are carried out of the closure as values so the transaction can
/// roll back without surfacing a database error.
enum Outcome<T> {
  Done(T),
  Missing,
  UnknownCategory(Uuid),
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open a store that lives only as long as this handle.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── Query helpers ───────────────────────────────────────────────────────────

fn select_notes(filter: &str) -> String {
  format!(
    "SELECT {NOTE_COLUMNS}
     FROM notes n
     LEFT JOIN categories c ON c.category_id = n.category_id
     {filter}"
  )
}

fn select_note(conn: &rusqlite::Connection, id: &str) -> rusqlite::Result<Option<RawNote>> {
  conn
    .query_row(
      &select_notes("WHERE n.note_id = ?1"),
      rusqlite::params![id],
      RawNote::from_row,
    )
    .optional()
}

fn select_category(
  conn: &rusqlite::Connection,
  id: &str,
) -> rusqlite::Result<Option<RawCategory>> {
  conn
    .query_row(
      "SELECT category_id, name, color FROM categories WHERE category_id = ?1",
      rusqlite::params![id],
      RawCategory::from_row,
    )
    .optional()
}

fn exists(conn: &rusqlite::Connection, sql: &str, id: &str) -> rusqlite::Result<bool> {
  Ok(
    conn
      .query_row(sql, rusqlite::params![id], |_| Ok(true))
      .optional()?
      .unwrap_or(false),
  )
}

fn note_exists(conn: &rusqlite::Connection, id: &str) -> rusqlite::Result<bool> {
  exists(conn, "SELECT 1 FROM notes WHERE note_id = ?1", id)
}

fn category_exists(conn: &rusqlite::Connection, id: &str) -> rusqlite::Result<bool> {
  exists(conn, "SELECT 1 FROM categories WHERE category_id = ?1", id)
}

fn resolve_note(outcome: Outcome<RawNote>, id: Uuid) -> Result<NoteWithCategory> {
  match outcome {
    Outcome::Done(raw) => raw.into_note(),
    Outcome::Missing => Err(Error::NoteNotFound(id)),
    Outcome::UnknownCategory(category_id) => Err(Error::UnknownCategory(category_id)),
  }
}

fn resolve_category(outcome: Outcome<RawCategory>, id: Uuid) -> Result<Category> {
  match outcome {
    Outcome::Done(raw) => raw.into_category(),
    Outcome::Missing | Outcome::UnknownCategory(_) => Err(Error::CategoryNotFound(id)),
  }
}

// ─── NoteStore impl ──────────────────────────────────────────────────────────

impl NoteStore for SqliteStore {
  type Error = Error;

  // ── Notes ─────────────────────────────────────────────────────────────────

  async fn list_notes(&self, status: NoteStatus) -> Result<Vec<NoteWithCategory>> {
    let status_str = encode_status(status);

    let raws: Vec<RawNote> = self
      .conn
      .call(move |conn| {
        // rowid breaks ties between notes created within the same microsecond.
        let mut stmt = conn.prepare(&select_notes(
          "WHERE n.status = ?1 ORDER BY n.created_at DESC, n.rowid DESC",
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![status_str], RawNote::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawNote::into_note).collect()
  }

  async fn get_note(&self, id: Uuid) -> Result<Option<NoteWithCategory>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawNote> = self
      .conn
      .call(move |conn| Ok(select_note(conn, &id_str)?))
      .await?;

    raw.map(RawNote::into_note).transpose()
  }

  async fn insert_note(&self, input: NewNote) -> Result<NoteWithCategory> {
    let id           = Uuid::new_v4();
    let id_str       = encode_uuid(id);
    let now_str      = encode_dt(Utc::now());
    let status_str   = encode_status(NoteStatus::Active);
    let category_id  = input.category_id;
    let category_str = category_id.map(encode_uuid);

    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if let (Some(cid), Some(cid_str)) = (category_id, category_str.as_deref()) {
          if !category_exists(&tx, cid_str)? {
            return Ok(Outcome::UnknownCategory(cid));
          }
        }
        tx.execute(
          "INSERT INTO notes (
             note_id, title, content, status, category_id, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
          rusqlite::params![
            id_str,
            input.title,
            input.content,
            status_str,
            category_str,
            now_str,
          ],
        )?;
        let raw = select_note(&tx, &id_str)?;
        tx.commit()?;
        Ok(raw.map_or(Outcome::Missing, Outcome::Done))
      })
      .await?;

    let note = resolve_note(outcome, id)?;
    tracing::debug!(note = %id, "note created");
    Ok(note)
  }

  async fn update_note(&self, id: Uuid, patch: NotePatch) -> Result<NoteWithCategory> {
    let id_str       = encode_uuid(id);
    let now_str      = encode_dt(Utc::now());
    let title        = patch.title;
    let content_set  = patch.content.is_some();
    let content      = patch.content.flatten();
    let category_set = patch.category_id.is_some();
    let category_id  = patch.category_id.flatten();
    let category_str = category_id.map(encode_uuid);
    let status_str   = patch.status.map(encode_status);

    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if !note_exists(&tx, &id_str)? {
          return Ok(Outcome::Missing);
        }
        if let (Some(cid), Some(cid_str)) = (category_id, category_str.as_deref()) {
          if !category_exists(&tx, cid_str)? {
            return Ok(Outcome::UnknownCategory(cid));
          }
        }
        // created_at never changes.
        tx.execute(
          "UPDATE notes SET
             title       = COALESCE(?2, title),
             content     = CASE WHEN ?3 THEN ?4 ELSE content END,
             category_id = CASE WHEN ?5 THEN ?6 ELSE category_id END,
             status      = COALESCE(?7, status),
             updated_at  = ?8
           WHERE note_id = ?1",
          rusqlite::params![
            id_str,
            title,
            content_set,
            content,
            category_set,
            category_str,
            status_str,
            now_str,
          ],
        )?;
        let raw = select_note(&tx, &id_str)?;
        tx.commit()?;
        Ok(raw.map_or(Outcome::Missing, Outcome::Done))
      })
      .await?;

    let note = resolve_note(outcome, id)?;
    tracing::debug!(note = %id, status = %note.note.status, "note updated");
    Ok(note)
  }

  async fn delete_note(&self, id: Uuid) -> Result<NoteWithCategory> {
    let id_str = encode_uuid(id);

    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let Some(raw) = select_note(&tx, &id_str)? else {
          return Ok(Outcome::Missing);
        };
        tx.execute("DELETE FROM notes WHERE note_id = ?1", rusqlite::params![id_str])?;
        tx.commit()?;
        Ok(Outcome::Done(raw))
      })
      .await?;

    let note = resolve_note(outcome, id)?;
    tracing::debug!(note = %id, "note deleted");
    Ok(note)
  }

  // ── Categories ────────────────────────────────────────────────────────────

  async fn list_categories(&self) -> Result<Vec<Category>> {
    let raws: Vec<RawCategory> = self
      .conn
      .call(|conn| {
        let mut stmt = conn
          .prepare("SELECT category_id, name, color FROM categories ORDER BY rowid")?;
        let rows = stmt
          .query_map([], RawCategory::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCategory::into_category).collect()
  }

  async fn get_category(&self, id: Uuid) -> Result<Option<Category>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawCategory> = self
      .conn
      .call(move |conn| Ok(select_category(conn, &id_str)?))
      .await?;

    raw.map(RawCategory::into_category).transpose()
  }

  async fn insert_category(&self, input: NewCategory) -> Result<Category> {
    let category = Category {
      id:    Uuid::new_v4(),
      name:  input.name,
      color: input.color,
    };

    let id_str = encode_uuid(category.id);
    let name   = category.name.clone();
    let color  = category.color.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO categories (category_id, name, color) VALUES (?1, ?2, ?3)",
          rusqlite::params![id_str, name, color],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(category = %category.id, "category created");
    Ok(category)
  }

  async fn update_category(&self, id: Uuid, patch: CategoryPatch) -> Result<Category> {
    let id_str = encode_uuid(id);

    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let changed = tx.execute(
          "UPDATE categories SET
             name  = COALESCE(?2, name),
             color = COALESCE(?3, color)
           WHERE category_id = ?1",
          rusqlite::params![id_str, patch.name, patch.color],
        )?;
        if changed == 0 {
          return Ok(Outcome::Missing);
        }
        let raw = select_category(&tx, &id_str)?;
        tx.commit()?;
        Ok(raw.map_or(Outcome::Missing, Outcome::Done))
      })
      .await?;

    resolve_category(outcome, id)
  }

  async fn delete_category(&self, id: Uuid) -> Result<Category> {
    let id_str = encode_uuid(id);

    let (outcome, detached) = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let Some(raw) = select_category(&tx, &id_str)? else {
          return Ok((Outcome::Missing, 0));
        };
        let detached: i64 = tx.query_row(
          "SELECT COUNT(*) FROM notes WHERE category_id = ?1",
          rusqlite::params![id_str],
          |r| r.get(0),
        )?;
        // ON DELETE SET NULL detaches the notes.
        tx.execute(
          "DELETE FROM categories WHERE category_id = ?1",
          rusqlite::params![id_str],
        )?;
        tx.commit()?;
        Ok((Outcome::Done(raw), detached))
      })
      .await?;

    let category = resolve_category(outcome, id)?;
    tracing::debug!(category = %id, detached, "category deleted");
    Ok(category)
  }
}
