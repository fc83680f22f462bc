//! `nota`: command-line client for the Nota notes API.
//!
//! # Usage
//!
//! ```text
//! nota --url http://localhost:3000 notes list
//! nota notes add "Buy milk" --category <CATEGORY_ID>
//! nota notes archive <NOTE_ID>
//! nota categories add Work '#ff0000'
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nota_client::{ApiClient, ApiConfig, Notebook};
use nota_core::{
  category::{Category, CategoryPatch, NewCategory},
  note::{NewNote, NotePatch, NoteStatus, NoteWithCategory},
};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "nota", about = "Command-line client for the Nota notes API")]
struct Args {
  /// Path to a TOML config file (`url = "..."`).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the Nota API (default: http://localhost:3000).
  #[arg(long, env = "NOTA_API_URL")]
  url: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Manage notes.
  #[command(subcommand)]
  Notes(NotesCommand),
  /// Manage categories.
  #[command(subcommand)]
  Categories(CategoriesCommand),
}

#[derive(Subcommand, Debug)]
enum NotesCommand {
  /// List active notes, newest first.
  List {
    /// Show archived notes instead.
    #[arg(long)]
    archived: bool,
    /// Only notes in this category.
    #[arg(long)]
    category: Option<Uuid>,
  },
  /// Create a note.
  Add {
    title:    String,
    #[arg(long)]
    content:  Option<String>,
    #[arg(long)]
    category: Option<Uuid>,
  },
  /// Change fields of a note; omitted fields are left alone.
  Edit {
    id:            Uuid,
    #[arg(long)]
    title:         Option<String>,
    #[arg(long, conflicts_with = "clear_content")]
    content:       Option<String>,
    #[arg(long)]
    clear_content: bool,
    #[arg(long, conflicts_with = "uncategorize")]
    category:      Option<Uuid>,
    #[arg(long)]
    uncategorize:  bool,
  },
  /// Move a note to the archive.
  Archive { id: Uuid },
  /// Restore an archived note.
  Unarchive { id: Uuid },
  /// Delete a note permanently.
  Rm { id: Uuid },
}

#[derive(Subcommand, Debug)]
enum CategoriesCommand {
  List,
  Add {
    name:  String,
    color: String,
  },
  Edit {
    id:    Uuid,
    #[arg(long)]
    name:  Option<String>,
    #[arg(long)]
    color: Option<String>,
  },
  /// Delete a category; its notes become uncategorised.
  Rm { id: Uuid },
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let api_config = ApiConfig {
    base_url: args
      .url
      .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
      .unwrap_or_else(|| "http://localhost:3000".to_string()),
  };

  let client = ApiClient::new(api_config).context("building HTTP client")?;
  let mut notebook = Notebook::new(client);

  match args.command {
    Command::Notes(cmd) => run_notes(&mut notebook, cmd).await,
    Command::Categories(cmd) => run_categories(&mut notebook, cmd).await,
  }
}

// ─── Commands ─────────────────────────────────────────────────────────────────

async fn run_notes(notebook: &mut Notebook, cmd: NotesCommand) -> Result<()> {
  match cmd {
    NotesCommand::List { archived, category } => {
      if archived {
        notebook.view.toggle_notes_status();
      }
      notebook.view.category_filter = category;
      let notes = notebook.visible_notes().await?;
      if notes.is_empty() {
        println!("no {} notes", notebook.view.notes_status.as_ref().to_lowercase());
      }
      for note in &notes {
        print_note(note);
      }
    }
    NotesCommand::Add { title, content, category } => {
      let input = NewNote { title, content, category_id: category };
      print_note(&notebook.create_note(&input).await?);
    }
    NotesCommand::Edit {
      id,
      title,
      content,
      clear_content,
      category,
      uncategorize,
    } => {
      let patch = NotePatch {
        title,
        content: if clear_content { Some(None) } else { content.map(Some) },
        category_id: if uncategorize { Some(None) } else { category.map(Some) },
        status: None,
      };
      print_note(&notebook.update_note(id, &patch).await?);
    }
    NotesCommand::Archive { id } => print_note(&notebook.set_archived(id, true).await?),
    NotesCommand::Unarchive { id } => print_note(&notebook.set_archived(id, false).await?),
    NotesCommand::Rm { id } => {
      let deleted = notebook.delete_note(id).await?;
      println!("deleted {} {:?}", deleted.note.id, deleted.note.title);
    }
  }
  Ok(())
}

async fn run_categories(notebook: &mut Notebook, cmd: CategoriesCommand) -> Result<()> {
  match cmd {
    CategoriesCommand::List => {
      for category in notebook.categories().await? {
        print_category(&category);
      }
    }
    CategoriesCommand::Add { name, color } => {
      print_category(&notebook.create_category(&NewCategory { name, color }).await?);
    }
    CategoriesCommand::Edit { id, name, color } => {
      let patch = CategoryPatch { name, color };
      print_category(&notebook.update_category(id, &patch).await?);
    }
    CategoriesCommand::Rm { id } => {
      let deleted = notebook.delete_category(id).await?;
      println!("deleted {} {:?}", deleted.id, deleted.name);
    }
  }
  Ok(())
}

// ─── Output ───────────────────────────────────────────────────────────────────

fn print_note(n: &NoteWithCategory) {
  let marker = match n.note.status {
    NoteStatus::Active => ' ',
    NoteStatus::Inactive => 'A',
  };
  let category = n
    .category
    .as_ref()
    .map(|c| format!(" [{}]", c.name))
    .unwrap_or_default();
  println!(
    "{marker} {}  {}  {}{category}",
    n.note.id,
    n.note.created_at.format("%Y-%m-%d %H:%M"),
    n.note.title,
  );
  if let Some(content) = &n.note.content {
    for line in content.lines() {
      println!("      {line}");
    }
  }
}

fn print_category(c: &Category) { println!("{}  {:<8}  {}", c.id, c.color, c.name); }
