//! HTTP server assembly for Nota: configuration and the middleware stack
//! wrapped around [`nota_api::api_router`].

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use nota_core::store::NoteStore;
use serde::Deserialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration.
///
/// Sources, lowest precedence first: built-in defaults, the TOML file, then
/// `NOTA_*` environment variables (e.g. `NOTA_PORT=8080`).
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:          String,
  pub port:          u16,
  /// SQLite database file; `:memory:` for a throwaway store.
  pub database_path: PathBuf,
}

impl ServerConfig {
  pub fn load(file: &Path) -> Result<Self, config::ConfigError> {
    Self::load_with_env(file, config::Environment::with_prefix("NOTA"))
  }

  /// Like [`ServerConfig::load`], reading overrides from `env` instead of the
  /// process environment.
  fn load_with_env(file: &Path, env: config::Environment) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("host", "0.0.0.0")?
      .set_default("port", 3000)?
      .set_default("database_path", "nota.db")?
      .add_source(config::File::from(file).required(false))
      .add_source(env.try_parsing(true))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  /// `database_path` with a leading `~` expanded to the user's home directory.
  pub fn store_path(&self) -> PathBuf { expand_tilde(&self.database_path) }

  pub fn is_in_memory(&self) -> bool { self.database_path.as_os_str() == ":memory:" }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/") {
    if let Ok(home) = std::env::var("HOME") {
      return PathBuf::from(home).join(rest);
    }
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The API router with request tracing and permissive CORS; the browser
/// client is served from a different origin.
pub fn app<S>(store: Arc<S>) -> Router
where
  S: NoteStore + 'static,
{
  nota_api::api_router(store)
    .layer(CorsLayer::permissive())
    .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use nota_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  #[tokio::test]
  async fn responses_carry_cors_headers() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let req = Request::builder()
      .uri("/notes")
      .header(header::ORIGIN, "http://localhost:5173")
      .body(Body::empty())
      .unwrap();

    let resp = app(Arc::new(store)).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
      resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
      "*"
    );
  }

  #[tokio::test]
  async fn preflight_is_answered() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let req = Request::builder()
      .method("OPTIONS")
      .uri("/notes/7b1e8a52-64a4-4f4e-9d55-1c0c2b8f6a01")
      .header(header::ORIGIN, "http://localhost:5173")
      .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PUT")
      .body(Body::empty())
      .unwrap();

    let resp = app(Arc::new(store)).oneshot(req).await.unwrap();
    assert!(resp.status().is_success());
    assert!(resp.headers().contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
  }

  fn env(vars: &[(&str, &str)]) -> config::Environment {
    let vars: config::Map<String, String> = vars
      .iter()
      .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
      .collect();
    config::Environment::with_prefix("NOTA").source(Some(vars))
  }

  fn write_config(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir()
      .join(format!("nota-server-{}-{name}.toml", std::process::id()));
    std::fs::write(&path, contents).unwrap();
    path
  }

  #[test]
  fn missing_config_file_falls_back_to_defaults() {
    let cfg =
      ServerConfig::load_with_env(Path::new("/nonexistent/nota.toml"), env(&[])).unwrap();
    assert_eq!(cfg.host, "0.0.0.0");
    assert_eq!(cfg.port, 3000);
    assert_eq!(cfg.database_path, PathBuf::from("nota.db"));
    assert!(!cfg.is_in_memory());
  }

  #[test]
  fn config_file_overrides_defaults() {
    let path = write_config("file", "port = 4000\ndatabase_path = \":memory:\"\n");
    let cfg = ServerConfig::load_with_env(&path, env(&[])).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(cfg.port, 4000);
    assert_eq!(cfg.host, "0.0.0.0");
    assert!(cfg.is_in_memory());
  }

  #[test]
  fn environment_overrides_config_file() {
    let path = write_config("env", "port = 4000\nhost = \"127.0.0.1\"\n");
    let cfg = ServerConfig::load_with_env(
      &path,
      env(&[("NOTA_PORT", "5000"), ("NOTA_DATABASE_PATH", "/var/lib/nota.db")]),
    )
    .unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(cfg.port, 5000);
    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.database_path, PathBuf::from("/var/lib/nota.db"));
    assert_eq!(cfg.address(), "127.0.0.1:5000");
  }

  #[test]
  fn tilde_is_expanded() {
    let cfg = ServerConfig {
      host:          "127.0.0.1".into(),
      port:          3000,
      database_path: PathBuf::from("~/notes/nota.db"),
    };
    if let Ok(home) = std::env::var("HOME") {
      assert_eq!(cfg.store_path(), PathBuf::from(home).join("notes/nota.db"));
    }
  }
}
