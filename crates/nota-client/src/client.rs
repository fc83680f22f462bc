//! Async HTTP client wrapping the Nota JSON API.

use nota_core::{
  category::{Category, CategoryPatch, NewCategory},
  note::{NewNote, NotePatch, NoteStatus, NoteWithCategory},
};
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, de::DeserializeOwned};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ClientError {
  #[error("request failed: {0}")]
  Http(#[from] reqwest::Error),

  /// The server answered with a non-success status. `message` is the
  /// server's `{"message"}` payload when present, otherwise a fixed
  /// per-operation string.
  #[error("{message} (HTTP {status})")]
  Api { status: u16, message: String },
}

pub type Result<T, E = ClientError> = std::result::Result<T, E>;

/// Error payload shape shared by every API failure.
#[derive(Deserialize)]
struct ErrorBody {
  message: String,
}

/// Connection settings for the Nota API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// Async HTTP client for the Nota JSON REST API.
///
/// Cheap to clone: the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .user_agent(concat!("nota/", env!("CARGO_PKG_VERSION")))
      .build()?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
  }

  async fn send<T: DeserializeOwned>(
    &self,
    req: RequestBuilder,
    fallback: &'static str,
  ) -> Result<T> {
    let resp = req.send().await?;
    let status = resp.status();

    if !status.is_success() {
      let message = resp
        .json::<ErrorBody>()
        .await
        .ok()
        .map(|b| b.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| fallback.to_owned());
      tracing::debug!(%status, %message, "API request failed");
      return Err(ClientError::Api { status: status.as_u16(), message });
    }
    Ok(resp.json().await?)
  }

  // ── Notes ─────────────────────────────────────────────────────────────────

  /// `GET /notes?status=<status>`
  pub async fn list_notes(&self, status: NoteStatus) -> Result<Vec<NoteWithCategory>> {
    let req = self
      .client
      .get(self.url("/notes"))
      .query(&[("status", status.as_ref())]);
    self.send(req, "Could not load the notes").await
  }

  /// `GET /notes/:id`
  pub async fn get_note(&self, id: Uuid) -> Result<NoteWithCategory> {
    let req = self.client.get(self.url(&format!("/notes/{id}")));
    self.send(req, "Could not load the note").await
  }

  /// `POST /notes`
  pub async fn create_note(&self, input: &NewNote) -> Result<NoteWithCategory> {
    let req = self.client.post(self.url("/notes")).json(input);
    self.send(req, "Could not create the note").await
  }

  /// `PUT /notes/:id`
  pub async fn update_note(&self, id: Uuid, patch: &NotePatch) -> Result<NoteWithCategory> {
    let req = self.client.put(self.url(&format!("/notes/{id}"))).json(patch);
    self.send(req, "Could not update the note").await
  }

  /// `DELETE /notes/:id`
  pub async fn delete_note(&self, id: Uuid) -> Result<NoteWithCategory> {
    let req = self.client.delete(self.url(&format!("/notes/{id}")));
    self.send(req, "Could not delete the note").await
  }

  // ── Categories ────────────────────────────────────────────────────────────

  /// `GET /categories`
  pub async fn list_categories(&self) -> Result<Vec<Category>> {
    let req = self.client.get(self.url("/categories"));
    self.send(req, "Could not load the categories").await
  }

  /// `GET /categories/:id`
  pub async fn get_category(&self, id: Uuid) -> Result<Category> {
    let req = self.client.get(self.url(&format!("/categories/{id}")));
    self.send(req, "Could not load the category").await
  }

  /// `POST /categories`
  pub async fn create_category(&self, input: &NewCategory) -> Result<Category> {
    let req = self.client.post(self.url("/categories")).json(input);
    self.send(req, "Could not create the category").await
  }

  /// `PUT /categories/:id`
  pub async fn update_category(&self, id: Uuid, patch: &CategoryPatch) -> Result<Category> {
    let req = self
      .client
      .put(self.url(&format!("/categories/{id}")))
      .json(patch);
    self.send(req, "Could not update the category").await
  }

  /// `DELETE /categories/:id`
  pub async fn delete_category(&self, id: Uuid) -> Result<Category> {
    let req = self.client.delete(self.url(&format!("/categories/{id}")));
    self.send(req, "Could not delete the category").await
  }
}
