//! Client side of Nota: a typed HTTP client for the JSON API, a query cache
//! with tag-based invalidation, and the [`Notebook`] data layer that ties the
//! two together.

pub mod cache;
pub mod client;
pub mod notebook;

pub use client::{ApiClient, ApiConfig, ClientError, Result};
pub use notebook::{Notebook, ViewState};
