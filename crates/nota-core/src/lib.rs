//! Core types and trait definitions for the Nota note store.
//!
//! No HTTP or database dependencies live here; every other crate depends on
//! this one.

pub mod category;
pub mod error;
pub mod note;
pub mod service;
pub mod store;

mod nullable;

pub use error::{Error, Result};
