//! Serde helper for three-state patch fields.
//!
//! Used as `#[serde(default, deserialize_with = "crate::nullable::deserialize")]`
//! on an `Option<Option<T>>`: an absent field stays `None`, an explicit `null`
//! becomes `Some(None)`.

use serde::{Deserialize, Deserializer};

pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
  T: Deserialize<'de>,
  D: Deserializer<'de>,
{
  Option::<T>::deserialize(deserializer).map(Some)
}
