//! Product identifiers.
//!
//! Catalog identifiers are opaque text. The static catalog may spell them as
//! JSON numbers; they are normalized to their decimal text so that lookups by
//! the `id` query parameter compare like with like.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Prefix that marks a listing published on this device.
pub const USER_ID_PREFIX: &str = "u_";

/// A product identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create an identifier from its text form.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier for a listing published at `created_at`.
    ///
    /// The suffix is the epoch-millisecond timestamp; two listings published
    /// within the same millisecond share an identifier.
    #[must_use]
    pub fn user_published(created_at: DateTime<Utc>) -> Self {
        Self(format!("{USER_ID_PREFIX}{}", created_at.timestamp_millis()))
    }

    /// Get the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this identifier was generated by the publish flow.
    #[must_use]
    pub fn is_user_published(&self) -> bool {
        self.0.starts_with(USER_ID_PREFIX)
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => Self(text),
            Raw::Number(number) => Self(number.to_string()),
        })
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
