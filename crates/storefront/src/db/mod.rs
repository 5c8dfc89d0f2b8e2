//! Local persistence for the storefront.
//!
//! # Store: one flat key-value map
//!
//! Everything the site remembers between requests lives in a single
//! [`KeyValueStore`], keyed the way the browser version keyed local storage:
//!
//! - `campus_user` - the login-stub session record
//! - `user_goods` - user-published listings, newest first
//! - `comments_<productId>` - one comment thread per product
//!
//! Handlers never touch these keys directly; they go through the typed
//! repositories below.

pub mod comments;
pub mod listings;
pub mod session;
pub mod store;

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

pub use comments::CommentRepository;
pub use listings::ListingRepository;
pub use session::SessionRepository;
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The underlying store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A stored value does not have the expected shape.
    #[error("data corruption under key {key}: {message}")]
    DataCorruption { key: String, message: String },
}

/// Decode the JSON value stored under `key`, if any.
fn read_json<T: serde::de::DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, RepositoryError> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };

    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| RepositoryError::DataCorruption {
            key: key.to_string(),
            message: e.to_string(),
        })
}

/// Encode `value` as JSON and store it under `key`.
fn write_json<T: serde::Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), RepositoryError> {
    let raw = serde_json::to_string(value).map_err(|e| RepositoryError::DataCorruption {
        key: key.to_string(),
        message: e.to_string(),
    })?;
    store.set(key, raw)?;
    Ok(())
}

/// Open the store: file-backed when `path` is given, in-memory otherwise.
///
/// # Errors
///
/// Returns `StoreError` if the store file exists but cannot be loaded.
pub fn open_store(path: Option<&Path>) -> Result<Arc<dyn KeyValueStore>, StoreError> {
    match path {
        Some(path) => Ok(Arc::new(FileStore::open(path)?)),
        None => Ok(Arc::new(MemoryStore::new())),
    }
}
