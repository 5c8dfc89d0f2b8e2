//! Local store inspection and clearing.
//!
//! # Usage
//!
//! ```bash
//! market-cli store show --store market-store.json
//! market-cli store listings --store market-store.json
//! market-cli store clear --store market-store.json --listings
//! market-cli store clear --store market-store.json --all
//! ```
//!
//! # Environment Variables
//!
//! - `MARKET_STORE_PATH` - Used when `--store` is not given

use std::path::{Path, PathBuf};

use campus_market_core::ProductId;
use campus_market_storefront::db::{
    CommentRepository, FileStore, KeyValueStore, ListingRepository, RepositoryError,
    SessionRepository, StoreError,
};
use thiserror::Error;

/// Errors that can occur during store commands.
#[derive(Debug, Error)]
pub enum StoreCommandError {
    /// The store file does not exist.
    #[error("Store file not found: {}", .0.display())]
    MissingFile(PathBuf),

    /// The store file could not be opened.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// A stored value could not be read.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// `clear` was run without saying what to clear.
    #[error("Nothing to clear: pass --session, --listings, --comments ID, or --all")]
    NothingSelected,
}

/// Overview of a store.
#[derive(Debug, PartialEq, Eq)]
pub struct StoreSummary {
    pub session: Option<String>,
    pub listings: usize,
    pub threads: Vec<(ProductId, usize)>,
}

/// What `store clear` should remove.
#[derive(Debug, Default)]
pub struct ClearTargets {
    pub session: bool,
    pub listings: bool,
    pub comments: Vec<String>,
    pub all: bool,
}

impl ClearTargets {
    fn is_empty(&self) -> bool {
        !self.session && !self.listings && self.comments.is_empty() && !self.all
    }
}

/// Open an existing store file.
fn open_existing(path: &Path) -> Result<FileStore, StoreCommandError> {
    if !path.exists() {
        return Err(StoreCommandError::MissingFile(path.to_path_buf()));
    }
    Ok(FileStore::open(path)?)
}

/// Summarize the contents of `store`.
///
/// # Errors
///
/// Returns `RepositoryError` if a stored value cannot be read.
pub fn summarize(store: &dyn KeyValueStore) -> Result<StoreSummary, RepositoryError> {
    Ok(StoreSummary {
        session: SessionRepository::new(store).current()?.map(|user| user.name),
        listings: ListingRepository::new(store).all()?.len(),
        threads: CommentRepository::new(store).threads()?,
    })
}

/// Remove the selected data from `store`, returning how many keys were removed.
///
/// # Errors
///
/// Returns `StoreCommandError` if nothing is selected or the store fails.
pub fn clear_store(
    store: &dyn KeyValueStore,
    targets: &ClearTargets,
) -> Result<usize, StoreCommandError> {
    if targets.is_empty() {
        return Err(StoreCommandError::NothingSelected);
    }

    if targets.all {
        let keys = store.keys()?;
        for key in &keys {
            store.remove(key)?;
        }
        return Ok(keys.len());
    }

    let before = store.keys()?.len();
    if targets.session {
        SessionRepository::new(store).logout()?;
    }
    if targets.listings {
        ListingRepository::new(store).clear()?;
    }
    let comments = CommentRepository::new(store);
    for id in &targets.comments {
        comments.clear(&ProductId::new(id.as_str()))?;
    }

    Ok(before.saturating_sub(store.keys()?.len()))
}

/// Log a summary of the store at `path`.
///
/// # Errors
///
/// Returns `StoreCommandError` if the file is missing or unreadable.
pub fn show(path: &Path) -> Result<(), StoreCommandError> {
    let store = open_existing(path)?;
    let summary = summarize(&store)?;

    match &summary.session {
        Some(name) => tracing::info!("Logged in as: {}", name),
        None => tracing::info!("Not logged in"),
    }
    tracing::info!("User-published listings: {}", summary.listings);
    tracing::info!("Comment threads: {}", summary.threads.len());
    for (id, count) in &summary.threads {
        tracing::info!("  product {}: {} comments", id, count);
    }

    Ok(())
}

/// Log every user-published listing, newest first.
///
/// # Errors
///
/// Returns `StoreCommandError` if the file is missing or unreadable.
pub fn listings(path: &Path) -> Result<(), StoreCommandError> {
    let store = open_existing(path)?;
    let listings = ListingRepository::new(&store).all()?;

    if listings.is_empty() {
        tracing::info!("No user-published listings");
    }
    for product in &listings {
        let published = product
            .create_time
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        tracing::info!(
            "{}  {}  ¥{}  {}  {}",
            product.id,
            product.title,
            product.price,
            product.condition,
            published
        );
    }

    Ok(())
}

/// Clear the selected data from the store at `path`.
///
/// # Errors
///
/// Returns `StoreCommandError` if the file is missing, nothing is selected,
/// or the store cannot be written.
pub fn clear(path: &Path, targets: &ClearTargets) -> Result<(), StoreCommandError> {
    let store = open_existing(path)?;
    let removed = clear_store(&store, targets)?;
    tracing::info!("Removed {} keys from {}", removed, path.display());
    Ok(())
}
