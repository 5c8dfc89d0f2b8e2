//! Catalog loading.
//!
//! The catalog every page lists from is the static product document plus
//! whatever was published on this device. Loading never fails from the
//! caller's point of view: any problem with the static document is logged
//! and treated as "no static products".

use std::path::PathBuf;
use std::time::Duration;

use campus_market_core::Product;
use reqwest::StatusCode;
use thiserror::Error;
use tracing::instrument;
use url::Url;

use crate::db::{KeyValueStore, ListingRepository};

/// Where the static catalog document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// Fetched over HTTP.
    Remote(Url),
    /// Read from a local file.
    Local(PathBuf),
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Remote(url) => write!(f, "{url}"),
            Self::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Errors fetching or decoding the static catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(StatusCode),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("catalog is not a JSON array: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Loads the merged catalog.
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    source: CatalogSource,
    delay: Duration,
    http: reqwest::Client,
}

impl CatalogLoader {
    /// Create a loader for `source`, pausing `delay` before every fetch.
    #[must_use]
    pub fn new(source: CatalogSource, delay: Duration) -> Self {
        Self {
            source,
            delay,
            http: reqwest::Client::new(),
        }
    }

    /// The configured source.
    #[must_use]
    pub const fn source(&self) -> &CatalogSource {
        &self.source
    }

    /// Fetch and decode the static catalog document.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the document cannot be fetched or is not a
    /// JSON array. Malformed records inside the array are skipped instead.
    pub async fn fetch_static(&self) -> Result<Vec<Product>, CatalogError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let body = match &self.source {
            CatalogSource::Remote(url) => {
                let response = self.http.get(url.clone()).send().await?;
                if !response.status().is_success() {
                    return Err(CatalogError::Status(response.status()));
                }
                response.text().await?
            }
            CatalogSource::Local(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| CatalogError::Io {
                        path: path.clone(),
                        source,
                    })?
            }
        };

        decode_catalog(&body)
    }

    /// Static products followed by user-published listings.
    ///
    /// A failed static fetch or an unreadable listing store each contribute
    /// nothing; the other half is still returned.
    #[instrument(skip(self, store), fields(source = %self.source))]
    pub async fn load(&self, store: &dyn KeyValueStore) -> Vec<Product> {
        let mut products = self.fetch_static().await.unwrap_or_else(|e| {
            tracing::error!(error = %e, "Failed to load static catalog");
            Vec::new()
        });

        match ListingRepository::new(store).all() {
            Ok(listings) => products.extend(listings),
            Err(e) => tracing::error!(error = %e, "Failed to read published listings"),
        }

        tracing::debug!(count = products.len(), "Catalog loaded");
        products
    }
}

/// Decode a catalog document, skipping records that do not decode.
///
/// # Errors
///
/// Returns `CatalogError::Parse` if `body` is not a JSON array.
pub fn decode_catalog(body: &str) -> Result<Vec<Product>, CatalogError> {
    let records: Vec<serde_json::Value> = serde_json::from_str(body)?;

    Ok(records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value(record) {
            Ok(product) => Some(product),
            Err(e) => {
                tracing::warn!(index, error = %e, "Skipping malformed catalog record");
                None
            }
        })
        .collect())
}

/// First product with exactly the given identifier.
#[must_use]
pub fn find_product<'a>(products: &'a [Product], id: &str) -> Option<&'a Product> {
    products.iter().find(|p| p.id.as_str() == id)
}
