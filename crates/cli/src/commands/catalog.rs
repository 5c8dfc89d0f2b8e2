//! Static catalog checks.
//!
//! # Usage
//!
//! ```bash
//! market-cli catalog check
//! market-cli catalog check --path crates/storefront/static/data.json
//! market-cli catalog check --url https://cdn.example.com/data.json
//! ```
//!
//! Without a flag the source is resolved the way the storefront resolves it
//! (`MARKET_CATALOG_URL`, then `MARKET_CATALOG_PATH`, then the bundled file).

use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

use campus_market_core::Product;
use campus_market_storefront::catalog::{CatalogError, CatalogLoader, CatalogSource};
use campus_market_storefront::config::{ConfigError, MarketConfig};
use thiserror::Error;
use url::Url;

/// Errors that can occur while checking the catalog.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// What a catalog check found.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CatalogReport {
    /// Records that decoded.
    pub count: usize,
    /// Ids used by more than one record, in first-repeat order.
    pub duplicate_ids: Vec<String>,
    /// Ids of records whose price is not a number.
    pub non_numeric_prices: Vec<String>,
}

impl CatalogReport {
    /// Whether the check found nothing to complain about.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.duplicate_ids.is_empty() && self.non_numeric_prices.is_empty()
    }
}

/// Inspect decoded catalog records.
#[must_use]
pub fn inspect(products: &[Product]) -> CatalogReport {
    let mut seen = HashSet::new();
    let mut report = CatalogReport {
        count: products.len(),
        ..CatalogReport::default()
    };

    for product in products {
        let id = product.id.as_str();
        if !seen.insert(id) && !report.duplicate_ids.iter().any(|d| d == id) {
            report.duplicate_ids.push(id.to_string());
        }
        if product.price.amount().is_none() {
            report.non_numeric_prices.push(id.to_string());
        }
    }

    report
}

/// Load the catalog from the chosen source and log a report.
///
/// # Errors
///
/// Returns `CheckError` if the source cannot be resolved, fetched, or is not
/// a JSON array.
pub async fn check(path: Option<PathBuf>, url: Option<Url>) -> Result<CatalogReport, CheckError> {
    let source = match (url, path) {
        (Some(url), _) => CatalogSource::Remote(url),
        (None, Some(path)) => CatalogSource::Local(path),
        (None, None) => MarketConfig::from_env()?.catalog,
    };

    tracing::info!("Checking catalog at {}", source);
    let products = CatalogLoader::new(source, Duration::ZERO)
        .fetch_static()
        .await?;
    let report = inspect(&products);

    tracing::info!("{} records decoded", report.count);
    for id in &report.duplicate_ids {
        tracing::warn!("Duplicate id: {}", id);
    }
    for id in &report.non_numeric_prices {
        tracing::warn!("Price is not a number for id: {}", id);
    }
    if report.is_clean() {
        tracing::info!("Catalog looks good");
    }

    Ok(report)
}
