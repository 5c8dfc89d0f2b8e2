//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `MARKET_HOST` - Bind address (default: 127.0.0.1)
//! - `MARKET_PORT` - Listen port (default: 3000)
//! - `MARKET_CATALOG_URL` - Fetch the static catalog from this URL
//! - `MARKET_CATALOG_PATH` - Otherwise read it from this file
//!   (default: crates/storefront/static/data.json)
//! - `MARKET_CATALOG_DELAY_MS` - Pause before every catalog fetch (default: 500)
//! - `MARKET_STORE_PATH` - JSON file for local data; unset keeps it in memory
//! - `MARKET_STATIC_DIR` - Directory served under `/static`
//!   (default: crates/storefront/static)
//! - `MARKET_CAROUSEL_INTERVAL_SECS` - Carousel auto-advance, 0 disables (default: 5)
//! - `MARKET_MAX_UPLOAD_BYTES` - Publish form body limit (default: 5 MiB)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::catalog::CatalogSource;

const DEFAULT_CATALOG_PATH: &str = "crates/storefront/static/data.json";
const DEFAULT_STATIC_DIR: &str = "crates/storefront/static";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct MarketConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Where the static catalog document comes from
    pub catalog: CatalogSource,
    /// Pause before every catalog fetch
    pub catalog_delay: Duration,
    /// Local store file; `None` keeps local data in memory
    pub store_path: Option<PathBuf>,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Carousel auto-advance interval in seconds (0 = off)
    pub carousel_interval_secs: u32,
    /// Maximum request body size for uploads
    pub max_upload_bytes: usize,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl MarketConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let catalog = match get("MARKET_CATALOG_URL") {
            Some(url) => CatalogSource::Remote(Url::parse(&url).map_err(|e| {
                ConfigError::InvalidEnvVar("MARKET_CATALOG_URL".to_string(), e.to_string())
            })?),
            None => CatalogSource::Local(PathBuf::from(
                get("MARKET_CATALOG_PATH").unwrap_or_else(|| DEFAULT_CATALOG_PATH.to_string()),
            )),
        };

        Ok(Self {
            host: parse_or(&get, "MARKET_HOST", IpAddr::from([127, 0, 0, 1]))?,
            port: parse_or(&get, "MARKET_PORT", 3000)?,
            catalog,
            catalog_delay: Duration::from_millis(parse_or(&get, "MARKET_CATALOG_DELAY_MS", 500)?),
            store_path: get("MARKET_STORE_PATH").map(PathBuf::from),
            static_dir: get("MARKET_STATIC_DIR")
                .map_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR), PathBuf::from),
            carousel_interval_secs: parse_or(&get, "MARKET_CAROUSEL_INTERVAL_SECS", 5)?,
            max_upload_bytes: parse_or(&get, "MARKET_MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            sentry_dsn: get("SENTRY_DSN"),
            sentry_environment: get("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable, falling back to `default` when it is unset.
fn parse_or<T>(
    get: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get(key).map_or(Ok(default), |value| {
        value
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<MarketConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        MarketConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(
            config.catalog,
            CatalogSource::Local(PathBuf::from(DEFAULT_CATALOG_PATH))
        );
        assert_eq!(config.catalog_delay, Duration::from_millis(500));
        assert_eq!(config.store_path, None);
        assert_eq!(config.carousel_interval_secs, 5);
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("MARKET_HOST", "0.0.0.0"),
            ("MARKET_PORT", "8080"),
            ("MARKET_CATALOG_URL", "https://cdn.example.com/data.json"),
            ("MARKET_CATALOG_DELAY_MS", "0"),
            ("MARKET_STORE_PATH", "/var/lib/market/store.json"),
            ("MARKET_CAROUSEL_INTERVAL_SECS", "0"),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(
            config.catalog,
            CatalogSource::Remote(Url::parse("https://cdn.example.com/data.json").unwrap())
        );
        assert!(config.catalog_delay.is_zero());
        assert_eq!(
            config.store_path,
            Some(PathBuf::from("/var/lib/market/store.json"))
        );
        assert_eq!(config.carousel_interval_secs, 0);
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = config_from(&[("MARKET_PORT", "  "), ("MARKET_STORE_PATH", "")]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.store_path, None);
    }

    #[test]
    fn test_invalid_values() {
        let err = config_from(&[("MARKET_PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "MARKET_PORT"));

        let err = config_from(&[("MARKET_HOST", "localhost:3000")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "MARKET_HOST"));

        let err = config_from(&[("MARKET_CATALOG_URL", "not a url")]).unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "MARKET_CATALOG_URL")
        );
    }
}
