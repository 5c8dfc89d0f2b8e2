//! HTTP route handlers for the storefront.
//!
//! Pages keep file-style paths so every relative link in the shared header
//! resolves the same way from the site root and from `pages/`.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Home page (carousel, featured items, categories)
//! GET  /index.html              - Home page
//! GET  /health                  - Health check
//!
//! # Catalog
//! GET  /pages/list.html         - Product list (?cat=&cond= filters)
//! GET  /pages/detail.html       - Product detail and comments (?id=)
//! POST /pages/detail.html       - Add a comment (?id=)
//!
//! # Login stub
//! GET  /pages/login.html        - Login page
//! POST /pages/login.html        - Record display name
//! GET  /pages/register.html     - Register page
//! POST /pages/register.html     - Record display name
//! POST /logout                  - Clear session, back to `return_to`
//!
//! # Publish (requires login)
//! GET  /pages/publish.html      - Publish form
//! POST /pages/publish.html      - Publish listing (multipart)
//! ```

pub mod auth;
pub mod detail;
pub mod home;
pub mod listing;
pub mod publish;

use axum::{
    Router,
    extract::{FromRequestParts, Query, rejection::QueryRejection},
    http::request::Parts,
    routing::{get, post},
};

use crate::state::AppState;

/// Build the page routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/index.html", get(home::home))
        .route("/pages/list.html", get(listing::list))
        .route(
            "/pages/detail.html",
            get(detail::show).post(detail::add_comment),
        )
        .route(
            "/pages/login.html",
            get(auth::login_page).post(auth::login),
        )
        .route(
            "/pages/register.html",
            get(auth::register_page).post(auth::login),
        )
        .route("/logout", post(auth::logout))
        .route(
            "/pages/publish.html",
            get(publish::form).post(publish::submit),
        )
}

/// Query string pairs in request order.
///
/// A key given more than once resolves to its first value, so
/// `?cat=books&cat=sports` filters by `books`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    /// First value given for `key`.
    #[must_use]
    pub fn first(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }
}

impl<const N: usize> From<[(&str, &str); N]> for QueryParams {
    fn from(pairs: [(&str, &str); N]) -> Self {
        Self(
            pairs
                .iter()
                .map(|&(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

impl<S: Send + Sync> FromRequestParts<S> for QueryParams {
    type Rejection = QueryRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state).await?;
        Ok(Self(pairs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_value_wins() {
        let params = QueryParams::from([("cat", "books"), ("cond", "used"), ("cat", "sports")]);
        assert_eq!(params.first("cat"), Some("books"));
        assert_eq!(params.first("cond"), Some("used"));
        assert_eq!(params.first("id"), None);
    }
}
