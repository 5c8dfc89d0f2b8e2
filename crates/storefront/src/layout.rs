//! Shared page chrome: header navigation, login-state controls, footer.
//!
//! Pages live at two depths (`/index.html` and `/pages/*.html`), and every
//! link in the chrome is relative. [`path_prefix`] picks `../` or `./` from
//! the request path so the same markup works at both depths.
//!
//! The active navigation link is chosen by substring containment of the
//! link target in the request path. This can mark a link active when its
//! file name appears inside an unrelated path; that imprecision is accepted.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use campus_market_core::UserSession;
use tower_sessions::Session;

use crate::db::SessionRepository;
use crate::error::AppError;
use crate::middleware::flash;
use crate::state::AppState;

/// Directory that holds every page except the home page.
const PAGES_DIR: &str = "/pages/";

/// Navigation entries: (target relative to the site root, label).
const NAV_LINKS: &[(&str, &str)] = &[
    ("index.html", "首页"),
    ("pages/list.html", "二手市场"),
    ("pages/publish.html", "发布商品"),
];

/// Relative prefix from the page at `path` back to the site root.
#[must_use]
pub fn path_prefix(path: &str) -> &'static str {
    if path.contains(PAGES_DIR) { "../" } else { "./" }
}

/// One header navigation link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub href: String,
    pub label: &'static str,
    pub active: bool,
}

/// Whether the link to `target` should be highlighted on `path`.
fn is_active(path: &str, target: &str) -> bool {
    path.contains(target) || (path.ends_with('/') && target == "index.html")
}

/// Everything the shared header and footer need.
#[derive(Debug, Clone)]
pub struct Layout {
    /// `../` or `./`, see [`path_prefix`].
    pub prefix: &'static str,
    /// Current path and query, used to come back here after logout.
    pub return_to: String,
    pub user: Option<UserSession>,
    pub nav: Vec<NavLink>,
    /// Pending user alerts to show on this page.
    pub alerts: Vec<String>,
}

impl Layout {
    /// Build the chrome for the page at `path`.
    #[must_use]
    pub fn build(path: &str, return_to: impl Into<String>, user: Option<UserSession>) -> Self {
        let prefix = path_prefix(path);
        let nav = NAV_LINKS
            .iter()
            .map(|&(target, label)| NavLink {
                href: format!("{prefix}{target}"),
                label,
                active: is_active(path, target),
            })
            .collect();

        Self {
            prefix,
            return_to: return_to.into(),
            user,
            nav,
            alerts: Vec::new(),
        }
    }

    /// Link to `target` (relative to the site root) from this page.
    #[must_use]
    pub fn href(&self, target: &str) -> String {
        format!("{}{target}", self.prefix)
    }

    /// Add an alert to show on this page.
    #[must_use]
    pub fn with_alert(mut self, message: impl Into<String>) -> Self {
        self.alerts.push(message.into());
        self
    }
}

impl FromRequestParts<AppState> for Layout {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let path = parts.uri.path().to_string();
        let return_to = parts
            .uri
            .path_and_query()
            .map_or_else(|| path.clone(), ToString::to_string);
        let user = SessionRepository::new(state.store()).current()?;

        let mut layout = Self::build(&path, return_to, user);
        if let Some(session) = parts.extensions.get::<Session>() {
            layout.alerts = flash::take_alerts(session).await?;
        }

        Ok(layout)
    }
}
