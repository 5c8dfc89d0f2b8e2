//! Login stub route handlers.
//!
//! "Logging in" records a display name in the local store; there is no
//! password and no account. The register page is the same form under a
//! different heading.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tracing::instrument;

use crate::db::SessionRepository;
use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::layout::Layout;
use crate::state::AppState;

/// Where login sends the user.
const HOME_PATH: &str = "/index.html";

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
}

/// Logout form data.
#[derive(Debug, Default, Deserialize)]
pub struct LogoutForm {
    pub return_to: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login/register page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub layout: Layout,
    pub heading: &'static str,
    pub submit_label: &'static str,
}

// =============================================================================
// Route Handlers
// =============================================================================

/// Display the login page.
pub async fn login_page(layout: Layout) -> impl IntoResponse {
    LoginTemplate {
        layout,
        heading: "登录",
        submit_label: "登录",
    }
}

/// Display the register page.
pub async fn register_page(layout: Layout) -> impl IntoResponse {
    LoginTemplate {
        layout,
        heading: "注册",
        submit_label: "注册并登录",
    }
}

/// Record the submitted display name and go home.
#[instrument(skip(state, form))]
pub async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Result<Redirect> {
    let user = SessionRepository::new(state.store()).login(&form.username)?;
    add_breadcrumb("auth", "User logged in", None);
    tracing::info!(name = %user.name, "User logged in");

    Ok(Redirect::to(HOME_PATH))
}

/// Clear the session and return to the page the user was on.
#[instrument(skip(state, form))]
pub async fn logout(
    State(state): State<AppState>,
    Form(form): Form<LogoutForm>,
) -> Result<Redirect> {
    SessionRepository::new(state.store()).logout()?;
    add_breadcrumb("auth", "User logged out", None);
    tracing::info!("User logged out");

    let target = form
        .return_to
        .as_deref()
        .filter(|path| is_local_path(path))
        .unwrap_or(HOME_PATH);

    Ok(Redirect::to(target))
}

/// Whether `path` stays on this site.
fn is_local_path(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//") && !path.contains('\\')
}
