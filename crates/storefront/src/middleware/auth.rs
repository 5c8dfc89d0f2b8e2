//! Login gate for the publish pages.
//!
//! The login stub has no credentials; "logged in" only means a display name
//! is recorded in the local store. Pages that need one use [`RequireUser`].

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use campus_market_core::UserSession;
use tower_sessions::Session;

use crate::db::SessionRepository;
use crate::error::AppError;
use crate::middleware::flash;
use crate::state::AppState;

/// Path of the login page.
pub const LOGIN_PATH: &str = "/pages/login.html";

/// Alert shown when publishing without a session.
pub const LOGIN_REQUIRED_MESSAGE: &str = "请先登录后再发布商品";

/// Extractor that requires a recorded display name.
///
/// Without one the request is answered with an alert and a redirect to the
/// login page.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireUser(user): RequireUser) -> impl IntoResponse {
///     format!("Hi, {}", user.name)
/// }
/// ```
pub struct RequireUser(pub UserSession);

/// Rejection for [`RequireUser`].
pub enum LoginRejection {
    /// Not logged in: go to the login page.
    RedirectToLogin,
    /// The store or session could not be read.
    Failed(AppError),
}

impl IntoResponse for LoginRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to(LOGIN_PATH).into_response(),
            Self::Failed(err) => err.into_response(),
        }
    }
}

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = LoginRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = SessionRepository::new(state.store())
            .current()
            .map_err(|e| LoginRejection::Failed(e.into()))?;

        if let Some(user) = user {
            return Ok(Self(user));
        }

        tracing::debug!(path = %parts.uri.path(), "Publish attempted without session");
        if let Some(session) = parts.extensions.get::<Session>() {
            flash::push_alert(session, LOGIN_REQUIRED_MESSAGE)
                .await
                .map_err(|e| LoginRejection::Failed(e.into()))?;
        }

        Err(LoginRejection::RedirectToLogin)
    }
}
