//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Session layer (tower-sessions, carries one-shot alerts)
//! 5. Body limit (publish uploads)

pub mod auth;
pub mod flash;
pub mod request_id;
pub mod session;

pub use auth::{LOGIN_PATH, RequireUser};
pub use flash::{push_alert, take_alerts};
pub use request_id::request_id_middleware;
pub use session::create_session_layer;
