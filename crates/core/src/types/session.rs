//! Login-stub session record.

use serde::{Deserialize, Serialize};

/// Display name recorded when the login form is submitted without one.
pub const DEFAULT_DISPLAY_NAME: &str = "同学";

/// The locally recorded "logged in" user.
///
/// There are no credentials and no expiry: the record existing is what
/// "logged in" means.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    pub name: String,
}

impl UserSession {
    /// Build the session recorded for a login form submission.
    #[must_use]
    pub fn login(display_name: &str) -> Self {
        let name = display_name.trim();
        let name = if name.is_empty() {
            DEFAULT_DISPLAY_NAME
        } else {
            name
        };

        Self {
            name: name.to_string(),
        }
    }
}
