//! Session repository for the login stub.

use campus_market_core::UserSession;

use super::{KeyValueStore, RepositoryError, read_json, write_json};

/// Store key holding the session record.
pub const SESSION_KEY: &str = "campus_user";

/// Repository for the single device-wide session record.
pub struct SessionRepository<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> SessionRepository<'a> {
    /// Create a new session repository.
    #[must_use]
    pub const fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// The logged-in user, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store fails or the record is corrupt.
    pub fn current(&self) -> Result<Option<UserSession>, RepositoryError> {
        read_json(self.store, SESSION_KEY)
    }

    /// Record a login for `display_name`, replacing any existing session.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store cannot be written.
    pub fn login(&self, display_name: &str) -> Result<UserSession, RepositoryError> {
        let session = UserSession::login(display_name);
        write_json(self.store, SESSION_KEY, &session)?;
        Ok(session)
    }

    /// Clear the session.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store cannot be written.
    pub fn logout(&self) -> Result<(), RepositoryError> {
        self.store.remove(SESSION_KEY)?;
        Ok(())
    }
}
