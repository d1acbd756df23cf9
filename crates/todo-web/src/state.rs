//! Shared application state

use crate::config::AppConfig;
use crate::error::WebError;
use crate::views::Views;
use todo_session::{CookieSigner, SessionStore};

/// State shared by every request handler
#[derive(Debug)]
pub struct AppState {
    /// Per-browser sessions
    pub sessions: SessionStore,
    /// Compiled page templates
    pub views: Views,
}

impl AppState {
    /// Create state around an existing session store
    ///
    /// # Errors
    /// - `WebError::Render` if a bundled template does not compile
    pub fn new(sessions: SessionStore) -> Result<Self, WebError> {
        Ok(Self {
            sessions,
            views: Views::new()?,
        })
    }

    /// Create state from configuration
    ///
    /// Without a configured secret the cookie key is random, so sessions
    /// end when the process does.
    ///
    /// # Errors
    /// - `WebError::Render` if a bundled template does not compile
    pub fn from_config(config: &AppConfig) -> Result<Self, WebError> {
        let signer = match &config.session.secret {
            Some(secret) => CookieSigner::from_secret(secret.as_bytes()),
            None => {
                tracing::warn!("no session secret configured, using an ephemeral key");
                CookieSigner::ephemeral()
            }
        };
        Self::new(SessionStore::new(signer, config.session_ttl()))
    }
}
