//! Todo Session
//!
//! Per-browser state for the todo lists service:
//! - **SessionStore**: concurrent map of session data with idle expiry
//! - **CookieSigner**: ed25519-signed session cookies
//! - **Flash**: one-shot error and success messages
//!
//! # Example
//!
//! ```rust
//! use todo_session::{CookieSigner, SessionStore, DEFAULT_TTL};
//!
//! let store = SessionStore::new(CookieSigner::from_secret(b"secret"), DEFAULT_TTL);
//!
//! let mut session = store.open(None);
//! session.lists_mut().create_list("Groceries").unwrap();
//! let id = session.id();
//! let set_cookie = store.commit(session);
//! assert!(set_cookie.is_some());
//!
//! let resumed = store.open(Some(&store.cookie_value(id)));
//! assert_eq!(resumed.lists().len(), 1);
//! ```

#![warn(missing_docs)]

pub mod cookie;
pub mod error;
pub mod flash;
pub mod store;

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// Re-exports
pub use cookie::{CookieSigner, SESSION_COOKIE};
pub use error::SessionError;
pub use flash::Flash;
pub use store::{Session, SessionData, SessionStore, DEFAULT_TTL};

/// Identifier of one browser session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Generate a random session id
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
