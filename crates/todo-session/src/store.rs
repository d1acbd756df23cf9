//! Server-side session store
//!
//! Sessions are kept in a concurrent map keyed by [`SessionId`]. A request
//! works on a [`Session`] snapshot and commits it back when done; two
//! requests from the same browser race and the last commit wins.

use crate::cookie::CookieSigner;
use crate::error::SessionError;
use crate::flash::Flash;
use crate::SessionId;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use todo_core::Lists;

/// Default idle time after which a session is dropped
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Everything stored for one browser
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    /// The browser's lists
    pub lists: Lists,
    /// Messages waiting for the next render
    pub flash: Flash,
}

/// Working copy of one browser's session for the duration of a request
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    data: SessionData,
    is_new: bool,
}

impl Session {
    /// Session id
    #[inline]
    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Whether this session was started by the current request
    #[inline]
    #[must_use]
    pub fn is_new(&self) -> bool {
        self.is_new
    }

    /// The session's lists
    #[inline]
    #[must_use]
    pub fn lists(&self) -> &Lists {
        &self.data.lists
    }

    /// The session's lists, for mutation
    #[inline]
    pub fn lists_mut(&mut self) -> &mut Lists {
        &mut self.data.lists
    }

    /// Pending flash messages
    #[inline]
    #[must_use]
    pub fn flash(&self) -> &Flash {
        &self.data.flash
    }

    /// Pending flash messages, for mutation
    #[inline]
    pub fn flash_mut(&mut self) -> &mut Flash {
        &mut self.data.flash
    }

    /// Take pending flash messages for rendering
    #[must_use]
    pub fn take_flash(&mut self) -> Flash {
        self.data.flash.take()
    }

    /// Drop pending flash messages once a page has shown them
    #[inline]
    pub fn clear_flash(&mut self) {
        self.data.flash = Flash::default();
    }

    /// New and still empty, so there is nothing worth storing
    #[inline]
    #[must_use]
    pub fn is_pristine(&self) -> bool {
        self.is_new && self.data == SessionData::default()
    }
}

#[derive(Debug)]
struct SessionEntry {
    data: SessionData,
    last_seen: Instant,
}

impl SessionEntry {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.last_seen.elapsed() > ttl
    }
}

/// Concurrent map of live sessions
#[derive(Debug)]
pub struct SessionStore {
    sessions: DashMap<SessionId, SessionEntry>,
    signer: CookieSigner,
    ttl: Duration,
}

impl SessionStore {
    /// Create an empty store
    #[must_use]
    pub fn new(signer: CookieSigner, ttl: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            signer,
            ttl,
        }
    }

    /// Session idle time to live
    #[inline]
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Number of stored sessions, expired ones included until purged
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the store holds no sessions
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Open the session named by a cookie value, or start a new one
    ///
    /// Any failure to resume (bad signature, unknown id, expiry) yields a
    /// fresh empty session.
    pub fn open(&self, cookie: Option<&str>) -> Session {
        match cookie.map(|value| self.resume(value)) {
            Some(Ok(session)) => session,
            Some(Err(err)) => {
                tracing::debug!(%err, "session not resumed, starting a new one");
                self.start()
            }
            None => self.start(),
        }
    }

    /// Resume an existing session from its cookie value
    ///
    /// # Errors
    /// - `SessionError::MalformedCookie` / `SessionError::BadSignature` from the signer
    /// - `SessionError::Unknown` if the store has no such session
    /// - `SessionError::Expired` if the session idled past the time to live
    pub fn resume(&self, cookie: &str) -> Result<Session, SessionError> {
        let id = self.signer.verify(cookie)?;

        let snapshot = self
            .sessions
            .get(&id)
            .map(|entry| (!entry.is_expired(self.ttl)).then(|| entry.data.clone()));

        match snapshot {
            None => Err(SessionError::Unknown),
            Some(None) => {
                self.sessions.remove(&id);
                Err(SessionError::Expired)
            }
            Some(Some(data)) => Ok(Session {
                id,
                data,
                is_new: false,
            }),
        }
    }

    /// Start a new, empty session
    ///
    /// The session is not stored until it is committed.
    pub fn start(&self) -> Session {
        let purged = self.purge_expired();
        if purged > 0 {
            tracing::debug!(purged, "purged expired sessions");
        }

        let id = SessionId::new();
        tracing::debug!(%id, "starting session");
        Session {
            id,
            data: SessionData::default(),
            is_new: true,
        }
    }

    /// Store the session's data, replacing whatever was there
    ///
    /// # Returns
    /// The `Set-Cookie` header value when the browser does not know this
    /// session yet.
    pub fn commit(&self, session: Session) -> Option<String> {
        let Session { id, data, is_new } = session;
        self.sessions.insert(
            id,
            SessionEntry {
                data,
                last_seen: Instant::now(),
            },
        );
        is_new.then(|| self.signer.set_cookie_header(id))
    }

    /// Remove every expired session
    ///
    /// # Returns
    /// Number of sessions removed
    pub fn purge_expired(&self) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, entry| !entry.is_expired(self.ttl));
        before.saturating_sub(self.sessions.len())
    }

    /// Cookie value identifying a session
    #[must_use]
    pub fn cookie_value(&self, id: SessionId) -> String {
        self.signer.sign(id)
    }
}
