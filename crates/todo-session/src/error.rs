//! Error types for session lookup
//!
//! None of these reach the client: a session that cannot be resumed is
//! replaced by a fresh one.

/// Reasons a session cookie could not be resumed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// Cookie value is not `<id>.<signature>`
    #[error("malformed session cookie")]
    MalformedCookie,

    /// Signature does not match the session id
    #[error("session cookie signature mismatch")]
    BadSignature,

    /// Cookie is valid but the store has no such session
    #[error("unknown session")]
    Unknown,

    /// Session idled past its time to live
    #[error("session expired")]
    Expired,
}
