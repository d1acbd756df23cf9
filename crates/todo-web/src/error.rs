//! Error types for the web layer
//!
//! Domain errors (`todo_core::TodoError`) are recovered inside the handlers
//! and never appear here. What remains are faults of the server itself.

/// Main web error type
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// Template missing or failed to render
    #[error("render failed: {0}")]
    Render(#[from] minijinja::Error),

    /// Invalid configuration value
    #[error("configuration error: {0}")]
    Config(String),

    /// Configuration file could not be parsed
    #[error("invalid configuration file: {0}")]
    Toml(#[from] toml::de::Error),

    /// Reading configuration or binding the listener failed
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Server could not bind its address
    #[error("server error: {0}")]
    Server(#[from] warp::Error),
}

impl WebError {
    /// Check if error comes from configuration
    #[inline]
    #[must_use]
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Toml(_))
    }
}

/// Rejection carrying an unexpected server-side failure
///
/// Recovered into a 500 page.
#[derive(Debug)]
pub struct ServerError {
    /// Description for the log, never shown to the client
    pub message: String,
}

impl warp::reject::Reject for ServerError {}

impl From<WebError> for ServerError {
    fn from(err: WebError) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_classification() {
        assert!(WebError::Config("bad".into()).is_config());
        let io = WebError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"));
        assert!(!io.is_config());
        assert!(io.to_string().contains("missing"));
    }

    #[test]
    fn server_error_keeps_message() {
        let err = ServerError::from(WebError::Config("no secret".into()));
        assert_eq!(err.message, "configuration error: no secret");
    }
}
