//! Server configuration
//!
//! Resolved in three layers, later ones winning: an optional TOML file,
//! `TODO_*` environment variables, then command line flags.

use crate::error::WebError;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

/// Environment variable overriding [`AppConfig::bind`]
pub const ENV_BIND: &str = "TODO_BIND";
/// Environment variable overriding [`SessionConfig::secret`]
pub const ENV_SESSION_SECRET: &str = "TODO_SESSION_SECRET";
/// Environment variable overriding [`SessionConfig::ttl_secs`]
pub const ENV_SESSION_TTL: &str = "TODO_SESSION_TTL_SECS";

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Address the HTTP server listens on
    pub bind: SocketAddr,
    /// Session cookie and store settings
    pub session: SessionConfig,
    /// Logging settings
    pub log: LogConfig,
}

/// Session settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Secret the cookie signing key is derived from
    ///
    /// When unset a random secret is used and sessions do not survive a
    /// restart.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    /// Idle seconds after which a session is dropped
    pub ttl_secs: u64,
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub level: String,
    /// Output format
    pub format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 4567)),
            session: SessionConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: None,
            ttl_secs: todo_session::DEFAULT_TTL.as_secs(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

impl AppConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With listen address
    #[inline]
    #[must_use]
    pub fn with_bind(mut self, bind: SocketAddr) -> Self {
        self.bind = bind;
        self
    }

    /// With cookie signing secret
    #[inline]
    #[must_use]
    pub fn with_session_secret(mut self, secret: impl Into<String>) -> Self {
        self.session.secret = Some(secret.into());
        self
    }

    /// With session time to live
    #[inline]
    #[must_use]
    pub fn with_ttl_secs(mut self, ttl_secs: u64) -> Self {
        self.session.ttl_secs = ttl_secs;
        self
    }

    /// Session time to live as a duration
    #[inline]
    #[must_use]
    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session.ttl_secs)
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    /// - `WebError::Toml` if the text is not valid configuration
    pub fn from_toml_str(text: &str) -> Result<Self, WebError> {
        Ok(toml::from_str(text)?)
    }

    /// Load configuration from an optional file, then apply environment overrides
    ///
    /// # Errors
    /// - `WebError::Io` if the file cannot be read
    /// - `WebError::Toml` if the file is not valid configuration
    /// - `WebError::Config` if an environment override is malformed
    pub fn load(path: Option<&Path>) -> Result<Self, WebError> {
        let config = match path {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading configuration file");
                Self::from_toml_str(&std::fs::read_to_string(path)?)?
            }
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `TODO_*` overrides from a variable lookup
    ///
    /// # Errors
    /// - `WebError::Config` if a value does not parse
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self, WebError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = lookup(ENV_BIND) {
            self.bind = bind
                .parse()
                .map_err(|e| WebError::Config(format!("{ENV_BIND}={bind}: {e}")))?;
        }
        if let Some(secret) = lookup(ENV_SESSION_SECRET) {
            self.session.secret = Some(secret);
        }
        if let Some(ttl) = lookup(ENV_SESSION_TTL) {
            self.session.ttl_secs = ttl
                .parse()
                .map_err(|e| WebError::Config(format!("{ENV_SESSION_TTL}={ttl}: {e}")))?;
        }
        Ok(self)
    }

    /// Copy safe to print, with the session secret masked
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.session.secret.is_some() {
            copy.session.secret = Some("<redacted>".to_string());
        }
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults() {
        let config = AppConfig::new();
        assert_eq!(config.bind.port(), 4567);
        assert_eq!(config.session.secret, None);
        assert_eq!(config.session_ttl(), todo_session::DEFAULT_TTL);
        assert_eq!(config.log.format, LogFormat::Text);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            bind = "0.0.0.0:8080"

            [log]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.bind, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(config.log.level, "info");
        assert_eq!(config.session, SessionConfig::default());
    }

    #[test]
    fn unknown_format_is_rejected() {
        let err = AppConfig::from_toml_str("[log]\nformat = \"xml\"").unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn overrides_win() {
        let vars: HashMap<&str, &str> = [
            (ENV_BIND, "127.0.0.1:9000"),
            (ENV_SESSION_SECRET, "hunter2"),
            (ENV_SESSION_TTL, "60"),
        ]
        .into_iter()
        .collect();

        let config = AppConfig::new()
            .apply_overrides(|key| vars.get(key).map(|v| (*v).to_string()))
            .unwrap();
        assert_eq!(config.bind.port(), 9000);
        assert_eq!(config.session.secret.as_deref(), Some("hunter2"));
        assert_eq!(config.session_ttl(), Duration::from_secs(60));
    }

    #[test]
    fn malformed_override_is_config_error() {
        let err = AppConfig::new()
            .apply_overrides(|key| (key == ENV_SESSION_TTL).then(|| "soon".to_string()))
            .unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains(ENV_SESSION_TTL));
    }

    #[test]
    fn redacted_masks_secret() {
        let config = AppConfig::new().with_session_secret("hunter2");
        let shown = toml::to_string(&config.redacted()).unwrap();
        assert!(!shown.contains("hunter2"));
        assert!(shown.contains("<redacted>"));
    }
}
