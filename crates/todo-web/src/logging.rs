//! Tracing subscriber setup and per-request logging

use crate::config::{LogConfig, LogFormat};
use crate::error::WebError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Build the event filter: `RUST_LOG` if set, otherwise the configured level
///
/// # Errors
/// - `WebError::Config` if the configured directive does not parse
pub fn env_filter(config: &LogConfig) -> Result<EnvFilter, WebError> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| WebError::Config(format!("invalid log level '{}': {e}", config.level)))
}

/// Install the global subscriber
///
/// # Errors
/// - `WebError::Config` if the filter is invalid or a subscriber is already set
pub fn init(config: &LogConfig) -> Result<(), WebError> {
    let registry = tracing_subscriber::registry().with(env_filter(config)?);

    let result = match config.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .try_init(),
        LogFormat::Text => registry.with(fmt::layer().with_target(true)).try_init(),
    };
    result.map_err(|e| WebError::Config(format!("failed to initialize logging: {e}")))
}

/// One event per handled request
pub(crate) fn log_request(info: warp::log::Info<'_>) {
    let elapsed_ms = u64::try_from(info.elapsed().as_millis()).unwrap_or(u64::MAX);
    tracing::info!(
        target: "todo_web::request",
        method = %info.method(),
        path = info.path(),
        status = info.status().as_u16(),
        elapsed_ms,
        "request"
    );
}
