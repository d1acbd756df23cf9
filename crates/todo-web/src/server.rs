//! HTTP server lifecycle

use crate::config::AppConfig;
use crate::error::WebError;
use crate::logging;
use crate::routes::routes;
use crate::state::AppState;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

/// Bind the configured address and serve until the shutdown future resolves
///
/// # Returns
/// The bound address and the server future to drive.
///
/// # Errors
/// - `WebError::Render` if a bundled template does not compile
/// - `WebError::Server` if the address cannot be bound
pub fn bind(
    config: &AppConfig,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(SocketAddr, impl Future<Output = ()>), WebError> {
    let state = Arc::new(AppState::from_config(config)?);
    let (addr, server) =
        warp::serve(routes(state)).try_bind_with_graceful_shutdown(config.bind, shutdown)?;
    Ok((addr, server))
}

/// Install logging, then serve until Ctrl-C
///
/// # Errors
/// - `WebError::Config` if logging cannot be initialized
/// - any error from [`bind`]
pub async fn serve(config: AppConfig) -> Result<(), WebError> {
    logging::init(&config.log)?;
    tracing::debug!(config = ?config.redacted(), "resolved configuration");

    let (addr, server) = bind(&config, async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(%err, "failed to listen for shutdown signal");
        }
        tracing::info!("shutdown requested");
    })?;

    tracing::info!(%addr, version = crate::VERSION, "todo lists listening");
    server.await;
    tracing::info!("server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn binds_ephemeral_port() {
        let config = AppConfig::new().with_bind(SocketAddr::from(([127, 0, 0, 1], 0)));
        let (addr, server) = bind(&config, async {}).unwrap();
        assert_ne!(addr.port(), 0);
        server.await;
    }
}
