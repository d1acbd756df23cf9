//! Todo Web
//!
//! Browser front end for the todo lists service: warp routes over a
//! session-backed [`todo_core::Lists`] store, rendered with minijinja.
//!
//! - [`routes::routes`]: the full filter tree, ready for `warp::serve`
//! - [`handlers`]: one handler per route, plus error pages
//! - [`views`]: page templates and their view models
//! - [`config`]: file, environment and flag configuration
//!
//! # Example
//!
//! ```rust,no_run
//! use todo_web::{AppConfig, server};
//!
//! # async fn run() -> Result<(), todo_web::WebError> {
//! server::serve(AppConfig::new()).await
//! # }
//! ```

#![warn(missing_docs)]

pub mod assets;
pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod routes;
pub mod server;
pub mod state;
pub mod views;

// Re-exports
pub use config::{AppConfig, LogConfig, LogFormat, SessionConfig};
pub use error::{ServerError, WebError};
pub use routes::routes;
pub use state::AppState;
pub use views::Views;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
