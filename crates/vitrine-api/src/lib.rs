//! Vitrine API Library
//!
//! HTTP front end that maps request paths to S3 objects through ordered
//! location rules. The binary in `main.rs` wires these pieces together.

pub mod body;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod setup;
pub mod state;
pub mod telemetry;

// Re-exports
pub use config::ServerConfig;
pub use error::{ErrorResponse, HttpAppError};
pub use setup::routes::setup_routes;
pub use state::AppState;
