//! Application setup and initialization
//!
//! Loads the location rules, builds the storage gateway and assembles the router.
//! Telemetry must already be initialized so load failures are logged.

pub mod routes;
pub mod server;
pub mod tls;
pub mod validation;

use std::sync::Arc;

use anyhow::{Context, Result};
use vitrine_core::RuleSet;
use vitrine_storage::S3Storage;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Initialize the entire application
pub fn initialize_app(config: &ServerConfig) -> Result<(Arc<AppState>, axum::Router)> {
    let rules = RuleSet::load(&config.config_path).with_context(|| {
        format!(
            "Failed to load location rules from {}",
            config.config_path.display()
        )
    })?;

    // Fail fast on values that would only surface per request
    validation::validate_rules(&rules).context("Location rule validation failed")?;

    for (index, rule) in rules.iter().enumerate() {
        tracing::info!(
            rule = index,
            prefix = rule.prefix_pattern(),
            backend = %rule.backend(),
            drop_query_params = rule.drop_query_params(),
            "Location loaded"
        );
    }
    tracing::info!(count = rules.len(), "Location rules loaded");

    let state = Arc::new(AppState::new(
        rules,
        Arc::new(S3Storage::new()),
        config.is_production(),
    ));
    let router = routes::setup_routes(state.clone());

    Ok((state, router))
}
