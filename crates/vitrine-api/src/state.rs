//! Application state shared by every request.

use std::sync::Arc;

use vitrine_core::RuleSet;
use vitrine_storage::Storage;

/// Immutable after startup; handlers receive it as `State<Arc<AppState>>`.
#[derive(Clone)]
pub struct AppState {
    pub rules: Arc<RuleSet>,
    pub storage: Arc<dyn Storage>,
    /// Render internal error details in responses (non-production only).
    pub show_error_details: bool,
}

impl AppState {
    pub fn new(rules: RuleSet, storage: Arc<dyn Storage>, is_production: bool) -> Self {
        Self {
            rules: Arc::new(rules),
            storage,
            show_error_details: !is_production,
        }
    }
}
