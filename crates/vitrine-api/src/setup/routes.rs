//! Route configuration and setup

use std::sync::Arc;

use axum::{body::Body, http::Request, Router};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::{request_id_middleware, RequestId};
use crate::state::AppState;

/// Every path is served by the location handler; there are no fixed routes.
pub fn setup_routes(state: Arc<AppState>) -> Router {
    let trace_layer = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        let request_id = request
            .extensions()
            .get::<RequestId>()
            .map(|id| id.0.as_str())
            .unwrap_or("");
        tracing::info_span!(
            "http_request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    });

    Router::new()
        .fallback(handlers::serve_location)
        .with_state(state)
        .layer(trace_layer)
        .layer(axum::middleware::from_fn(request_id_middleware))
}
