//! Location handler: serves every path through the rule set.
//!
//! GET only. The first matching rule decides the storage backend, the object
//! key and the caching headers. Rules with `DropParams` answer a request that
//! carries a query string with a 301 to the bare path instead.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use percent_encoding::percent_decode_str;
use vitrine_core::{infer_content_type, AppError};

use crate::body::ObjectBody;
use crate::error::HttpAppError;
use crate::state::AppState;

#[tracing::instrument(skip_all, fields(method = %method, path = %uri.path()))]
pub async fn serve_location(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
) -> Response {
    match fetch_location(&state, &method, &uri).await {
        Ok(response) => response,
        Err(error) => HttpAppError::from(error)
            .with_details(state.show_error_details)
            .into_response(),
    }
}

async fn fetch_location(state: &AppState, method: &Method, uri: &Uri) -> Result<Response, AppError> {
    if method != Method::GET {
        return Err(AppError::MethodNotAllowed(method.to_string()));
    }

    let path = decode_path(uri.path());
    let matched = state
        .rules
        .resolve(&path)
        .ok_or_else(|| AppError::NoRuleMatched(path.clone()))?;
    let rule = matched.rule;

    if rule.drop_query_params() && uri.query().is_some_and(|q| !q.is_empty()) {
        tracing::debug!(rule = matched.index, "Dropping query parameters");
        return permanent_redirect(uri.path());
    }

    let key = matched.resolve_key(&path);
    tracing::debug!(
        rule = matched.index,
        prefix = rule.prefix_pattern(),
        key = %key,
        "Location matched"
    );

    let start = std::time::Instant::now();
    let bytes = state.storage.download(rule.backend(), &key).await?;

    if bytes.is_empty() {
        // Zero-byte objects are served as missing.
        tracing::debug!(key = %key, "Empty object treated as not found");
        return Err(AppError::ObjectNotFound(key));
    }

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, infer_content_type(&key))
        .header(header::CONTENT_LENGTH, bytes.len());

    if let Some(cache_control) = rule.cache_control() {
        builder = builder.header(header::CACHE_CONTROL, cache_control);
    }

    if let Some(after) = rule.expires_after() {
        match Utc::now().checked_add_signed(after) {
            Some(expires) => builder = builder.header(header::EXPIRES, http_date(expires)),
            None => tracing::warn!(rule = matched.index, "Expires out of range, header skipped"),
        }
    }

    tracing::info!(
        key = %key,
        size_bytes = bytes.len() as u64,
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Serving object"
    );

    builder.body(Body::new(ObjectBody::new(key, bytes))).map_err(|e| {
        tracing::error!(error = %e, "Failed to build response");
        AppError::Internal(e.to_string())
    })
}

/// Request path with percent-escapes decoded; invalid UTF-8 is replaced.
fn decode_path(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

fn permanent_redirect(location: &str) -> Result<Response, AppError> {
    let location = HeaderValue::from_str(location).map_err(|e| AppError::Internal(e.to_string()))?;
    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response())
}

/// RFC 1123 date as used by HTTP headers.
pub fn http_date(at: DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}
