//! HTTP error response conversion
//!
//! Handlers produce `AppError`; [`HttpAppError`] renders it with the status,
//! machine code and log level its `ErrorMetadata` declares.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use vitrine_core::{AppError, ErrorMetadata, LogLevel};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Machine-readable error code for programmatic handling
    pub code: String,
}

/// Wrapper type for AppError to implement IntoResponse
///
/// Details are hidden unless [`HttpAppError::with_details`] enables them, so an
/// error converted with `?` is safe to render in production.
#[derive(Debug)]
pub struct HttpAppError {
    error: AppError,
    show_details: bool,
}

impl HttpAppError {
    pub fn new(error: AppError) -> Self {
        Self {
            error,
            show_details: false,
        }
    }

    /// Include the internal message for non-sensitive errors.
    pub fn with_details(mut self, show_details: bool) -> Self {
        self.show_details = show_details;
        self
    }

    pub fn error(&self) -> &AppError {
        &self.error
    }
}

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError::new(err)
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Request failed");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Request failed");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Request failed");
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.error;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let body = if self.show_details && !app_error.is_sensitive() {
            ErrorResponse {
                error: app_error.client_message(),
                details: Some(app_error.to_string()),
                error_type: Some(app_error.error_type().to_string()),
                code: app_error.error_code().to_string(),
            }
        } else {
            ErrorResponse {
                error: app_error.client_message(),
                details: None,
                error_type: None,
                code: app_error.error_code().to_string(),
            }
        };

        let mut response = (status, Json(body)).into_response();
        if matches!(app_error, AppError::MethodNotAllowed(_)) {
            response
                .headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static("GET"));
        }
        response
    }
}
