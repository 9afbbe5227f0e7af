//! Error types module
//!
//! `ConfigError` covers everything that can go wrong while loading the location
//! rules; any of them is fatal at startup. `AppError` covers per-request outcomes
//! and self-describes its HTTP status through `ErrorMetadata`.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected outcomes like unmatched paths
    Debug,
    /// Warning level - for client mistakes worth noticing
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "STORAGE_UNAVAILABLE")
    fn error_code(&self) -> &'static str;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden in production
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

/// Errors raised while loading and compiling the location rules.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("No locations configured")]
    NoLocations,

    #[error("Location {index}: failed to compile regexp {pattern:?}: {source}")]
    InvalidPattern {
        index: usize,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Location {index}: RegExpMatch {pattern:?} is set but RegExpSub is missing")]
    MissingRewriteTemplate { index: usize, pattern: String },

    #[error("Location {index}: failed to parse time duration {value:?}: {reason}")]
    InvalidDuration {
        index: usize,
        value: String,
        reason: String,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Method \"{0}\" is not allowed")]
    MethodNotAllowed(String),

    #[error("No location matches {0}")]
    NoRuleMatched(String),

    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Static metadata for each variant: (http_status, error_code, sensitive, log_level).
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, bool, LogLevel) {
    match err {
        AppError::MethodNotAllowed(_) => (405, "METHOD_NOT_ALLOWED", false, LogLevel::Warn),
        AppError::NoRuleMatched(_) => (404, "NOT_FOUND", false, LogLevel::Debug),
        AppError::ObjectNotFound(_) => (404, "NOT_FOUND", false, LogLevel::Debug),
        AppError::StorageUnavailable(_) => (500, "STORAGE_UNAVAILABLE", true, LogLevel::Error),
        AppError::Internal(_) => (500, "INTERNAL_ERROR", true, LogLevel::Error),
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::MethodNotAllowed(_) => "MethodNotAllowed",
            AppError::NoRuleMatched(_) => "NoRuleMatched",
            AppError::ObjectNotFound(_) => "ObjectNotFound",
            AppError::StorageUnavailable(_) => "StorageUnavailable",
            AppError::Internal(_) => "Internal",
        }
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).3
    }

    fn client_message(&self) -> String {
        match self {
            AppError::MethodNotAllowed(_) => "Method not allowed".to_string(),
            AppError::NoRuleMatched(_) => "Not found".to_string(),
            AppError::ObjectNotFound(_) => "Not found".to_string(),
            AppError::StorageUnavailable(_) => "Failed to access storage".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_metadata_method_not_allowed() {
        let err = AppError::MethodNotAllowed("POST".to_string());
        assert_eq!(err.http_status_code(), 405);
        assert_eq!(err.error_code(), "METHOD_NOT_ALLOWED");
        assert!(!err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Warn);
        assert!(err.to_string().contains("POST"));
    }

    #[test]
    fn test_error_metadata_not_found_variants() {
        for err in [
            AppError::NoRuleMatched("/nowhere".to_string()),
            AppError::ObjectNotFound("img/cat.png".to_string()),
        ] {
            assert_eq!(err.http_status_code(), 404);
            assert_eq!(err.error_code(), "NOT_FOUND");
            assert_eq!(err.client_message(), "Not found");
            assert_eq!(err.log_level(), LogLevel::Debug);
        }
    }

    #[test]
    fn test_error_metadata_storage_unavailable_hides_details() {
        let err = AppError::StorageUnavailable("connection refused".to_string());
        assert_eq!(err.http_status_code(), 500);
        assert!(err.is_sensitive());
        assert!(!err.client_message().contains("refused"));
        assert_eq!(err.log_level(), LogLevel::Error);
    }

    #[test]
    fn test_config_error_names_location() {
        let source = regex::Regex::new("(").unwrap_err();
        let err = ConfigError::InvalidPattern {
            index: 3,
            pattern: "(".to_string(),
            source,
        };
        let message = err.to_string();
        assert!(message.contains("Location 3"));
        assert!(message.contains("\"(\""));
    }
}
