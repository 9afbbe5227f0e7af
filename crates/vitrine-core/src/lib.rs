//! Vitrine Core Library
//!
//! Location rules, path-to-key resolution, content-type inference, configuration
//! loading and the error taxonomy shared by the storage and API crates.

pub mod config;
pub mod content_type;
pub mod duration;
pub mod error;
pub mod rules;
pub mod storage_types;

// Re-export commonly used types
pub use config::{LocationConfig, LocationsFile};
pub use content_type::{infer_content_type, DEFAULT_CONTENT_TYPE};
pub use error::{AppError, ConfigError, ErrorMetadata, LogLevel};
pub use rules::{LocationRule, Rewrite, RuleMatch, RuleSet};
pub use storage_types::StorageBackend;
