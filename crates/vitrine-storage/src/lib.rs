//! Vitrine Storage Library
//!
//! Read-only object access for the proxy: the `Storage` trait the request handler
//! depends on, and its S3 implementation over `object_store`.
//!
//! # Storage keys
//!
//! Keys arrive exactly as the location rules produced them. The S3 backend strips
//! leading `/` before fetching, so `/img/a.png` reads the object `img/a.png`;
//! the rest of the key is sent unchanged. See [`s3::object_path`].

pub mod cache;
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use cache::ClientCache;
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
pub use vitrine_core::StorageBackend;
