use crate::cache::ClientCache;
use crate::traits::{Storage, StorageError, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
use object_store::Error as ObjectStoreError;
use object_store::{ObjectStoreExt, Result as ObjectResult, RetryConfig};
use vitrine_core::StorageBackend;

const DEFAULT_REGION: &str = "us-east-1";

/// Endpoint URL for a backend descriptor.
///
/// Legacy configurations give `host:port` plus a TLS flag; a value that already
/// carries a scheme is used as-is. `None` means the AWS default endpoint.
pub fn endpoint_url(backend: &StorageBackend) -> Option<String> {
    let endpoint = backend.endpoint.trim_end_matches('/');
    if endpoint.is_empty() {
        return None;
    }
    if endpoint.contains("://") {
        return Some(endpoint.to_string());
    }
    let scheme = if backend.use_tls { "https" } else { "http" };
    Some(format!("{}://{}", scheme, endpoint))
}

/// Build an S3 client scoped to one bucket.
pub fn build_client(backend: &StorageBackend) -> StorageResult<AmazonS3> {
    let region = backend.region.as_deref().unwrap_or(DEFAULT_REGION);

    let mut builder = AmazonS3Builder::new()
        .with_region(region)
        .with_bucket_name(backend.bucket.clone())
        .with_retry(RetryConfig {
            max_retries: 0,
            ..Default::default()
        });

    if let Some(endpoint) = endpoint_url(backend) {
        let allow_http = endpoint.starts_with("http://");
        builder = builder.with_endpoint(endpoint).with_allow_http(allow_http);
    }

    builder = if backend.has_credentials() {
        builder
            .with_access_key_id(backend.access_key.clone().unwrap_or_default())
            .with_secret_access_key(backend.secret_key.clone().unwrap_or_default())
    } else {
        // Public buckets: send unsigned requests.
        builder.with_skip_signature(true)
    };

    builder
        .build()
        .map_err(|e| StorageError::ConfigError(e.to_string()))
}

/// Object path for a storage key.
///
/// Leading separators are stripped; S3 paths in `object_store` cannot start with
/// `/`. Everything else is taken verbatim, so characters such as `~` or `%`
/// reach S3 unchanged. `None` means the key cannot name an object: it is empty,
/// ends with `/`, or has an empty, `.` or `..` segment.
pub fn object_path(storage_key: &str) -> Option<Path> {
    let trimmed = storage_key.trim_start_matches('/');
    if trimmed.is_empty() || trimmed.ends_with('/') {
        return None;
    }
    Path::parse(trimmed).ok()
}

/// S3 storage implementation
///
/// Serves any number of backends; one client per distinct descriptor is built
/// lazily and reused.
#[derive(Default)]
pub struct S3Storage {
    clients: ClientCache<AmazonS3>,
}

impl S3Storage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for S3Storage {
    async fn download(&self, backend: &StorageBackend, storage_key: &str) -> StorageResult<Bytes> {
        let start = std::time::Instant::now();

        let Some(location) = object_path(storage_key) else {
            tracing::debug!(key = %storage_key, "Key does not name an object");
            return Err(StorageError::NotFound(storage_key.to_string()));
        };

        let store = self
            .clients
            .get_or_try_insert_with(backend, build_client)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    backend = %backend,
                    "S3 client construction failed"
                );
                e
            })?;

        let result: ObjectResult<_> = store.get(&location).await;

        let result = result.map_err(|e| match e {
            ObjectStoreError::NotFound { .. } => StorageError::NotFound(storage_key.to_string()),
            other => {
                tracing::error!(
                    error = %other,
                    bucket = %backend.bucket,
                    key = %storage_key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 download failed"
                );
                StorageError::DownloadFailed(other.to_string())
            }
        })?;

        let bytes = result.bytes().await.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %backend.bucket,
                key = %storage_key,
                "S3 body read failed"
            );
            StorageError::DownloadFailed(e.to_string())
        })?;

        tracing::debug!(
            bucket = %backend.bucket,
            key = %storage_key,
            size_bytes = bytes.len() as u64,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 download successful"
        );

        Ok(bytes)
    }
}
