use std::fmt::{Display, Formatter, Result as FmtResult};

/// Storage backend descriptor
///
/// Everything needed to reach one bucket on one S3-compatible endpoint.
/// Two rules that point at the same bucket with the same credentials share a
/// descriptor, which lets the storage layer reuse a single client for both.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StorageBackend {
    /// `host:port`, or a full URL with scheme. Empty means the AWS default endpoint.
    pub endpoint: String,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub bucket: String,
    pub region: Option<String>,
    pub use_tls: bool,
}

impl StorageBackend {
    pub fn has_credentials(&self) -> bool {
        self.access_key.is_some() || self.secret_key.is_some()
    }
}

// Credentials never reach the logs.
impl std::fmt::Debug for StorageBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("StorageBackend")
            .field("endpoint", &self.endpoint)
            .field("access_key", &self.access_key.as_ref().map(|_| "<redacted>"))
            .field("secret_key", &self.secret_key.as_ref().map(|_| "<redacted>"))
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .field("use_tls", &self.use_tls)
            .finish()
    }
}

impl Display for StorageBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let endpoint = if self.endpoint.is_empty() {
            "aws"
        } else {
            self.endpoint.as_str()
        };
        write!(f, "{}/{}", endpoint, self.bucket)
    }
}
