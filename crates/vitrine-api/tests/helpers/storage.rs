//! In-memory storage gateway that records every call.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use vitrine_core::StorageBackend;
use vitrine_storage::{Storage, StorageError, StorageResult};

/// One recorded `download` call: (bucket, key).
pub type Call = (String, String);

#[derive(Default)]
pub struct MockStorage {
    objects: Mutex<HashMap<Call, Bytes>>,
    calls: Mutex<Vec<Call>>,
    failure: Mutex<Option<String>>,
}

impl MockStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_object(self, bucket: &str, key: &str, body: impl Into<Bytes>) -> Self {
        self.objects
            .lock()
            .unwrap()
            .insert((bucket.to_string(), key.to_string()), body.into());
        self
    }

    /// Make every download fail as if the backend were unreachable.
    pub fn failing(self, message: &str) -> Self {
        *self.failure.lock().unwrap() = Some(message.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Storage for MockStorage {
    async fn download(&self, backend: &StorageBackend, storage_key: &str) -> StorageResult<Bytes> {
        let call = (backend.bucket.clone(), storage_key.to_string());
        self.calls.lock().unwrap().push(call.clone());

        if let Some(message) = self.failure.lock().unwrap().clone() {
            return Err(StorageError::DownloadFailed(message));
        }

        self.objects
            .lock()
            .unwrap()
            .get(&call)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(storage_key.to_string()))
    }
}
