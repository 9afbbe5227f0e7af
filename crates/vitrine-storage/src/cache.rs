//! Per-backend client cache.
//!
//! Clients are keyed by the full backend descriptor, so rules that share an
//! endpoint, bucket and credentials share a client. Failed constructions are not
//! cached; the next request tries again.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use vitrine_core::StorageBackend;

use crate::traits::StorageResult;

pub struct ClientCache<C> {
    clients: RwLock<HashMap<StorageBackend, Arc<C>>>,
}

impl<C> ClientCache<C> {
    pub fn new() -> Self {
        Self {
            clients: RwLock::new(HashMap::new()),
        }
    }

    /// Cached client for `backend`, building it with `build` on first use.
    pub async fn get_or_try_insert_with<F>(
        &self,
        backend: &StorageBackend,
        build: F,
    ) -> StorageResult<Arc<C>>
    where
        F: FnOnce(&StorageBackend) -> StorageResult<C>,
    {
        {
            let clients = self.clients.read().await;
            if let Some(client) = clients.get(backend) {
                return Ok(Arc::clone(client));
            }
        }

        let mut clients = self.clients.write().await;
        // Another task may have built it while we waited for the write lock.
        if let Some(client) = clients.get(backend) {
            return Ok(Arc::clone(client));
        }

        let client = Arc::new(build(backend)?);
        clients.insert(backend.clone(), Arc::clone(&client));
        tracing::debug!(backend = %backend, "Storage client created");
        Ok(client)
    }

    #[cfg(test)]
    pub(crate) async fn len(&self) -> usize {
        self.clients.read().await.len()
    }
}

impl<C> Default for ClientCache<C> {
    fn default() -> Self {
        Self::new()
    }
}
