//! The append-only log store capability and backend selection.

use crate::{
    config::{StoreBackend, StoreConfig},
    error::StoreError,
    models::VisitRecord,
    services::{file_store::FileLogStore, remote_store::RemoteLogStore},
};
use async_trait::async_trait;
use std::sync::Arc;

/// Durable, append-only destination for visit records.
///
/// Implementations never update or remove records.
#[async_trait]
pub trait LogStore: Send + Sync {
    /// Short backend name used in logs and metrics
    fn backend(&self) -> &'static str;

    /// Persist one record. A failed append is not retried.
    async fn append(&self, record: &VisitRecord) -> Result<(), StoreError>;

    /// Every record currently in the store, in the backend's native order
    async fn read_all(&self) -> Result<Vec<VisitRecord>, StoreError>;
}

/// Build the store selected by the configuration
pub fn build_store(config: &StoreConfig) -> Result<Arc<dyn LogStore>, StoreError> {
    let store: Arc<dyn LogStore> = match config.backend() {
        StoreBackend::File { path } => Arc::new(FileLogStore::new(path)),
        StoreBackend::Remote(remote) => Arc::new(RemoteLogStore::new(remote)?),
    };

    tracing::info!(backend = store.backend(), "Visit log store selected");
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RemoteStoreConfig;

    #[test]
    fn test_build_store_selects_backend() {
        let file = build_store(&StoreConfig::default()).unwrap();
        assert_eq!(file.backend(), "file");

        let config = StoreConfig {
            remote: Some(RemoteStoreConfig::new("http://127.0.0.1:9", "key")),
            ..StoreConfig::default()
        };
        let remote = build_store(&config).unwrap();
        assert_eq!(remote.backend(), "remote");
    }
}
