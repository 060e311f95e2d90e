use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use super::{file_store::FileCredentialStore, memory_store::MemoryCredentialStore};
use crate::config::CredentialStoreConfig;

/// Failures raised by a credential backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("credential store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("credential store contents are not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("credential store unavailable: {0}")]
    Unavailable(String),
}

/// The CredentialStore trait abstracts secret storage of the token strings (get, set, delete).
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    /// Deleting a key that is not present is not an error.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
    fn get_name(&self) -> &str;
}

/// Creates a concrete credential store based on the config.
pub async fn create_store(
    config: &CredentialStoreConfig,
) -> Result<Arc<dyn CredentialStore>, StoreError> {
    match config {
        CredentialStoreConfig::Memory => {
            info!("Using in-memory credential store; tokens will not survive a restart.");
            Ok(Arc::new(MemoryCredentialStore::new()))
        }
        CredentialStoreConfig::File(file_config) => {
            let store = FileCredentialStore::open(&file_config.path).await?;
            info!(
                "Using file credential store at '{}'",
                file_config.path.display()
            );
            Ok(Arc::new(store))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FileStoreConfig;

    #[tokio::test]
    async fn test_create_memory_store() {
        let store = create_store(&CredentialStoreConfig::Memory)
            .await
            .expect("memory store should always be created");
        assert_eq!(store.get_name(), "memory");
    }

    #[tokio::test]
    async fn test_create_file_store() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = CredentialStoreConfig::File(FileStoreConfig {
            path: dir.path().join("credentials.json"),
        });
        let store = create_store(&config).await.expect("file store");
        assert_eq!(store.get_name(), "file");
        assert_eq!(store.get("accessToken").await.unwrap(), None);
    }
}
