use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use super::{CredentialStore, StoreError};
use crate::models::TokenPair;

pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

/// Typed access to the token pair kept in a `CredentialStore`.
///
/// Writes and clears hold the lock exclusively across both keys, so a reader
/// never sees an access token next to a refresh token from another pair.
///
/// The lock guards an epoch that every `clear` bumps. A writer that read the
/// tokens before a clear can use `save_if_epoch` to avoid bringing them back.
#[derive(Clone)]
pub struct TokenVault {
    store: Arc<dyn CredentialStore>,
    lock: Arc<RwLock<u64>>,
}

impl TokenVault {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        TokenVault {
            store,
            lock: Arc::new(RwLock::new(0)),
        }
    }

    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    pub async fn access_token(&self) -> Result<Option<String>, StoreError> {
        let _guard = self.lock.read().await;
        self.store.get(ACCESS_TOKEN_KEY).await
    }

    pub async fn refresh_token(&self) -> Result<Option<String>, StoreError> {
        let _guard = self.lock.read().await;
        self.store.get(REFRESH_TOKEN_KEY).await
    }

    /// Both tokens read under one lock, so they always belong to the same pair.
    pub async fn tokens(&self) -> Result<(Option<String>, Option<String>), StoreError> {
        let _guard = self.lock.read().await;
        let access = self.store.get(ACCESS_TOKEN_KEY).await?;
        let refresh = self.store.get(REFRESH_TOKEN_KEY).await?;
        Ok((access, refresh))
    }

    /// Like `tokens`, together with the epoch they were read in.
    pub async fn tokens_with_epoch(
        &self,
    ) -> Result<(Option<String>, Option<String>, u64), StoreError> {
        let epoch = self.lock.read().await;
        let access = self.store.get(ACCESS_TOKEN_KEY).await?;
        let refresh = self.store.get(REFRESH_TOKEN_KEY).await?;
        Ok((access, refresh, *epoch))
    }

    pub async fn epoch(&self) -> u64 {
        *self.lock.read().await
    }

    pub async fn has_tokens(&self) -> Result<bool, StoreError> {
        let (access, refresh) = self.tokens().await?;
        Ok(access.is_some() && refresh.is_some())
    }

    /// Persists both tokens. If the second write fails the first is rolled
    /// back by deleting it, leaving the store empty rather than mismatched.
    pub async fn save(&self, pair: &TokenPair) -> Result<(), StoreError> {
        let _guard = self.lock.write().await;
        self.write_pair(pair).await
    }

    /// Persists both tokens only if no `clear` happened since `epoch` was
    /// observed. Returns whether the pair was written.
    pub async fn save_if_epoch(&self, pair: &TokenPair, epoch: u64) -> Result<bool, StoreError> {
        let guard = self.lock.write().await;
        if *guard != epoch {
            info!(
                event_name = "store.tokens.save.skipped",
                event_domain = "store",
                store = self.store.get_name(),
                "tokens were cleared meanwhile, dropping the new pair"
            );
            return Ok(false);
        }
        self.write_pair(pair).await?;
        Ok(true)
    }

    async fn write_pair(&self, pair: &TokenPair) -> Result<(), StoreError> {
        self.store.set(ACCESS_TOKEN_KEY, &pair.access_token).await?;
        if let Err(e) = self.store.set(REFRESH_TOKEN_KEY, &pair.refresh_token).await {
            warn!(
                event_name = "store.tokens.save.partial",
                event_domain = "store",
                store = self.store.get_name(),
                "refresh token write failed, dropping the access token: {}",
                e
            );
            for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY] {
                if let Err(delete_error) = self.store.delete(key).await {
                    error!(
                        store = self.store.get_name(),
                        "Failed to roll back '{}' after partial save: {}",
                        key,
                        delete_error
                    );
                }
            }
            return Err(e);
        }
        debug!(store = self.store.get_name(), "token pair saved");
        Ok(())
    }

    /// Removes both tokens. Both deletes are attempted even if the first fails.
    pub async fn clear(&self) -> Result<(), StoreError> {
        let mut epoch = self.lock.write().await;
        *epoch += 1;
        let access = self.store.delete(ACCESS_TOKEN_KEY).await;
        let refresh = self.store.delete(REFRESH_TOKEN_KEY).await;
        debug!(store = self.store.get_name(), "token pair cleared");
        access.and(refresh)
    }
}
