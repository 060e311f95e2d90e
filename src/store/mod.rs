pub mod base;
pub mod file_store;
pub mod memory_store;
pub mod vault;

// Re-export the primary store items so code outside can do
// "use crate::store::{CredentialStore, create_store};"
pub use base::{create_store, CredentialStore, StoreError};
pub use file_store::FileCredentialStore;
pub use memory_store::MemoryCredentialStore;
pub use vault::{TokenVault, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
