use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Where the access/refresh token pair is kept between runs.
/// We differentiate the backends via a "type" tag in the YAML.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(tag = "type")]
pub enum CredentialStoreConfig {
    /// Tokens live only as long as the process.
    #[serde(rename = "memory")]
    Memory,
    /// Tokens are persisted to a JSON file readable only by the owner.
    #[serde(rename = "file")]
    File(FileStoreConfig),
}

impl Default for CredentialStoreConfig {
    fn default() -> Self {
        CredentialStoreConfig::Memory
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct FileStoreConfig {
    pub path: PathBuf,
}
