use serde::{Deserialize, Serialize};

/// One page of a list endpoint.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Page<T> {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}
