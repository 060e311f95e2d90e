#![allow(dead_code)]

use std::sync::Arc;

use serde_json::json;
use zerowaste::client::AuthClient;
use zerowaste::config::ApiConfig;
use zerowaste::store::{CredentialStore, MemoryCredentialStore, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};

pub fn store_with_tokens(access: Option<&str>, refresh: Option<&str>) -> Arc<MemoryCredentialStore> {
    let entries = [(ACCESS_TOKEN_KEY, access), (REFRESH_TOKEN_KEY, refresh)];
    Arc::new(MemoryCredentialStore::with_entries(
        entries
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key, v))),
    ))
}

pub fn build_client(base_url: String, store: Arc<dyn CredentialStore>) -> AuthClient {
    AuthClient::new(ApiConfig::new(base_url), store)
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

pub fn token_pair_body(access: &str, refresh: &str) -> String {
    json!({ "access": access, "refresh": refresh }).to_string()
}

pub fn profile_body(username: &str) -> String {
    json!({
        "id": 7,
        "username": username,
        "email": format!("{}@example.com", username),
        "first_name": "",
        "last_name": "",
        "bio": "",
        "city": "Izmir",
        "country": "TR",
        "role": "user",
        "date_joined": "2025-01-01T00:00:00Z",
        "notifications_enabled": true
    })
    .to_string()
}
