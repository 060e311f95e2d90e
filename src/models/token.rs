use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// The access/refresh credential pair issued at login and rotated on refresh.
///
/// Both strings are opaque to the client.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TokenPair {
    #[serde(rename = "access")]
    pub access_token: String,
    #[serde(rename = "refresh")]
    pub refresh_token: String,
}

impl TokenPair {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        TokenPair {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

// Tokens must never end up in logs.
impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

/// Body of `POST /auth/refresh`.
#[derive(Serialize, Debug)]
pub struct RefreshRequest<'a> {
    pub refresh: &'a str,
}

/// Body returned by `POST /auth/refresh`. Fields are optional so that a
/// malformed payload is reported as a refresh failure, not a decode error.
#[derive(Deserialize, Default)]
pub struct RefreshResponse {
    #[serde(default)]
    pub access: Option<String>,
    #[serde(default)]
    pub refresh: Option<String>,
}

impl RefreshResponse {
    /// Returns the new pair only when both tokens are present and non-empty.
    pub fn into_pair(self) -> Option<TokenPair> {
        match (self.access, self.refresh) {
            (Some(access), Some(refresh)) if !access.is_empty() && !refresh.is_empty() => {
                Some(TokenPair::new(access, refresh))
            }
            _ => None,
        }
    }
}

/// Body returned by `POST /auth/login/`. Anything besides the tokens is kept in `extra`.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Unverified payload of the access token.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct TokenClaims {
    #[serde(default)]
    pub user_id: Option<Value>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub exp: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
