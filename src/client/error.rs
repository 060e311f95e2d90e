use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

use crate::store::StoreError;

/// Everything that can go wrong while talking to the API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// No access token is stored; the user has to log in.
    #[error("no access token found, user must log in")]
    Unauthenticated,

    /// The session could not be renewed. Stored tokens have been cleared
    /// unless the refresh token was already missing.
    #[error("session expired, please log in again: {0}")]
    SessionExpired(String),

    #[error("request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("malformed paginated response: missing 'results' array or repeated 'next' link")]
    PaginationFormat,

    /// The server answered with a non-success status.
    #[error("{message} (status {status})")]
    Api { status: StatusCode, message: String },

    /// The stored token does not carry one of the required roles.
    #[error("permission denied: role {} not in [{}]", .role.as_deref().unwrap_or("unknown"), .required.join(", "))]
    Forbidden {
        role: Option<String>,
        required: Vec<String>,
    },

    /// A body could not be encoded or decoded as the expected JSON.
    #[error("invalid JSON body: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to read attachment '{}': {source}", .path.display())]
    Attachment {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("stored access token cannot be used as a header value")]
    InvalidToken,
}

impl ClientError {
    /// True for failures that should send the user back to the login flow.
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            ClientError::Unauthenticated | ClientError::SessionExpired(_)
        )
    }
}

/// Outcome of a failed refresh, shared by every caller awaiting the same refresh.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefreshFailure {
    #[error("no refresh token found")]
    MissingRefreshToken,
    #[error("{0}")]
    Rejected(String),
    #[error("credential store failed during refresh: {0}")]
    Store(String),
}

impl From<RefreshFailure> for ClientError {
    fn from(failure: RefreshFailure) -> Self {
        ClientError::SessionExpired(failure.to_string())
    }
}
