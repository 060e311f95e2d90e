use std::sync::Arc;

use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Response, StatusCode};
use tracing::{debug, error, info, warn};

use super::coordinator::RefreshCoordinator;
use super::error::{ClientError, RefreshFailure};
use super::request::RequestOptions;
use crate::config::ApiConfig;
use crate::models::{RefreshRequest, RefreshResponse, TokenPair};
use crate::store::{CredentialStore, TokenVault};
use crate::utils::url::join_url;

/// HTTP client for the Zero Waste API that injects the stored bearer token
/// and transparently renews it once when the server answers 401.
///
/// Clones share the HTTP connection pool, the token vault and the refresh
/// coordinator.
#[derive(Clone)]
pub struct AuthClient {
    pub(crate) http: reqwest::Client,
    pub(crate) config: Arc<ApiConfig>,
    pub(crate) vault: TokenVault,
    coordinator: RefreshCoordinator,
}

impl AuthClient {
    pub fn new(config: ApiConfig, store: Arc<dyn CredentialStore>) -> Self {
        Self::with_parts(
            config,
            TokenVault::new(store),
            reqwest::Client::new(),
            RefreshCoordinator::new(),
        )
    }

    /// Builds a client from explicit collaborators, e.g. to share one
    /// coordinator between several clients of the same account.
    pub fn with_parts(
        config: ApiConfig,
        vault: TokenVault,
        http: reqwest::Client,
        coordinator: RefreshCoordinator,
    ) -> Self {
        info!(
            "Creating AuthClient for '{}' with {} credential store",
            config.base_url,
            vault.store().get_name()
        );
        AuthClient {
            http,
            config: Arc::new(config),
            vault,
            coordinator,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn vault(&self) -> &TokenVault {
        &self.vault
    }

    pub fn coordinator(&self) -> &RefreshCoordinator {
        &self.coordinator
    }

    /// Absolute URL for a path relative to the configured base URL.
    pub fn url(&self, path: &str) -> String {
        join_url(&self.config.base_url, path)
    }

    /// Sends a request carrying the stored access token.
    ///
    /// On a 401 the token pair is refreshed (sharing any refresh already in
    /// flight) and the request is sent exactly once more. The retried
    /// response is returned as is, whatever its status. Any other response is
    /// returned unchanged; interpreting non-2xx statuses is up to the caller.
    pub async fn authenticated_fetch(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<Response, ClientError> {
        let Some(token) = self.vault.access_token().await? else {
            warn!(
                event_name = "client.fetch.unauthenticated",
                event_domain = "client",
                path,
                "no access token stored, refusing to send request"
            );
            return Err(ClientError::Unauthenticated);
        };

        let url = self.url(path);
        debug!(method = %options.method, url = url.as_str(), "sending authenticated request");
        let response = self.send_with_token(&url, &options, &token).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        info!(
            event_name = "client.fetch.rejected",
            event_domain = "client",
            method = %options.method,
            url = url.as_str(),
            "access token rejected, renewing session"
        );
        let fresh_token = self.token_after_rejection(&token).await?;

        let retried = self.send_with_token(&url, &options, &fresh_token).await?;
        if retried.status() == StatusCode::UNAUTHORIZED {
            warn!(
                event_name = "client.fetch.retry_rejected",
                event_domain = "client",
                url = url.as_str(),
                "request still unauthorized after refresh"
            );
        }
        Ok(retried)
    }

    /// Runs (or joins) a refresh and returns the new access token.
    pub async fn refresh_access_token(&self) -> Result<String, ClientError> {
        self.renew(None).await
    }

    /// Token to retry with after `rejected` got a 401.
    async fn token_after_rejection(&self, rejected: &str) -> Result<String, ClientError> {
        self.renew(Some(rejected.to_string())).await
    }

    async fn renew(&self, rejected: Option<String>) -> Result<String, ClientError> {
        let http = self.http.clone();
        let url = self.url(&self.config.refresh_path);
        let vault = self.vault.clone();
        self.coordinator
            .get_or_start(move || perform_refresh(http, url, vault, rejected))
            .await
            .map_err(ClientError::from)
    }

    pub(crate) async fn send_with_token(
        &self,
        url: &str,
        options: &RequestOptions,
        token: &str,
    ) -> Result<Response, ClientError> {
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| ClientError::InvalidToken)?;
        bearer.set_sensitive(true);

        let mut headers = options.headers.clone();
        headers.insert(AUTHORIZATION, bearer);

        let mut request = self
            .http
            .request(options.method.clone(), url)
            .headers(headers);
        if let Some(body) = &options.body {
            request = request.body(body.clone());
        }
        Ok(request.send().await?)
    }
}

/// The refresh itself: exchange the stored refresh token for a new pair and
/// persist it. Any failure after the refresh token was read clears the vault.
/// A pair arriving after the vault was cleared (logout) is discarded.
///
/// When `rejected` is given and the stored access token already differs from
/// it, an earlier refresh has renewed the session and its token is returned
/// without calling the server.
async fn perform_refresh(
    http: reqwest::Client,
    url: String,
    vault: TokenVault,
    rejected: Option<String>,
) -> Result<String, RefreshFailure> {
    let (access_token, refresh_token, epoch) = vault
        .tokens_with_epoch()
        .await
        .map_err(|e| RefreshFailure::Store(e.to_string()))?;

    if let (Some(current), Some(rejected)) = (access_token, rejected) {
        if current != rejected {
            debug!("access token was renewed concurrently, reusing it");
            return Ok(current);
        }
    }

    let refresh_token = match refresh_token {
        Some(token) => token,
        None => {
            warn!(
                event_name = "client.refresh.missing_token",
                event_domain = "client",
                "no refresh token stored"
            );
            return Err(RefreshFailure::MissingRefreshToken);
        }
    };

    let pair = match request_token_pair(&http, &url, &refresh_token).await {
        Ok(pair) => pair,
        Err(reason) => {
            warn!(
                event_name = "client.refresh.failed",
                event_domain = "client",
                url = url.as_str(),
                "token refresh failed, clearing stored tokens: {}",
                reason
            );
            if let Err(e) = vault.clear().await {
                error!("Failed to clear tokens after refresh failure: {}", e);
            }
            return Err(RefreshFailure::Rejected(reason));
        }
    };

    let saved = vault
        .save_if_epoch(&pair, epoch)
        .await
        .map_err(|e| RefreshFailure::Store(e.to_string()))?;
    if !saved {
        return Err(RefreshFailure::Rejected("logged out".to_string()));
    }

    info!(
        event_name = "client.refresh.succeeded",
        event_domain = "client",
        "token pair refreshed"
    );
    Ok(pair.access_token)
}

async fn request_token_pair(
    http: &reqwest::Client,
    url: &str,
    refresh_token: &str,
) -> Result<TokenPair, String> {
    let response = http
        .post(url)
        .json(&RefreshRequest {
            refresh: refresh_token,
        })
        .send()
        .await
        .map_err(|e| format!("Failed to call refresh endpoint: {}", e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(format!("Refresh endpoint returned status {}", status));
    }

    let body = response
        .json::<RefreshResponse>()
        .await
        .map_err(|e| format!("Failed to parse refresh response: {}", e))?;

    body.into_pair()
        .ok_or_else(|| "Refresh response did not contain a usable token pair".to_string())
}
