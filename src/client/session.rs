//! Login, logout and other session-level operations built on `AuthClient`.

use jsonwebtoken::{decode, DecodingKey, Validation};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::Response;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use super::client::AuthClient;
use super::error::ClientError;
use super::request::RequestOptions;
use super::response::parse_json;
use crate::models::{LoginResponse, TokenClaims, TokenPair};

impl AuthClient {
    /// Exchanges credentials for a token pair and stores it.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let response = self
            .post_unauthenticated(
                &self.config.login_path,
                &json!({ "email": email, "password": password }),
            )
            .await?;
        let login: LoginResponse = parse_json(response, "Login failed.").await?;

        self.vault
            .save(&TokenPair::new(login.access.clone(), login.refresh.clone()))
            .await?;
        info!(
            event_name = "session.login.succeeded",
            event_domain = "session",
            "logged in"
        );
        Ok(login)
    }

    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        password2: &str,
    ) -> Result<Value, ClientError> {
        let response = self
            .post_unauthenticated(
                &self.config.register_path,
                &json!({
                    "username": username,
                    "email": email,
                    "password": password,
                    "password2": password2,
                }),
            )
            .await?;
        parse_json(response, "Registration failed.").await
    }

    pub async fn reset_password(&self, email: &str) -> Result<Value, ClientError> {
        let response = self
            .post_unauthenticated(&self.config.password_reset_path, &json!({ "email": email }))
            .await?;
        parse_json(response, "Password reset failed.").await
    }

    /// Forgets the stored token pair.
    pub async fn logout(&self) -> Result<(), ClientError> {
        self.vault.clear().await?;
        info!(
            event_name = "session.logout",
            event_domain = "session",
            "logged out"
        );
        Ok(())
    }

    /// Whether both tokens are stored. Says nothing about their validity.
    pub async fn has_valid_tokens(&self) -> Result<bool, ClientError> {
        Ok(self.vault.has_tokens().await?)
    }

    /// Checks the stored session against the protected test endpoint,
    /// refreshing it if needed. Every failure counts as "not logged in".
    pub async fn auto_login(&self) -> bool {
        match self.vault.has_tokens().await {
            Ok(true) => {}
            Ok(false) => return false,
            Err(e) => {
                warn!("Auto login could not read the credential store: {}", e);
                return false;
            }
        }

        match self
            .authenticated_fetch(&self.config.test_protected_path, RequestOptions::get())
            .await
        {
            Ok(response) => {
                let ok = response.status().is_success();
                debug!(status = response.status().as_u16(), "auto login probe finished");
                ok
            }
            Err(e) => {
                warn!("Auto login failed: {}", e);
                false
            }
        }
    }

    /// Payload of the stored access token, decoded without verifying the
    /// signature. The server remains the authority on what the token allows.
    pub async fn token_claims(&self) -> Result<Option<TokenClaims>, ClientError> {
        let Some(token) = self.vault.access_token().await? else {
            return Ok(None);
        };
        Ok(decode_claims(&token))
    }

    /// Checks the `role` claim of the stored access token against
    /// `required_roles` without contacting the server.
    pub async fn require_role(&self, required_roles: &[&str]) -> Result<(), ClientError> {
        let Some(token) = self.vault.access_token().await? else {
            return Err(ClientError::Unauthenticated);
        };

        let role = decode_claims(&token).and_then(|claims| claims.role);
        let allowed = role
            .as_deref()
            .is_some_and(|role| required_roles.contains(&role));
        if !allowed {
            warn!(
                event_name = "session.role.denied",
                event_domain = "session",
                role = role.as_deref().unwrap_or("unknown"),
                "role not permitted"
            );
            return Err(ClientError::Forbidden {
                role,
                required: required_roles.iter().map(|r| r.to_string()).collect(),
            });
        }
        Ok(())
    }

    /// `authenticated_fetch` behind `require_role`. Always sends
    /// `Content-Type: application/json`.
    pub async fn role_protected_fetch(
        &self,
        path: &str,
        required_roles: &[&str],
        options: RequestOptions,
    ) -> Result<Response, ClientError> {
        self.require_role(required_roles).await?;
        let options = options.header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self.authenticated_fetch(path, options).await
    }

    async fn post_unauthenticated(&self, path: &str, body: &Value) -> Result<Response, ClientError> {
        Ok(self.http.post(self.url(path)).json(body).send().await?)
    }
}

fn decode_claims(token: &str) -> Option<TokenClaims> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    match decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &validation) {
        Ok(data) => Some(data.claims),
        Err(e) => {
            debug!("Stored access token is not a decodable JWT: {}", e);
            None
        }
    }
}
