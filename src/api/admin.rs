//! User and category-request management for admins and moderators.
//!
//! Every call checks the role claim of the stored token first and fails with
//! `ClientError::Forbidden` without contacting the server when it does not
//! match. The server still enforces its own permissions.

use serde_json::json;

use crate::api::endpoints::{admin as paths, user as user_paths};
use crate::client::{parse_json, AuthClient, ClientError, RequestOptions};
use crate::models::{CustomCategoryRequest, DetailResponse, ManagedUser, ROLE_ADMIN, ROLE_MODERATOR};

pub async fn users(client: &AuthClient) -> Result<Vec<ManagedUser>, ClientError> {
    client.require_role(&[ROLE_ADMIN]).await?;
    client.fetch_all_pages(user_paths::USERS).await
}

/// Activates or deactivates an account.
pub async fn set_active_status(
    client: &AuthClient,
    user_id: u64,
    is_active: bool,
) -> Result<DetailResponse, ClientError> {
    let response = client
        .role_protected_fetch(
            &user_paths::set_active_status(user_id),
            &[ROLE_ADMIN, ROLE_MODERATOR],
            RequestOptions::post().json(&json!({ "is_active": is_active }))?,
        )
        .await?;
    parse_json(response, "Failed to update user status.").await
}

pub async fn category_requests(
    client: &AuthClient,
) -> Result<Vec<CustomCategoryRequest>, ClientError> {
    client.require_role(&[ROLE_ADMIN]).await?;
    client.fetch_all_pages(paths::CATEGORY_REQUESTS).await
}

pub async fn pending_category_requests(
    client: &AuthClient,
) -> Result<Vec<CustomCategoryRequest>, ClientError> {
    let mut requests = category_requests(client).await?;
    requests.retain(CustomCategoryRequest::is_pending);
    Ok(requests)
}

pub async fn approve_category_request(
    client: &AuthClient,
    id: u64,
) -> Result<DetailResponse, ClientError> {
    let response = client
        .role_protected_fetch(&paths::approve(id), &[ROLE_ADMIN], RequestOptions::post())
        .await?;
    parse_json(response, "Failed to approve category request.").await
}

pub async fn reject_category_request(
    client: &AuthClient,
    id: u64,
) -> Result<DetailResponse, ClientError> {
    let response = client
        .role_protected_fetch(&paths::reject(id), &[ROLE_ADMIN], RequestOptions::post())
        .await?;
    parse_json(response, "Failed to reject category request.").await
}
