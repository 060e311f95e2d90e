use crate::api::endpoints::user as paths;
use crate::client::{parse_json, AuthClient, ClientError, RequestOptions};
use crate::models::{UpdateProfile, UserProfile};

pub async fn profile(client: &AuthClient) -> Result<UserProfile, ClientError> {
    let response = client
        .authenticated_fetch(paths::PROFILE, RequestOptions::get())
        .await?;
    parse_json(response, "Failed to load user profile.").await
}

pub async fn update_profile(
    client: &AuthClient,
    update: &UpdateProfile,
) -> Result<UserProfile, ClientError> {
    let response = client
        .authenticated_fetch(paths::PROFILE, RequestOptions::patch().json(update)?)
        .await?;
    parse_json(response, "Failed to update user profile.").await
}
