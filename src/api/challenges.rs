use serde_json::json;

use crate::api::endpoints::challenges as paths;
use crate::client::{expect_success, parse_json, AuthClient, ClientError, RequestOptions};
use crate::models::{Challenge, ChallengeParticipation, Page};

/// First page of challenges, with the pagination metadata.
pub async fn challenges(client: &AuthClient) -> Result<Page<Challenge>, ClientError> {
    let response = client
        .authenticated_fetch(paths::LIST, RequestOptions::get())
        .await?;
    parse_json(response, "Failed to load challenges.").await
}

pub async fn challenge(client: &AuthClient, id: u64) -> Result<Challenge, ClientError> {
    let response = client
        .authenticated_fetch(&paths::challenge(id), RequestOptions::get())
        .await?;
    parse_json(response, "Failed to load challenge details.").await
}

pub async fn join_challenge(
    client: &AuthClient,
    id: u64,
) -> Result<ChallengeParticipation, ClientError> {
    let response = client
        .authenticated_fetch(&paths::join(id), RequestOptions::post().json(&json!({}))?)
        .await?;
    parse_json(response, "Unable to join the challenge.").await
}

pub async fn leave_challenge(client: &AuthClient, id: u64) -> Result<(), ClientError> {
    let response = client
        .authenticated_fetch(&paths::leave(id), RequestOptions::delete())
        .await?;
    expect_success(response, "Unable to leave the challenge.").await
}
