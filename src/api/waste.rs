use crate::api::endpoints::waste as paths;
use crate::client::{expect_success, parse_json, AuthClient, ClientError, RequestOptions};
use crate::models::{
    CategoryRequest, CreateWasteLog, CustomCategoryRequest, ScoreResponse, Subcategory,
    UpdateWasteLog, WasteLog,
};

pub async fn my_score(client: &AuthClient) -> Result<f64, ClientError> {
    let response = client
        .authenticated_fetch(paths::MY_SCORE, RequestOptions::get())
        .await?;
    let score: ScoreResponse = parse_json(response, "Failed to load score.").await?;
    Ok(score.total_score)
}

pub async fn subcategories(client: &AuthClient) -> Result<Vec<Subcategory>, ClientError> {
    client.fetch_all_pages(paths::SUBCATEGORIES).await
}

pub async fn waste_logs(client: &AuthClient) -> Result<Vec<WasteLog>, ClientError> {
    client.fetch_all_pages(paths::LOGS).await
}

pub async fn waste_log(client: &AuthClient, id: u64) -> Result<WasteLog, ClientError> {
    let response = client
        .authenticated_fetch(&paths::log(id), RequestOptions::get())
        .await?;
    parse_json(response, "Failed to load waste log.").await
}

pub async fn create_waste_log(
    client: &AuthClient,
    log: &CreateWasteLog,
) -> Result<WasteLog, ClientError> {
    let response = client
        .authenticated_fetch(paths::LOGS, RequestOptions::post().json(log)?)
        .await?;
    parse_json(response, "Failed to create waste log.").await
}

pub async fn update_waste_log(
    client: &AuthClient,
    id: u64,
    update: &UpdateWasteLog,
) -> Result<WasteLog, ClientError> {
    let response = client
        .authenticated_fetch(&paths::log(id), RequestOptions::patch().json(update)?)
        .await?;
    parse_json(response, "Failed to update waste log.").await
}

pub async fn delete_waste_log(client: &AuthClient, id: u64) -> Result<(), ClientError> {
    let response = client
        .authenticated_fetch(&paths::log(id), RequestOptions::delete())
        .await?;
    expect_success(response, "Failed to delete waste log.").await
}

pub async fn create_category_request(
    client: &AuthClient,
    request: &CategoryRequest,
) -> Result<CustomCategoryRequest, ClientError> {
    let response = client
        .authenticated_fetch(
            paths::CATEGORY_REQUEST,
            RequestOptions::post().json(request)?,
        )
        .await?;
    parse_json(response, "Failed to create category request.").await
}
