use crate::api::endpoints::goals as paths;
use crate::client::{expect_success, parse_json, AuthClient, ClientError, RequestOptions};
use crate::models::{CreateGoal, CreateGoalFromTemplate, Goal, GoalTemplate, UpdateGoal};

pub async fn goals(client: &AuthClient) -> Result<Vec<Goal>, ClientError> {
    client.fetch_all_pages(paths::LIST).await
}

pub async fn goal(client: &AuthClient, id: u64) -> Result<Goal, ClientError> {
    let response = client
        .authenticated_fetch(&paths::goal(id), RequestOptions::get())
        .await?;
    parse_json(response, "Failed to load goal details.").await
}

pub async fn goal_templates(client: &AuthClient) -> Result<Vec<GoalTemplate>, ClientError> {
    client.fetch_all_pages(paths::TEMPLATES).await
}

pub async fn create_goal(client: &AuthClient, goal: &CreateGoal) -> Result<Goal, ClientError> {
    let response = client
        .authenticated_fetch(paths::LIST, RequestOptions::post().json(goal)?)
        .await?;
    parse_json(response, "Failed to create goal.").await
}

pub async fn create_goal_from_template(
    client: &AuthClient,
    template_id: u64,
    goal: &CreateGoalFromTemplate,
) -> Result<Goal, ClientError> {
    let response = client
        .authenticated_fetch(
            &paths::from_template(template_id),
            RequestOptions::post().json(goal)?,
        )
        .await?;
    parse_json(response, "Failed to create goal from template.").await
}

pub async fn update_goal(
    client: &AuthClient,
    id: u64,
    goal: &UpdateGoal,
) -> Result<Goal, ClientError> {
    let response = client
        .authenticated_fetch(&paths::goal(id), RequestOptions::put().json(goal)?)
        .await?;
    parse_json(response, "Failed to update goal.").await
}

pub async fn delete_goal(client: &AuthClient, id: u64) -> Result<(), ClientError> {
    let response = client
        .authenticated_fetch(&paths::goal(id), RequestOptions::delete())
        .await?;
    expect_success(response, "Failed to delete goal.").await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::ApiConfig;
    use crate::models::Timeframe;
    use crate::store::{MemoryCredentialStore, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn client(base_url: String) -> AuthClient {
        let store = MemoryCredentialStore::with_entries([
            (ACCESS_TOKEN_KEY, "valid"),
            (REFRESH_TOKEN_KEY, "r"),
        ]);
        AuthClient::new(ApiConfig::new(base_url), Arc::new(store))
    }

    fn goal_json() -> serde_json::Value {
        json!({
            "id": 5,
            "category": {
                "id": 3,
                "name": "Plastic",
                "category": 1,
                "description": "",
                "score_per_unit": "1.50",
                "unit": "kg",
                "is_active": true
            },
            "timeframe": "weekly",
            "target": 2.0,
            "progress": 0.5,
            "is_complete": false,
            "created_at": "2025-03-01T10:00:00Z",
            "start_date": "2025-03-03",
            "status": "in_progress"
        })
    }

    #[tokio::test]
    async fn test_goal_detail() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/v1/goals/goals/5/")
            .with_status(200)
            .with_body(goal_json().to_string())
            .create_async()
            .await;

        let goal = goal(&client(server.url()), 5).await.unwrap();
        assert_eq!(goal.timeframe, Timeframe::Weekly);
        assert_eq!(goal.category.unit, "kg");
    }

    #[tokio::test]
    async fn test_create_from_template_uses_template_route() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/api/v1/goals/goals/api-template/9/")
            .match_body(Matcher::Json(json!({"user": 1, "start_date": "2025-03-03"})))
            .with_status(201)
            .with_body(goal_json().to_string())
            .create_async()
            .await;

        create_goal_from_template(
            &client(server.url()),
            9,
            &CreateGoalFromTemplate {
                user: 1,
                start_date: "2025-03-03".to_string(),
                status: None,
            },
        )
        .await
        .unwrap();

        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_delete_goal_reports_server_message() {
        let mut server = Server::new_async().await;
        server
            .mock("DELETE", "/api/v1/goals/goals/5/")
            .with_status(403)
            .with_body(r#"{"detail": "You do not have permission to perform this action."}"#)
            .create_async()
            .await;

        let result = delete_goal(&client(server.url()), 5).await;
        match result {
            Err(ClientError::Api { message, .. }) => {
                assert_eq!(message, "You do not have permission to perform this action.")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
