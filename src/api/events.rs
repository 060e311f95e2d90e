use std::path::Path;

use crate::api::endpoints::events as paths;
use crate::client::{parse_json, AuthClient, ClientError, FormPart, RequestOptions};
use crate::models::{CreateEvent, Event, LikeResponse, ParticipateResponse};

pub async fn events(client: &AuthClient) -> Result<Vec<Event>, ClientError> {
    client.fetch_all_pages(paths::LIST).await
}

pub async fn event(client: &AuthClient, id: u64) -> Result<Event, ClientError> {
    let response = client
        .authenticated_fetch(&paths::event(id), RequestOptions::get())
        .await?;
    parse_json(response, "Failed to load event details.").await
}

/// Creates an event as `multipart/form-data`, uploading `event.image` if set.
pub async fn create_event(client: &AuthClient, event: &CreateEvent) -> Result<Event, ClientError> {
    let mut parts = vec![
        FormPart::text("title", &event.title),
        FormPart::text("description", &event.description),
        FormPart::text("location", &event.location),
        FormPart::text("date", &event.date),
    ];
    if let Some(path) = &event.image {
        parts.push(image_part(path).await?);
    }

    let response = client
        .authenticated_fetch(paths::LIST, RequestOptions::post().multipart(&parts))
        .await?;
    parse_json(response, "Failed to create event.").await
}

async fn image_part(path: &Path) -> Result<FormPart, ClientError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| ClientError::Attachment {
            path: path.to_path_buf(),
            source,
        })?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image.jpg".to_string());
    let content_type = match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => format!("image/{}", ext.to_lowercase()),
        None => "image/jpeg".to_string(),
    };
    Ok(FormPart::File {
        name: "image".to_string(),
        filename,
        content_type,
        bytes,
    })
}

/// Toggles the current user's like.
pub async fn like_event(client: &AuthClient, id: u64) -> Result<LikeResponse, ClientError> {
    let response = client
        .authenticated_fetch(&paths::like(id), RequestOptions::post())
        .await?;
    parse_json(response, "Failed to like/unlike event.").await
}

/// Toggles the current user's participation.
pub async fn participate_event(
    client: &AuthClient,
    id: u64,
) -> Result<ParticipateResponse, ClientError> {
    let response = client
        .authenticated_fetch(&paths::participate(id), RequestOptions::post())
        .await?;
    parse_json(response, "Failed to participate/unparticipate in event.").await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::ApiConfig;
    use crate::store::{MemoryCredentialStore, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
    use mockito::{Matcher, Server};

    fn client(base_url: String) -> AuthClient {
        let store = MemoryCredentialStore::with_entries([
            (ACCESS_TOKEN_KEY, "valid"),
            (REFRESH_TOKEN_KEY, "r"),
        ]);
        AuthClient::new(ApiConfig::new(base_url), Arc::new(store))
    }

    #[tokio::test]
    async fn test_like_event() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/api/v1/events/events/3/like/")
            .match_header("authorization", "Bearer valid")
            .with_status(200)
            .with_body(r#"{"likes_count": 5, "i_liked": true}"#)
            .create_async()
            .await;

        let like = like_event(&client(server.url()), 3).await.unwrap();
        m.assert_async().await;
        assert_eq!(
            like,
            LikeResponse {
                likes_count: 5,
                i_liked: true
            }
        );
    }

    #[tokio::test]
    async fn test_participate_event() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/api/v1/events/events/3/participate/")
            .with_status(200)
            .with_body(r#"{"participants_count": 12, "i_am_participating": false}"#)
            .create_async()
            .await;

        let participation = participate_event(&client(server.url()), 3).await.unwrap();
        assert!(!participation.i_am_participating);
        assert_eq!(participation.participants_count, 12);
    }

    fn event_json() -> serde_json::Value {
        serde_json::json!({
            "id": 11,
            "title": "Beach cleanup",
            "description": "Bring gloves",
            "location": "Kadikoy",
            "date": "2025-06-01T09:00:00Z",
            "image": "/media/events/beach.png",
            "creator": 1,
            "creator_username": "ada",
            "participants_count": 0,
            "likes_count": 0,
            "i_am_participating": false,
            "i_liked": false,
            "created_at": "2025-05-01T09:00:00Z",
            "updated_at": "2025-05-01T09:00:00Z"
        })
    }

    #[tokio::test]
    async fn test_create_event_uploads_image_as_multipart() {
        let dir = tempfile::tempdir().expect("tempdir");
        let image = dir.path().join("beach.png");
        std::fs::write(&image, b"PNGDATA").unwrap();

        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", paths::LIST)
            .match_header(
                "content-type",
                Matcher::Regex("^multipart/form-data; boundary=zerowaste-[0-9a-f]+$".into()),
            )
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="title"\r\n\r\nBeach cleanup\r\n"#.into()),
                Matcher::Regex(r#"name="location"\r\n\r\nKadikoy\r\n"#.into()),
                Matcher::Regex(
                    r#"name="image"; filename="beach.png"\r\nContent-Type: image/png\r\n\r\nPNGDATA"#
                        .into(),
                ),
            ]))
            .with_status(201)
            .with_body(event_json().to_string())
            .create_async()
            .await;

        let created = create_event(
            &client(server.url()),
            &CreateEvent {
                title: "Beach cleanup".to_string(),
                description: "Bring gloves".to_string(),
                location: "Kadikoy".to_string(),
                date: "2025-06-01T09:00:00Z".to_string(),
                image: Some(image),
            },
        )
        .await
        .unwrap();

        m.assert_async().await;
        assert_eq!(created.image.as_deref(), Some("/media/events/beach.png"));
    }

    #[tokio::test]
    async fn test_create_event_without_image_sends_text_fields_only() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", paths::LIST)
            .match_body(Matcher::Regex(r#"name="title"\r\n\r\nBeach cleanup"#.into()))
            .with_status(201)
            .with_body(event_json().to_string())
            .create_async()
            .await;
        let with_image = server
            .mock("POST", paths::LIST)
            .match_body(Matcher::Regex(r#"name="image""#.into()))
            .expect(0)
            .create_async()
            .await;

        create_event(
            &client(server.url()),
            &CreateEvent {
                title: "Beach cleanup".to_string(),
                description: String::new(),
                location: "Kadikoy".to_string(),
                date: "2025-06-01T09:00:00Z".to_string(),
                image: None,
            },
        )
        .await
        .unwrap();

        m.assert_async().await;
        with_image.assert_async().await;
    }

    #[tokio::test]
    async fn test_missing_image_file_is_reported() {
        let client = client("http://127.0.0.1:9".to_string());
        let result = create_event(
            &client,
            &CreateEvent {
                title: "t".to_string(),
                description: String::new(),
                location: "l".to_string(),
                date: "2025-06-01".to_string(),
                image: Some("/nonexistent/beach.png".into()),
            },
        )
        .await;

        assert!(matches!(result, Err(ClientError::Attachment { .. })));
    }
}
