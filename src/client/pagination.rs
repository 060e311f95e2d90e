use std::collections::HashSet;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::client::AuthClient;
use super::error::ClientError;
use super::request::RequestOptions;
use super::response::api_error;
use crate::utils::url::relative_to_base;

impl AuthClient {
    /// Follows `next` links from `initial_path` and returns every `results`
    /// entry in page order. Any failing page aborts the whole fetch, and a
    /// `next` link pointing at a page already fetched is a format error.
    pub async fn fetch_all_pages<T: DeserializeOwned>(
        &self,
        initial_path: &str,
    ) -> Result<Vec<T>, ClientError> {
        let mut items = Vec::new();
        let mut next = Some(initial_path.to_string());
        let mut pages = 0usize;
        let mut visited = HashSet::new();

        while let Some(path) = next.take() {
            if !visited.insert(path.clone()) {
                warn!(
                    event_name = "client.pagination.cycle",
                    event_domain = "client",
                    path = path.as_str(),
                    "next link points at a page already fetched"
                );
                return Err(ClientError::PaginationFormat);
            }

            let response = self.authenticated_fetch(&path, RequestOptions::get()).await?;
            let status = response.status();
            let bytes = response.bytes().await?;
            if !status.is_success() {
                warn!(
                    event_name = "client.pagination.failed",
                    event_domain = "client",
                    path = path.as_str(),
                    status = status.as_u16(),
                    "pagination request failed"
                );
                return Err(api_error(
                    status,
                    &bytes,
                    &format!("Pagination request failed with status {}", status),
                ));
            }

            let mut page: Value = serde_json::from_slice(&bytes)?;
            let results = match page.get_mut("results").map(Value::take) {
                Some(results @ Value::Array(_)) => results,
                _ => return Err(ClientError::PaginationFormat),
            };
            items.extend(serde_json::from_value::<Vec<T>>(results)?);
            pages += 1;

            next = page
                .get("next")
                .and_then(Value::as_str)
                .filter(|link| !link.is_empty())
                .map(|link| relative_to_base(link, &self.config.base_url));
        }

        debug!(
            path = initial_path,
            pages,
            items = items.len(),
            "fetched all pages"
        );
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::ApiConfig;
    use crate::store::{MemoryCredentialStore, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
    use mockito::{Matcher, Server};
    use serde::Deserialize;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Item {
        id: u32,
    }

    fn client(base_url: String) -> AuthClient {
        let store = MemoryCredentialStore::with_entries([
            (ACCESS_TOKEN_KEY, "valid"),
            (REFRESH_TOKEN_KEY, "r"),
        ]);
        AuthClient::new(ApiConfig::new(base_url), Arc::new(store))
    }

    #[tokio::test]
    async fn test_three_pages_in_order() {
        let mut server = Server::new_async().await;
        let base = server.url();
        let first = server
            .mock("GET", "/api/items/")
            .match_query(Matcher::UrlEncoded("page".into(), "1".into()))
            .with_status(200)
            .with_body(
                serde_json::json!({
                    "count": 5,
                    "results": [{"id": 1}, {"id": 2}],
                    "next": format!("{}/api/items/?page=2", base),
                    "previous": null
                })
                .to_string(),
            )
            .expect(1)
            .create_async()
            .await;
        let second = server
            .mock("GET", "/api/items/")
            .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
            .with_status(200)
            .with_body(
                serde_json::json!({
                    "count": 5,
                    "results": [{"id": 3}, {"id": 4}],
                    "next": format!("{}/api/items/?page=3", base),
                })
                .to_string(),
            )
            .expect(1)
            .create_async()
            .await;
        let third = server
            .mock("GET", "/api/items/")
            .match_query(Matcher::UrlEncoded("page".into(), "3".into()))
            .with_status(200)
            .with_body(r#"{"count": 5, "results": [{"id": 5}], "next": null}"#)
            .expect(1)
            .create_async()
            .await;

        let items: Vec<Item> = client(base)
            .fetch_all_pages("/api/items/?page=1")
            .await.unwrap();

        first.assert_async().await;
        second.assert_async().await;
        third.assert_async().await;
        assert_eq!(
            items,
            (1..=5).map(|id| Item { id }).collect::<Vec<_>>()
        );
    }

    #[tokio::test]
    async fn test_missing_results_is_format_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/items/")
            .with_status(200)
            .with_body(r#"{"items": [], "next": null}"#)
            .create_async()
            .await;

        let result = client(server.url())
            .fetch_all_pages::<Item>("/api/items/")
            .await;
        assert!(matches!(result, Err(ClientError::PaginationFormat)));
    }

    #[tokio::test]
    async fn test_failing_page_discards_earlier_results() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/items/")
            .match_query(Matcher::UrlEncoded("page".into(), "1".into()))
            .with_status(200)
            .with_body(r#"{"results": [{"id": 1}], "next": "/api/items/?page=2"}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/api/items/")
            .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
            .with_status(500)
            .create_async()
            .await;

        let result = client(server.url())
            .fetch_all_pages::<Item>("/api/items/?page=1")
            .await;
        match result {
            Err(ClientError::Api { status, .. }) => assert_eq!(status.as_u16(), 500),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_next_pointing_back_is_format_error() {
        let mut server = Server::new_async().await;
        let base = server.url();
        let m = server
            .mock("GET", "/api/items/")
            .match_query(Matcher::UrlEncoded("page".into(), "1".into()))
            .with_status(200)
            .with_body(
                serde_json::json!({
                    "results": [{"id": 1}],
                    "next": format!("{}/api/items/?page=1", base),
                })
                .to_string(),
            )
            .expect(1)
            .create_async()
            .await;

        let result = client(base).fetch_all_pages::<Item>("/api/items/?page=1").await;

        m.assert_async().await;
        assert!(matches!(result, Err(ClientError::PaginationFormat)));
    }

    #[tokio::test]
    async fn test_next_under_base_path_is_not_doubled() {
        let mut server = Server::new_async().await;
        let base = format!("{}/backend", server.url());
        server
            .mock("GET", "/backend/api/items/")
            .match_query(Matcher::UrlEncoded("page".into(), "1".into()))
            .with_status(200)
            .with_body(
                serde_json::json!({
                    "results": [{"id": 1}],
                    "next": format!("{}/api/items/?page=2", base),
                })
                .to_string(),
            )
            .create_async()
            .await;
        let second = server
            .mock("GET", "/backend/api/items/")
            .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
            .with_status(200)
            .with_body(r#"{"results": [{"id": 2}], "next": null}"#)
            .expect(1)
            .create_async()
            .await;

        let items: Vec<Item> = client(base)
            .fetch_all_pages("/api/items/?page=1")
            .await
            .unwrap();

        second.assert_async().await;
        assert_eq!(items, vec![Item { id: 1 }, Item { id: 2 }]);
    }
}
