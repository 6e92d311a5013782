use super::ItemSource;
use crate::models::{Item, ItemPage};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode};

const ITEMS_PATH: &str = "/api/v2/authenticated_user/items";
const TOTAL_COUNT_HEADER: &str = "Total-Count";

pub struct QiitaClient {
    client: Client,
    token: String,
    base_url: String,
}

impl QiitaClient {
    pub fn new(token: String, base_url: String) -> Self {
        Self::new_with_client(token, base_url, Client::new())
    }

    pub fn new_with_client(token: String, base_url: String, client: Client) -> Self {
        Self {
            client,
            token,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ItemSource for QiitaClient {
    async fn fetch_page(&self, page: usize, per_page: usize) -> Result<ItemPage> {
        let url = format!("{}{}", self.base_url, ITEMS_PATH);
        tracing::debug!("Fetching items page {} ({} per page)", page, per_page);

        let response = self
            .client
            .get(&url)
            .query(&[("page", page), ("per_page", per_page)])
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to Qiita: {}", e);
                e
            })?;

        if response.status() != StatusCode::OK {
            let status = response.status();
            let error_text = response.text().await?;
            tracing::error!("Qiita API error (status {}): {}", status, error_text);
            return Err(Error::Api(format!("status {}: {}", status, error_text)));
        }

        let total_count = response
            .headers()
            .get(TOTAL_COUNT_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| Error::Api(format!("Missing {} header", TOTAL_COUNT_HEADER)))?;
        let total_count = total_count.trim().parse::<usize>().map_err(|_| {
            Error::Api(format!(
                "Invalid {} header: '{}'",
                TOTAL_COUNT_HEADER, total_count
            ))
        })?;

        let body = response.text().await?;
        let items: Vec<Item> = serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse Qiita items: {}", e);
            e
        })?;

        Ok(ItemPage { items, total_count })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn item_json(id: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "url": format!("https://qiita.com/user/items/{}", id),
            "title": format!("Item {}", id),
            "body": "<img src=\"https://qiita-image-store.s3.amazonaws.com/0/1/a.png\">",
            "rendered_body": "",
            "created_at": "2020-01-02T03:04:05+09:00",
            "tags": [{"name": "Rust", "versions": []}],
            "private": false
        })
    }

    fn make_client(server: &MockServer) -> QiitaClient {
        QiitaClient::new("test-token".to_string(), server.uri())
    }

    #[tokio::test]
    async fn test_fetch_page_sends_auth_and_paging() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(ITEMS_PATH))
            .and(query_param("page", "2"))
            .and(query_param("per_page", "20"))
            .and(header("Authorization", "Bearer test-token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Total-Count", "42")
                    .set_body_json(serde_json::json!([item_json("a"), item_json("b")])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let page = make_client(&server).fetch_page(2, 20).await.unwrap();

        assert_eq!(page.total_count, 42);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].id, "a");
        assert_eq!(page.items[1].tags[0].name, "Rust");
    }

    #[tokio::test]
    async fn test_fetch_page_trailing_slash_in_base_url() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(ITEMS_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Total-Count", "0")
                    .set_body_json(serde_json::json!([])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = QiitaClient::new("t".to_string(), format!("{}/", server.uri()));
        let page = client.fetch_page(1, 20).await.unwrap();
        assert!(page.items.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_page_api_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(ITEMS_PATH))
            .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
            .mount(&server)
            .await;

        let err = make_client(&server).fetch_page(1, 20).await.unwrap_err();
        assert!(matches!(err, Error::Api(_)));
        assert!(err.to_string().contains("unauthorized"));
    }

    #[tokio::test]
    async fn test_fetch_page_requires_total_count() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(ITEMS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let err = make_client(&server).fetch_page(1, 20).await.unwrap_err();
        assert!(matches!(err, Error::Api(_)));
        assert!(err.to_string().contains("Total-Count"));
    }

    #[tokio::test]
    async fn test_fetch_page_rejects_non_numeric_total_count() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(ITEMS_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Total-Count", "lots")
                    .set_body_json(serde_json::json!([])),
            )
            .mount(&server)
            .await;

        let err = make_client(&server).fetch_page(1, 20).await.unwrap_err();
        assert!(matches!(err, Error::Api(_)));
    }

    #[tokio::test]
    async fn test_fetch_page_rejects_invalid_json() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(ITEMS_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Total-Count", "1")
                    .set_body_string("{not json"),
            )
            .mount(&server)
            .await;

        let err = make_client(&server).fetch_page(1, 20).await.unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
