//! HttpImageSource - cataas の JSON API から画像を取得する
//!
//! `GET {endpoint}` は `{ "url": "...", "tags": [...] }` を返します。
//! `tags` は省略・null の場合があります。

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::SourceConfig;
use crate::domain::{FetchError, RawImage};
use crate::ports::ImageSource;

#[derive(Debug, Deserialize)]
struct CatPayload {
    url: String,
    #[serde(default)]
    tags: Option<Vec<String>>,
}

/// reqwest ベースの ImageSource
pub struct HttpImageSource {
    client: reqwest::Client,
    endpoint: String,
    base_origin: String,
}

impl HttpImageSource {
    pub fn new(config: &SourceConfig) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(ms) = config.request_timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            base_origin: config.base_origin.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ImageSource for HttpImageSource {
    async fn fetch(&self) -> Result<RawImage, FetchError> {
        let response = self.client.get(&self.endpoint).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let payload: CatPayload = response.json().await?;

        if payload.url.trim().is_empty() {
            return Err(FetchError::Malformed("empty url".to_string()));
        }

        Ok(RawImage::new(payload.url, payload.tags.unwrap_or_default()))
    }

    fn base_origin(&self) -> &str {
        &self.base_origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn source_for(server: &MockServer) -> HttpImageSource {
        let config = SourceConfig {
            endpoint: format!("{}/cat?json=true&type=small", server.uri()),
            base_origin: server.uri(),
            request_timeout_ms: Some(2_000),
        };
        HttpImageSource::new(&config).unwrap()
    }

    #[tokio::test]
    async fn decodes_url_and_tags() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cat"))
            .and(query_param("json", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "url": "/cat/abc123?type=small",
                "tags": ["orange", "cute"],
            })))
            .mount(&server)
            .await;

        let raw = source_for(&server).fetch().await.unwrap();
        assert_eq!(raw.url, "/cat/abc123?type=small");
        assert_eq!(raw.tags, vec!["orange".to_string(), "cute".to_string()]);
    }

    #[tokio::test]
    async fn missing_or_null_tags_become_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "url": "https://cdn.example/cat.png",
                "tags": null,
            })))
            .mount(&server)
            .await;

        let raw = source_for(&server).fetch().await.unwrap();
        assert!(raw.tags.is_empty());
    }

    #[tokio::test]
    async fn non_success_status_is_a_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = source_for(&server).fetch().await.unwrap_err();
        assert_eq!(err, FetchError::Status(503));
    }

    #[tokio::test]
    async fn malformed_body_is_a_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
            .mount(&server)
            .await;

        let err = source_for(&server).fetch().await.unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[tokio::test]
    async fn empty_url_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "url": "" })),
            )
            .mount(&server)
            .await;

        let err = source_for(&server).fetch().await.unwrap_err();
        assert!(matches!(err, FetchError::Malformed(_)));
    }
}
