use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReaderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("reader returned {status}: {body}")]
    Status { status: u16, body: String },
}

/// Turns a web page URL into plain text. One attempt per call.
#[async_trait]
pub trait WebReader: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, ReaderError>;
}

/// Reader service that takes the page URL appended to its own.
pub struct JinaReader {
    base_url: String,
    client: Client,
}

impl JinaReader {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ReaderError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    pub fn request_url(&self, url: &str) -> String {
        format!("{}{}", self.base_url, url)
    }
}

#[async_trait]
impl WebReader for JinaReader {
    async fn fetch(&self, url: &str) -> Result<String, ReaderError> {
        let target = self.request_url(url);
        log::debug!("Fetching {target}");

        let response = self.client.get(&target).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ReaderError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn test_request_url_appends_verbatim() {
        let reader =
            JinaReader::new("https://r.jina.ai/", Duration::from_secs(60)).unwrap();
        assert_eq!(
            reader.request_url("https://example.com/a?b=c"),
            "https://r.jina.ai/https://example.com/a?b=c"
        );
    }

    #[tokio::test]
    async fn test_fetch_returns_body() {
        let server = MockServer::start_async().await;
        let page = server
            .mock_async(|when, then| {
                when.method(GET).path("/example.com/page");
                then.status(200).body("Title: Example\n\nBody text");
            })
            .await;

        let reader = JinaReader::new(server.url("/"), Duration::from_secs(5)).unwrap();
        let text = reader.fetch("example.com/page").await.unwrap();

        page.assert_async().await;
        assert_eq!(text, "Title: Example\n\nBody text");
    }

    #[tokio::test]
    async fn test_fetch_maps_error_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/example.com/missing");
                then.status(451).body("unavailable");
            })
            .await;

        let reader = JinaReader::new(server.url("/"), Duration::from_secs(5)).unwrap();
        let err = reader.fetch("example.com/missing").await.unwrap_err();
        assert!(matches!(err, ReaderError::Status { status: 451, .. }));
    }
}
