use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, info};

use crate::error::CatalogError;

pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Where catalogue bytes come from. One call, one document, no retries.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Human readable origin, used in diagnostics.
    fn location(&self) -> &str;

    async fn fetch(&self) -> Result<Vec<u8>, CatalogError>;
}

/// Fetches the Simplestreams document over HTTP(S).
pub struct HttpCatalogSource {
    client: Client,
    url: String,
}

impl HttpCatalogSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, CatalogError> {
        let url = url.into();
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|source| CatalogError::Transport {
                url: url.clone(),
                source,
            })?;

        Ok(Self { client, url })
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    fn location(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> Result<Vec<u8>, CatalogError> {
        debug!(url = %self.url, "fetching catalog");

        let transport_error = |source| CatalogError::Transport {
            url: self.url.clone(),
            source,
        };

        let res = self.client.get(&self.url).send().await.map_err(transport_error)?;

        let status = res.status();
        if status != StatusCode::OK {
            return Err(CatalogError::HttpStatus {
                url: self.url.clone(),
                status,
            });
        }

        let bytes = res.bytes().await.map_err(transport_error)?;
        info!(url = %self.url, bytes = bytes.len(), "catalog fetched");

        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use httpmock::prelude::*;

    use super::{CatalogSource, HttpCatalogSource, USER_AGENT};
    use crate::error::CatalogError;

    const CATALOG_PATH: &str = "/releases/streams/v1/com.ubuntu.cloud:released:download.json";

    fn source(url: String) -> HttpCatalogSource {
        HttpCatalogSource::new(url, Duration::from_secs(5)).expect("client should build")
    }

    #[tokio::test]
    async fn returns_the_body_on_200() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path(CATALOG_PATH).header("user-agent", USER_AGENT);
                then.status(200).body(r#"{"products": {}}"#);
            })
            .await;

        let body = source(server.url(CATALOG_PATH)).fetch().await.unwrap();

        assert_eq!(body, br#"{"products": {}}"#.to_vec());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_200_is_a_transport_error() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path(CATALOG_PATH);
                then.status(503).body("maintenance");
            })
            .await;

        let err = source(server.url(CATALOG_PATH)).fetch().await.unwrap_err();

        assert!(err.is_transport());
        assert!(matches!(err, CatalogError::HttpStatus { status, .. } if status.as_u16() == 503));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn other_success_statuses_are_rejected_too() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(CATALOG_PATH);
                then.status(204);
            })
            .await;

        let err = source(server.url(CATALOG_PATH)).fetch().await.unwrap_err();
        assert!(matches!(err, CatalogError::HttpStatus { .. }));
    }

    #[tokio::test]
    async fn slow_responses_time_out() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(CATALOG_PATH);
                then.status(200).body("{}").delay(Duration::from_millis(500));
            })
            .await;

        let slow = HttpCatalogSource::new(server.url(CATALOG_PATH), Duration::from_millis(50)).unwrap();
        let err = slow.fetch().await.unwrap_err();

        assert!(matches!(err, CatalogError::Transport { .. }));
    }

    #[tokio::test]
    async fn connection_refused_is_a_transport_error() {
        let err = source("http://127.0.0.1:1/catalog.json".to_string())
            .fetch()
            .await
            .unwrap_err();
        assert!(err.is_transport());
    }
}
