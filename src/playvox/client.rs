//! Playvox API client: paged GET with bounded retry.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;

use crate::error::ApiError;
use crate::http::{with_retry, RETRY_DELAY};

use super::credentials::Credentials;
use super::params::{page_params, DEFAULT_PER_PAGE};

/// Paged read access to the API, mockable for callers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FetchPages: Send + Sync {
    /// Fetches one page of `endpoint` and returns the parsed response body.
    ///
    /// `resource` is the human-readable name used in logs and errors. An
    /// empty `query` behaves like an absent one.
    async fn fetch_page(
        &self,
        resource: &str,
        endpoint: &str,
        page: u32,
        query: Option<String>,
    ) -> Result<Value, ApiError>;
}

/// Playvox API client.
///
/// Configuration is immutable after construction, so one instance can be
/// shared freely across tasks.
pub struct Playvox {
    client: Client,
    credentials: Credentials,
    base_url: String,
    per_page: u32,
    retry_delay: Duration,
}

impl Playvox {
    /// Creates a client for `https://{domain}.playvox.com/api/v1`.
    pub fn new(client: Client, credentials: Credentials) -> Self {
        let base_url = format!("https://{}.playvox.com/api/v1", credentials.domain);
        Self {
            client,
            credentials,
            base_url,
            per_page: DEFAULT_PER_PAGE,
            retry_delay: RETRY_DELAY,
        }
    }

    /// Overrides the derived API base URL (tests, proxies).
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.base_url = api_url.into();
        self
    }

    /// Overrides the page size requested per call.
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    /// Overrides the delay between retry attempts.
    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// Returns the API base URL requests are sent to.
    pub fn api_url(&self) -> &str {
        &self.base_url
    }

    fn page_request(&self, url: &str, page: u32, query: Option<&str>) -> RequestBuilder {
        let mut request = self
            .client
            .get(url)
            .basic_auth(&self.credentials.api_key, Some(&self.credentials.api_secret))
            .query(&page_params(self.per_page, page));
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            request = request.query(&[("query", query)]);
        }
        request
    }
}

#[async_trait]
impl FetchPages for Playvox {
    #[tracing::instrument(skip(self, query))]
    async fn fetch_page(
        &self,
        resource: &str,
        endpoint: &str,
        page: u32,
        query: Option<String>,
    ) -> Result<Value, ApiError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("Fetching {} page {} from {}...", resource, page, url);

        with_retry(resource, self.retry_delay, || {
            let request = self.page_request(&url, page, query.as_deref());
            async move {
                let response = request.send().await?;
                let status = response.status();
                if status != StatusCode::OK {
                    return Err(ApiError::Status {
                        resource: resource.to_string(),
                        status,
                    });
                }
                Ok(response.json().await?)
            }
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;
    use std::time::Instant;

    const USERS_PAGE1: &str = "/users?include=all&all_sites=true&sort=-updated_at&per_page=2000&page=1";

    fn credentials() -> Credentials {
        Credentials::new(
            Some("acme".to_string()),
            Some("key".to_string()),
            Some("secret".to_string()),
        )
        .unwrap()
    }

    fn client_for(server: &mockito::ServerGuard) -> Playvox {
        Playvox::new(Client::new(), credentials()).with_api_url(server.url())
    }

    #[test]
    fn test_base_url_is_derived_from_domain() {
        let api = Playvox::new(Client::new(), credentials());
        assert_eq!(api.api_url(), "https://acme.playvox.com/api/v1");
    }

    #[tokio::test]
    async fn test_fetch_page_returns_body_unchanged() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("GET", USERS_PAGE1)
            .match_header("authorization", "Basic a2V5OnNlY3JldA==")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data": [1, 2, 3]}"#)
            .create_async()
            .await;

        let api = client_for(&server);
        let value = api.fetch_page("users", "users", 1, None).await.unwrap();

        mock.assert_async().await;
        assert_eq!(value, json!({"data": [1, 2, 3]}));
    }

    #[tokio::test]
    async fn test_fetch_page_sends_page_and_query_parameters() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("GET", "/widgets")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("include".into(), "all".into()),
                Matcher::UrlEncoded("all_sites".into(), "true".into()),
                Matcher::UrlEncoded("sort".into(), "-updated_at".into()),
                Matcher::UrlEncoded("per_page".into(), "2000".into()),
                Matcher::UrlEncoded("page".into(), "2".into()),
                Matcher::UrlEncoded("query".into(), "type:bug".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"data": []}"#)
            .create_async()
            .await;

        let api = client_for(&server);
        api.fetch_page("widgets", "widgets", 2, Some("type:bug".to_string()))
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_page_omits_empty_query() {
        let mut server = mockito::Server::new_async().await;

        // Exact path match: no `query` parameter may be present.
        let mock = server
            .mock("GET", USERS_PAGE1)
            .with_status(200)
            .with_body(r#"{"data": []}"#)
            .create_async()
            .await;

        let api = client_for(&server);
        api.fetch_page("users", "users", 1, Some(String::new()))
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_page_honors_configured_page_size() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("GET", "/users")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("per_page".into(), "50".into()),
                Matcher::UrlEncoded("page".into(), "1".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"data": []}"#)
            .create_async()
            .await;

        let api = client_for(&server).with_per_page(50);
        api.fetch_page("users", "users", 1, None).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_page_unexpected_status_fails_without_retry() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("GET", USERS_PAGE1)
            .with_status(404)
            .expect(1)
            .create_async()
            .await;

        let start = Instant::now();
        let api = client_for(&server).with_retry_delay(Duration::from_secs(1));
        let result = api.fetch_page("users", "users", 1, None).await;

        mock.assert_async().await;
        assert!(start.elapsed() < Duration::from_millis(500));
        assert!(matches!(
            result,
            Err(ApiError::Status { status, .. }) if status == StatusCode::NOT_FOUND
        ));
    }

    #[tokio::test]
    async fn test_fetch_page_retries_server_errors_until_exhausted() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("GET", USERS_PAGE1)
            .with_status(503)
            .expect(3)
            .create_async()
            .await;

        let api = client_for(&server).with_retry_delay(Duration::from_millis(10));
        let result = api.fetch_page("users", "users", 1, None).await;

        mock.assert_async().await;
        assert!(matches!(
            result,
            Err(ApiError::RetriesExhausted { attempts: 3, .. })
        ));
    }
}
