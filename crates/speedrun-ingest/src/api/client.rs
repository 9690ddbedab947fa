//! HTTP API client for speedrun.com
//!
//! Every request goes through [`ApiClient::get_json`], which turns a
//! non-success status into [`IngestError::Status`] and logs the failure
//! before handing it back to the caller.

use crate::api::{endpoints, types::*};
use crate::config::ApiConfig;
use crate::error::{IngestError, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

/// API client for speedrun.com
pub struct ApiClient {
    client: Client,
    base_url: String,
    runs_per_page: u32,
}

impl ApiClient {
    /// Create a new API client from configuration
    pub fn new(config: &ApiConfig) -> Result<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|_| IngestError::config("User agent contains invalid characters"))?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            runs_per_page: config.runs_per_page,
        })
    }

    /// List every category of a game
    pub async fn list_categories(&self, game_id: &str) -> Result<Vec<Category>> {
        let url = endpoints::categories_url(&self.base_url, game_id);
        let envelope: DataEnvelope<Vec<Category>> = self.get_json(&url).await?;
        Ok(envelope.data)
    }

    /// Fetch one page of verified runs starting at `offset`
    pub async fn list_runs(
        &self,
        game_id: &str,
        category_id: Option<&str>,
        offset: usize,
    ) -> Result<RunPage> {
        let url = endpoints::runs_url(
            &self.base_url,
            game_id,
            category_id,
            self.runs_per_page,
            offset,
        );
        self.get_json(&url).await
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Page size used for run listings
    pub fn runs_per_page(&self) -> u32 {
        self.runs_per_page
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(url, "GET");

        let response = self.client.get(url).send().await.map_err(|e| {
            error!(url, error = %e, "API request failed");
            IngestError::Http(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            error!(url, status = status.as_u16(), "API returned an error status");
            return Err(IngestError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.json::<T>().await.map_err(|e| {
            error!(url, error = %e, "Failed to decode API response");
            IngestError::Decode {
                url: url.to_string(),
                source: e,
            }
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ApiClient {
        let config = ApiConfig::default()
            .with_base_url(server.uri())
            .with_runs_per_page(2);
        ApiClient::new(&config).unwrap()
    }

    #[test]
    fn test_api_client_creation() {
        let config = ApiConfig::default().with_base_url("http://localhost:8000/");
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.runs_per_page(), 200);
    }

    #[test]
    fn test_api_client_rejects_invalid_config() {
        let config = ApiConfig::default().with_base_url("localhost");
        assert!(ApiClient::new(&config).is_err());
    }

    #[tokio::test]
    async fn test_list_categories() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/games/o1y9wo6q/categories"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [
                    {"id": "wkpoo02r", "name": "120 Star", "type": "per-game"},
                    {"id": "7dgrrxk4", "name": "70 Star", "type": "per-game"}
                ]
            })))
            .mount(&server)
            .await;

        let categories = client_for(&server).list_categories("o1y9wo6q").await.unwrap();
        let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["120 Star", "70 Star"]);
    }

    #[tokio::test]
    async fn test_list_runs_sends_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/runs"))
            .and(query_param("game", "o1y9wo6q"))
            .and(query_param("category", "wkpoo02r"))
            .and(query_param("status", "verified"))
            .and(query_param("orderby", "date"))
            .and(query_param("max", "2"))
            .and(query_param("offset", "4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{"id": "a"}],
                "pagination": {"offset": 4, "max": 2, "size": 1}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let page = client_for(&server)
            .list_runs("o1y9wo6q", Some("wkpoo02r"), 4)
            .await
            .unwrap();
        assert_eq!(page.data.len(), 1);
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/games/missing/categories"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client_for(&server).list_categories("missing").await.unwrap_err();
        assert!(matches!(err, IngestError::Status { status: 404, .. }));
        assert!(err.is_upstream());
    }

    #[tokio::test]
    async fn test_unexpected_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/games/o1y9wo6q/categories"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).list_categories("o1y9wo6q").await.unwrap_err();
        assert!(matches!(err, IngestError::Decode { .. }));
        assert!(err.is_upstream());
        let message = err.to_string();
        assert!(message.starts_with("Unexpected response from"));
        assert!(!message.contains("Network request failed"));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_http_error() {
        let config = ApiConfig::default().with_base_url("http://127.0.0.1:9");
        let client = ApiClient::new(&config).unwrap();
        let err = client.list_categories("x").await.unwrap_err();
        assert!(matches!(err, IngestError::Http(_)));
    }
}
