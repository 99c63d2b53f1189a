//! Base REST HTTP client.
//!
//! Provides `get()` and `post()` against paths relative to the configured
//! access node URL, with a configurable timeout. Failed calls are returned
//! to the caller as-is; nothing is retried.

use crate::error::RestError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Configuration for a REST client.
#[derive(Debug, Clone)]
pub struct RestConfig {
    /// Base URL including the API version (e.g., `http://127.0.0.1:8888/v1`).
    pub url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            url: crate::endpoints::LOCALHOST.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Async client for Flow REST endpoints.
pub struct RestClient {
    client: reqwest::Client,
    config: RestConfig,
}

impl RestClient {
    /// Create a new client with the given URL.
    pub fn new(url: &str) -> Result<Self, RestError> {
        Self::with_config(RestConfig {
            url: url.to_string(),
            ..Default::default()
        })
    }

    /// Create a new client with full configuration.
    pub fn with_config(mut config: RestConfig) -> Result<Self, RestError> {
        config.url = config.url.trim_end_matches('/').to_string();
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RestError::Http {
                url: config.url.clone(),
                source: e,
            })?;

        Ok(Self { client, config })
    }

    /// Get the configured base URL.
    pub fn url(&self) -> &str {
        &self.config.url
    }

    fn build_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    fn endpoint_url(&self, path: &str) -> String {
        format!("{}/{}", self.config.url, path.trim_start_matches('/'))
    }

    /// GET a path with query parameters and decode the JSON body.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, RestError> {
        let url = self.endpoint_url(path);
        log::debug!("GET {} {:?}", url, query);

        let resp = self
            .client
            .get(&url)
            .headers(Self::build_headers())
            .query(query)
            .send()
            .await
            .map_err(|e| RestError::Http {
                url: url.clone(),
                source: e,
            })?;

        Self::read_json(&url, resp).await
    }

    /// POST a JSON body to a path and decode the JSON response.
    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        body: &B,
    ) -> Result<T, RestError> {
        let url = self.endpoint_url(path);
        log::debug!("POST {}", url);

        let resp = self
            .client
            .post(&url)
            .headers(Self::build_headers())
            .query(query)
            .json(body)
            .send()
            .await
            .map_err(|e| RestError::Http {
                url: url.clone(),
                source: e,
            })?;

        Self::read_json(&url, resp).await
    }

    async fn read_json<T: DeserializeOwned>(
        url: &str,
        resp: reqwest::Response,
    ) -> Result<T, RestError> {
        let status = resp.status().as_u16();
        let text = resp.text().await.map_err(|e| RestError::Http {
            url: url.to_string(),
            source: e,
        })?;

        if status == 404 {
            return Err(RestError::NotFound(error_message(&text)));
        }
        if status >= 400 {
            return Err(RestError::HttpStatus {
                url: url.to_string(),
                status,
                body: error_message(&text),
            });
        }

        Ok(serde_json::from_str(&text)?)
    }
}

/// Pull `message` out of a `{"code": .., "message": ..}` error body, falling
/// back to the (truncated) raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.chars().take(500).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = RestConfig::default();
        assert_eq!(config.url, "http://127.0.0.1:8888/v1");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_client_url() {
        let client = RestClient::new("https://rest-testnet.onflow.org/v1/").unwrap();
        assert_eq!(client.url(), "https://rest-testnet.onflow.org/v1");
        assert_eq!(
            client.endpoint_url("/blocks"),
            "https://rest-testnet.onflow.org/v1/blocks"
        );
        assert_eq!(
            client.endpoint_url("accounts/01"),
            "https://rest-testnet.onflow.org/v1/accounts/01"
        );
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(
            error_message(r#"{"code":400,"message":"invalid ID format"}"#),
            "invalid ID format"
        );
        assert_eq!(error_message("bad gateway"), "bad gateway");
        assert_eq!(error_message(&"x".repeat(600)).len(), 500);
    }
}
