use crate::error::SlackError;
use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://slack.com/api";

#[derive(Debug, Deserialize)]
struct SlackErrorResponse {
    ok: bool,
    error: Option<String>,
    needed: Option<String>,
}

/// A Slack Web API client bound to one token.
pub struct SlackClient {
    client: reqwest::Client,
    base_url: String,
}

impl SlackClient {
    pub fn with_base_url(base_url: &str, token: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token))
                .context("Slack token contains characters that are not valid in an HTTP header")?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T, SlackError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        tracing::debug!(method = "GET", %url, ?query, "sending request");

        let request = self.client.get(&url).query(query);
        self.execute(endpoint, request).await
    }

    /// POST with parameters in the query string and `form` as a url-encoded body.
    pub async fn post_form<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
        form: &[(&str, &str)],
    ) -> Result<T, SlackError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        tracing::debug!(method = "POST", %url, ?query, "sending request");

        let request = self.client.post(&url).query(query).form(form);
        self.execute(endpoint, request).await
    }

    /// Fetch raw bytes from an absolute URL, still sending the bearer token.
    pub async fn download(&self, url: &str) -> Result<Vec<u8>, SlackError> {
        tracing::debug!(method = "GET", %url, "downloading");

        let start = std::time::Instant::now();
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| transport(url, source))?;
        let status = response.status();

        if !status.is_success() {
            return Err(SlackError::Status {
                endpoint: url.to_string(),
                status,
            });
        }

        let bytes = response.bytes().await.map_err(|source| transport(url, source))?;
        tracing::debug!(
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            bytes = bytes.len(),
            "download finished"
        );

        Ok(bytes.to_vec())
    }

    async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, SlackError> {
        let start = std::time::Instant::now();
        let response = request
            .send()
            .await
            .map_err(|source| transport(endpoint, source))?;
        let status = response.status();

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), endpoint, "request failed");
            return Err(SlackError::Status {
                endpoint: endpoint.to_string(),
                status,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| transport(endpoint, source))?;

        tracing::debug!(
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            bytes = body.len(),
            endpoint,
            "response received"
        );

        // Every Slack envelope carries `ok`; check it before decoding the payload.
        if let Ok(error_response) = serde_json::from_str::<SlackErrorResponse>(&body) {
            if !error_response.ok {
                return Err(SlackError::Api {
                    endpoint: endpoint.to_string(),
                    code: error_response
                        .error
                        .unwrap_or_else(|| "unknown_error".to_string()),
                    needed: error_response.needed,
                });
            }
        }

        serde_json::from_str::<T>(&body).map_err(|source| SlackError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }
}

fn transport(endpoint: &str, source: reqwest::Error) -> SlackError {
    SlackError::Transport {
        endpoint: endpoint.to_string(),
        source,
    }
}
