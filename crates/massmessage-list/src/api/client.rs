//! MediaWiki API client.

use super::types::{ApiErrorBody, QueryParams};
use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::Config;
use tracing::debug;

/// Product token appended to the configured User-Agent
const PRODUCT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Why a single API request produced no usable page
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("server returned status {status}")]
    Status { status: StatusCode },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("API error {code}: {info}")]
    Api { code: String, info: String },
}

/// Anything that can answer an `action=query` request
///
/// Implemented by [`WikiClient`] for the real wiki and by scripted
/// responders in tests.
#[allow(async_fn_in_trait)]
pub trait QueryApi {
    /// Perform one request and decode the response body as `T`
    async fn query<T: DeserializeOwned>(&mut self, params: &QueryParams) -> Result<T, FetchError>;
}

/// Decode a JSON response body, surfacing MediaWiki error envelopes
pub fn decode_body<T: DeserializeOwned>(body: Value) -> Result<T, FetchError> {
    if let Some(error) = body.get("error") {
        let error: ApiErrorBody =
            serde_json::from_value(error.clone()).unwrap_or_else(|_| ApiErrorBody {
                code: "unknown".to_string(),
                info: error.to_string(),
            });
        return Err(FetchError::Api {
            code: error.code,
            info: error.info,
        });
    }

    Ok(serde_json::from_value(body)?)
}

/// Client for a single wiki's `api.php`
pub struct WikiClient {
    /// HTTP client, reused for every request
    client: Client,
    /// Full URL of `api.php`
    api_url: String,
}

impl WikiClient {
    /// Create a client from the `[wiki]` configuration
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent(PRODUCT))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_url: config.wiki.api_url.clone(),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

impl QueryApi for WikiClient {
    async fn query<T: DeserializeOwned>(&mut self, params: &QueryParams) -> Result<T, FetchError> {
        debug!(
            url = %self.api_url,
            list = params.get("list").unwrap_or_default(),
            "Making API request"
        );

        let response = self.client.get(self.api_url.as_str()).query(params).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { status });
        }

        let text = response.text().await?;
        let body: Value = serde_json::from_str(&text)?;

        decode_body(body)
    }
}
