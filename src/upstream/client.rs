//! SWAPI HTTP client.
//!
//! # Responsibilities
//! - Own the pooled `reqwest` client and the fixed base URL
//! - Issue one GET per lookup with explicit connect/request timeouts
//! - Classify failures into `UpstreamError`

use std::time::{Duration, Instant};

use serde_json::Value;

use crate::catalog::Resource;
use crate::config::UpstreamConfig;
use crate::observability::metrics;
use crate::upstream::error::UpstreamError;
use crate::upstream::lookup::Lookup;

/// Cloneable handle to the upstream catalog. Clones share one connection pool.
#[derive(Debug, Clone)]
pub struct SwapiClient {
    http: reqwest::Client,
    base_url: String,
    request_timeout_ms: u64,
}

impl SwapiClient {
    /// Build a client from the upstream section of the configuration.
    pub fn new(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            request_timeout_ms: config.request_timeout_ms,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Run `lookup` against `resource` and return the upstream JSON untouched.
    pub async fn fetch(&self, resource: Resource, lookup: &Lookup) -> Result<Value, UpstreamError> {
        let url = lookup.url(&self.base_url, resource);
        let start = Instant::now();

        tracing::debug!(
            resource = %resource,
            endpoint = %lookup.endpoint(),
            upstream_url = %url,
            "Forwarding to upstream"
        );

        let result = self.get_json(&url).await;

        let outcome = match &result {
            Ok(_) => "ok",
            Err(e) => e.kind(),
        };
        metrics::record_upstream(resource.as_str(), outcome, start);

        result
    }

    async fn get_json(&self, url: &str) -> Result<Value, UpstreamError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }

        response.json::<Value>().await.map_err(|e| {
            if e.is_timeout() {
                UpstreamError::Timeout(self.request_timeout_ms)
            } else {
                UpstreamError::Decode(e)
            }
        })
    }

    fn classify(&self, error: reqwest::Error) -> UpstreamError {
        if error.is_timeout() {
            UpstreamError::Timeout(self.request_timeout_ms)
        } else if error.is_connect() {
            UpstreamError::Connect(error)
        } else {
            UpstreamError::Request(error)
        }
    }
}
