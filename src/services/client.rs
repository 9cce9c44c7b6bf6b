//! HTTP dispatch service
//!
//! Owns the HTTP client and the produce pipeline: registry lookup, request
//! building, one POST to the provider endpoint, response extraction. One
//! invocation issues exactly one request; no retry, no streaming.

use crate::config::registry::ProviderRegistry;
use crate::models::{ProduceRequest, ProviderResult};
use crate::services::{builder, extractor};
use crate::utils::error::{AppError, AppResult};
use anyhow::Context;
use reqwest::Client;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, error};

/// Default request timeout in seconds, overridable via LLMCALL_TIMEOUT
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// LLM provider client
#[derive(Debug, Clone)]
pub struct LlmClient {
    client: Client,
    registry: ProviderRegistry,
}

impl LlmClient {
    /// Create a new client instance over a loaded registry
    pub fn new(registry: ProviderRegistry) -> AppResult<Self> {
        let timeout = std::env::var("LLMCALL_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout))
            .user_agent(concat!("llmcall/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, registry })
    }

    /// The registry this client dispatches against
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Produce a normalized result from one provider call
    ///
    /// `include_raw` attaches the full unmodified response to the result.
    pub async fn produce(
        &self,
        request: &ProduceRequest,
        include_raw: bool,
    ) -> AppResult<ProviderResult> {
        let provider = self.registry.get(&request.provider)?;

        let built =
            builder::build_request(&request.provider, provider, &request.model, &request.prompt)?;

        let response = self
            .send(&provider.descriptor.api_url, &built.headers, &built.body)
            .await?;

        let (content, usage) = extractor::extract(&request.provider, provider, &response)?;

        Ok(ProviderResult {
            content,
            usage,
            raw: include_raw.then_some(response),
        })
    }

    /// Send one POST request and decode the JSON response
    pub async fn send(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
        body: &Value,
    ) -> AppResult<Value> {
        debug!(url = %url, "sending provider request");

        let mut request = self.client.post(url);
        for (name, value) in headers {
            request = request.header(name, value);
        }

        let response = request.json(body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(status = %status, "provider request failed");
            return Err(AppError::ExternalApi(format!(
                "provider returned {}: {}",
                status,
                snippet(&error_text)
            )));
        }

        let text = response.text().await?;
        let json: Value = serde_json::from_str(&text).map_err(|e| {
            AppError::ExternalApi(format!(
                "provider returned invalid JSON ({}): {}",
                e,
                snippet(&text)
            ))
        })?;

        debug!("provider request completed successfully");
        Ok(json)
    }
}

/// Truncate a response body for error messages
fn snippet(text: &str) -> &str {
    let end = text
        .char_indices()
        .take(200)
        .last()
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    &text[..end]
}
