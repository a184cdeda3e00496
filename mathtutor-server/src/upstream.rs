//! Client for the DashScope OpenAI-compatible chat completions endpoint.
//! One POST per chat request, no retries, no streaming; the upstream JSON
//! is passed back verbatim.

use std::time::Duration;

use anyhow::Context;
use mathtutor_shared::ChatMessage;
use serde_json::{json, Value};
use tracing::info;

use crate::config::Config;
use crate::error::ApiError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

pub struct UpstreamClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    temperature: f64,
}

impl UpstreamClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.clone(),
            temperature: config.temperature,
        })
    }

    /// Send the full message list and return the parsed response body.
    /// An unset API key fails before any network traffic.
    pub async fn send(&self, messages: &[ChatMessage]) -> Result<Value, ApiError> {
        if self.api_key.is_empty() {
            return Err(ApiError::Configuration(
                "DashScope api_key is missing".to_string(),
            ));
        }

        let url = format!("{}/compatible-mode/v1/chat/completions", self.base_url);
        let payload = json!({
            "model": self.model,
            "messages": messages,
            "temperature": self.temperature,
        });

        info!("sending {} messages to {} ({})", messages.len(), url, self.model);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;

        if !status.is_success() {
            return Err(ApiError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body)
            .map_err(|err| ApiError::Internal(format!("unparseable upstream response: {err}")))
    }
}

/// Pull the reply text out of a completion response. The shape is not
/// guaranteed, so a missing or non-string field yields an empty reply
/// rather than an error.
pub fn extract_reply(raw: &Value) -> String {
    raw.pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
