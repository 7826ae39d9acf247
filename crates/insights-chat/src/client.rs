//! HTTP client for the external conversational flow API.

use insights_core::error::{InsightsError, Result};
use reqwest::Client as HttpClient;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// Reply shown when the API response lacks the expected message text.
pub const FALLBACK_REPLY: &str = "Sorry, no response.";

// ── ChatConfig ────────────────────────────────────────────────────────────────

/// Connection parameters for the conversational API.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Full endpoint URL of the flow run route.
    pub url: String,
    /// Bearer token; sent as an `Authorization` header when present.
    pub token: Option<String>,
    /// Optional flow tweaks forwarded verbatim in the request body.
    pub tweaks: Option<Value>,
}

impl ChatConfig {
    pub fn new(url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            url: url.into(),
            token,
            tweaks: None,
        }
    }
}

// ── Wire types ────────────────────────────────────────────────────────────────

/// Request body for one flow run.
#[derive(Serialize)]
struct FlowRequest<'a> {
    input_value: &'a str,
    output_type: &'a str,
    input_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    tweaks: Option<&'a Value>,
}

// ── ChatClient ────────────────────────────────────────────────────────────────

/// Thin client around the flow API: one request per user message, no
/// streaming, no retries.
pub struct ChatClient {
    http: HttpClient,
    config: ChatConfig,
}

impl ChatClient {
    pub fn new(config: ChatConfig) -> Self {
        Self {
            http: HttpClient::new(),
            config,
        }
    }

    /// Send one user message and return the assistant reply text.
    ///
    /// Transport failures and non-success HTTP statuses surface as
    /// [`InsightsError::ChatApi`]; a well-formed response that lacks the
    /// expected message path degrades to [`FALLBACK_REPLY`] instead.
    pub async fn send(&self, message: &str) -> Result<String> {
        let request = FlowRequest {
            input_value: message,
            output_type: "chat",
            input_type: "chat",
            tweaks: self.config.tweaks.as_ref(),
        };

        let mut builder = self.http.post(&self.config.url).json(&request);
        if let Some(token) = &self.config.token {
            builder = builder.bearer_auth(token);
        }

        let response: Value = builder
            .send()
            .await
            .map_err(|e| InsightsError::ChatApi(e.to_string()))?
            .error_for_status()
            .map_err(|e| InsightsError::ChatApi(e.to_string()))?
            .json()
            .await
            .map_err(|e| InsightsError::ChatApi(e.to_string()))?;

        debug!("chat reply received ({} bytes of JSON)", response.to_string().len());
        Ok(extract_reply(&response))
    }
}

// ── Reply extraction ──────────────────────────────────────────────────────────

/// Pull the reply text out of the flow response envelope.
///
/// The text lives at `outputs[0].outputs[0].results.message.data.text`; any
/// missing link along that path yields [`FALLBACK_REPLY`].
pub fn extract_reply(response: &Value) -> String {
    response
        .get("outputs")
        .and_then(|v| v.get(0))
        .and_then(|v| v.get("outputs"))
        .and_then(|v| v.get(0))
        .and_then(|v| v.get("results"))
        .and_then(|v| v.get("message"))
        .and_then(|v| v.get("data"))
        .and_then(|v| v.get("text"))
        .and_then(|v| v.as_str())
        .unwrap_or(FALLBACK_REPLY)
        .to_string()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
