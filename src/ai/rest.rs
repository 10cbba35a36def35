//! Raw HTTP access path for content generation.
//!
//! Builds the JSON body by hand, passes the API key as a `key` query parameter
//! and digs the completion text out of the untyped response. Used when the
//! typed client could not be initialized, and as the second half of the
//! cascade when it could.

use crate::constants::GENERATE_METHOD;
use crate::errors::{body_or_read_error, AIError};
use reqwest::blocking::Client;
use serde_json::{json, Value};
use tracing::debug;

/// Client for direct HTTP calls to the generate endpoint.
pub struct RestClient {
    base_url: String,
    api_key: Option<String>,
    client: Client,
}

impl RestClient {
    /// Creates a new HTTP client.
    ///
    /// A missing key is accepted here; every call then fails with
    /// `AIError::MissingApiKey` without touching the network.
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            client: Client::new(),
        }
    }

    /// Builds the endpoint URL for a version/model pair, without the key.
    pub fn endpoint(&self, api_version: &str, model: &str) -> String {
        format!(
            "{}/{}/models/{}:{}",
            self.base_url, api_version, model, GENERATE_METHOD
        )
    }

    /// Sends a generation request.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No API key is configured
    /// - The provider is not reachable
    /// - The provider answers with a non-success status
    /// - The body is not JSON
    pub fn generate(
        &self,
        api_version: &str,
        model: &str,
        prompt: &str,
    ) -> Result<String, AIError> {
        let api_key = self.api_key.as_deref().ok_or(AIError::MissingApiKey)?;

        debug!(
            "Sending HTTP generation request with model {} ({})",
            model, api_version
        );

        let body = json!({
            "contents": [
                { "parts": [ { "text": prompt } ] }
            ]
        });

        let response = self
            .client
            .post(self.endpoint(api_version, model))
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .map_err(AIError::from_transport)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = body_or_read_error(response.text().map_err(|e| e.without_url()));
            return Err(AIError::Http { status, body });
        }

        let value: Value = response.json().map_err(|e| {
            AIError::InvalidResponse(format!(
                "Failed to parse generation response: {}",
                e.without_url()
            ))
        })?;

        Ok(extract_text(&value))
    }
}

/// Extracts the completion text from `candidates[0].content.parts[*].text`.
///
/// Missing pieces yield an empty string.
pub fn extract_text(value: &Value) -> String {
    value
        .pointer("/candidates/0/content/parts")
        .and_then(Value::as_array)
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part.get("text").and_then(Value::as_str))
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default()
}
