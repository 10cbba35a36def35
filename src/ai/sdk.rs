//! Typed client for the generative-AI provider.
//!
//! This is the "client library" access path: a client built once per process
//! with the API key baked into its default headers, typed request and response
//! bodies, and decoding of the provider's structured error envelope. It talks
//! to the same `generateContent` endpoint as the raw HTTP path but reports
//! failures with more detail.

use crate::constants::{API_KEY_HEADER, GENERATE_METHOD};
use crate::errors::{body_or_read_error, AIError};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A single text part of a content block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    /// Text of the part; absent for non-text parts.
    #[serde(default)]
    pub text: Option<String>,
}

/// A content block made of parts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    /// Author role, `user` or `model`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Ordered parts.
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// Creates a user content block holding a single text part.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part {
                text: Some(text.into()),
            }],
        }
    }

    /// Concatenates the text of all parts.
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect::<Vec<_>>()
            .join("")
    }
}

/// Request body for content generation.
#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

/// One candidate completion.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

/// Response from content generation.
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

/// Error envelope returned by the provider on failure.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: u16,
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

/// Typed generative-AI client.
pub struct GenerativeClient {
    base_url: String,
    client: Client,
}

impl GenerativeClient {
    /// Creates a client bound to `api_key`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the provider API
    /// * `api_key` - API key sent with every request
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The key is empty (`AIError::MissingApiKey`)
    /// - The key cannot be sent as a header (`AIError::InvalidApiKey`)
    /// - The underlying HTTP client cannot be built
    pub fn new(base_url: impl Into<String>, api_key: &str) -> Result<Self, AIError> {
        if api_key.trim().is_empty() {
            return Err(AIError::MissingApiKey);
        }

        let mut key_value = HeaderValue::from_str(api_key.trim())
            .map_err(|e| AIError::InvalidApiKey(e.to_string()))?;
        key_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key_value);

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(AIError::from_transport)?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Generates content for a single prompt.
    ///
    /// # Arguments
    ///
    /// * `api_version` - API version segment (e.g., "v1beta")
    /// * `model` - Model identifier (e.g., "gemini-1.5-flash")
    /// * `prompt` - Prompt text
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The provider is not reachable
    /// - The provider answers with an error envelope or non-success status
    /// - The response body cannot be decoded
    ///
    /// An answer without candidates is returned as an empty string; deciding
    /// what emptiness means is left to the caller.
    pub fn generate_content(
        &self,
        api_version: &str,
        model: &str,
        prompt: &str,
    ) -> Result<String, AIError> {
        debug!("Generating content with model {} ({})", model, api_version);

        let url = format!(
            "{}/{}/models/{}:{}",
            self.base_url, api_version, model, GENERATE_METHOD
        );
        let request = GenerateContentRequest {
            contents: vec![Content::user(prompt)],
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .map_err(AIError::from_transport)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = body_or_read_error(response.text().map_err(|e| e.without_url()));

            return Err(match serde_json::from_str::<ErrorEnvelope>(&body) {
                Ok(envelope) => AIError::Api {
                    code: if envelope.error.code == 0 {
                        status
                    } else {
                        envelope.error.code
                    },
                    status: envelope.error.status,
                    message: envelope.error.message,
                },
                Err(_) => AIError::Http { status, body },
            });
        }

        let body: GenerateContentResponse = response.json().map_err(|e| {
            AIError::InvalidResponse(format!(
                "Failed to parse generation response: {}",
                e.without_url()
            ))
        })?;

        let text = body
            .candidates
            .first()
            .map(|candidate| {
                if let Some(reason) = &candidate.finish_reason {
                    debug!("Candidate finish reason: {}", reason);
                }
                candidate
                    .content
                    .as_ref()
                    .map(Content::text)
                    .unwrap_or_default()
            })
            .unwrap_or_default();

        debug!("Received {} characters", text.len());
        Ok(text)
    }
}
