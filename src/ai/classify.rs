//! Failure classification for generative-AI requests.
//!
//! Every failure coming out of either access path is reduced to one
//! [`ErrorKind`]. Classification is a pure text match over the error message and
//! its `source()` chain; rules are checked in a fixed order and the first match
//! wins.

use serde::Serialize;
use std::error::Error;
use std::fmt;

/// The closed set of failure categories visible to callers of the AI client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Missing, placeholder or rejected API key, or otherwise unusable configuration.
    InvalidConfiguration,
    /// Provider quota or rate limit hit.
    QuotaExceeded,
    /// The provider could not be reached.
    NetworkError,
    /// The provider did not answer in time.
    Timeout,
    /// The provider answered successfully but with no text.
    EmptyResponse,
    /// Anything else.
    Unclassified,
}

impl ErrorKind {
    /// All kinds, in declaration order.
    pub const ALL: [ErrorKind; 6] = [
        ErrorKind::InvalidConfiguration,
        ErrorKind::QuotaExceeded,
        ErrorKind::NetworkError,
        ErrorKind::Timeout,
        ErrorKind::EmptyResponse,
        ErrorKind::Unclassified,
    ];

    /// The fixed message shown to the user for this kind.
    ///
    /// Deliberately independent of which strategy failed or what the provider said.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidConfiguration => {
                "AI features are not set up correctly. Please check the API key configuration."
            }
            Self::QuotaExceeded => {
                "The AI service is busy or its usage limit was reached. Please try again later."
            }
            Self::NetworkError => {
                "Could not reach the AI service. Please check your internet connection."
            }
            Self::Timeout => "The AI service took too long to respond. Please try again.",
            Self::EmptyResponse => "The AI service returned an empty answer. Please try again.",
            Self::Unclassified => "Something went wrong while contacting the AI service.",
        }
    }

    /// Short machine-friendly name, used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidConfiguration => "invalid_configuration",
            Self::QuotaExceeded => "quota_exceeded",
            Self::NetworkError => "network_error",
            Self::Timeout => "timeout",
            Self::EmptyResponse => "empty_response",
            Self::Unclassified => "unclassified",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const CONFIGURATION_PATTERNS: &[&str] = &[
    "api key",
    "api_key",
    "apikey",
    "not configured",
    "invalid configuration",
    "permission_denied",
];

const QUOTA_PATTERNS: &[&str] = &[
    "quota",
    "429",
    "rate limit",
    "rate_limit",
    "resource_exhausted",
    "resource has been exhausted",
    "too many requests",
];

const NETWORK_PATTERNS: &[&str] = &[
    "network",
    "fetch",
    "connection",
    "dns",
    "unreachable",
];

const TIMEOUT_PATTERNS: &[&str] = &["timeout", "timed out", "deadline"];

/// Classifies a failure into an [`ErrorKind`].
///
/// `message` is the top-level error text; `raw` optionally supplies the error
/// itself so that nested causes are matched too. Matching is case-insensitive.
/// Never returns [`ErrorKind::EmptyResponse`]; that kind is assigned by the
/// cascade when a call succeeds without text.
///
/// # Examples
///
/// ```
/// use serene::ai::{classify, ErrorKind};
///
/// assert_eq!(classify("HTTP 429: Too Many Requests", None), ErrorKind::QuotaExceeded);
/// assert_eq!(
///     classify("API key not valid; quota project missing", None),
///     ErrorKind::InvalidConfiguration
/// );
/// ```
pub fn classify(message: &str, raw: Option<&(dyn Error + 'static)>) -> ErrorKind {
    let haystack = collect_text(message, raw).to_lowercase();

    if contains_any(&haystack, CONFIGURATION_PATTERNS) {
        ErrorKind::InvalidConfiguration
    } else if contains_any(&haystack, QUOTA_PATTERNS) {
        ErrorKind::QuotaExceeded
    } else if contains_any(&haystack, NETWORK_PATTERNS) {
        ErrorKind::NetworkError
    } else if contains_any(&haystack, TIMEOUT_PATTERNS) {
        ErrorKind::Timeout
    } else {
        ErrorKind::Unclassified
    }
}

/// Classifies an error value using its own display text and cause chain.
pub fn classify_error(error: &(dyn Error + 'static)) -> ErrorKind {
    classify(&error.to_string(), Some(error))
}

fn collect_text(message: &str, raw: Option<&(dyn Error + 'static)>) -> String {
    let mut text = message.to_string();
    let mut current = raw;
    while let Some(error) = current {
        text.push('\n');
        text.push_str(&error.to_string());
        current = error.source();
    }
    text
}

fn contains_any(haystack: &str, patterns: &[&str]) -> bool {
    patterns.iter().any(|p| haystack.contains(p))
}
