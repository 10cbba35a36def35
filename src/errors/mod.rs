//! Error handling utilities for the serene application.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions that might occur in the application, as well as the
//! convenience type alias `AppResult` for functions that can return these errors.
//!
//! Failures of the generative-AI provider are modelled by `AIError`. They never
//! cross the `AIRequestClient` boundary as-is: the cascade classifies them into an
//! [`ErrorKind`](crate::ai::ErrorKind) and callers only ever see a
//! [`GenerationFailure`](crate::ai::GenerationFailure).

use crate::ai::GenerationFailure;
use thiserror::Error;

/// Represents specific error cases that can occur while talking to the
/// generative-AI provider, on either access path.
///
/// The `Display` text of each variant is what the error classifier matches
/// against, so wording here is load-bearing: a missing key must mention the
/// API key, a throttled request must carry its HTTP status, and so on.
///
/// # Examples
///
/// ```
/// use serene::errors::AIError;
///
/// let error = AIError::Http {
///     status: 429,
///     body: "Resource has been exhausted".to_string(),
/// };
/// assert!(format!("{}", error).contains("429"));
/// ```
#[derive(Debug, Error)]
pub enum AIError {
    /// No usable API key was configured.
    #[error("API key is not configured. Set SERENE_AI_API_KEY to a valid key")]
    MissingApiKey,

    /// The configured API key could not be used to build a client.
    #[error("API key is malformed: {0}")]
    InvalidApiKey(String),

    /// The request could not be built, e.g. the configured base URL is malformed.
    #[error("Invalid configuration for the AI provider endpoint: {0}")]
    InvalidEndpoint(#[source] reqwest::Error),

    /// The request never produced an HTTP response (DNS, refused connection, TLS...).
    #[error("Network connection to the AI provider failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The transport gave up waiting for the provider.
    #[error("Request to the AI provider timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    /// The provider answered with a non-success status on the raw HTTP path.
    #[error("HTTP {status}: {body}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// The provider answered with a structured error envelope on the library path.
    #[error("Provider error {code} ({status}): {message}")]
    Api {
        /// Numeric error code reported by the provider
        code: u16,
        /// Symbolic status, e.g. `RESOURCE_EXHAUSTED`
        status: String,
        /// Human readable message from the provider
        message: String,
    },

    /// The response body did not have the expected shape.
    #[error("Invalid response from AI provider: {0}")]
    InvalidResponse(String),

    /// The typed client library was not initialized for this process.
    #[error("Client library is not initialized")]
    ClientUnavailable,
}

impl AIError {
    /// Maps a `reqwest` failure onto the transport variants.
    ///
    /// Timeouts are kept apart from other transport failures so they classify as
    /// timeouts rather than generic network errors.
    pub fn from_transport(error: reqwest::Error) -> Self {
        // The raw HTTP path carries the key in the query string.
        let error = error.without_url();
        if error.is_builder() {
            AIError::InvalidEndpoint(error)
        } else if error.is_timeout() {
            AIError::Timeout(error)
        } else {
            AIError::Transport(error)
        }
    }
}

/// Returns a response body, or a description of why it could not be read.
///
/// The description keeps the read error text available for classification.
pub(crate) fn body_or_read_error<E: std::fmt::Display>(body: Result<String, E>) -> String {
    body.unwrap_or_else(|e| format!("failed to read response body: {}", e))
}

/// Represents specific error cases that can occur during database operations.
///
/// # Examples
///
/// ```
/// use serene::errors::DatabaseError;
///
/// let error = DatabaseError::Custom("kv table missing".to_string());
/// assert!(format!("{}", error).contains("kv table missing"));
/// ```
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// SQLite database error.
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Connection pool error.
    #[error("Failed to get connection from pool: {0}\n\nThis may indicate database connection issues. Try closing other serene instances.")]
    Pool(#[from] r2d2::Error),

    /// Custom database error with detailed message.
    #[error("Database error: {0}")]
    Custom(String),
}

/// Represents all possible errors that can occur in the serene application.
///
/// Note: This type does not implement `Clone` to avoid losing error context when
/// cloning `std::io::Error` values.
///
/// # Examples
///
/// Creating a configuration error:
/// ```
/// use serene::errors::AppError;
///
/// let error = AppError::Config("Database path is empty".to_string());
/// assert_eq!(format!("{}", error), "Configuration error: Database path is empty");
/// ```
///
/// Converting from an IO error:
/// ```
/// use serene::errors::AppError;
/// use std::io::{self, ErrorKind};
///
/// let io_error = io::Error::new(ErrorKind::NotFound, "file not found");
/// let app_error: AppError = io_error.into();
///
/// match app_error {
///     AppError::Io(inner) => assert_eq!(inner.kind(), ErrorKind::NotFound),
///     _ => panic!("Expected Io variant"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors from filesystem operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors related to the quota database.
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Errors raised by a provider access path before classification.
    #[error("AI error: {0}")]
    AI(#[from] AIError),

    /// A classified, user-facing generation failure.
    #[error("Generation failed: {0}")]
    Generation(#[from] GenerationFailure),
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
///
/// # Examples
///
/// ```
/// use serene::errors::{AppResult, AppError};
///
/// fn might_fail() -> AppResult<String> {
///     if false {
///         return Err(AppError::Config("Something went wrong".to_string()));
///     }
///     Ok("Operation succeeded".to_string())
/// }
/// ```
pub type AppResult<T> = Result<T, AppError>;
