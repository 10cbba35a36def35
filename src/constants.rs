//! Constants used throughout the application.
//!
//! This module contains all constants used in the serene application, organized
//! into logical groups. Having constants centralized makes them easier to find,
//! modify, and reference consistently.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "serene";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str = "AI companion for a wellness journal";

// Logging
/// Log format identifier for plain text.
pub const LOG_FORMAT_TEXT: &str = "text";
/// Log format identifier for JSON.
pub const LOG_FORMAT_JSON: &str = "json";
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// Configuration Keys & Environment Variables
/// Environment variable holding the generative-AI API key.
pub const ENV_VAR_API_KEY: &str = "SERENE_AI_API_KEY";
/// Provider-standard fallback for the API key.
pub const ENV_VAR_GEMINI_API_KEY: &str = "GEMINI_API_KEY";
/// Environment variable overriding the provider base URL.
pub const ENV_VAR_BASE_URL: &str = "SERENE_AI_BASE_URL";
/// Environment variable holding a comma separated list of API versions.
pub const ENV_VAR_API_VERSIONS: &str = "SERENE_AI_API_VERSIONS";
/// Environment variable holding a comma separated list of model ids.
pub const ENV_VAR_MODELS: &str = "SERENE_AI_MODELS";
/// Environment variable for the quota database path.
pub const ENV_VAR_DB_PATH: &str = "SERENE_DB_PATH";
/// Standard environment variable for the user's home directory.
pub const ENV_VAR_HOME: &str = "HOME";
/// Default database location relative to the user's home directory.
pub const DEFAULT_DB_SUBPATH: &str = ".serene/serene.db";

// Generative-AI provider
/// Default base URL of the generative-AI provider.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// API versions, newest first.
pub const DEFAULT_API_VERSIONS: &[&str] = &["v1", "v1beta"];
/// Model ids, most capable first, legacy last.
pub const DEFAULT_MODELS: &[&str] = &["gemini-1.5-flash", "gemini-1.5-pro", "gemini-pro"];
/// Method suffix of the content generation endpoint.
pub const GENERATE_METHOD: &str = "generateContent";
/// Header carrying the API key on the client-library path.
pub const API_KEY_HEADER: &str = "x-goog-api-key";
/// Values shipped in sample env files that must be treated as "not configured".
pub const PLACEHOLDER_API_KEYS: &[&str] = &[
    "your_api_key_here",
    "your_gemini_api_key_here",
    "your-api-key",
    "changeme",
    "placeholder",
];

// Validation
/// Placeholder string for redacted information in debug output.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

// Quota
/// Prefix of persisted daily quota markers.
pub const QUOTA_KEY_PREFIX: &str = "ai_analysis";
/// Date format used in quota keys.
pub const DATE_FORMAT_ISO: &str = "%Y-%m-%d";

// Domain prompts
/// Maximum number of task suggestions returned to the caller.
pub const MAX_TASK_SUGGESTIONS: usize = 5;
/// Mood reported when a structured analysis cannot be parsed.
pub const NEUTRAL_MOOD: &str = "unspecified";
/// Sentiment reported when a structured analysis cannot be parsed.
pub const NEUTRAL_SENTIMENT: &str = "neutral";

// Logging Configuration
/// Service name used in tracing spans and structured logs.
pub const TRACING_SERVICE_NAME: &str = "serene";
