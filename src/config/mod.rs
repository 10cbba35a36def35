//! Configuration management for the serene application.
//!
//! This module handles loading and validating configuration settings from environment
//! variables, with sensible defaults. It supplies the generative-AI API key, the
//! provider endpoint, the ordered API version and model lists walked by the strategy
//! cascade, and the location of the quota database.
//!
//! # Environment Variables
//!
//! - `SERENE_AI_API_KEY`: API key for the generative-AI provider (fallback `GEMINI_API_KEY`)
//! - `SERENE_AI_BASE_URL`: Provider base URL
//! - `SERENE_AI_API_VERSIONS`: Comma separated API versions, newest first
//! - `SERENE_AI_MODELS`: Comma separated model ids, most capable first
//! - `SERENE_DB_PATH`: Path to the quota database (defaults to ~/.serene/serene.db)
//! - `HOME`: Used for expanding the default database path

use crate::constants::{
    DEFAULT_API_VERSIONS, DEFAULT_BASE_URL, DEFAULT_DB_SUBPATH, DEFAULT_MODELS, ENV_VAR_API_KEY,
    ENV_VAR_API_VERSIONS, ENV_VAR_BASE_URL, ENV_VAR_DB_PATH, ENV_VAR_GEMINI_API_KEY, ENV_VAR_HOME,
    ENV_VAR_MODELS, PLACEHOLDER_API_KEYS, REDACTED_PLACEHOLDER,
};
use crate::errors::{AppError, AppResult};
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Configuration for the serene application.
///
/// # Examples
///
/// Loading configuration from environment variables:
/// ```no_run
/// use serene::Config;
///
/// let config = Config::load().expect("Failed to load configuration");
/// if config.api_key().is_none() {
///     eprintln!("AI features are disabled");
/// }
/// ```
#[derive(Clone)]
pub struct Config {
    /// API key for the generative-AI provider, if one was configured.
    ///
    /// Placeholder values are dropped at load time, so `Some` always holds a
    /// key that is at least plausible.
    pub api_key: Option<String>,

    /// Base URL of the provider, without a trailing slash.
    pub base_url: String,

    /// API versions to try, newest first.
    pub api_versions: Vec<String>,

    /// Model ids to try, most capable first.
    pub models: Vec<String>,

    /// Location of the SQLite database holding daily quota markers.
    pub db_path: PathBuf,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field(
                "api_key",
                &self.api_key.as_ref().map(|_| REDACTED_PLACEHOLDER),
            )
            .field("base_url", &self.base_url)
            .field("api_versions", &self.api_versions)
            .field("models", &self.models)
            .field("db_path", &"[REDACTED_PATH]")
            .finish()
    }
}

impl Default for Config {
    /// Creates a new Config with default provider settings and no API key.
    fn default() -> Self {
        Config {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_versions: DEFAULT_API_VERSIONS.iter().map(|v| v.to_string()).collect(),
            models: DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
            db_path: PathBuf::from(""),
        }
    }
}

impl Config {
    /// Returns the configured API key, if any.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Returns true if the given key is empty or one of the well-known placeholders.
    ///
    /// Sample env files ship with values such as `your_api_key_here`; those must be
    /// treated exactly like an absent key.
    ///
    /// # Examples
    ///
    /// ```
    /// use serene::Config;
    ///
    /// assert!(Config::is_placeholder_key(""));
    /// assert!(Config::is_placeholder_key("YOUR_API_KEY_HERE"));
    /// assert!(!Config::is_placeholder_key("AIzaSyExample"));
    /// ```
    pub fn is_placeholder_key(key: &str) -> bool {
        let trimmed = key.trim();
        if trimmed.is_empty() {
            return true;
        }
        let lower = trimmed.to_lowercase();
        PLACEHOLDER_API_KEYS.contains(&lower.as_str())
            || lower.starts_with("your_")
            || lower.starts_with("your-")
    }

    /// Splits a comma separated list, dropping blank items and preserving order.
    fn parse_list(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Loads configuration from environment variables with sensible defaults.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if:
    /// - The database path expansion fails
    /// - A version or model list is set but contains no usable items
    pub fn load() -> AppResult<Self> {
        let api_key = env::var(ENV_VAR_API_KEY)
            .or_else(|_| env::var(ENV_VAR_GEMINI_API_KEY))
            .ok()
            .filter(|key| !Config::is_placeholder_key(key))
            .map(|key| key.trim().to_string());

        let base_url = env::var(ENV_VAR_BASE_URL)
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let api_versions = match env::var(ENV_VAR_API_VERSIONS) {
            Ok(raw) => Config::parse_list(&raw),
            Err(_) => DEFAULT_API_VERSIONS.iter().map(|v| v.to_string()).collect(),
        };

        let models = match env::var(ENV_VAR_MODELS) {
            Ok(raw) => Config::parse_list(&raw),
            Err(_) => DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
        };

        let db_path_str = env::var(ENV_VAR_DB_PATH).unwrap_or_else(|_| {
            let home = env::var(ENV_VAR_HOME).unwrap_or_else(|_| "".to_string());
            format!("{}/{}", home, DEFAULT_DB_SUBPATH)
        });

        // Expand the path (handles ~ and environment variables)
        let expanded_path = shellexpand::full(&db_path_str)
            .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;

        let config = Config {
            api_key,
            base_url,
            api_versions,
            models,
            db_path: PathBuf::from(expanded_path.into_owned()),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validates that the configuration is usable.
    ///
    /// A missing API key is not a validation error: the client degrades to
    /// reporting `InvalidConfiguration` on every request instead.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` with one of the following messages:
    /// - "Base URL is empty"
    /// - "At least one API version is required"
    /// - "At least one model is required"
    /// - "Database path is empty"
    pub fn validate(&self) -> AppResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(AppError::Config("Base URL is empty".to_string()));
        }

        if self.api_versions.is_empty() {
            return Err(AppError::Config(
                "At least one API version is required".to_string(),
            ));
        }

        if self.models.is_empty() {
            return Err(AppError::Config("At least one model is required".to_string()));
        }

        if self.db_path.as_os_str().is_empty() {
            return Err(AppError::Config("Database path is empty".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const ALL_VARS: &[&str] = &[
        ENV_VAR_API_KEY,
        ENV_VAR_GEMINI_API_KEY,
        ENV_VAR_BASE_URL,
        ENV_VAR_API_VERSIONS,
        ENV_VAR_MODELS,
        ENV_VAR_DB_PATH,
    ];

    /// Clears the relevant variables and returns their previous values.
    fn setup() -> Vec<(&'static str, Option<String>)> {
        ALL_VARS
            .iter()
            .map(|name| {
                let previous = env::var(name).ok();
                env::remove_var(name);
                (*name, previous)
            })
            .collect()
    }

    fn restore(saved: Vec<(&'static str, Option<String>)>) {
        for (name, value) in saved {
            match value {
                Some(v) => env::set_var(name, v),
                None => env::remove_var(name),
            }
        }
    }

    #[test]
    fn test_debug_impl_redacts_sensitive_info() {
        let config = Config {
            api_key: Some("AIzaSecretValue".to_string()),
            db_path: PathBuf::from("/home/username/private/serene.db"),
            ..Config::default()
        };

        let debug_output = format!("{:?}", config);

        assert!(debug_output.contains(REDACTED_PLACEHOLDER));
        assert!(debug_output.contains("[REDACTED_PATH]"));
        assert!(!debug_output.contains("AIzaSecretValue"));
        assert!(!debug_output.contains("/home/username/private"));
    }

    #[test]
    fn test_default_provider_settings() {
        let config = Config::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api_versions, vec!["v1", "v1beta"]);
        assert_eq!(config.models[0], "gemini-1.5-flash");
        assert!(config.api_key().is_none());
    }

    #[test]
    fn test_placeholder_keys() {
        assert!(Config::is_placeholder_key(""));
        assert!(Config::is_placeholder_key("   "));
        assert!(Config::is_placeholder_key("your_api_key_here"));
        assert!(Config::is_placeholder_key("YOUR_GEMINI_API_KEY_HERE"));
        assert!(Config::is_placeholder_key("your_key"));
        assert!(Config::is_placeholder_key("changeme"));
        assert!(!Config::is_placeholder_key("AIzaSyD-real-looking-key"));
    }

    #[test]
    fn test_parse_list_preserves_order_and_drops_blanks() {
        assert_eq!(
            Config::parse_list(" v1beta , ,v1,"),
            vec!["v1beta".to_string(), "v1".to_string()]
        );
        assert!(Config::parse_list(" , ").is_empty());
    }

    #[test]
    #[serial]
    fn test_load_with_defaults() {
        let saved = setup();
        env::set_var(ENV_VAR_DB_PATH, "/tmp/serene-test.db");

        let config = Config::load().unwrap();

        restore(saved);

        assert!(config.api_key.is_none());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.db_path, PathBuf::from("/tmp/serene-test.db"));
    }

    #[test]
    #[serial]
    fn test_load_drops_placeholder_key() {
        let saved = setup();
        env::set_var(ENV_VAR_DB_PATH, "/tmp/serene-test.db");
        env::set_var(ENV_VAR_API_KEY, "your_api_key_here");

        let config = Config::load().unwrap();

        restore(saved);

        assert!(config.api_key.is_none());
    }

    #[test]
    #[serial]
    fn test_load_key_precedence() {
        let saved = setup();
        env::set_var(ENV_VAR_DB_PATH, "/tmp/serene-test.db");
        env::set_var(ENV_VAR_GEMINI_API_KEY, "fallback-key");

        let fallback = Config::load().unwrap();

        env::set_var(ENV_VAR_API_KEY, "primary-key");
        let primary = Config::load().unwrap();

        restore(saved);

        assert_eq!(fallback.api_key(), Some("fallback-key"));
        assert_eq!(primary.api_key(), Some("primary-key"));
    }

    #[test]
    #[serial]
    fn test_load_custom_lists_and_base_url() {
        let saved = setup();
        env::set_var(ENV_VAR_DB_PATH, "/tmp/serene-test.db");
        env::set_var(ENV_VAR_BASE_URL, "http://127.0.0.1:9000/");
        env::set_var(ENV_VAR_API_VERSIONS, "v2,v1");
        env::set_var(ENV_VAR_MODELS, "model-a");

        let config = Config::load().unwrap();

        restore(saved);

        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.api_versions, vec!["v2", "v1"]);
        assert_eq!(config.models, vec!["model-a"]);
    }

    #[test]
    #[serial]
    fn test_load_rejects_empty_model_list() {
        let saved = setup();
        env::set_var(ENV_VAR_DB_PATH, "/tmp/serene-test.db");
        env::set_var(ENV_VAR_MODELS, " , ");

        let result = Config::load();

        restore(saved);

        match result {
            Err(AppError::Config(msg)) => assert!(msg.contains("At least one model")),
            _ => panic!("Expected Config error about models"),
        }
    }

    #[test]
    fn test_validate_empty_db_path() {
        let config = Config::default();
        match config.validate() {
            Err(AppError::Config(msg)) => assert!(msg.contains("Database path is empty")),
            _ => panic!("Expected Config error about database path"),
        }
    }

    #[test]
    fn test_validate_empty_versions() {
        let config = Config {
            api_versions: Vec::new(),
            db_path: PathBuf::from("/tmp/x.db"),
            ..Config::default()
        };
        match config.validate() {
            Err(AppError::Config(msg)) => assert!(msg.contains("API version")),
            _ => panic!("Expected Config error about versions"),
        }
    }
}
