//! Resilient generative-AI request client.
//!
//! [`AIRequestClient`] is the only entry point callers need. It owns the
//! ordered strategy plan and a [`Transport`], runs the cascade for every
//! request, and reduces any failure to a [`GenerationFailure`] carrying one
//! fixed user-facing message per [`ErrorKind`].
//!
//! Two of the derived operations return raw text and surface failures
//! (`analyze_diary_entry`, `generate_motivation_message`); the other two feed
//! UI that must never be blocked and degrade to safe defaults instead
//! (`suggest_tasks`, `analyze_mood`).

use super::classify::ErrorKind;
use super::prompts::{
    diary_analysis_prompt, mood_analysis_prompt, motivation_prompt, parse_mood_analysis,
    parse_task_suggestions, task_suggestions_prompt, MoodAnalysis,
};
use super::rest::RestClient;
use super::sdk::GenerativeClient;
use super::strategy::{self, plan_strategies, AccessPath, AttemptResult, Strategy, Transport};
use crate::config::Config;
use crate::errors::AIError;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// A classified failure as seen by callers of the client.
///
/// Carries no provider details; `message` is fixed per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct GenerationFailure {
    /// Failure category.
    pub kind: ErrorKind,
    /// User-facing message for `kind`.
    pub message: &'static str,
}

impl GenerationFailure {
    /// Creates the failure for `kind` with its fixed message.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: kind.user_message(),
        }
    }
}

/// Production transport dispatching each strategy to its access path.
pub struct ProviderTransport {
    sdk: Option<GenerativeClient>,
    rest: RestClient,
}

impl ProviderTransport {
    /// Builds both access paths from configuration.
    ///
    /// The typed client is optional: without a usable key, or if it fails to
    /// initialize, it is left out and only the HTTP path remains.
    pub fn from_config(config: &Config) -> Self {
        let sdk = match config.api_key() {
            Some(key) => match GenerativeClient::new(config.base_url.as_str(), key) {
                Ok(client) => Some(client),
                Err(e) => {
                    warn!("Client library unavailable, using HTTP path only: {}", e);
                    None
                }
            },
            None => {
                debug!("No API key configured; client library not initialized");
                None
            }
        };

        let rest = RestClient::new(config.base_url.as_str(), config.api_key.clone());

        Self { sdk, rest }
    }

    /// Returns true if the typed client library was initialized.
    pub fn has_sdk(&self) -> bool {
        self.sdk.is_some()
    }
}

impl Transport for ProviderTransport {
    fn complete(&self, strategy: &Strategy, prompt: &str) -> Result<String, AIError> {
        match strategy.access_path {
            AccessPath::Sdk => self
                .sdk
                .as_ref()
                .ok_or(AIError::ClientUnavailable)?
                .generate_content(&strategy.api_version, &strategy.model_id, prompt),
            AccessPath::Rest => {
                self.rest
                    .generate(&strategy.api_version, &strategy.model_id, prompt)
            }
        }
    }
}

/// Facade over the strategy cascade.
///
/// # Example
///
/// ```no_run
/// use serene::ai::AIRequestClient;
/// use serene::Config;
///
/// let config = Config::load()?;
/// let client = AIRequestClient::from_config(&config);
/// match client.analyze_diary_entry("Long day, but I finished the project.", Some("tired")) {
///     Ok(reflection) => println!("{}", reflection),
///     Err(failure) => eprintln!("{}", failure),
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct AIRequestClient {
    transport: Box<dyn Transport>,
    strategies: Vec<Strategy>,
    available: bool,
}

impl AIRequestClient {
    /// Creates a client talking to the configured provider.
    ///
    /// The plan includes library strategies only if the library client
    /// initialized.
    pub fn from_config(config: &Config) -> Self {
        let transport = ProviderTransport::from_config(config);
        let available = transport.has_sdk();

        let paths: &[AccessPath] = if available {
            &AccessPath::PREFERENCE
        } else {
            &[AccessPath::Rest]
        };
        let strategies = plan_strategies(paths, &config.api_versions, &config.models);

        info!(
            strategies = strategies.len(),
            available, "AI request client initialized"
        );

        Self {
            transport: Box::new(transport),
            strategies,
            available,
        }
    }

    /// Creates a client with an explicit transport and plan.
    pub fn with_transport(
        transport: Box<dyn Transport>,
        strategies: Vec<Strategy>,
        available: bool,
    ) -> Self {
        Self {
            transport,
            strategies,
            available,
        }
    }

    /// True iff a non-placeholder key was loaded and the client library initialized.
    pub fn is_available(&self) -> bool {
        self.available
    }

    /// The ordered strategies attempted for every request.
    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }

    /// Generates a completion for `prompt`.
    ///
    /// # Errors
    ///
    /// Returns a `GenerationFailure` if:
    /// - The prompt is empty (`InvalidConfiguration`, no request is sent)
    /// - Every strategy failed; the kind is that of the last attempt
    #[instrument(skip(self, prompt), fields(request_id = %Uuid::new_v4()))]
    pub fn generate(&self, prompt: &str) -> Result<String, GenerationFailure> {
        if prompt.trim().is_empty() {
            warn!("Rejected empty prompt");
            return Err(GenerationFailure::new(ErrorKind::InvalidConfiguration));
        }

        match strategy::run(self.transport.as_ref(), prompt, &self.strategies) {
            AttemptResult::Success { text, .. } => Ok(text),
            AttemptResult::Failure {
                kind, raw_message, ..
            } => {
                debug!("Last provider error: {}", raw_message);
                Err(GenerationFailure::new(kind))
            }
        }
    }

    /// Produces a short supportive reflection on a diary entry.
    ///
    /// # Errors
    ///
    /// Same contract as [`generate`](Self::generate).
    pub fn analyze_diary_entry(
        &self,
        entry: &str,
        mood: Option<&str>,
    ) -> Result<String, GenerationFailure> {
        if entry.trim().is_empty() {
            return Err(GenerationFailure::new(ErrorKind::InvalidConfiguration));
        }
        self.generate(&diary_analysis_prompt(entry, mood))
    }

    /// Produces a short motivation message.
    ///
    /// # Errors
    ///
    /// Same contract as [`generate`](Self::generate).
    pub fn generate_motivation_message(
        &self,
        mood: Option<&str>,
        goals: &[String],
    ) -> Result<String, GenerationFailure> {
        self.generate(&motivation_prompt(mood, goals))
    }

    /// Suggests up to five small tasks; never fails.
    pub fn suggest_tasks(&self, mood: Option<&str>, goals: &[String]) -> Vec<String> {
        match self.generate(&task_suggestions_prompt(mood, goals)) {
            Ok(text) => parse_task_suggestions(&text),
            Err(failure) => {
                warn!(kind = %failure.kind, "Task suggestions unavailable");
                Vec::new()
            }
        }
    }

    /// Analyzes the mood of a diary entry; falls back to a neutral result.
    pub fn analyze_mood(&self, entry: &str) -> MoodAnalysis {
        if entry.trim().is_empty() {
            return MoodAnalysis::neutral();
        }
        match self.generate(&mood_analysis_prompt(entry)) {
            Ok(text) => parse_mood_analysis(&text).unwrap_or_else(|| {
                warn!("Mood analysis response was not valid JSON; using neutral default");
                MoodAnalysis::neutral()
            }),
            Err(failure) => {
                warn!(kind = %failure.kind, "Mood analysis unavailable");
                MoodAnalysis::neutral()
            }
        }
    }
}

static SHARED: OnceLock<AIRequestClient> = OnceLock::new();

/// Returns the process-wide client, creating it from `config` on first use.
///
/// Later calls ignore `config`. The client lives for the rest of the process.
pub fn shared(config: &Config) -> &'static AIRequestClient {
    SHARED.get_or_init(|| AIRequestClient::from_config(config))
}
