//! Strategy cascade for content generation.
//!
//! A strategy is one concrete (access path, API version, model id) combination.
//! The plan enumerates them in a fixed preference order and [`run`] walks the
//! plan sequentially until one strategy yields non-empty text.

use super::classify::{classify_error, ErrorKind};
use crate::errors::AIError;
use serde::Serialize;
use std::fmt;
use std::time::Instant;
use tracing::{debug, info, warn};

/// How a strategy reaches the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessPath {
    /// Typed client library; surfaces structured provider errors.
    Sdk,
    /// Raw HTTP call against the generate endpoint.
    Rest,
}

impl AccessPath {
    /// Preference order: the library path as a whole before the raw HTTP path.
    pub const PREFERENCE: [AccessPath; 2] = [AccessPath::Sdk, AccessPath::Rest];

    /// Returns the display name for this path.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Sdk => "sdk",
            Self::Rest => "rest",
        }
    }
}

impl fmt::Display for AccessPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One concrete combination attempted by the cascade.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Strategy {
    /// Access path used for the call.
    pub access_path: AccessPath,
    /// API version segment, e.g. `v1beta`.
    pub api_version: String,
    /// Model identifier, e.g. `gemini-1.5-flash`.
    pub model_id: String,
}

impl Strategy {
    /// Creates a strategy descriptor.
    pub fn new(
        access_path: AccessPath,
        api_version: impl Into<String>,
        model_id: impl Into<String>,
    ) -> Self {
        Self {
            access_path,
            api_version: api_version.into(),
            model_id: model_id.into(),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.access_path, self.api_version, self.model_id)
    }
}

/// Builds the ordered list of strategies for a request.
///
/// Produces the Cartesian product `paths × versions × models`, iterating the
/// path list outermost and the model list innermost, so declared order is kept
/// at every level.
///
/// # Examples
///
/// ```
/// use serene::ai::{plan_strategies, AccessPath};
///
/// let plan = plan_strategies(
///     &AccessPath::PREFERENCE,
///     &["v1".to_string()],
///     &["fast".to_string(), "legacy".to_string()],
/// );
/// let names: Vec<String> = plan.iter().map(|s| s.to_string()).collect();
/// assert_eq!(names, ["sdk/v1/fast", "sdk/v1/legacy", "rest/v1/fast", "rest/v1/legacy"]);
/// ```
pub fn plan_strategies(
    paths: &[AccessPath],
    api_versions: &[String],
    models: &[String],
) -> Vec<Strategy> {
    let mut plan = Vec::with_capacity(paths.len() * api_versions.len() * models.len());
    for &path in paths {
        for version in api_versions {
            for model in models {
                plan.push(Strategy::new(path, version.as_str(), model.as_str()));
            }
        }
    }
    plan
}

/// Performs the actual provider call for a strategy.
///
/// Implementations return the raw completion text; emptiness is judged by the
/// cascade, not by the transport.
pub trait Transport: Send + Sync {
    /// Sends `prompt` using the access path, version and model of `strategy`.
    fn complete(&self, strategy: &Strategy, prompt: &str) -> Result<String, AIError>;
}

/// Outcome of a cascade run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptResult {
    /// A strategy produced non-empty text.
    Success {
        /// The completion text, never blank.
        text: String,
        /// The strategy that produced it.
        strategy: Strategy,
    },
    /// Every strategy failed; carries the classification of the last attempt.
    Failure {
        /// Classified kind of the last failure.
        kind: ErrorKind,
        /// Provider-level message of the last failure, for logs only.
        raw_message: String,
        /// The last attempted strategy, `None` when nothing was attempted.
        strategy: Option<Strategy>,
    },
}

impl AttemptResult {
    /// Returns true if the cascade succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, AttemptResult::Success { .. })
    }
}

/// Walks `strategies` in order and returns the first non-empty completion.
///
/// Each strategy is attempted exactly once. A failed or empty attempt moves on
/// to the next strategy; when the list is exhausted the last classified failure
/// is returned.
pub fn run(transport: &dyn Transport, prompt: &str, strategies: &[Strategy]) -> AttemptResult {
    if strategies.is_empty() {
        warn!("No generation strategies configured");
        return AttemptResult::Failure {
            kind: ErrorKind::InvalidConfiguration,
            raw_message: "no generation strategies configured".to_string(),
            strategy: None,
        };
    }

    let start = Instant::now();
    let mut last_failure = None;

    for (index, strategy) in strategies.iter().enumerate() {
        debug!(
            strategy = %strategy,
            attempt = index + 1,
            of = strategies.len(),
            "Trying generation strategy"
        );

        match transport.complete(strategy, prompt) {
            Ok(text) if !text.trim().is_empty() => {
                info!(
                    strategy = %strategy,
                    attempts = index + 1,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Generation succeeded"
                );
                return AttemptResult::Success {
                    text,
                    strategy: strategy.clone(),
                };
            }
            Ok(_) => {
                warn!(strategy = %strategy, "Provider returned an empty completion");
                last_failure = Some((
                    ErrorKind::EmptyResponse,
                    "provider returned an empty completion".to_string(),
                    strategy,
                ));
            }
            Err(error) => {
                let kind = classify_error(&error);
                warn!(strategy = %strategy, kind = %kind, error = %error, "Generation strategy failed");
                last_failure = Some((kind, error.to_string(), strategy));
            }
        }
    }

    let (kind, raw_message, strategy) = match last_failure {
        Some((kind, raw_message, strategy)) => (kind, raw_message, Some(strategy.clone())),
        None => (
            ErrorKind::Unclassified,
            "cascade ended without an attempt".to_string(),
            None,
        ),
    };

    warn!(
        kind = %kind,
        attempts = strategies.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "All generation strategies failed"
    );

    AttemptResult::Failure {
        kind,
        raw_message,
        strategy,
    }
}
