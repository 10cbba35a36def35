//! Generative-AI integration for the wellness journal.
//!
//! This module obtains text completions from a remote generative-AI provider
//! that can be reached through two access paths (a typed client library and a
//! raw HTTP endpoint), each across several API versions and models. Requests
//! walk an ordered cascade of those combinations and stop at the first
//! non-empty answer; failures are reduced to a small, stable taxonomy.
//!
//! # Module Structure
//!
//! - `classify`: Failure classification into `ErrorKind`
//! - `strategy`: Strategy plan and the cascade executor
//! - `sdk`: Typed client library access path
//! - `rest`: Raw HTTP access path
//! - `client`: The `AIRequestClient` facade and derived operations
//! - `prompts`: Prompt templates and response parsers
//!
//! # Example
//!
//! ```no_run
//! use serene::ai::AIRequestClient;
//! use serene::Config;
//!
//! let config = Config::load()?;
//! let client = AIRequestClient::from_config(&config);
//! let tasks = client.suggest_tasks(Some("anxious"), &["Sleep better".to_string()]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod classify;
pub mod client;
pub mod prompts;
pub mod rest;
pub mod sdk;
pub mod strategy;

// Re-export commonly used types
pub use classify::{classify, classify_error, ErrorKind};
pub use client::{shared, AIRequestClient, GenerationFailure, ProviderTransport};
pub use prompts::MoodAnalysis;
pub use strategy::{plan_strategies, AccessPath, AttemptResult, Strategy, Transport};
