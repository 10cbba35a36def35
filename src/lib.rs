/*!
# Serene

Serene is the AI layer of a wellness journal. It asks a remote generative-AI
provider for short texts (diary reflections, motivation messages, task
suggestions, structured mood analyses) and keeps working when individual
models, API versions or access paths fail.

## Core Features

- Ordered fallback across access paths, API versions and models
- A small, stable taxonomy of user-facing failures
- Safe defaults for task suggestions and mood analysis
- One AI diary analysis per user per day, persisted in SQLite

## Architecture

- `ai`: Strategy cascade, provider access paths, prompts and the client facade
- `quota`: Daily usage limiter over a key-value store
- `db`: SQLite key-value store
- `ops`: Quota-gated operations
- `cli`: Command-line interface handling using clap
- `config`: Configuration loading and validation
- `errors`: Error handling infrastructure

## Usage Example

```rust,no_run
use chrono::Local;
use serene::ai::AIRequestClient;
use serene::ops::{analyze_entry_with_daily_quota, DailyAnalysis};
use serene::quota::{MemoryStore, RateLimiter};
use serene::Config;

fn main() -> serene::AppResult<()> {
    let config = Config::load()?;
    let client = AIRequestClient::from_config(&config);
    let limiter = RateLimiter::new(MemoryStore::new());

    let today = Local::now().date_naive();
    if let DailyAnalysis::Completed(text) =
        analyze_entry_with_daily_quota(&client, &limiter, "me", today, "Slept well.", None)?
    {
        println!("{}", text);
    }
    Ok(())
}
```
*/

/// Generative-AI client, strategy cascade and prompts
pub mod ai;
/// Command-line interface for parsing and handling user arguments
pub mod cli;
/// Configuration loading and management
pub mod config;
/// Application-wide constants
pub mod constants;
/// SQLite persistence for quota markers
pub mod db;
/// Error types and utilities for error handling
pub mod errors;
/// Quota-gated operations
pub mod ops;
/// Per-user daily usage limits
pub mod quota;

// Re-export important types for convenience
pub use ai::{AIRequestClient, ErrorKind, GenerationFailure, MoodAnalysis};
pub use cli::CliArgs;
pub use config::Config;
pub use errors::{AppError, AppResult};
pub use quota::{KeyValueStore, MemoryStore, RateLimiter};
