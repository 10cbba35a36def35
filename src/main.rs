/*!
# Serene - AI companion for a wellness journal

Command-line front end for the serene library. Each subcommand builds a
prompt, sends it through the resilient AI client and prints the result.
Diary analysis is limited to one request per user per day.

## Usage

```
serene [OPTIONS] <COMMAND>

Commands:
  status    Show AI availability and today's analysis quota
  analyze   Analyze a diary entry (once per user per day)
  motivate  Generate a short motivation message
  suggest   Suggest up to five small tasks
  mood      Analyze the mood of a diary entry and print it as JSON

Options:
  -v, --verbose                 Print verbose output
      --log-format <FORMAT>     Log output format [default: text] [possible values: text, json]
```

## Configuration

- `SERENE_AI_API_KEY` or `GEMINI_API_KEY`: provider API key
- `SERENE_AI_BASE_URL`: provider base URL
- `SERENE_AI_API_VERSIONS`, `SERENE_AI_MODELS`: comma-separated fallback lists
- `SERENE_DB_PATH`: quota database (defaults to `~/.serene/serene.db`)
*/

use chrono::{Local, NaiveDate};
use serene::ai::{self, AIRequestClient};
use serene::cli::{CliArgs, Command};
use serene::config::Config;
use serene::constants::{DEFAULT_LOG_LEVEL, TRACING_SERVICE_NAME};
use serene::db::{Database, SqliteStore};
use serene::errors::{AppError, AppResult};
use serene::ops::{analyze_entry_with_daily_quota, DailyAnalysis};
use serene::quota::RateLimiter;
use tracing::{debug, info, info_span};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    let args = CliArgs::parse_args();
    init_tracing(args.verbose, args.json_logs());

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Installs the global subscriber writing to stderr.
///
/// `RUST_LOG` wins over `--verbose` when set.
fn init_tracing(verbose: bool, json: bool) {
    let default_level = if verbose { "debug" } else { DEFAULT_LOG_LEVEL };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

/// Runs one subcommand.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration is invalid
/// - The quota database cannot be opened
/// - A raw-text AI request fails after every strategy
fn run(args: CliArgs) -> AppResult<()> {
    let _span = info_span!("command", service = TRACING_SERVICE_NAME).entered();
    debug!("CLI arguments: {:?}", args);

    let config = Config::load()?;
    debug!("Configuration: {:?}", config);

    let client = ai::shared(&config);
    let today = Local::now().date_naive();

    match args.command {
        Command::Status { user } => status(&config, client, user.as_deref(), today),
        Command::Analyze { user, mood, text } => {
            let limiter = open_limiter(&config)?;
            match analyze_entry_with_daily_quota(
                client,
                &limiter,
                &user,
                today,
                &text,
                mood.as_deref(),
            )? {
                DailyAnalysis::Completed(analysis) => println!("{}", analysis),
                DailyAnalysis::AlreadyUsedToday => {
                    println!("You have already used today's AI analysis. Come back tomorrow.")
                }
            }
            Ok(())
        }
        Command::Motivate { mood, goals } => {
            let message = client.generate_motivation_message(mood.as_deref(), &goals)?;
            println!("{}", message);
            Ok(())
        }
        Command::Suggest { mood, goals } => {
            let tasks = client.suggest_tasks(mood.as_deref(), &goals);
            if tasks.is_empty() {
                println!("No suggestions available right now.");
            }
            for (i, task) in tasks.iter().enumerate() {
                println!("{}. {}", i + 1, task);
            }
            Ok(())
        }
        Command::Mood { text } => {
            let analysis = client.analyze_mood(&text);
            let json = serde_json::to_string_pretty(&analysis)
                .map_err(|e| AppError::Config(format!("Could not render mood analysis: {}", e)))?;
            println!("{}", json);
            Ok(())
        }
    }
}

fn open_limiter(config: &Config) -> AppResult<RateLimiter<SqliteStore>> {
    let db = Database::open(&config.db_path)?;
    db.initialize_schema()?;
    Ok(RateLimiter::new(SqliteStore::new(db)))
}

fn status(
    config: &Config,
    client: &AIRequestClient,
    user: Option<&str>,
    today: NaiveDate,
) -> AppResult<()> {
    if client.is_available() {
        println!("AI: available");
    } else {
        println!("AI: not configured");
    }
    println!("Strategies: {}", client.strategies().len());
    for strategy in client.strategies() {
        debug!("Strategy: {}", strategy);
    }

    if let Some(user) = user {
        let limiter = open_limiter(config)?;
        match limiter.used_at(user, today)? {
            Some(stamp) => println!("Daily analysis: used at {}", stamp),
            None => println!("Daily analysis: available"),
        }
    }

    info!("Status reported");
    Ok(())
}
