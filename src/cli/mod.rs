//! Command-line interface for serene.

use crate::constants::{APP_DESCRIPTION, APP_NAME, LOG_FORMAT_JSON, LOG_FORMAT_TEXT};
use clap::{Parser, Subcommand};

/// AI companion for a wellness journal
#[derive(Parser, Debug)]
#[command(name = APP_NAME, about = APP_DESCRIPTION)]
#[command(author, version, long_about = None)]
pub struct CliArgs {
    /// Print verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Log output format
    #[arg(
        long,
        global = true,
        default_value = LOG_FORMAT_TEXT,
        value_parser = [LOG_FORMAT_TEXT, LOG_FORMAT_JSON]
    )]
    pub log_format: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Show AI availability and today's analysis quota
    Status {
        /// User whose quota to report
        #[arg(short, long)]
        user: Option<String>,
    },

    /// Analyze a diary entry (once per user per day)
    Analyze {
        /// User running the analysis
        #[arg(short, long)]
        user: String,

        /// Current mood label
        #[arg(short, long)]
        mood: Option<String>,

        /// Diary entry text
        text: String,
    },

    /// Generate a short motivation message
    Motivate {
        /// Current mood label
        #[arg(short, long)]
        mood: Option<String>,

        /// A goal to keep in mind (repeatable)
        #[arg(short, long = "goal")]
        goals: Vec<String>,
    },

    /// Suggest up to five small tasks
    Suggest {
        /// Current mood label
        #[arg(short, long)]
        mood: Option<String>,

        /// A goal to keep in mind (repeatable)
        #[arg(short, long = "goal")]
        goals: Vec<String>,
    },

    /// Analyze the mood of a diary entry and print it as JSON
    Mood {
        /// Diary entry text
        text: String,
    },
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        CliArgs::parse()
    }

    /// True if JSON log output was requested.
    pub fn json_logs(&self) -> bool {
        self.log_format == LOG_FORMAT_JSON
    }
}
