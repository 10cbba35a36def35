//! Prompt templates and response parsers for wellness features.
//!
//! This module provides pre-defined prompts for the journal's AI features and
//! the parsers that turn the model's free text back into the shapes the caller
//! expects. Everything here is pure.

use crate::constants::{MAX_TASK_SUGGESTIONS, NEUTRAL_MOOD, NEUTRAL_SENTIMENT};
use serde::{Deserialize, Serialize};

/// Preamble shared by every wellness prompt.
///
/// This establishes the AI's role as a supportive journaling companion.
pub const SYSTEM_PROMPT: &str = r#"You are a warm and supportive wellness companion inside a personal journal.

Guidelines:
- Be empathetic, encouraging and non-judgmental
- Respect the private nature of journal entries
- Keep answers short, concrete and kind
- Never give medical diagnoses; suggest professional help for serious distress"#;

/// Structured result of a mood analysis.
///
/// Must deserialize with exactly these three fields; anything else is treated
/// as a parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MoodAnalysis {
    /// Short mood label, e.g. `calm`.
    pub mood: String,
    /// Overall sentiment: `positive`, `neutral` or `negative`.
    pub sentiment: String,
    /// A few gentle suggestions.
    pub suggestions: Vec<String>,
}

impl MoodAnalysis {
    /// The neutral default returned when the model's answer cannot be parsed.
    pub fn neutral() -> Self {
        Self {
            mood: NEUTRAL_MOOD.to_string(),
            sentiment: NEUTRAL_SENTIMENT.to_string(),
            suggestions: Vec::new(),
        }
    }
}

fn mood_line(mood: Option<&str>) -> String {
    match mood.map(str::trim).filter(|m| !m.is_empty()) {
        Some(mood) => format!("The user describes their current mood as: {}.", mood),
        None => "The user did not share their current mood.".to_string(),
    }
}

fn goals_block(goals: &[String]) -> String {
    let goals: Vec<&str> = goals
        .iter()
        .map(|g| g.trim())
        .filter(|g| !g.is_empty())
        .collect();
    if goals.is_empty() {
        "The user has not listed any goals.".to_string()
    } else {
        let list = goals
            .iter()
            .map(|g| format!("- {}", g))
            .collect::<Vec<_>>()
            .join("\n");
        format!("The user's current goals:\n{}", list)
    }
}

/// Builds the prompt for reflecting on a diary entry.
///
/// # Arguments
///
/// * `entry` - The diary entry text
/// * `mood` - Optional mood label chosen by the user
pub fn diary_analysis_prompt(entry: &str, mood: Option<&str>) -> String {
    format!(
        r#"{}

{}

Please read this diary entry and reply with a short, supportive reflection.

Entry:
---
{}
---

Focus on:
1. The main feelings expressed
2. Something positive worth noticing
3. One gentle idea for tomorrow

Keep it to one or two short paragraphs."#,
        SYSTEM_PROMPT,
        mood_line(mood),
        entry.trim()
    )
}

/// Builds the prompt for a short motivation message.
pub fn motivation_prompt(mood: Option<&str>, goals: &[String]) -> String {
    format!(
        r#"{}

{}
{}

Write one short, encouraging motivation message (at most three sentences) for today."#,
        SYSTEM_PROMPT,
        mood_line(mood),
        goals_block(goals)
    )
}

/// Builds the prompt asking for small self-care tasks.
pub fn task_suggestions_prompt(mood: Option<&str>, goals: &[String]) -> String {
    format!(
        r#"{}

{}
{}

Suggest {} small, doable tasks for today.
Reply with one task per line, numbered, without any introduction or closing text."#,
        SYSTEM_PROMPT,
        mood_line(mood),
        goals_block(goals),
        MAX_TASK_SUGGESTIONS
    )
}

/// Builds the prompt requesting a structured mood analysis as JSON.
pub fn mood_analysis_prompt(entry: &str) -> String {
    format!(
        r#"{}

Analyze the mood of this diary entry.

Entry:
---
{}
---

Reply with a single JSON object and nothing else, using exactly this shape:
{{"mood": "<one word>", "sentiment": "positive|neutral|negative", "suggestions": ["<short suggestion>"]}}"#,
        SYSTEM_PROMPT,
        entry.trim()
    )
}

/// Removes a leading list marker such as `1.`, `2)`, `-` or `*`.
///
/// A numeric marker counts only when followed by whitespace or the end of the
/// line, so `7:00 wake up` and `1.5 liters` are left alone.
fn strip_list_marker(line: &str) -> &str {
    let line = line.trim();

    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        let rest = &line[digits..];
        if rest.is_empty() {
            return rest;
        }
        let marked = rest
            .strip_prefix('.')
            .or_else(|| rest.strip_prefix(')'))
            .or_else(|| rest.strip_prefix(':'))
            .filter(|r| r.is_empty() || r.starts_with(char::is_whitespace));
        return match marked {
            Some(rest) => rest.trim_start(),
            None => line,
        };
    }

    for bullet in ['-', '*', '•'] {
        if let Some(rest) = line.strip_prefix(bullet) {
            return rest.trim_start();
        }
    }

    line
}

/// Turns a free-text task list into at most five clean entries.
///
/// Blank lines and lines consisting only of a list marker are dropped; leading
/// markers are stripped from the rest.
///
/// # Examples
///
/// ```
/// use serene::ai::prompts::parse_task_suggestions;
///
/// let tasks = parse_task_suggestions("1. Walk\n\n2) Read\n3.\n- Journal");
/// assert_eq!(tasks, vec!["Walk", "Read", "Journal"]);
/// ```
pub fn parse_task_suggestions(text: &str) -> Vec<String> {
    text.lines()
        .map(strip_list_marker)
        .filter(|line| !line.is_empty())
        .take(MAX_TASK_SUGGESTIONS)
        .map(str::to_string)
        .collect()
}

/// Parses a structured mood analysis embedded anywhere in the model's answer.
///
/// Only the first complete JSON object starting at the first `{` is read;
/// whatever follows it is ignored. Returns `None` when that object is missing,
/// malformed, or does not have exactly the three expected fields.
pub fn parse_mood_analysis(text: &str) -> Option<MoodAnalysis> {
    let start = text.find('{')?;
    serde_json::Deserializer::from_str(&text[start..])
        .into_iter::<MoodAnalysis>()
        .next()?
        .ok()
}
