//! Quota-gated diary analysis.

use crate::ai::AIRequestClient;
use crate::errors::{AppError, AppResult};
use crate::quota::{KeyValueStore, RateLimiter};
use chrono::NaiveDate;
use tracing::info;

/// Outcome of a quota-gated analysis request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DailyAnalysis {
    /// The provider answered; the day's allowance is now spent.
    Completed(String),
    /// The user already analyzed an entry today; nothing was sent.
    AlreadyUsedToday,
}

/// Analyzes a diary entry if `user_id` still has today's allowance.
///
/// # Flow
///
/// 1. Ask the limiter whether the user may analyze today
/// 2. Run the diary analysis through the AI client
/// 3. Mark the allowance used, only after a successful response
///
/// A failed request leaves the allowance untouched so the user can retry.
///
/// # Errors
///
/// Returns `AppError::Generation` carrying the classified failure if every
/// strategy failed.
pub fn analyze_entry_with_daily_quota<S: KeyValueStore>(
    client: &AIRequestClient,
    limiter: &RateLimiter<S>,
    user_id: &str,
    today: NaiveDate,
    entry: &str,
    mood: Option<&str>,
) -> AppResult<DailyAnalysis> {
    if !limiter.can_use(user_id, today) {
        info!("Daily AI analysis already used");
        return Ok(DailyAnalysis::AlreadyUsedToday);
    }

    let analysis = client
        .analyze_diary_entry(entry, mood)
        .map_err(AppError::Generation)?;

    limiter.mark_used(user_id, today);
    info!("Diary analysis completed");
    Ok(DailyAnalysis::Completed(analysis))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::strategy::tests::{full_plan, Reply, ScriptedTransport};
    use crate::ai::ErrorKind;
    use crate::quota::MemoryStore;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn client(transport: ScriptedTransport) -> AIRequestClient {
        AIRequestClient::with_transport(Box::new(transport), full_plan(), true)
    }

    #[test]
    fn test_success_spends_allowance() {
        let client = client(
            ScriptedTransport::new().reply("sdk/v1/flash", Reply::Text("Well done today.")),
        );
        let limiter = RateLimiter::new(MemoryStore::new());

        let first =
            analyze_entry_with_daily_quota(&client, &limiter, "u1", today(), "Ran 5k.", None)
                .unwrap();
        assert_eq!(first, DailyAnalysis::Completed("Well done today.".to_string()));

        let second =
            analyze_entry_with_daily_quota(&client, &limiter, "u1", today(), "Again.", None)
                .unwrap();
        assert_eq!(second, DailyAnalysis::AlreadyUsedToday);
    }

    #[test]
    fn test_failure_keeps_allowance() {
        let client = client(
            ScriptedTransport::new().reply("rest/v1beta/pro", Reply::Fail("deadline exceeded")),
        );
        let limiter = RateLimiter::new(MemoryStore::new());

        let err = analyze_entry_with_daily_quota(&client, &limiter, "u1", today(), "Entry", None)
            .unwrap_err();
        match err {
            AppError::Generation(failure) => assert_eq!(failure.kind, ErrorKind::Timeout),
            other => panic!("Expected Generation error, got {:?}", other),
        }
        assert!(limiter.can_use("u1", today()));
    }

    #[test]
    fn test_spent_allowance_sends_nothing() {
        let transport =
            ScriptedTransport::new().reply("sdk/v1/flash", Reply::Text("Should not be sent."));
        let limiter = RateLimiter::new(MemoryStore::new());
        limiter.mark_used("u1", today());
        let client = client(transport);

        let outcome =
            analyze_entry_with_daily_quota(&client, &limiter, "u1", today(), "Entry", None)
                .unwrap();
        assert_eq!(outcome, DailyAnalysis::AlreadyUsedToday);
    }
}
