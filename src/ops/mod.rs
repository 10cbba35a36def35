//! High-level operations combining the AI client with the daily quota.
//!
//! The AI client itself knows nothing about quotas; callers consult the
//! [`RateLimiter`](crate::quota::RateLimiter) before a request and record
//! usage only after it succeeds. This module packages that sequence.

pub mod analyze;

pub use analyze::{analyze_entry_with_daily_quota, DailyAnalysis};
