//! Per-user daily allowance for AI analysis.
//!
//! A user may run one AI diary analysis per calendar day. Usage is recorded as
//! a marker under the key `ai_analysis_{user_id}_{YYYY-MM-DD}` whose value is
//! the RFC 3339 time of use. Markers are never deleted; a new day simply means
//! a new key.
//!
//! The limiter fails closed on read errors (usage is denied) and swallows
//! write errors after logging them (at worst one extra free use).

use crate::constants::{DATE_FORMAT_ISO, QUOTA_KEY_PREFIX};
use crate::errors::{AppResult, DatabaseError};
use chrono::{NaiveDate, SecondsFormat, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, warn};

/// Minimal string key-value persistence.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> AppResult<()>;
}

/// In-process store, useful for tests and for running without a database.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| DatabaseError::Custom("memory store lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| DatabaseError::Custom("memory store lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Builds the persistence key for a user's quota marker on `date`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use serene::quota::quota_key;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
/// assert_eq!(quota_key("user42", date), "ai_analysis_user42_2024-03-09");
/// ```
pub fn quota_key(user_id: &str, date: NaiveDate) -> String {
    format!(
        "{}_{}_{}",
        QUOTA_KEY_PREFIX,
        user_id,
        date.format(DATE_FORMAT_ISO)
    )
}

/// Daily usage gate for AI analysis.
pub struct RateLimiter<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> RateLimiter<S> {
    /// Creates a limiter over `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// True iff `user_id` has not used AI analysis on `today`.
    ///
    /// Returns false if the store cannot be read.
    pub fn can_use(&self, user_id: &str, today: NaiveDate) -> bool {
        let key = quota_key(user_id, today);
        match self.store.get(&key) {
            Ok(Some(_)) => {
                debug!("Daily AI quota already used for {}", today);
                false
            }
            Ok(None) => true,
            Err(e) => {
                warn!("Could not read quota marker, denying usage: {}", e);
                false
            }
        }
    }

    /// Records that `user_id` used AI analysis on `today`.
    ///
    /// Idempotent. Store failures are logged and ignored.
    pub fn mark_used(&self, user_id: &str, today: NaiveDate) {
        let key = quota_key(user_id, today);
        let stamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        if let Err(e) = self.store.set(&key, &stamp) {
            warn!("Could not record quota marker: {}", e);
        }
    }

    /// Returns when `user_id` used AI analysis on `today`, if they did.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn used_at(&self, user_id: &str, today: NaiveDate) -> AppResult<Option<String>> {
        self.store.get(&quota_key(user_id, today))
    }
}
