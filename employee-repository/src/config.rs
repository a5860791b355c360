//! Configuration types for the employee store.

use std::time::Duration;

/// The default name of the employee index.
pub const DEFAULT_INDEX_NAME: &str = "employee-db";

/// Configuration for an employee store backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Name of the index holding employee documents.
    pub index_name: String,
    /// Number of times a failed request is retried before giving up.
    pub max_retries: u32,
    /// Base delay between retries. Attempt `n` waits `n * retry_backoff`.
    pub retry_backoff: Duration,
    /// Maximum number of records returned when listing.
    pub list_limit: usize,
    /// Whether writes wait for an index refresh so reads observe them.
    pub refresh_on_write: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            index_name: DEFAULT_INDEX_NAME.to_string(),
            max_retries: 3,
            retry_backoff: Duration::from_millis(100),
            list_limit: 1000,
            refresh_on_write: true,
        }
    }
}

impl StoreConfig {
    /// Create a config for the given index with default settings.
    pub fn new(index_name: impl Into<String>) -> Self {
        Self {
            index_name: index_name.into(),
            ..Default::default()
        }
    }

    /// Set the retry count.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the base retry backoff.
    pub fn with_retry_backoff(mut self, retry_backoff: Duration) -> Self {
        self.retry_backoff = retry_backoff;
        self
    }

    /// Set the list limit.
    pub fn with_list_limit(mut self, list_limit: usize) -> Self {
        self.list_limit = list_limit;
        self
    }

    /// Delay before retry number `attempt` (1-based).
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        self.retry_backoff * attempt
    }
}
