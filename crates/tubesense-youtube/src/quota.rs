//! Local estimate of consumed API quota.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Nominal daily quota granted to one API key.
pub const DAILY_QUOTA_LIMIT: u64 = 10_000;

/// Cost of one `search.list` call.
pub const SEARCH_COST: u64 = 100;

/// Cost of one `commentThreads.list` page.
pub const COMMENT_PAGE_COST: u64 = 1;

/// Snapshot returned to callers.
///
/// `remaining` goes negative once usage passes the nominal limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaUsage {
    pub quota_used: u64,
    pub daily_limit: u64,
    pub remaining: i64,
}

/// Monotonic in-memory quota counter. Lives as long as the process.
#[derive(Debug, Default)]
pub struct QuotaTracker {
    used: AtomicU64,
}

impl QuotaTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn charge(&self, units: u64) {
        self.used.fetch_add(units, Ordering::Relaxed);
    }

    #[must_use]
    pub fn used(&self) -> u64 {
        self.used.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn usage(&self) -> QuotaUsage {
        let quota_used = self.used();
        let used = i64::try_from(quota_used).unwrap_or(i64::MAX);
        let limit = i64::try_from(DAILY_QUOTA_LIMIT).unwrap_or(i64::MAX);
        QuotaUsage {
            quota_used,
            daily_limit: DAILY_QUOTA_LIMIT,
            remaining: limit.saturating_sub(used),
        }
    }
}
