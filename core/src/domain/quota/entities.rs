use std::{
    sync::atomic::{AtomicBool, Ordering},
    time::Duration,
};

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use utoipa::ToSchema;

pub const DEFAULT_DAILY_REQUEST_LIMIT: u64 = 5;
pub const DEFAULT_DAILY_ENRICHMENT_LIMIT: u64 = 10;

/// Independent per-user daily counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaCounter {
    Requests,
    Enrichments,
}

impl QuotaCounter {
    fn namespace(self) -> &'static str {
        match self {
            QuotaCounter::Requests => "limit",
            QuotaCounter::Enrichments => "external",
        }
    }

    /// Storage key for this counter, e.g. `limit:42:2024-05-01`.
    pub fn key(self, user_id: &str, day: NaiveDate) -> String {
        format!("{}:{}:{}", self.namespace(), user_id, day.format("%Y-%m-%d"))
    }
}

pub fn subscription_key(user_id: &str) -> String {
    format!("subscription:{user_id}")
}

/// Time left until the next UTC midnight, at least one second.
pub fn ttl_until_end_of_day(now: DateTime<Utc>) -> Duration {
    let next_midnight = now
        .date_naive()
        .checked_add_days(Days::new(1))
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc());

    let seconds = next_midnight
        .map(|midnight| (midnight - now).num_seconds())
        .unwrap_or(0);

    Duration::from_secs(seconds.max(1) as u64)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaLimits {
    pub daily_requests: u64,
    pub daily_enrichments: u64,
}

impl QuotaLimits {
    pub fn limit_for(&self, counter: QuotaCounter) -> u64 {
        match counter {
            QuotaCounter::Requests => self.daily_requests,
            QuotaCounter::Enrichments => self.daily_enrichments,
        }
    }
}

impl Default for QuotaLimits {
    fn default() -> Self {
        Self {
            daily_requests: DEFAULT_DAILY_REQUEST_LIMIT,
            daily_enrichments: DEFAULT_DAILY_ENRICHMENT_LIMIT,
        }
    }
}

/// Snapshot of a user's quota for today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct QuotaStatus {
    pub subscribed: bool,
    pub requests_used: u64,
    pub request_limit: u64,
    pub enrichments_used: u64,
    pub enrichment_limit: u64,
    /// Backing store unreachable; every check is currently allowed.
    pub degraded: bool,
}

/// Tracks whether the quota backing store is reachable.
///
/// Only transitions are logged, so a long outage produces one warning.
#[derive(Debug, Default)]
pub struct StoreHealth {
    degraded: AtomicBool,
}

impl StoreHealth {
    pub fn is_degraded(&self) -> bool {
        self.degraded.load(Ordering::Acquire)
    }

    pub fn mark_degraded(&self, reason: &str) {
        if self.degraded.swap(true, Ordering::AcqRel) {
            debug!(reason, "quota store still unavailable");
        } else {
            warn!(
                reason,
                "quota store unavailable, switching to fail-open mode: all quota checks allowed"
            );
        }
    }

    pub fn mark_healthy(&self) {
        if self.degraded.swap(false, Ordering::AcqRel) {
            info!("quota store reachable again, quota enforcement resumed");
        }
    }
}
