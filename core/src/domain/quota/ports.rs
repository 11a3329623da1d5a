use std::{future::Future, time::Duration};

use crate::domain::{common::entities::app_errors::CoreError, quota::entities::QuotaStatus};

/// Shared key-value store holding quota counters and subscription flags.
///
/// Every error is reported as [`CoreError::BackingStoreUnavailable`].
#[cfg_attr(test, mockall::automock)]
pub trait QuotaStore: Send + Sync {
    fn get_count(&self, key: &str) -> impl Future<Output = Result<u64, CoreError>> + Send;

    /// Atomically increments `key` and (re)sets its expiry. Returns the new value.
    fn increment(
        &self,
        key: &str,
        ttl: Duration,
    ) -> impl Future<Output = Result<u64, CoreError>> + Send;

    fn get_flag(&self, key: &str) -> impl Future<Output = Result<bool, CoreError>> + Send;

    fn set_flag(&self, key: &str) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn clear_flag(&self, key: &str) -> impl Future<Output = Result<(), CoreError>> + Send;
}

/// Per-user daily quotas with a subscription override.
///
/// Checks and increments fail open when the store is unreachable.
pub trait QuotaService: Send + Sync {
    fn is_request_allowed(&self, user_id: &str) -> impl Future<Output = bool> + Send;

    /// Charges one request. Call only after a report was actually produced.
    fn record_request(&self, user_id: &str) -> impl Future<Output = ()> + Send;

    fn is_enrichment_allowed(&self, user_id: &str) -> impl Future<Output = bool> + Send;

    fn record_enrichment(&self, user_id: &str) -> impl Future<Output = ()> + Send;

    fn grant_subscription(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn revoke_subscription(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn quota_status(&self, user_id: &str) -> impl Future<Output = QuotaStatus> + Send;
}
