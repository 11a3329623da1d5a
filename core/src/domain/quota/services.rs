use chrono::Utc;
use tracing::{info, instrument};

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    enrichment::ports::IngredientLookup,
    quota::{
        entities::{QuotaCounter, QuotaStatus, subscription_key, ttl_until_end_of_day},
        ports::{QuotaService, QuotaStore},
    },
};

impl<QS, IL> Service<QS, IL>
where
    QS: QuotaStore,
    IL: IngredientLookup,
{
    async fn is_subscribed(&self, user_id: &str) -> Result<bool, CoreError> {
        self.quota_store.get_flag(&subscription_key(user_id)).await
    }

    async fn used_today(&self, user_id: &str, counter: QuotaCounter) -> Result<u64, CoreError> {
        let key = counter.key(user_id, Utc::now().date_naive());
        self.quota_store.get_count(&key).await
    }

    async fn counter_allows(&self, user_id: &str, counter: QuotaCounter) -> Result<bool, CoreError> {
        if self.is_subscribed(user_id).await? {
            return Ok(true);
        }

        let used = self.used_today(user_id, counter).await?;
        Ok(used < self.limits.limit_for(counter))
    }

    /// Store failures resolve to "allowed" and flip the service into degraded mode.
    async fn check_counter(&self, user_id: &str, counter: QuotaCounter) -> bool {
        match self.counter_allows(user_id, counter).await {
            Ok(allowed) => {
                self.store_health.mark_healthy();
                if !allowed {
                    info!(user_id, ?counter, "daily quota exhausted");
                }
                allowed
            }
            Err(err) => {
                self.store_health.mark_degraded(&err.to_string());
                true
            }
        }
    }

    async fn charge_counter(&self, user_id: &str, counter: QuotaCounter) {
        let now = Utc::now();
        let key = counter.key(user_id, now.date_naive());

        match self
            .quota_store
            .increment(&key, ttl_until_end_of_day(now))
            .await
        {
            Ok(_) => self.store_health.mark_healthy(),
            Err(err) => self.store_health.mark_degraded(&err.to_string()),
        }
    }
}

impl<QS, IL> QuotaService for Service<QS, IL>
where
    QS: QuotaStore,
    IL: IngredientLookup,
{
    #[instrument(skip(self))]
    async fn is_request_allowed(&self, user_id: &str) -> bool {
        self.check_counter(user_id, QuotaCounter::Requests).await
    }

    #[instrument(skip(self))]
    async fn record_request(&self, user_id: &str) {
        self.charge_counter(user_id, QuotaCounter::Requests).await
    }

    #[instrument(skip(self))]
    async fn is_enrichment_allowed(&self, user_id: &str) -> bool {
        self.check_counter(user_id, QuotaCounter::Enrichments).await
    }

    #[instrument(skip(self))]
    async fn record_enrichment(&self, user_id: &str) {
        self.charge_counter(user_id, QuotaCounter::Enrichments).await
    }

    #[instrument(skip(self))]
    async fn grant_subscription(&self, user_id: &str) -> Result<(), CoreError> {
        self.quota_store
            .set_flag(&subscription_key(user_id))
            .await
            .inspect_err(|err| self.store_health.mark_degraded(&err.to_string()))?;

        self.store_health.mark_healthy();
        info!("subscription granted");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn revoke_subscription(&self, user_id: &str) -> Result<(), CoreError> {
        self.quota_store
            .clear_flag(&subscription_key(user_id))
            .await
            .inspect_err(|err| self.store_health.mark_degraded(&err.to_string()))?;

        self.store_health.mark_healthy();
        info!("subscription revoked");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn quota_status(&self, user_id: &str) -> QuotaStatus {
        let snapshot = async {
            let subscribed = self.is_subscribed(user_id).await?;
            let requests_used = self.used_today(user_id, QuotaCounter::Requests).await?;
            let enrichments_used = self.used_today(user_id, QuotaCounter::Enrichments).await?;
            Ok::<_, CoreError>((subscribed, requests_used, enrichments_used))
        };

        let (subscribed, requests_used, enrichments_used) = match snapshot.await {
            Ok(values) => {
                self.store_health.mark_healthy();
                values
            }
            Err(err) => {
                self.store_health.mark_degraded(&err.to_string());
                (false, 0, 0)
            }
        };

        QuotaStatus {
            subscribed,
            requests_used,
            request_limit: self.limits.daily_requests,
            enrichments_used,
            enrichment_limit: self.limits.daily_enrichments,
            degraded: self.store_health.is_degraded(),
        }
    }
}
