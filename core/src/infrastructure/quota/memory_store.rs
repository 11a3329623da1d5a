use std::{
    collections::{HashMap, HashSet},
    sync::{Mutex, PoisonError},
    time::{Duration, Instant},
};

use crate::domain::{common::entities::app_errors::CoreError, quota::ports::QuotaStore};

#[derive(Debug, Clone, Copy)]
struct Counter {
    value: u64,
    expires_at: Instant,
}

/// Single-process quota store for tests and local development.
///
/// Counters are not shared between instances.
#[derive(Debug, Default)]
pub struct MemoryQuotaStore {
    counters: Mutex<HashMap<String, Counter>>,
    flags: Mutex<HashSet<String>>,
}

impl MemoryQuotaStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl QuotaStore for MemoryQuotaStore {
    async fn get_count(&self, key: &str) -> Result<u64, CoreError> {
        let counters = self.counters.lock().unwrap_or_else(PoisonError::into_inner);
        let now = Instant::now();

        Ok(counters
            .get(key)
            .filter(|counter| counter.expires_at > now)
            .map(|counter| counter.value)
            .unwrap_or(0))
    }

    async fn increment(&self, key: &str, ttl: Duration) -> Result<u64, CoreError> {
        let mut counters = self.counters.lock().unwrap_or_else(PoisonError::into_inner);
        let now = Instant::now();

        let counter = counters.entry(key.to_string()).or_insert(Counter {
            value: 0,
            expires_at: now,
        });
        if counter.expires_at <= now {
            counter.value = 0;
        }
        counter.value += 1;
        counter.expires_at = now + ttl;

        Ok(counter.value)
    }

    async fn get_flag(&self, key: &str) -> Result<bool, CoreError> {
        Ok(self
            .flags
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(key))
    }

    async fn set_flag(&self, key: &str) -> Result<(), CoreError> {
        self.flags
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string());
        Ok(())
    }

    async fn clear_flag(&self, key: &str) -> Result<(), CoreError> {
        self.flags
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}
