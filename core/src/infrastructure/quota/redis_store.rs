use std::{
    future::Future,
    sync::{Mutex, MutexGuard, PoisonError},
    time::{Duration, Instant},
};

use redis::{AsyncCommands, RedisError, RedisResult, aio::MultiplexedConnection};
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::domain::{common::entities::app_errors::CoreError, quota::ports::QuotaStore};

/// Redis-backed quota store shared by every API instance.
///
/// The connection is opened lazily and dropped after any transport failure,
/// so a Redis outage at startup or mid-flight recovers without a restart.
/// After a failure, calls fail fast for one `timeout` before reconnecting.
pub struct RedisQuotaStore {
    client: redis::Client,
    state: Mutex<ConnectionState>,
    timeout: Duration,
}

#[derive(Default)]
struct ConnectionState {
    connection: Option<MultiplexedConnection>,
    retry_after: Option<Instant>,
}

impl RedisQuotaStore {
    pub fn new(redis_url: &str, timeout: Duration) -> Result<Self, CoreError> {
        let client = redis::Client::open(redis_url)
            .map_err(|e| CoreError::Invalid(format!("invalid redis url: {e}")))?;

        Ok(Self {
            client,
            state: Mutex::new(ConnectionState::default()),
            timeout,
        })
    }

    fn state(&self) -> MutexGuard<'_, ConnectionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn connection(&self) -> Result<MultiplexedConnection, CoreError> {
        {
            let state = self.state();
            if let Some(connection) = state.connection.as_ref() {
                return Ok(connection.clone());
            }
            if state.retry_after.is_some_and(|at| Instant::now() < at) {
                return Err(CoreError::BackingStoreUnavailable(
                    "redis unavailable, retrying later".to_string(),
                ));
            }
        }

        // The lock is not held here, so concurrent callers wait out one timeout together.
        let connected = match timeout(self.timeout, self.client.get_multiplexed_async_connection())
            .await
        {
            Ok(Ok(connection)) => Ok(connection),
            Ok(Err(e)) => Err(CoreError::BackingStoreUnavailable(e.to_string())),
            Err(_) => Err(CoreError::BackingStoreUnavailable(
                "redis connect timed out".to_string(),
            )),
        };

        let mut state = self.state();
        match connected {
            Ok(connection) => {
                debug!("redis connection established");
                let connection = state.connection.get_or_insert(connection).clone();
                state.retry_after = None;
                Ok(connection)
            }
            Err(e) => {
                state.retry_after = Some(Instant::now() + self.timeout);
                Err(e)
            }
        }
    }

    fn disconnect(&self) {
        let mut state = self.state();
        state.connection = None;
        state.retry_after = Some(Instant::now() + self.timeout);
    }

    async fn run<T, F, Fut>(&self, operation: F) -> Result<T, CoreError>
    where
        F: FnOnce(MultiplexedConnection) -> Fut,
        Fut: Future<Output = RedisResult<T>>,
    {
        let connection = self.connection().await?;

        match timeout(self.timeout, operation(connection)).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                if is_transport_error(&e) {
                    self.disconnect();
                }
                warn!(error = %e, "redis command failed");
                Err(CoreError::BackingStoreUnavailable(e.to_string()))
            }
            Err(_) => {
                self.disconnect();
                Err(CoreError::BackingStoreUnavailable(
                    "redis command timed out".to_string(),
                ))
            }
        }
    }
}

fn is_transport_error(error: &RedisError) -> bool {
    error.is_io_error()
        || error.is_connection_dropped()
        || error.is_connection_refusal()
        || error.is_timeout()
}

impl QuotaStore for RedisQuotaStore {
    async fn get_count(&self, key: &str) -> Result<u64, CoreError> {
        let count: Option<u64> = self
            .run(|mut connection| async move { connection.get(key).await })
            .await?;

        Ok(count.unwrap_or(0))
    }

    async fn increment(&self, key: &str, ttl: Duration) -> Result<u64, CoreError> {
        let ttl_secs = ttl.as_secs().max(1);

        let (count,): (u64,) = self
            .run(|mut connection| async move {
                redis::pipe()
                    .atomic()
                    .incr(key, 1u64)
                    .cmd("EXPIRE")
                    .arg(key)
                    .arg(ttl_secs)
                    .ignore()
                    .query_async(&mut connection)
                    .await
            })
            .await?;

        Ok(count)
    }

    async fn get_flag(&self, key: &str) -> Result<bool, CoreError> {
        self.run(|mut connection| async move { connection.exists(key).await })
            .await
    }

    async fn set_flag(&self, key: &str) -> Result<(), CoreError> {
        self.run(|mut connection| async move { connection.set(key, 1u8).await })
            .await
    }

    async fn clear_flag(&self, key: &str) -> Result<(), CoreError> {
        let _: u64 = self
            .run(|mut connection| async move { connection.del(key).await })
            .await?;
        Ok(())
    }
}
