// src/application/resilience.rs
//! Deadlines, bounded retries and detached best-effort tasks.
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::ports::cache::Cache;
use crate::domain::errors::DomainResult;
use async_trait::async_trait;
use std::{future::Future, sync::Arc, time::Duration};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    /// Delay before the second attempt; grows linearly afterwards.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            delay: Duration::from_millis(100),
        }
    }
}

/// Run `call` until it succeeds, fails with a non-transient error, or the
/// attempt budget is spent.
pub async fn with_retry<T, F, Fut>(
    policy: RetryPolicy,
    operation: &str,
    mut call: F,
) -> ApplicationResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ApplicationResult<T>>,
{
    let attempts = policy.attempts.max(1);
    let mut attempt = 1;
    loop {
        match call().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_transient() && attempt < attempts => {
                tracing::warn!(operation, attempt, error = %err, "retrying after transient failure");
                tokio::time::sleep(policy.delay * attempt).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

/// Bound a storage call by `limit` and attach the operation name to failures.
pub async fn with_deadline<T, Fut>(
    limit: Duration,
    operation: &str,
    call: Fut,
) -> ApplicationResult<T>
where
    Fut: Future<Output = DomainResult<T>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result.map_err(|err| ApplicationError::from(err).with_context(operation)),
        Err(_) => Err(ApplicationError::infrastructure(format!(
            "{operation}: timed out after {}ms",
            limit.as_millis()
        ))),
    }
}

/// Cache decorator that gives every call a deadline. An elapsed deadline
/// surfaces as [`ApplicationError::Cache`], which callers already treat as a
/// miss.
pub struct BoundedCache {
    inner: Arc<dyn Cache>,
    limit: Duration,
}

impl BoundedCache {
    pub fn new(inner: Arc<dyn Cache>, limit: Duration) -> Self {
        Self { inner, limit }
    }

    async fn bounded<T, Fut>(&self, operation: &str, key: &str, call: Fut) -> ApplicationResult<T>
    where
        Fut: Future<Output = ApplicationResult<T>>,
    {
        match tokio::time::timeout(self.limit, call).await {
            Ok(result) => result,
            Err(_) => {
                tracing::debug!(operation, key, "cache call timed out");
                Err(ApplicationError::cache(format!(
                    "cache {operation} {key}: timed out after {}ms",
                    self.limit.as_millis()
                )))
            }
        }
    }
}

#[async_trait]
impl Cache for BoundedCache {
    async fn get(&self, key: &str) -> ApplicationResult<Option<Vec<u8>>> {
        self.bounded("get", key, self.inner.get(key)).await
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> ApplicationResult<()> {
        self.bounded("set", key, self.inner.set(key, value, ttl)).await
    }

    async fn delete(&self, key: &str) -> ApplicationResult<()> {
        self.bounded("delete", key, self.inner.delete(key)).await
    }

    async fn incr_with_expiry(&self, key: &str, window: Duration) -> ApplicationResult<i64> {
        self.bounded("incr", key, self.inner.incr_with_expiry(key, window))
            .await
    }
}

/// Detach `task`. Its failure is logged and never reaches the caller.
pub fn spawn_best_effort<F>(task: &'static str, work: F)
where
    F: Future<Output = ApplicationResult<()>> + Send + 'static,
{
    tokio::spawn(async move {
        if let Err(err) = work.await {
            tracing::warn!(task, error = %err, "background task failed");
        }
    });
}
