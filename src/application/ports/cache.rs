// src/application/ports/cache.rs
use crate::application::ApplicationResult;
use async_trait::async_trait;
use std::time::Duration;

/// Byte-oriented key/value cache with per-entry expiry.
///
/// Entries are advisory: callers must be able to rebuild any value from the
/// source of truth.
#[async_trait]
pub trait Cache: Send + Sync {
    async fn get(&self, key: &str) -> ApplicationResult<Option<Vec<u8>>>;
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> ApplicationResult<()>;
    async fn delete(&self, key: &str) -> ApplicationResult<()>;
    /// Increment the counter at `key`. The first increment of a window sets
    /// the expiry to `window`; later ones leave it alone. Returns the new count.
    async fn incr_with_expiry(&self, key: &str, window: Duration) -> ApplicationResult<i64>;
}
