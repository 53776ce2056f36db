// tests/support/mocks/cache.rs
use async_trait::async_trait;
use inkpost_core::application::{ApplicationResult, error::ApplicationError, ports::cache::Cache};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::time::Instant;

/// Expiring key/value map driven by tokio's clock, so paused-time tests can
/// move windows forward.
#[derive(Default)]
pub struct InMemoryCache {
    entries: Mutex<HashMap<String, (Vec<u8>, Instant)>>,
    down: AtomicBool,
    stalled: AtomicBool,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails while the cache is down.
    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    /// Every call hangs without answering, like a wedged server.
    pub fn set_stalled(&self, stalled: bool) {
        self.stalled.store(stalled, Ordering::SeqCst);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.live(key).is_some()
    }

    pub fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.live(key)
    }

    pub fn insert_raw(&self, key: &str, value: &[u8], ttl: Duration) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_vec(), Instant::now() + ttl));
    }

    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }

    fn live(&self, key: &str) -> Option<Vec<u8>> {
        let entries = self.entries.lock().unwrap();
        entries
            .get(key)
            .filter(|(_, expires)| *expires > Instant::now())
            .map(|(value, _)| value.clone())
    }

    async fn check_up(&self) -> ApplicationResult<()> {
        if self.stalled.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        if self.down.load(Ordering::SeqCst) {
            Err(ApplicationError::cache("connection refused"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get(&self, key: &str) -> ApplicationResult<Option<Vec<u8>>> {
        self.check_up().await?;
        Ok(self.live(key))
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> ApplicationResult<()> {
        self.check_up().await?;
        self.insert_raw(key, &value, ttl);
        Ok(())
    }

    async fn delete(&self, key: &str) -> ApplicationResult<()> {
        self.check_up().await?;
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }

    async fn incr_with_expiry(&self, key: &str, window: Duration) -> ApplicationResult<i64> {
        self.check_up().await?;
        let now = Instant::now();
        let mut entries = self.entries.lock().unwrap();
        let entry = entries
            .entry(key.to_string())
            .or_insert_with(|| (b"0".to_vec(), now + window));
        if entry.1 <= now {
            *entry = (b"0".to_vec(), now + window);
        }
        let count = String::from_utf8_lossy(&entry.0).parse::<i64>().unwrap_or(0) + 1;
        entry.0 = count.to_string().into_bytes();
        Ok(count)
    }
}
