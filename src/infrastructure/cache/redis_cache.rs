// src/infrastructure/cache/redis_cache.rs
use crate::application::ApplicationResult;
use crate::application::error::ApplicationError;
use crate::application::ports::cache::Cache;
use async_trait::async_trait;
use deadpool_redis::{Config as DeadpoolConfig, Connection, Pool, PoolConfig, Runtime, Timeouts};
use redis::AsyncCommands;
use std::time::Duration;

// INCR and the first-hit EXPIRE run as one atomic step.
const INCR_WITH_EXPIRY: &str = r"
    local count = redis.call('INCR', KEYS[1])
    if count == 1 then
        redis.call('EXPIRE', KEYS[1], ARGV[1])
    end
    return count
";

#[derive(Clone)]
pub struct RedisCache {
    pool: Pool,
}

impl RedisCache {
    /// Create a pooled cache from a redis URL (e.g. redis://:password@host:6379/0).
    /// Waiting for, opening and recycling a connection are each bounded by
    /// `timeout`.
    pub fn from_url(url: &str, timeout: Duration) -> Result<Self, ApplicationError> {
        let mut cfg = DeadpoolConfig::from_url(url);
        cfg.pool = Some(PoolConfig {
            timeouts: Timeouts {
                wait: Some(timeout),
                create: Some(timeout),
                recycle: Some(timeout),
            },
            ..PoolConfig::default()
        });
        let pool = cfg
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;

        Ok(Self { pool })
    }

    async fn connection(&self) -> ApplicationResult<Connection> {
        self.pool
            .get()
            .await
            .map_err(|err| ApplicationError::cache(err.to_string()))
    }
}

// Redis rejects an EX of zero.
fn whole_seconds(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

#[async_trait]
impl Cache for RedisCache {
    async fn get(&self, key: &str) -> ApplicationResult<Option<Vec<u8>>> {
        let mut conn = self.connection().await?;
        conn.get::<_, Option<Vec<u8>>>(key)
            .await
            .map_err(|err| ApplicationError::cache(err.to_string()))
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> ApplicationResult<()> {
        let mut conn = self.connection().await?;
        redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("EX")
            .arg(whole_seconds(ttl))
            .query_async::<()>(&mut conn)
            .await
            .map_err(|err| ApplicationError::cache(err.to_string()))
    }

    async fn delete(&self, key: &str) -> ApplicationResult<()> {
        let mut conn = self.connection().await?;
        conn.del::<_, ()>(key)
            .await
            .map_err(|err| ApplicationError::cache(err.to_string()))
    }

    async fn incr_with_expiry(&self, key: &str, window: Duration) -> ApplicationResult<i64> {
        let mut conn = self.connection().await?;
        redis::cmd("EVAL")
            .arg(INCR_WITH_EXPIRY)
            .arg(1)
            .arg(key)
            .arg(whole_seconds(window))
            .query_async::<i64>(&mut conn)
            .await
            .map_err(|err| ApplicationError::cache(err.to_string()))
    }
}
